// ABOUTME: Tests for the generic list store and the page-scoped stats
// ABOUTME: Stale response discarding, fetch/mutation error handling, paging and filter resets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use common::{api_path, create_signed_in_client};
use dispatch_admin::clients::CouponClient;
use dispatch_admin::errors::{AppError, AppResult, ErrorCode};
use dispatch_admin::pagination::{ListPage, ListQuery, Pagination};
use dispatch_admin::state::{
    AdminStats, BookingStats, CouponStats, CouponsStore, ListResource, ResourceStore, TicketStats,
};
use serde_json::{json, Value};
use tokio::sync::oneshot;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

type Gate = oneshot::Receiver<AppResult<ListPage<Value>>>;

/// In-memory ticket collection with scriptable list responses
#[derive(Default)]
struct FakeTickets {
    records: Mutex<Vec<Value>>,
    gates: Mutex<VecDeque<Gate>>,
    queries: Mutex<Vec<ListQuery>>,
    fail_list: AtomicBool,
    fail_mutations: AtomicBool,
}

impl FakeTickets {
    fn with_records(records: Vec<Value>) -> Self {
        let fake = Self::default();
        *fake.records.lock().unwrap() = records;
        fake
    }

    fn gate(&self) -> oneshot::Sender<AppResult<ListPage<Value>>> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push_back(rx);
        tx
    }

    fn list_calls(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    fn last_query(&self) -> ListQuery {
        self.queries.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl ListResource for FakeTickets {
    type Stats = TicketStats;

    fn name(&self) -> &'static str {
        "tickets"
    }

    fn default_limit(&self) -> u32 {
        10
    }

    async fn list(&self, query: &ListQuery) -> AppResult<ListPage<Value>> {
        self.queries.lock().unwrap().push(query.clone());
        let gate = self.gates.lock().unwrap().pop_front();
        if let Some(gate) = gate {
            return gate.await.unwrap();
        }
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(AppError::internal("Ticket index unavailable"));
        }
        let items = self.records.lock().unwrap().clone();
        let pagination = Pagination::for_items(
            query.page_number().unwrap_or(1),
            query.limit_value().unwrap_or(10),
            items.len(),
        );
        Ok(ListPage::new(items, pagination))
    }

    async fn create(&self, payload: &Value) -> AppResult<Value> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(AppError::invalid_input("Subject is required"));
        }
        self.records.lock().unwrap().push(payload.clone());
        Ok(payload.clone())
    }

    async fn update(&self, id: &str, payload: &Value) -> AppResult<Value> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(AppError::not_found(format!("Ticket {id}")));
        }
        let mut records = self.records.lock().unwrap();
        for record in records.iter_mut().filter(|r| r["_id"] == id) {
            *record = payload.clone();
        }
        Ok(payload.clone())
    }

    async fn delete(&self, id: &str) -> AppResult<Value> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(AppError::not_found(format!("Ticket {id}")));
        }
        self.records.lock().unwrap().retain(|r| r["_id"] != id);
        Ok(json!({"success": true}))
    }

    fn page_stats(&self, items: &[Value]) -> TicketStats {
        TicketStats::from_page(items)
    }
}

fn ticket(id: &str, status: &str, priority: &str) -> Value {
    json!({"_id": id, "status": status, "priority": priority})
}

fn page_of(ids: &[&str]) -> ListPage<Value> {
    let items: Vec<Value> = ids.iter().map(|id| ticket(id, "open", "low")).collect();
    let pagination = Pagination::for_items(1, 10, items.len());
    ListPage::new(items, pagination)
}

#[tokio::test]
async fn test_new_store_is_idle_on_page_one() {
    let store = ResourceStore::new(FakeTickets::default());
    let snapshot = store.snapshot().await;

    assert!(snapshot.items.is_empty());
    assert!(!snapshot.loading);
    assert!(snapshot.error.is_none());
    assert_eq!(snapshot.query.page_number(), Some(1));
    assert_eq!(snapshot.query.limit_value(), Some(10));
    assert_eq!(snapshot.stats, TicketStats::default());
}

#[tokio::test]
async fn test_fetch_loads_page_and_stats() {
    let store = ResourceStore::new(FakeTickets::with_records(vec![
        ticket("t1", "Open", "High"),
        ticket("t2", "resolved", "low"),
        ticket("t3", "open", "urgent"),
    ]));
    store.fetch(&ListQuery::new().with("status", "open")).await;

    let snapshot = store.snapshot().await;
    assert!(!snapshot.loading);
    assert_eq!(snapshot.items.len(), 3);
    assert_eq!(snapshot.pagination.total, 3);
    assert_eq!(snapshot.query.get("status"), Some("open"));
    assert_eq!(
        snapshot.stats,
        TicketStats {
            total: 3,
            open: 2,
            in_progress: 0,
            resolved: 1,
            closed: 0,
            high_priority: 2,
        }
    );
}

#[tokio::test]
async fn test_stale_response_is_discarded() {
    let store = Arc::new(ResourceStore::new(FakeTickets::default()));
    let older = store.resource().gate();
    let newer = store.resource().gate();

    let first = {
        let store = store.clone();
        tokio::spawn(async move { store.fetch(&ListQuery::new().page(1)).await })
    };
    while store.resource().list_calls() < 1 {
        tokio::task::yield_now().await;
    }
    let second = {
        let store = store.clone();
        tokio::spawn(async move { store.fetch(&ListQuery::new().page(2)).await })
    };
    while store.resource().list_calls() < 2 {
        tokio::task::yield_now().await;
    }

    newer.send(Ok(page_of(&["new-1", "new-2"]))).unwrap();
    second.await.unwrap();
    older.send(Ok(page_of(&["old-1"]))).unwrap();
    first.await.unwrap();

    let snapshot = store.snapshot().await;
    let ids: Vec<_> = snapshot.items.iter().map(|r| r["_id"].clone()).collect();
    assert_eq!(ids, [json!("new-1"), json!("new-2")]);
    assert!(!snapshot.loading);
    assert_eq!(snapshot.query.page_number(), Some(2));
}

#[tokio::test]
async fn test_stale_failure_does_not_clobber_newer_page() {
    let store = Arc::new(ResourceStore::new(FakeTickets::default()));
    let older = store.resource().gate();
    let newer = store.resource().gate();

    let first = {
        let store = store.clone();
        tokio::spawn(async move { store.fetch(&ListQuery::new()).await })
    };
    while store.resource().list_calls() < 1 {
        tokio::task::yield_now().await;
    }
    let second = {
        let store = store.clone();
        tokio::spawn(async move { store.refresh().await })
    };
    while store.resource().list_calls() < 2 {
        tokio::task::yield_now().await;
    }

    newer.send(Ok(page_of(&["fresh"]))).unwrap();
    second.await.unwrap();
    older.send(Err(AppError::internal("late failure"))).unwrap();
    first.await.unwrap();

    let snapshot = store.snapshot().await;
    assert_eq!(snapshot.items.len(), 1);
    assert!(snapshot.error.is_none());
}

#[tokio::test]
async fn test_fetch_failure_empties_list_and_records_message() {
    let store = ResourceStore::new(FakeTickets::with_records(vec![ticket("t1", "open", "low")]));
    store.refresh().await;
    assert_eq!(store.snapshot().await.items.len(), 1);

    store.resource().fail_list.store(true, Ordering::SeqCst);
    store.refresh().await;

    let snapshot = store.snapshot().await;
    assert!(snapshot.items.is_empty());
    assert!(!snapshot.loading);
    assert_eq!(snapshot.error.as_deref(), Some("Ticket index unavailable"));

    store.clear_error().await;
    assert!(store.snapshot().await.error.is_none());
}

#[tokio::test]
async fn test_successful_mutation_refetches_with_held_query() {
    let store = ResourceStore::new(FakeTickets::with_records(vec![ticket("t1", "open", "low")]));
    store.fetch(&ListQuery::new().with("priority", "low")).await;

    store
        .create(&ticket("t2", "open", "high"))
        .await
        .unwrap();

    let snapshot = store.snapshot().await;
    assert_eq!(snapshot.items.len(), 2);
    assert_eq!(snapshot.stats.high_priority, 1);
    assert_eq!(store.resource().list_calls(), 2);
    assert_eq!(store.resource().last_query().get("priority"), Some("low"));

    store.delete("t1").await.unwrap();
    assert_eq!(store.snapshot().await.items.len(), 1);
}

#[tokio::test]
async fn test_failed_mutation_empties_list_and_returns_error() {
    let store = ResourceStore::new(FakeTickets::with_records(vec![ticket("t1", "open", "low")]));
    store.refresh().await;
    store.resource().fail_mutations.store(true, Ordering::SeqCst);

    let err = store
        .update("t1", &ticket("t1", "closed", "low"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Ticket t1 not found");

    let snapshot = store.snapshot().await;
    assert!(snapshot.items.is_empty());
    assert!(!snapshot.loading);
    assert_eq!(snapshot.error.as_deref(), Some("Ticket t1 not found"));
    assert_eq!(snapshot.stats, TicketStats::default());
    assert_eq!(store.resource().list_calls(), 1);

    let err = store.delete("t1").await.unwrap_err();
    assert_eq!(err.to_string(), "Ticket t1 not found");
    assert!(store.snapshot().await.items.is_empty());
}

#[tokio::test]
async fn test_coupon_store_failed_update_drops_loaded_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/coupons/all")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "coupons": [{"_id": "c1", "code": "A", "status": "Active"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(api_path("/coupons/c1")))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "Coupon storage offline"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (api, _store) = create_signed_in_client(&server.uri());
    let store = CouponsStore::new(CouponClient::new(api));
    store.refresh().await;
    assert_eq!(store.snapshot().await.items.len(), 1);

    let err = store
        .update("c1", &json!({"discountValue": 15}))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Coupon storage offline");

    let snapshot = store.snapshot().await;
    assert!(snapshot.items.is_empty());
    assert_eq!(snapshot.error.as_deref(), Some("Coupon storage offline"));
    assert_eq!(snapshot.stats, CouponStats::default());
}

#[tokio::test]
async fn test_filter_resets_page_and_change_page_keeps_filters() {
    let store = ResourceStore::new(FakeTickets::default());
    store.change_page(4).await;
    assert_eq!(store.resource().last_query().page_number(), Some(4));

    store.filter(&ListQuery::new().with("status", "closed")).await;
    let query = store.resource().last_query();
    assert_eq!(query.page_number(), Some(1));
    assert_eq!(query.get("status"), Some("closed"));

    store.change_page(2).await;
    let query = store.resource().last_query();
    assert_eq!(query.page_number(), Some(2));
    assert_eq!(query.get("status"), Some("closed"));
    assert_eq!(query.limit_value(), Some(10));
}

#[tokio::test]
async fn test_coupon_store_reads_passthrough_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/coupons/all")))
        .and(query_param("page", "1"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "coupons": [
                    {"_id": "c1", "code": "A", "status": "Active"},
                    {"_id": "c2", "code": "B", "isActive": false},
                    {"_id": "c3", "code": "C", "isExpired": true}
                ],
                "pagination": {"currentPage": 1, "limit": 10, "totalItems": 23, "totalPages": 3}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (api, _store) = create_signed_in_client(&server.uri());
    let store = CouponsStore::new(CouponClient::new(api));
    store.refresh().await;

    let snapshot = store.snapshot().await;
    assert!(snapshot.error.is_none());
    assert_eq!(snapshot.items.len(), 3);
    assert_eq!(snapshot.pagination.total, 23);
    assert_eq!(snapshot.pagination.pages, 3);
    assert_eq!(
        snapshot.stats,
        CouponStats {
            total: 3,
            active: 1,
            inactive: 1,
            expired: 1
        }
    );
}

#[tokio::test]
async fn test_snapshot_failure_reports_recorded_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/coupons/all")))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"error": "Coupon index rebuilding"})),
        )
        .mount(&server)
        .await;

    let (api, _store) = create_signed_in_client(&server.uri());
    let store = CouponsStore::new(CouponClient::new(api));
    assert!(store.snapshot().await.failure().is_none());

    store.fetch(&ListQuery::new().with("status", "Active")).await;
    let snapshot = store.snapshot().await;
    let err = snapshot.failure().unwrap();
    assert_eq!(err.code, ErrorCode::BackendError);
    assert_eq!(err.to_string(), "Coupon index rebuilding");
    assert_eq!(snapshot.error_code, Some(ErrorCode::BackendError));

    store.clear_error().await;
    let snapshot = store.snapshot().await;
    assert!(snapshot.failure().is_none());
    assert!(snapshot.error_code.is_none());
}

#[tokio::test]
async fn test_snapshot_failure_keeps_fake_resource_code() {
    let store = ResourceStore::new(FakeTickets::default());
    store.resource().fail_list.store(true, Ordering::SeqCst);
    store.refresh().await;

    let err = store.snapshot().await.failure().unwrap();
    assert_eq!(err.code, ErrorCode::InternalError);
    assert_eq!(err.to_string(), "Ticket index unavailable");
}

#[test]
fn test_booking_stats_revenue_counts_completed_only() {
    let stats = BookingStats::from_page(&[
        json!({"status": "Completed", "totalFare": 120.5}),
        json!({"bookingStatus": "completed", "fare": "79.5"}),
        json!({"status": "Cancelled", "totalFare": 300}),
        json!({"status": "pending"}),
        json!({"status": "Accepted"}),
        json!({"status": "ongoing"}),
    ]);

    assert_eq!(stats.total, 6);
    assert_eq!(stats.completed, 2);
    assert_eq!(stats.cancelled, 1);
    assert_eq!(stats.pending, 1);
    assert_eq!(stats.confirmed, 1);
    assert_eq!(stats.in_progress, 1);
    assert!((stats.revenue - 200.0).abs() < f64::EPSILON);
}

#[test]
fn test_admin_stats_defaults_to_active() {
    let stats = AdminStats::from_page(&[
        json!({"role": "super_admin"}),
        json!({"role": "admin", "isActive": false}),
        json!({"role": "admin", "status": "Suspended"}),
    ]);
    assert_eq!(
        stats,
        AdminStats {
            total: 3,
            active: 1,
            inactive: 2,
            super_admins: 1
        }
    );
}
