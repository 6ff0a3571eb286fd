// ABOUTME: ListResource implementations binding the resource clients to list stores
// ABOUTME: Extracts records and pagination from each client's passthrough list body
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

use async_trait::async_trait;
use serde_json::Value;

use super::stats::{AdminStats, BookingStats, CouponStats, TicketStats};
use super::store::ListResource;
use crate::clients::auth::ADMINS_COLLECTION;
use crate::clients::{AuthClient, BookingClient, CouponClient, TicketClient};
use crate::errors::AppResult;
use crate::http::extract_list;
use crate::pagination::{ListPage, ListQuery};

#[async_trait]
impl ListResource for AuthClient {
    type Stats = AdminStats;

    fn name(&self) -> &'static str {
        "admins"
    }

    fn default_limit(&self) -> u32 {
        self.api().config().default_page_limit
    }

    async fn list(&self, query: &ListQuery) -> AppResult<ListPage<Value>> {
        let body = self.get_all_admins(query).await?;
        Ok(extract_list(
            &body,
            &[ADMINS_COLLECTION, "users"],
            query,
            self.default_limit(),
        ))
    }

    async fn create(&self, payload: &Value) -> AppResult<Value> {
        self.create_admin(payload).await
    }

    async fn update(&self, id: &str, payload: &Value) -> AppResult<Value> {
        self.update_admin(id, payload).await
    }

    async fn delete(&self, id: &str) -> AppResult<Value> {
        self.delete_admin(id).await
    }

    fn page_stats(&self, items: &[Value]) -> AdminStats {
        AdminStats::from_page(items)
    }
}

/// Implements `ListResource` for a client built on `ResourceApi`
macro_rules! crud_list_resource {
    ($client:ty, $stats:ty, $list:ident, $create:ident, $update:ident, $delete:ident) => {
        #[async_trait]
        impl ListResource for $client {
            type Stats = $stats;

            fn name(&self) -> &'static str {
                self.resource().collection()
            }

            fn default_limit(&self) -> u32 {
                self.resource().api().config().default_page_limit
            }

            async fn list(&self, query: &ListQuery) -> AppResult<ListPage<Value>> {
                let body = self.$list(query).await?;
                Ok(extract_list(
                    &body,
                    &[self.resource().collection()],
                    query,
                    self.default_limit(),
                ))
            }

            async fn create(&self, payload: &Value) -> AppResult<Value> {
                self.$create(payload).await
            }

            async fn update(&self, id: &str, payload: &Value) -> AppResult<Value> {
                self.$update(id, payload).await
            }

            async fn delete(&self, id: &str) -> AppResult<Value> {
                self.$delete(id).await
            }

            fn page_stats(&self, items: &[Value]) -> $stats {
                <$stats>::from_page(items)
            }
        }
    };
}

crud_list_resource!(
    BookingClient,
    BookingStats,
    get_all_bookings,
    create_booking,
    update_booking,
    delete_booking
);
crud_list_resource!(
    CouponClient,
    CouponStats,
    get_all_coupons,
    create_coupon,
    update_coupon,
    delete_coupon
);
crud_list_resource!(
    TicketClient,
    TicketStats,
    get_all_tickets,
    create_ticket,
    update_ticket,
    delete_ticket
);
