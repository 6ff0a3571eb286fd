// ABOUTME: Driver client over the rider collection with user-collection fallback
// ABOUTME: Rider endpoint first, user endpoint only when the first fails; results never merged
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

//! Driver client
//!
//! The backend exposes drivers both as riders (`/riders/...`) and as users
//! with `role=rider` (`/dev/...`). Operations that exist on both run through
//! [`ApiClient::try_in_order`] with the rider endpoint first.

use serde_json::Value;
use tracing::debug;

use super::degrade_read;
use crate::constants::driver_fallbacks::RIDER_ROLE;
use crate::constants::endpoints::drivers;
use crate::errors::AppResult;
use crate::http::{extract_list, unwrap_payload, ApiClient, ApiRequest, MultipartField};
use crate::models::{DocumentDecision, Driver};
use crate::pagination::{ListPage, ListQuery};
use crate::transform::{transform_driver_data, transform_driver_list};

/// Keys a driver list may be returned under
const DRIVER_COLLECTIONS: &[&str] = &["riders", "drivers", "users"];

/// A 2xx body counts as handled unless it says `success: false`
fn accept_success(body: Value) -> Option<Value> {
    if body.get("success").and_then(Value::as_bool) == Some(false) {
        None
    } else {
        Some(body)
    }
}

/// The record inside a by-id response, if it carries an id
fn driver_record(body: &Value) -> Option<&Value> {
    if body.get("success").and_then(Value::as_bool) == Some(false) {
        return None;
    }
    let record = unwrap_payload(unwrap_payload(body, &["data"]), &["rider", "user", "driver"]);
    let has_id = record.get("_id").is_some() || record.get("id").is_some();
    has_id.then_some(record)
}

/// Driver client
#[derive(Clone)]
pub struct DriverClient {
    api: ApiClient,
}

impl DriverClient {
    /// Create a driver client
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Underlying transport
    #[must_use]
    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    /// List drivers as canonical records (read path)
    ///
    /// Falls back to the user collection filtered by `role=rider` when the
    /// rider list fails or is empty.
    ///
    /// # Errors
    ///
    /// Returns the last backend error; transport failures resolve to an empty page
    pub async fn get_all_drivers(&self, query: &ListQuery) -> AppResult<ListPage<Driver>> {
        let limit = query
            .limit_value()
            .unwrap_or(self.api.config().default_page_limit);
        let candidates = [
            ApiRequest::get(drivers::RIDER_LIST).query(query.clone()),
            ApiRequest::get(drivers::USER_LIST)
                .query(ListQuery::new().with("role", RIDER_ROLE).merged_over(query)),
        ];

        let mut empty_page = None;
        let result = self
            .api
            .try_in_order("Drivers", &candidates, |body| {
                let page = extract_list(&body, DRIVER_COLLECTIONS, query, limit);
                if page.is_empty() {
                    empty_page = Some(page);
                    None
                } else {
                    Some(page)
                }
            })
            .await;

        let page = match (result, empty_page) {
            (Ok(page), _) => Ok(page),
            (Err(e), Some(empty)) if !e.is_transport() => {
                debug!(error = %e, "No driver records on either collection");
                Ok(empty)
            }
            (Err(e), _) => Err(e),
        };

        degrade_read(drivers::RIDER_LIST, page, || ListPage::empty(limit)).map(|page| {
            ListPage::new(transform_driver_list(&page.items), page.pagination)
        })
    }

    /// Fetch one driver, rider collection first
    ///
    /// # Errors
    ///
    /// Returns the last backend error, or not-found when neither collection
    /// has the record
    pub async fn get_driver_by_id(&self, id: &str) -> AppResult<Driver> {
        let candidates = [
            ApiRequest::get(drivers::RIDER_BY_ID).id(id),
            ApiRequest::get(drivers::USER_BY_ID).id(id),
        ];
        let record = self
            .api
            .try_in_order(&format!("Driver {id}"), &candidates, |body| {
                driver_record(&body).cloned()
            })
            .await?;
        transform_driver_data(&record)
    }

    /// Create a driver
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn create_driver(&self, payload: &Value) -> AppResult<Value> {
        self.api
            .execute_json(&ApiRequest::post(drivers::CREATE).json(payload.clone()))
            .await
    }

    /// Update a driver through the user collection
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn update_driver(&self, id: &str, payload: &Value) -> AppResult<Value> {
        self.api
            .execute_json(
                &ApiRequest::put(drivers::USER_BY_ID)
                    .id(id)
                    .json(payload.clone()),
            )
            .await
    }

    /// Delete a driver, rider collection first
    ///
    /// # Errors
    ///
    /// Returns the last backend or transport error
    pub async fn delete_driver(&self, id: &str) -> AppResult<Value> {
        let candidates = [
            ApiRequest::delete(drivers::RIDER_BY_ID).id(id),
            ApiRequest::delete(drivers::USER_BY_ID).id(id),
        ];
        self.api
            .try_in_order(&format!("Driver {id}"), &candidates, accept_success)
            .await
    }

    /// Block a driver, rider collection first
    ///
    /// # Errors
    ///
    /// Returns the last backend or transport error
    pub async fn block_driver(&self, id: &str) -> AppResult<Value> {
        self.patch_both(drivers::RIDER_BLOCK, drivers::USER_BLOCK, id)
            .await
    }

    /// Unblock a driver, rider collection first
    ///
    /// # Errors
    ///
    /// Returns the last backend or transport error
    pub async fn unblock_driver(&self, id: &str) -> AppResult<Value> {
        self.patch_both(drivers::RIDER_UNBLOCK, drivers::USER_UNBLOCK, id)
            .await
    }

    /// Approve one document
    ///
    /// # Errors
    ///
    /// Returns the last backend or transport error
    pub async fn approve_document(&self, id: &str, doc_type: &str) -> AppResult<Value> {
        self.decide_document(
            drivers::RIDER_DOCUMENT_APPROVE,
            drivers::USER_DOCUMENT_APPROVE,
            id,
            doc_type,
            &DocumentDecision::approved(),
        )
        .await
    }

    /// Reject one document with an optional reason
    ///
    /// # Errors
    ///
    /// Returns the last backend or transport error
    pub async fn reject_document(
        &self,
        id: &str,
        doc_type: &str,
        reason: Option<&str>,
    ) -> AppResult<Value> {
        self.decide_document(
            drivers::RIDER_DOCUMENT_REJECT,
            drivers::USER_DOCUMENT_REJECT,
            id,
            doc_type,
            &DocumentDecision::rejected(reason.map(str::to_owned)),
        )
        .await
    }

    /// Upload documents for the driver registered under `phone`
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn upload_documents(
        &self,
        phone: &str,
        files: Vec<MultipartField>,
    ) -> AppResult<Value> {
        let mut fields = Vec::with_capacity(files.len() + 1);
        fields.push(MultipartField::text("phone", phone));
        fields.extend(files);
        self.api
            .execute_json(&ApiRequest::put(drivers::UPLOAD_DOCUMENTS).multipart(fields))
            .await
    }

    async fn patch_both(&self, rider_path: &str, user_path: &str, id: &str) -> AppResult<Value> {
        let candidates = [
            ApiRequest::patch(rider_path).id(id),
            ApiRequest::patch(user_path).id(id),
        ];
        self.api
            .try_in_order(&format!("Driver {id}"), &candidates, accept_success)
            .await
    }

    async fn decide_document(
        &self,
        rider_path: &str,
        user_path: &str,
        id: &str,
        doc_type: &str,
        decision: &DocumentDecision,
    ) -> AppResult<Value> {
        let body = serde_json::to_value(decision)?;
        let build = |path: &str| {
            ApiRequest::patch(path)
                .id(id)
                .param("docType", doc_type)
                .json(body.clone())
        };
        let candidates = [build(rider_path), build(user_path)];
        self.api
            .try_in_order(
                &format!("Document {doc_type} for driver {id}"),
                &candidates,
                accept_success,
            )
            .await
    }
}
