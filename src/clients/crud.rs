// ABOUTME: Conventional REST plumbing shared by bookings, coupons and tickets
// ABOUTME: List, get, create, update, delete, stats and id-scoped actions for one resource
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

use serde_json::Value;

use super::degrade_read;
use crate::constants::endpoints::ResourceEndpoints;
use crate::errors::AppResult;
use crate::http::{empty_list_body, ApiClient, ApiRequest};
use crate::pagination::ListQuery;

/// One resource family behind the `/all`, `/:id`, `/create`, `/stats` convention
#[derive(Clone)]
pub struct ResourceApi {
    api: ApiClient,
    endpoints: ResourceEndpoints,
    collection: &'static str,
}

impl ResourceApi {
    /// Bind a resource family to a transport
    ///
    /// `collection` is the key the backend lists records under.
    #[must_use]
    pub fn new(api: ApiClient, endpoints: ResourceEndpoints, collection: &'static str) -> Self {
        Self {
            api,
            endpoints,
            collection,
        }
    }

    /// Underlying transport
    #[must_use]
    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Key the backend lists records under
    #[must_use]
    pub const fn collection(&self) -> &'static str {
        self.collection
    }

    /// Page size used when the query does not set one
    #[must_use]
    pub fn limit_for(&self, query: &ListQuery) -> u32 {
        query
            .limit_value()
            .unwrap_or(self.api.config().default_page_limit)
    }

    /// List records; the body is returned exactly as the backend sent it
    ///
    /// # Errors
    ///
    /// Returns backend errors; transport failures resolve to an empty list body
    pub async fn list(&self, query: &ListQuery) -> AppResult<Value> {
        let request = ApiRequest::get(self.endpoints.list).query(query.clone());
        let result = self.api.execute_json(&request).await;
        degrade_read(self.endpoints.list, result, || {
            empty_list_body(self.collection, self.limit_for(query))
        })
    }

    /// Fetch one record
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn get(&self, id: &str) -> AppResult<Value> {
        self.api
            .execute_json(&ApiRequest::get(self.endpoints.by_id).id(id))
            .await
    }

    /// Create a record
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn create(&self, payload: &Value) -> AppResult<Value> {
        self.api
            .execute_json(&ApiRequest::post(self.endpoints.create).json(payload.clone()))
            .await
    }

    /// Replace a record
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn update(&self, id: &str, payload: &Value) -> AppResult<Value> {
        self.api
            .execute_json(
                &ApiRequest::put(self.endpoints.by_id)
                    .id(id)
                    .json(payload.clone()),
            )
            .await
    }

    /// Delete a record
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn delete(&self, id: &str) -> AppResult<Value> {
        self.api
            .execute_json(&ApiRequest::delete(self.endpoints.by_id).id(id))
            .await
    }

    /// Server-side aggregate stats
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn stats(&self) -> AppResult<Value> {
        self.api
            .execute_json(&ApiRequest::get(self.endpoints.stats))
            .await
    }

    /// Id-scoped `PATCH` action such as `/:id/status`
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn patch_action(&self, path: &str, id: &str, body: Value) -> AppResult<Value> {
        self.api
            .execute_json(&ApiRequest::patch(path).id(id).json(body))
            .await
    }

    /// Id-scoped `POST` action such as `/:id/comments`
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn post_action(&self, path: &str, id: &str, body: Value) -> AppResult<Value> {
        self.api
            .execute_json(&ApiRequest::post(path).id(id).json(body))
            .await
    }
}
