// ABOUTME: Coupon client over the conventional /coupons endpoints
// ABOUTME: CRUD plus code application, status toggling and stats, with no record transform
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

use serde_json::{json, Value};

use super::crud::ResourceApi;
use crate::constants::endpoints::coupons;
use crate::errors::AppResult;
use crate::http::{ApiClient, ApiRequest};
use crate::pagination::ListQuery;

/// Coupon client; list bodies come back exactly as the backend sent them
#[derive(Clone)]
pub struct CouponClient {
    resource: ResourceApi,
}

impl CouponClient {
    /// Create a coupon client
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            resource: ResourceApi::new(api, coupons::CRUD, "coupons"),
        }
    }

    /// Shared CRUD plumbing
    #[must_use]
    pub const fn resource(&self) -> &ResourceApi {
        &self.resource
    }

    /// List coupons (read path)
    ///
    /// Absent and empty filters are left out of the query string.
    ///
    /// # Errors
    ///
    /// Returns backend errors; transport failures resolve to
    /// `{coupons: [], pagination: {page: 1, total: 0, ...}}`
    pub async fn get_all_coupons(&self, query: &ListQuery) -> AppResult<Value> {
        self.resource.list(query).await
    }

    /// Fetch one coupon
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn get_coupon_by_id(&self, id: &str) -> AppResult<Value> {
        self.resource.get(id).await
    }

    /// Create a coupon
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn create_coupon(&self, payload: &Value) -> AppResult<Value> {
        self.resource.create(payload).await
    }

    /// Update a coupon
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn update_coupon(&self, id: &str, payload: &Value) -> AppResult<Value> {
        self.resource.update(id, payload).await
    }

    /// Delete a coupon
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn delete_coupon(&self, id: &str) -> AppResult<Value> {
        self.resource.delete(id).await
    }

    /// Price an order with a coupon code
    ///
    /// # Errors
    ///
    /// Returns the backend error (invalid or expired code) or transport error
    pub async fn apply_coupon(
        &self,
        code: &str,
        order_amount: f64,
        user_id: Option<&str>,
    ) -> AppResult<Value> {
        let mut body = json!({ "code": code, "orderAmount": order_amount });
        if let Some(user_id) = user_id {
            body["userId"] = Value::String(user_id.to_owned());
        }
        self.resource
            .api()
            .execute_json(&ApiRequest::post(coupons::APPLY).json(body))
            .await
    }

    /// Flip a coupon between active and inactive
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn toggle_coupon_status(&self, id: &str) -> AppResult<Value> {
        self.resource
            .patch_action(coupons::TOGGLE_STATUS, id, json!({}))
            .await
    }

    /// Server-side coupon stats
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn get_coupon_stats(&self) -> AppResult<Value> {
        self.resource.stats().await
    }
}
