// ABOUTME: Booking client over the conventional /bookings endpoints
// ABOUTME: CRUD plus status changes, driver assignment, cancellation and stats
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

use serde_json::{json, Value};

use super::crud::ResourceApi;
use crate::constants::endpoints::bookings;
use crate::errors::AppResult;
use crate::http::ApiClient;
use crate::pagination::ListQuery;

/// Booking records are passed through untransformed
#[derive(Clone)]
pub struct BookingClient {
    resource: ResourceApi,
}

impl BookingClient {
    /// Create a booking client
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            resource: ResourceApi::new(api, bookings::CRUD, "bookings"),
        }
    }

    /// Shared CRUD plumbing
    #[must_use]
    pub const fn resource(&self) -> &ResourceApi {
        &self.resource
    }

    /// List bookings (read path)
    ///
    /// # Errors
    ///
    /// Returns backend errors; transport failures resolve to an empty list
    pub async fn get_all_bookings(&self, query: &ListQuery) -> AppResult<Value> {
        self.resource.list(query).await
    }

    /// Fetch one booking
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn get_booking_by_id(&self, id: &str) -> AppResult<Value> {
        self.resource.get(id).await
    }

    /// Create a booking
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn create_booking(&self, payload: &Value) -> AppResult<Value> {
        self.resource.create(payload).await
    }

    /// Update a booking
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn update_booking(&self, id: &str, payload: &Value) -> AppResult<Value> {
        self.resource.update(id, payload).await
    }

    /// Delete a booking
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn delete_booking(&self, id: &str) -> AppResult<Value> {
        self.resource.delete(id).await
    }

    /// Move a booking to another status
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn update_booking_status(&self, id: &str, status: &str) -> AppResult<Value> {
        self.resource
            .patch_action(bookings::STATUS, id, json!({ "status": status }))
            .await
    }

    /// Assign a driver to a booking
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn assign_driver(&self, id: &str, driver_id: &str) -> AppResult<Value> {
        self.resource
            .patch_action(bookings::ASSIGN_DRIVER, id, json!({ "driverId": driver_id }))
            .await
    }

    /// Cancel a booking
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn cancel_booking(&self, id: &str, reason: Option<&str>) -> AppResult<Value> {
        let body = reason.map_or_else(|| json!({}), |reason| json!({ "reason": reason }));
        self.resource.patch_action(bookings::CANCEL, id, body).await
    }

    /// Server-side booking stats
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn get_booking_stats(&self) -> AppResult<Value> {
        self.resource.stats().await
    }
}
