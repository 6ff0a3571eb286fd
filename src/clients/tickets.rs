// ABOUTME: Support ticket client over the conventional /tickets endpoints
// ABOUTME: CRUD plus comments, status changes, assignment and stats
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

use serde_json::{json, Value};

use super::crud::ResourceApi;
use crate::constants::endpoints::tickets;
use crate::errors::AppResult;
use crate::http::ApiClient;
use crate::pagination::ListQuery;

/// Support ticket client
#[derive(Clone)]
pub struct TicketClient {
    resource: ResourceApi,
}

impl TicketClient {
    /// Create a ticket client
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            resource: ResourceApi::new(api, tickets::CRUD, "tickets"),
        }
    }

    /// Shared CRUD plumbing
    #[must_use]
    pub const fn resource(&self) -> &ResourceApi {
        &self.resource
    }

    /// List tickets (read path)
    ///
    /// # Errors
    ///
    /// Returns backend errors; transport failures resolve to an empty list
    pub async fn get_all_tickets(&self, query: &ListQuery) -> AppResult<Value> {
        self.resource.list(query).await
    }

    /// Fetch one ticket
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn get_ticket_by_id(&self, id: &str) -> AppResult<Value> {
        self.resource.get(id).await
    }

    /// Open a ticket
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn create_ticket(&self, payload: &Value) -> AppResult<Value> {
        self.resource.create(payload).await
    }

    /// Update a ticket
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn update_ticket(&self, id: &str, payload: &Value) -> AppResult<Value> {
        self.resource.update(id, payload).await
    }

    /// Delete a ticket
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn delete_ticket(&self, id: &str) -> AppResult<Value> {
        self.resource.delete(id).await
    }

    /// Append a comment to a ticket thread
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn add_comment(&self, id: &str, message: &str) -> AppResult<Value> {
        self.resource
            .post_action(tickets::COMMENTS, id, json!({ "message": message }))
            .await
    }

    /// Move a ticket to another status
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn update_ticket_status(&self, id: &str, status: &str) -> AppResult<Value> {
        self.resource
            .patch_action(tickets::STATUS, id, json!({ "status": status }))
            .await
    }

    /// Assign a ticket to an admin
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn assign_ticket(&self, id: &str, admin_id: &str) -> AppResult<Value> {
        self.resource
            .patch_action(tickets::ASSIGN, id, json!({ "assignedTo": admin_id }))
            .await
    }

    /// Server-side ticket stats
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn get_ticket_stats(&self) -> AppResult<Value> {
        self.resource.stats().await
    }
}
