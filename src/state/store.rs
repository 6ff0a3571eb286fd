// ABOUTME: List store holding items, pagination, loading and error state for one resource
// ABOUTME: Fetches are tagged with a generation so a slower, older response never overwrites a newer one
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::errors::{AppError, AppResult, ErrorCode};
use crate::pagination::{ListPage, ListQuery, Pagination};

/// A resource a [`ResourceStore`] can list and mutate
#[async_trait]
pub trait ListResource: Send + Sync {
    /// Summary computed from the loaded page
    type Stats: Clone + Default + Send + Sync;

    /// Resource name for logs
    fn name(&self) -> &'static str;

    /// Page size used before the caller picks one
    fn default_limit(&self) -> u32;

    /// Fetch one page
    async fn list(&self, query: &ListQuery) -> AppResult<ListPage<Value>>;

    /// Create a record
    async fn create(&self, payload: &Value) -> AppResult<Value>;

    /// Update a record
    async fn update(&self, id: &str, payload: &Value) -> AppResult<Value>;

    /// Delete a record
    async fn delete(&self, id: &str) -> AppResult<Value>;

    /// Summarize the loaded page
    fn page_stats(&self, items: &[Value]) -> Self::Stats;
}

#[derive(Debug, Clone)]
struct ListState {
    items: Vec<Value>,
    loading: bool,
    error: Option<String>,
    error_code: Option<ErrorCode>,
    pagination: Pagination,
    query: ListQuery,
}

impl ListState {
    fn fail(&mut self, err: &AppError) {
        self.loading = false;
        self.items.clear();
        self.error = Some(err.to_string());
        self.error_code = Some(err.code);
    }
}

/// Point-in-time copy of a store's state
#[derive(Debug, Clone)]
pub struct ListSnapshot<S> {
    /// Records on the loaded page
    pub items: Vec<Value>,
    /// A request is in flight
    pub loading: bool,
    /// Message of the last failed action
    pub error: Option<String>,
    /// Classification of the last failed action
    pub error_code: Option<ErrorCode>,
    /// Page metadata of the loaded page
    pub pagination: Pagination,
    /// Filters and page the store will fetch with
    pub query: ListQuery,
    /// Stats over `items`
    pub stats: S,
}

impl<S> ListSnapshot<S> {
    /// The recorded failure as an error, for callers that must stop on it
    #[must_use]
    pub fn failure(&self) -> Option<AppError> {
        self.error.as_ref().map(|message| {
            AppError::new(
                self.error_code.unwrap_or(ErrorCode::InternalError),
                message.clone(),
            )
        })
    }
}

/// View state for one list resource
///
/// Every action moves the store to loading. Any failed action stores the
/// message and empties the list. Mutations re-fetch the current page on
/// success and return the error on failure.
pub struct ResourceStore<R: ListResource> {
    resource: R,
    state: RwLock<ListState>,
    generation: AtomicU64,
}

impl<R: ListResource> ResourceStore<R> {
    /// Idle store starting at page 1
    pub fn new(resource: R) -> Self {
        let limit = resource.default_limit();
        Self {
            resource,
            state: RwLock::new(ListState {
                items: Vec::new(),
                loading: false,
                error: None,
                error_code: None,
                pagination: Pagination::empty(limit),
                query: ListQuery::new().page(1).limit(limit),
            }),
            generation: AtomicU64::new(0),
        }
    }

    /// Wrapped resource
    pub const fn resource(&self) -> &R {
        &self.resource
    }

    /// Current state plus page stats
    pub async fn snapshot(&self) -> ListSnapshot<R::Stats> {
        let state = self.state.read().await;
        ListSnapshot {
            items: state.items.clone(),
            loading: state.loading,
            error: state.error.clone(),
            error_code: state.error_code,
            pagination: state.pagination.clone(),
            query: state.query.clone(),
            stats: self.resource.page_stats(&state.items),
        }
    }

    /// Fetch with `partial` merged over the held filters and page
    pub async fn fetch(&self, partial: &ListQuery) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let query = {
            let mut state = self.state.write().await;
            state.query = partial.merged_over(&state.query);
            state.loading = true;
            state.query.clone()
        };

        let result = self.resource.list(&query).await;

        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(resource = self.resource.name(), generation, "Discarding stale list response");
            return;
        }
        match result {
            Ok(page) => {
                state.loading = false;
                state.items = page.items;
                state.pagination = page.pagination;
                state.error = None;
                state.error_code = None;
            }
            Err(e) => {
                warn!(resource = self.resource.name(), error = %e, "List fetch failed");
                state.fail(&e);
            }
        }
    }

    /// Apply new filters starting from page 1
    pub async fn filter(&self, filters: &ListQuery) {
        let mut filters = filters.clone();
        filters.set(ListQuery::PAGE, Some("1".to_owned()));
        self.fetch(&filters).await;
    }

    /// Move to another page with the held filters
    pub async fn change_page(&self, page: u32) {
        self.fetch(&ListQuery::new().page(page)).await;
    }

    /// Re-fetch with the held filters and page
    pub async fn refresh(&self) {
        self.fetch(&ListQuery::new()).await;
    }

    /// Drop the stored error message
    pub async fn clear_error(&self) {
        let mut state = self.state.write().await;
        state.error = None;
        state.error_code = None;
    }

    /// Create a record, then re-fetch
    ///
    /// # Errors
    ///
    /// Returns the resource error; the list is emptied and the message stored
    pub async fn create(&self, payload: &Value) -> AppResult<Value> {
        self.begin_mutation().await;
        let result = self.resource.create(payload).await;
        self.finish_mutation("create", result).await
    }

    /// Update a record, then re-fetch
    ///
    /// # Errors
    ///
    /// Returns the resource error; the list is emptied and the message stored
    pub async fn update(&self, id: &str, payload: &Value) -> AppResult<Value> {
        self.begin_mutation().await;
        let result = self.resource.update(id, payload).await;
        self.finish_mutation("update", result).await
    }

    /// Delete a record, then re-fetch
    ///
    /// # Errors
    ///
    /// Returns the resource error; the list is emptied and the message stored
    pub async fn delete(&self, id: &str) -> AppResult<Value> {
        self.begin_mutation().await;
        let result = self.resource.delete(id).await;
        self.finish_mutation("delete", result).await
    }

    async fn begin_mutation(&self) {
        self.state.write().await.loading = true;
    }

    async fn finish_mutation(&self, action: &str, result: AppResult<Value>) -> AppResult<Value> {
        match result {
            Ok(body) => {
                self.refresh().await;
                Ok(body)
            }
            Err(e) => {
                warn!(resource = self.resource.name(), action, error = %e, "Mutation failed");
                self.state.write().await.fail(&e);
                Err(e)
            }
        }
    }
}
