// ABOUTME: Shared reqwest client construction with timeouts and a cookie store
// ABOUTME: One pooled client per ApiConfig, falling back to defaults if the builder fails
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

use reqwest::{Client, ClientBuilder};
use tracing::warn;

use crate::config::ApiConfig;

/// Create the HTTP client for a backend connection
///
/// The cookie store keeps a session cookie alongside the bearer token, so both
/// auth mechanisms reach the backend on every call.
#[must_use]
pub fn create_client(config: &ApiConfig) -> Client {
    create_custom_client(|builder| {
        builder
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .cookie_store(true)
            .user_agent(config.user_agent.clone())
    })
}

/// Create a client with custom builder settings
pub fn create_custom_client<F>(config_fn: F) -> Client
where
    F: FnOnce(ClientBuilder) -> ClientBuilder,
{
    config_fn(ClientBuilder::new()).build().unwrap_or_else(|e| {
        warn!(error = %e, "HTTP client builder failed; using default client");
        Client::new()
    })
}
