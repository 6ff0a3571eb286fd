// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging plus ApiClient construction against a mock backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::wildcard_in_or_patterns,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `dispatch_admin`

use std::sync::{Arc, Once};

use dispatch_admin::{
    auth::{CredentialStore, MemoryTokenStore},
    config::ApiConfig,
    http::ApiClient,
};
use serde_json::{json, Value};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Config pointing at a mock server with the standard `/api/v1` prefix
pub fn test_config(base_url: &str) -> ApiConfig {
    ApiConfig::new(base_url).unwrap()
}

/// Client plus the in-memory store it authenticates from
pub fn create_test_client(base_url: &str) -> (ApiClient, Arc<MemoryTokenStore>) {
    create_test_client_with(test_config(base_url))
}

/// Client over an explicit config
pub fn create_test_client_with(config: ApiConfig) -> (ApiClient, Arc<MemoryTokenStore>) {
    init_test_logging();
    let store = Arc::new(MemoryTokenStore::admin());
    let api = ApiClient::new(config, store.clone());
    (api, store)
}

/// Client that already holds an access/refresh pair
pub fn create_signed_in_client(base_url: &str) -> (ApiClient, Arc<MemoryTokenStore>) {
    let (api, store) = create_test_client(base_url);
    store
        .set_tokens("test_access_token", Some("test_refresh_token"))
        .unwrap();
    (api, store)
}

/// A base URL nothing listens on
pub const UNREACHABLE_BASE_URL: &str = "http://127.0.0.1:1";

/// `/api/v1` + endpoint path, for wiremock path matchers
pub fn api_path(path: &str) -> String {
    format!("/api/v1{path}")
}

/// Minimal rider record as the backend returns it
pub fn rider_json(id: &str, name: &str) -> Value {
    json!({
        "_id": id,
        "riderId": format!("RID-{id}"),
        "name": name,
        "mobile": "9876543210",
        "email": format!("{id}@riders.test"),
        "vehicleType": "bike",
        "isOnline": true,
    })
}
