// ABOUTME: Unit tests for config environment functionality
// ABOUTME: Validates URL building, header assembly, env loading and validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::time::Duration;

use dispatch_admin::auth::{CredentialStore, MemoryTokenStore};
use dispatch_admin::config::{substitute_path_params, ApiConfig};
use dispatch_admin::constants::env_config;
use dispatch_admin::errors::ErrorCode;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serial_test::serial;

const NO_PARAMS: &[(&str, &str)] = &[];

fn clear_env() {
    for name in [
        env_config::API_BASE_URL,
        env_config::API_VERSION_PREFIX,
        env_config::API_TIMEOUT_MS,
        env_config::API_CONNECT_TIMEOUT_MS,
        env_config::MAX_REFRESH_RETRIES,
        env_config::TOKEN_STORE_PATH,
        env_config::DEFAULT_PAGE_LIMIT,
        env_config::REQUEST_ID_HEADER,
    ] {
        env::remove_var(name);
    }
}

#[test]
fn test_build_url_joins_base_prefix_and_path() {
    let config = ApiConfig::new("https://dispatch.example.com/").unwrap();
    assert_eq!(
        config.build_url("/coupons/all", NO_PARAMS),
        "https://dispatch.example.com/api/v1/coupons/all"
    );
}

#[test]
fn test_build_url_substitutes_every_known_param() {
    let config = ApiConfig::new("http://localhost:5000").unwrap();
    let url = config.build_url(
        "/riders/:id/documents/:docType/approve",
        &[("id", "r42"), ("docType", "drivingLicense")],
    );
    assert_eq!(
        url,
        "http://localhost:5000/api/v1/riders/r42/documents/drivingLicense/approve"
    );
}

#[test]
fn test_missing_param_stays_literal() {
    assert_eq!(
        substitute_path_params("/bookings/:id/assign", NO_PARAMS),
        "/bookings/:id/assign"
    );
    assert_eq!(
        substitute_path_params("/a/:id/b/:other", &[("id", "7")]),
        "/a/7/b/:other"
    );
}

#[test]
fn test_param_values_are_not_escaped() {
    assert_eq!(
        substitute_path_params("/tickets/:id", &[("id", "a b/c")]),
        "/tickets/a b/c"
    );
}

#[test]
fn test_empty_prefix_is_allowed() {
    let config = ApiConfig::new("http://localhost:5000")
        .unwrap()
        .with_version_prefix("");
    config.validate().unwrap();
    assert_eq!(
        config.build_url("/auth/admin/login", NO_PARAMS),
        "http://localhost:5000/auth/admin/login"
    );
}

#[test]
fn test_headers_without_token() {
    let config = ApiConfig::new("http://localhost:5000").unwrap();
    let store = MemoryTokenStore::admin();
    let headers = config.build_headers(&store, &HeaderMap::new());

    assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    assert_eq!(headers.get(ACCEPT).unwrap(), "application/json");
    assert!(headers.get(AUTHORIZATION).is_none());
}

#[test]
fn test_headers_carry_bearer_token() {
    let config = ApiConfig::new("http://localhost:5000").unwrap();
    let store = MemoryTokenStore::with_access_token("abc123");
    let headers = config.build_headers(&store, &HeaderMap::new());

    assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc123");
}

#[test]
fn test_custom_headers_win() {
    let config = ApiConfig::new("http://localhost:5000").unwrap();
    let store = MemoryTokenStore::with_access_token("abc123");
    let mut custom = HeaderMap::new();
    custom.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    custom.insert(AUTHORIZATION, HeaderValue::from_static("Bearer override"));

    let headers = config.build_headers(&store, &custom);
    assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "text/plain");
    assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer override");
}

#[test]
fn test_empty_token_is_not_sent() {
    let config = ApiConfig::new("http://localhost:5000").unwrap();
    let store = MemoryTokenStore::admin();
    store.set_tokens("", None).unwrap();
    let headers = config.build_headers(&store, &HeaderMap::new());
    assert!(headers.get(AUTHORIZATION).is_none());
}

#[test]
fn test_new_rejects_non_http_scheme() {
    let err = ApiConfig::new("ftp://dispatch.example.com").unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigError);
}

#[test]
fn test_validate_rejects_relative_prefix() {
    let config = ApiConfig::new("http://localhost:5000")
        .unwrap()
        .with_version_prefix("api/v1");
    assert_eq!(config.validate().unwrap_err().code, ErrorCode::ConfigError);
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();
    let config = ApiConfig::from_env().unwrap();

    assert_eq!(config.base_url, "http://localhost:5000");
    assert_eq!(config.version_prefix, "/api/v1");
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.max_refresh_retries, 1);
    assert_eq!(config.default_page_limit, 10);
    assert_eq!(config.request_id_header, "x-request-id");
    assert!(config.token_store_path.ends_with("dispatch-admin/tokens.json"));
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_env();
    env::set_var(env_config::API_BASE_URL, "https://ops.example.com/");
    env::set_var(env_config::API_VERSION_PREFIX, "/api/v2");
    env::set_var(env_config::API_TIMEOUT_MS, "1500");
    env::set_var(env_config::MAX_REFRESH_RETRIES, "3");
    env::set_var(env_config::DEFAULT_PAGE_LIMIT, "25");
    env::set_var(env_config::TOKEN_STORE_PATH, "/tmp/dispatch-tokens.json");

    let config = ApiConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.base_url, "https://ops.example.com");
    assert_eq!(config.version_prefix, "/api/v2");
    assert_eq!(config.timeout, Duration::from_millis(1500));
    assert_eq!(config.max_refresh_retries, 3);
    assert_eq!(config.default_page_limit, 25);
    assert_eq!(
        config.token_store_path.to_str().unwrap(),
        "/tmp/dispatch-tokens.json"
    );
}

#[test]
#[serial]
fn test_from_env_rejects_bad_number() {
    clear_env();
    env::set_var(env_config::API_TIMEOUT_MS, "soon");
    let result = ApiConfig::from_env();
    clear_env();

    let err = result.unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigError);
    assert!(err.to_string().contains(env_config::API_TIMEOUT_MS));
}

#[test]
#[serial]
fn test_from_env_rejects_zero_page_limit() {
    clear_env();
    env::set_var(env_config::DEFAULT_PAGE_LIMIT, "0");
    let result = ApiConfig::from_env();
    clear_env();

    assert_eq!(result.unwrap_err().code, ErrorCode::ConfigError);
}
