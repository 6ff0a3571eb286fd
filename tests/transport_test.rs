// ABOUTME: Integration tests for the shared backend transport
// ABOUTME: Session refresh bounds, error normalization, request ids and fallback chains
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::time::Duration;

use common::{api_path, create_signed_in_client, create_test_client, create_test_client_with, test_config};
use dispatch_admin::auth::CredentialStore;
use dispatch_admin::errors::ErrorCode;
use dispatch_admin::http::{ApiRequest, ResponseBody};
use dispatch_admin::pagination::ListQuery;
use reqwest::header::{HeaderName, HeaderValue};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn expired() -> ResponseTemplate {
    ResponseTemplate::new(401).set_body_json(json!({
        "success": false,
        "message": "Token expired",
        "expired": true
    }))
}

async fn mount_refresh_ok(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path(api_path("/auth/admin/refresh-token")))
        .and(body_json(json!({"refreshToken": "test_refresh_token"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"accessToken": "new_access_token", "refreshToken": "new_refresh_token"}
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_expired_session_refreshes_once_then_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/auth/admin/profile")))
        .and(header("authorization", "Bearer test_access_token"))
        .respond_with(expired())
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("/auth/admin/profile")))
        .and(header("authorization", "Bearer new_access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"email": "ops@example.com"})))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh_ok(&server, 1).await;

    let (api, store) = create_signed_in_client(&server.uri());
    let body = api
        .execute_json(&ApiRequest::get("/auth/admin/profile"))
        .await
        .unwrap();

    assert_eq!(body["email"], "ops@example.com");
    assert_eq!(store.access_token().as_deref(), Some("new_access_token"));
    assert_eq!(store.refresh_token().as_deref(), Some("new_refresh_token"));
}

#[tokio::test]
async fn test_refresh_is_bounded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/bookings/all")))
        .respond_with(expired())
        .expect(2)
        .mount(&server)
        .await;
    mount_refresh_ok(&server, 1).await;

    let (api, _store) = create_signed_in_client(&server.uri());
    let err = api
        .execute(&ApiRequest::get("/bookings/all"))
        .await
        .unwrap_err();

    assert!(err.is_expired());
    assert_eq!(err.to_string(), "Token expired");
}

#[tokio::test]
async fn test_zero_refresh_budget_returns_expired_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/tickets/all")))
        .respond_with(expired())
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh_ok(&server, 0).await;

    let config = test_config(&server.uri()).with_max_refresh_retries(0);
    let (api, store) = create_test_client_with(config);
    store.set_tokens("test_access_token", Some("test_refresh_token")).unwrap();

    let err = api.execute(&ApiRequest::get("/tickets/all")).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::AuthExpired);
    assert!(store.is_authenticated());
}

#[tokio::test]
async fn test_failed_refresh_clears_session_and_returns_original_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/coupons/all")))
        .respond_with(expired())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("/auth/admin/refresh-token")))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid refresh token"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (api, store) = create_signed_in_client(&server.uri());
    let err = api.execute(&ApiRequest::get("/coupons/all")).await.unwrap_err();

    assert!(err.is_expired());
    assert_eq!(err.to_string(), "Token expired");
    assert!(store.access_token().is_none());
    assert!(store.refresh_token().is_none());
}

#[tokio::test]
async fn test_missing_refresh_token_clears_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/coupons/all")))
        .respond_with(expired())
        .mount(&server)
        .await;
    mount_refresh_ok(&server, 0).await;

    let (api, store) = create_test_client(&server.uri());
    store.set_tokens("only_access", None).unwrap();

    assert!(api.execute(&ApiRequest::get("/coupons/all")).await.unwrap_err().is_expired());
    assert!(!store.is_authenticated());

    let refresh_err = api.refresh_session().await.unwrap_err();
    assert_eq!(refresh_err.code, ErrorCode::AuthRequired);
}

#[tokio::test]
async fn test_plain_401_does_not_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/auth/admin/profile")))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Unauthorized"})))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh_ok(&server, 0).await;

    let (api, store) = create_signed_in_client(&server.uri());
    let err = api
        .execute(&ApiRequest::get("/auth/admin/profile"))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::AuthInvalid);
    assert_eq!(err.http_status(), 401);
    assert!(store.is_authenticated());
}

#[tokio::test]
async fn test_backend_error_messages_are_normalized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("/coupons/apply")))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": "Coupon expired"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("/bookings/stats")))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"error": {"message": "Aggregation failed"}})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("/tickets/stats")))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let (api, _store) = create_test_client(&server.uri());

    let err = api.execute(&ApiRequest::post("/coupons/apply")).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert_eq!(err.to_string(), "Coupon expired");

    let err = api.execute(&ApiRequest::get("/bookings/stats")).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::BackendError);
    assert_eq!(err.to_string(), "Aggregation failed");

    let err = api.execute(&ApiRequest::get("/tickets/stats")).await.unwrap_err();
    assert_eq!(err.to_string(), "HTTP error! status: 502");
    assert_eq!(err.details, Value::String("Bad Gateway".into()));
}

#[tokio::test]
async fn test_success_bodies_decode_by_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/health")))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(api_path("/coupons/c1")))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "application/json"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("/broken")))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{not json", "application/json"))
        .mount(&server)
        .await;

    let (api, _store) = create_test_client(&server.uri());

    let body = api.execute(&ApiRequest::get("/health")).await.unwrap();
    assert_eq!(body, ResponseBody::Text("ok".into()));

    let body = api
        .execute(&ApiRequest::delete("/coupons/:id").id("c1"))
        .await
        .unwrap();
    assert_eq!(body, ResponseBody::Json(Value::Null));

    let err = api.execute(&ApiRequest::get("/broken")).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidResponse);
}

#[tokio::test]
async fn test_every_request_carries_a_request_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/bookings/all")))
        .and(header_exists("x-request-id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"bookings": []})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("/bookings/b1")))
        .and(header("x-request-id", "trace-me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"_id": "b1"})))
        .expect(1)
        .mount(&server)
        .await;

    let (api, _store) = create_test_client(&server.uri());
    api.execute(&ApiRequest::get("/bookings/all")).await.unwrap();
    api.execute(
        &ApiRequest::get("/bookings/:id")
            .id("b1")
            .header(HeaderName::from_static("x-request-id"), HeaderValue::from_static("trace-me")),
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_query_string_is_sent_in_order_given() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/coupons/all")))
        .and(query_param("status", "Active"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"coupons": []})))
        .expect(1)
        .mount(&server)
        .await;

    let (api, _store) = create_test_client(&server.uri());
    let query = ListQuery::new().with("status", "Active").page(2).limit(5);
    api.execute(&ApiRequest::get("/coupons/all").query(query))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_unreachable_backend_is_a_network_error() {
    let (api, _store) = create_test_client(common::UNREACHABLE_BASE_URL);
    let err = api
        .execute(&ApiRequest::get("/bookings/all"))
        .await
        .unwrap_err();
    assert!(err.is_transport());
    assert_eq!(err.code, ErrorCode::NetworkError);
}

#[tokio::test]
async fn test_try_in_order_stops_at_first_accepted_candidate() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/first")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Rider not found"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("/second")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": 2})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("/third")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": 3})))
        .expect(0)
        .mount(&server)
        .await;

    let (api, _store) = create_test_client(&server.uri());
    let candidates = [
        ApiRequest::get("/first"),
        ApiRequest::get("/second"),
        ApiRequest::get("/third"),
    ];
    let value = api
        .try_in_order("Thing", &candidates, |body| body.get("value").cloned())
        .await
        .unwrap();
    assert_eq!(value, json!(2));
}

#[tokio::test]
async fn test_try_in_order_reports_last_error_or_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/empty")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("/gone")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "User not found"})))
        .mount(&server)
        .await;

    let (api, _store) = create_test_client(&server.uri());

    let err = api
        .try_in_order(
            "Thing 7",
            &[ApiRequest::get("/empty"), ApiRequest::get("/empty")],
            |body| body.get("value").cloned(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    let err = api
        .try_in_order(
            "Thing 7",
            &[ApiRequest::get("/gone"), ApiRequest::get("/empty")],
            |body| body.get("value").cloned(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "User not found");
}

#[tokio::test]
async fn test_configured_timeout_bounds_slow_responses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/tickets/all")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"tickets": []}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let config = test_config(&server.uri()).with_timeout(Duration::from_millis(50));
    assert_eq!(config.timeout, Duration::from_millis(50));
    let (api, _store) = create_test_client_with(config);

    let err = api
        .execute(&ApiRequest::get("/tickets/all"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::NetworkError);
    assert!(err.to_string().starts_with("Request timed out"));
}
