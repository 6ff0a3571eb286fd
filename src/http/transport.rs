// ABOUTME: Backend transport shared by every resource client
// ABOUTME: Sends requests, normalizes errors, refreshes expired sessions and runs fallback chains
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

use std::sync::Arc;

use reqwest::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tracing::{debug, info, warn, Instrument};
use url::Url;
use uuid::Uuid;

use super::client::create_client;
use super::request::{build_form, ApiRequest, RequestBody, ResponseBody};
use super::unwrap::extract_token_pair;
use crate::auth::CredentialStore;
use crate::config::ApiConfig;
use crate::constants::{endpoints, messages};
use crate::errors::{AppError, AppResult};
use crate::models::TokenPair;

/// Connection to the dispatch backend
///
/// Cheap to clone: the HTTP pool, configuration and credential store are shared.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: Arc<ApiConfig>,
    credentials: Arc<dyn CredentialStore>,
}

impl ApiClient {
    /// Create a client with its own connection pool
    #[must_use]
    pub fn new(config: ApiConfig, credentials: Arc<dyn CredentialStore>) -> Self {
        let http = create_client(&config);
        Self::with_http_client(config, credentials, http)
    }

    /// Create a client around an existing reqwest client
    #[must_use]
    pub fn with_http_client(
        config: ApiConfig,
        credentials: Arc<dyn CredentialStore>,
        http: Client,
    ) -> Self {
        Self {
            http,
            config: Arc::new(config),
            credentials,
        }
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Credential store used for bearer headers
    #[must_use]
    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    /// Execute a request, refreshing the session when the backend reports it expired
    ///
    /// At most `max_refresh_retries` refreshes happen per call. When a refresh
    /// fails, or the budget is spent, the expired error itself is returned.
    ///
    /// # Errors
    ///
    /// Returns the normalized backend error, a network error, or an invalid
    /// response error for non-JSON bodies on JSON-only requests
    pub async fn execute(&self, request: &ApiRequest) -> AppResult<ResponseBody> {
        let mut refreshes = 0_u32;
        loop {
            match self.send_once(request).await {
                Err(err) if err.is_expired() && refreshes < self.config.max_refresh_retries => {
                    refreshes += 1;
                    info!(
                        request = %request.describe(),
                        attempt = refreshes,
                        "Session expired; refreshing before retry"
                    );
                    if let Err(refresh_err) = self.refresh_session().await {
                        warn!(error = %refresh_err, "Session refresh failed");
                        return Err(err);
                    }
                }
                Err(err) if err.is_expired() => {
                    warn!(
                        request = %request.describe(),
                        refreshes,
                        "Session still expired after refresh; giving up"
                    );
                    return Err(err);
                }
                other => return other,
            }
        }
    }

    /// Execute a request and return the body as JSON
    ///
    /// # Errors
    ///
    /// Same as [`Self::execute`]
    pub async fn execute_json(&self, request: &ApiRequest) -> AppResult<Value> {
        self.execute(request).await.map(ResponseBody::into_json)
    }

    /// Exchange the stored refresh token for a new credential pair
    ///
    /// Stored credentials are cleared when the exchange fails.
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when no refresh token is stored, otherwise the
    /// refresh endpoint's error
    pub async fn refresh_session(&self) -> AppResult<TokenPair> {
        let Some(refresh_token) = self.credentials.refresh_token() else {
            self.clear_credentials();
            return Err(AppError::auth_required());
        };

        let request = ApiRequest::post(endpoints::admin::REFRESH_TOKEN)
            .json(json!({ "refreshToken": refresh_token }));

        let outcome = self
            .send_once(&request)
            .await
            .and_then(|body| extract_token_pair(&body.into_json()));

        match outcome {
            Ok(pair) => {
                self.credentials.store_pair(&pair)?;
                info!("Session refreshed");
                Ok(pair)
            }
            Err(e) => {
                self.clear_credentials();
                Err(e)
            }
        }
    }

    /// Try each candidate in order and return the first accepted response
    ///
    /// A candidate that fails, or whose body `accept` maps to `None`, falls
    /// through to the next one. Results are never merged. When no candidate is
    /// accepted the last error is returned, or not-found if every candidate
    /// answered without a usable record.
    ///
    /// # Errors
    ///
    /// Returns the last candidate error, or `ResourceNotFound`
    pub async fn try_in_order<T, F>(
        &self,
        resource: &str,
        candidates: &[ApiRequest],
        mut accept: F,
    ) -> AppResult<T>
    where
        F: FnMut(Value) -> Option<T>,
    {
        let mut last_error = None;

        for (index, candidate) in candidates.iter().enumerate() {
            match self.execute(candidate).await {
                Ok(body) => {
                    if let Some(found) = accept(body.into_json()) {
                        if index > 0 {
                            debug!(request = %candidate.describe(), "Fallback endpoint answered");
                        }
                        return Ok(found);
                    }
                    debug!(request = %candidate.describe(), "No usable record; trying next endpoint");
                }
                Err(e) => {
                    debug!(request = %candidate.describe(), error = %e, "Endpoint failed; trying next");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| AppError::not_found(resource)))
    }

    fn clear_credentials(&self) {
        if let Err(e) = self.credentials.clear() {
            warn!(error = %e, "Failed to clear stored credentials");
        }
    }

    async fn send_once(&self, request: &ApiRequest) -> AppResult<ResponseBody> {
        let request_id = Uuid::new_v4().to_string();
        let span = tracing::debug_span!(
            "api_request",
            method = %request.method,
            path = %request.path,
            request_id = %request_id,
        );
        self.dispatch(request, &request_id).instrument(span).await
    }

    async fn dispatch(&self, request: &ApiRequest, request_id: &str) -> AppResult<ResponseBody> {
        let url = Url::parse(&self.config.build_url(&request.path, &request.params))?;
        let mut headers = self
            .config
            .build_headers(self.credentials.as_ref(), &request.headers);

        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(self.config.request_id_header.as_bytes()),
            HeaderValue::from_str(request_id),
        ) {
            headers.entry(name).or_insert(value);
        }

        let mut builder = self.http.request(request.method.clone(), url);
        let query = request.query.to_pairs();
        if !query.is_empty() {
            builder = builder.query(&query);
        }

        builder = match &request.body {
            RequestBody::Empty => builder.headers(headers),
            RequestBody::Json(body) => builder.headers(headers).json(body),
            RequestBody::Multipart(fields) => {
                headers.remove(CONTENT_TYPE);
                builder.headers(headers).multipart(build_form(fields)?)
            }
        };

        debug!("Sending request");
        let response = builder.send().await?;
        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("application/json"));
        let text = response.text().await?;
        debug!(status = status.as_u16(), is_json, "Response received");

        let body = decode_body(status, is_json, text)?;

        if request.expect_json && !body.is_json() {
            return Err(AppError::invalid_response(messages::NON_JSON_RESPONSE)
                .with_status(status.as_u16())
                .with_details(body.into_json()));
        }

        if !status.is_success() {
            let err = AppError::from_response(status.as_u16(), body.into_json());
            debug!(status = status.as_u16(), error = %err, "Backend rejected request");
            return Err(err);
        }

        Ok(body)
    }
}

fn decode_body(status: StatusCode, is_json: bool, text: String) -> AppResult<ResponseBody> {
    if !is_json {
        return Ok(ResponseBody::Text(text));
    }
    if text.trim().is_empty() {
        return Ok(ResponseBody::Json(Value::Null));
    }
    match serde_json::from_str(&text) {
        Ok(value) => Ok(ResponseBody::Json(value)),
        Err(e) if status.is_success() => Err(AppError::invalid_response(format!(
            "Malformed JSON response: {e}"
        ))
        .with_status(status.as_u16())
        .with_source(e)),
        Err(_) => Ok(ResponseBody::Text(text)),
    }
}
