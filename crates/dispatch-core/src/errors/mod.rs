// ABOUTME: Unified error type for the dispatch admin client
// ABOUTME: Defines ErrorCode taxonomy, AppError, and backend error normalization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

//! # Unified Error Handling System
//!
//! Every client call returns [`AppResult`]. Errors carry an [`ErrorCode`] that
//! classifies the failure (transport, expired session, backend rejection,
//! non-JSON response, ...) and the normalized human-readable message that views
//! display as-is.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Standard error codes used throughout the client
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authentication & Authorization (1000-1999)
    /// No credentials available for an authenticated call
    #[serde(rename = "AUTH_REQUIRED")]
    AuthRequired = 1000,
    /// Credentials were rejected
    #[serde(rename = "AUTH_INVALID")]
    AuthInvalid = 1001,
    /// Backend flagged the session as expired
    #[serde(rename = "AUTH_EXPIRED")]
    AuthExpired = 1002,
    /// Authenticated but not allowed
    #[serde(rename = "PERMISSION_DENIED")]
    PermissionDenied = 1004,

    // Validation (3000-3999)
    /// Caller supplied invalid input
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,

    // Resource Management (4000-4999)
    /// Resource not found on any candidate endpoint
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,

    // Backend (5000-5999)
    /// Backend answered with a non-2xx status
    #[serde(rename = "BACKEND_ERROR")]
    BackendError = 5000,
    /// Request never completed or body could not be read
    #[serde(rename = "NETWORK_ERROR")]
    NetworkError = 5001,
    /// Backend answered with an unexpected content type or shape
    #[serde(rename = "INVALID_RESPONSE")]
    InvalidResponse = 5002,

    // Configuration (6000-6999)
    /// Configuration is missing or invalid
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Credential storage failed
    #[serde(rename = "STORAGE_ERROR")]
    StorageError = 9002,
    /// Serialization or deserialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get the HTTP status code conventionally associated with this error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidInput => 400,
            Self::AuthRequired | Self::AuthInvalid | Self::AuthExpired => 401,
            Self::PermissionDenied => 403,
            Self::ResourceNotFound => 404,
            Self::BackendError | Self::InvalidResponse => 502,
            Self::NetworkError => 503,
            Self::ConfigError
            | Self::InternalError
            | Self::StorageError
            | Self::SerializationError => 500,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::AuthRequired => "Authentication is required to access this resource",
            Self::AuthInvalid => "The provided authentication credentials are invalid",
            Self::AuthExpired => "The authentication token has expired",
            Self::PermissionDenied => "You do not have permission to perform this action",
            Self::InvalidInput => "The provided input is invalid",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::BackendError => "The backend rejected the request",
            Self::NetworkError => "The backend could not be reached",
            Self::InvalidResponse => "The backend returned an unexpected response",
            Self::ConfigError => "Configuration error encountered",
            Self::InternalError => "An internal error occurred",
            Self::StorageError => "Credential storage operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

/// Unified error type for the client
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Normalized human-readable message
    pub message: String,
    /// HTTP status returned by the backend, when there was a response
    pub status: Option<u16>,
    /// Decoded response body or other structured context
    pub details: Value,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
            details: Value::Null,
            source: None,
        }
    }

    /// Attach the backend HTTP status
    #[must_use]
    pub const fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Attach structured details (usually the decoded response body)
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// HTTP status of the backend response, or the code's conventional status
    #[must_use]
    pub fn http_status(&self) -> u16 {
        self.status.unwrap_or_else(|| self.code.http_status())
    }

    /// True when the request never completed (read paths degrade on these)
    #[must_use]
    pub fn is_transport(&self) -> bool {
        self.code == ErrorCode::NetworkError
    }

    /// True when the backend flagged the session as expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.code == ErrorCode::AuthExpired
    }

    /// Build the normalized error for a non-2xx response
    ///
    /// The message is taken from the body's `message`, then `error` (string or
    /// `error.message`), falling back to `HTTP error! status: {code}`. A truthy
    /// `expired` flag classifies the error as [`ErrorCode::AuthExpired`].
    #[must_use]
    pub fn from_response(status: u16, body: Value) -> Self {
        let message = backend_message(&body)
            .unwrap_or_else(|| format!("HTTP error! status: {status}"));
        let code = if is_expired_body(&body) {
            ErrorCode::AuthExpired
        } else {
            match status {
                400 | 422 => ErrorCode::InvalidInput,
                401 => ErrorCode::AuthInvalid,
                403 => ErrorCode::PermissionDenied,
                404 => ErrorCode::ResourceNotFound,
                _ => ErrorCode::BackendError,
            }
        };
        Self::new(code, message)
            .with_status(status)
            .with_details(body)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Extract the backend-provided error text from a decoded body
#[must_use]
pub fn backend_message(body: &Value) -> Option<String> {
    let non_empty = |v: Option<&Value>| {
        v.and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    };

    non_empty(body.get("message")).or_else(|| match body.get("error") {
        Some(Value::Object(inner)) => non_empty(inner.get("message")),
        other => non_empty(other),
    })
}

/// Whether a decoded body carries a truthy `expired` flag
#[must_use]
pub fn is_expired_body(body: &Value) -> bool {
    match body.get("expired") {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Convenience functions for creating common errors
impl AppError {
    /// Authentication required
    #[must_use]
    pub fn auth_required() -> Self {
        Self::new(ErrorCode::AuthRequired, "Authentication required")
    }

    /// Resource not found
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Network failure
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NetworkError, message)
    }

    /// Unexpected response shape or content type
    #[must_use]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidResponse, message)
    }

    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Credential storage error
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::storage(error.to_string()).with_source(error)
    }
}

#[cfg(feature = "http-errors")]
impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        let message = if error.is_timeout() {
            format!("Request timed out: {error}")
        } else if error.is_connect() {
            format!("Failed to connect to backend: {error}")
        } else {
            format!("Network error: {error}")
        };
        Self::network(message).with_source(error)
    }
}

#[cfg(feature = "http-errors")]
impl From<url::ParseError> for AppError {
    fn from(error: url::ParseError) -> Self {
        Self::config(format!("Invalid URL: {error}")).with_source(error)
    }
}
