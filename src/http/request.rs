// ABOUTME: Request and response descriptors for the backend transport
// ABOUTME: ApiRequest keeps owned data so a request can be re-sent after a session refresh
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::errors::{AppError, AppResult};
use crate::pagination::ListQuery;

/// One part of a multipart form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultipartValue {
    /// Plain text field
    Text(String),
    /// File upload
    File {
        /// File name reported to the backend
        file_name: String,
        /// MIME type, if known
        mime: Option<String>,
        /// File contents
        bytes: Vec<u8>,
    },
}

/// Named multipart field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartField {
    /// Form field name
    pub name: String,
    /// Field value
    pub value: MultipartValue,
}

impl MultipartField {
    /// Text field
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: MultipartValue::Text(value.into()),
        }
    }

    /// File field
    #[must_use]
    pub fn file(
        name: impl Into<String>,
        file_name: impl Into<String>,
        mime: Option<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            value: MultipartValue::File {
                file_name: file_name.into(),
                mime,
                bytes,
            },
        }
    }
}

/// Build a fresh reqwest form from owned fields
///
/// # Errors
///
/// Returns an error if a field carries an invalid MIME type
pub fn build_form(fields: &[MultipartField]) -> AppResult<Form> {
    let mut form = Form::new();
    for field in fields {
        form = match &field.value {
            MultipartValue::Text(text) => form.text(field.name.clone(), text.clone()),
            MultipartValue::File {
                file_name,
                mime,
                bytes,
            } => {
                let mut part = Part::bytes(bytes.clone()).file_name(file_name.clone());
                if let Some(mime) = mime {
                    part = part.mime_str(mime).map_err(|e| {
                        AppError::invalid_input(format!(
                            "Invalid MIME type '{mime}' for {}: {e}",
                            field.name
                        ))
                    })?;
                }
                form.part(field.name.clone(), part)
            }
        };
    }
    Ok(form)
}

/// Request body
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    /// No body
    #[default]
    Empty,
    /// JSON document
    Json(Value),
    /// Multipart form
    Multipart(Vec<MultipartField>),
}

/// A single backend call, described independently of any connection
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Endpoint template with `:key` placeholders
    pub path: String,
    /// Placeholder values
    pub params: Vec<(String, String)>,
    /// Query string filters
    pub query: ListQuery,
    /// Body
    pub body: RequestBody,
    /// Headers applied over the defaults
    pub headers: HeaderMap,
    /// Reject non-JSON responses with a diagnostic instead of returning text
    pub expect_json: bool,
}

impl ApiRequest {
    /// Request with no params, query, body or custom headers
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Vec::new(),
            query: ListQuery::new(),
            body: RequestBody::Empty,
            headers: HeaderMap::new(),
            expect_json: false,
        }
    }

    /// `GET` request
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// `POST` request
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// `PUT` request
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// `PATCH` request
    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// `DELETE` request
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Add a `:key` placeholder value
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Shorthand for the `:id` placeholder
    #[must_use]
    pub fn id(self, id: impl Into<String>) -> Self {
        self.param("id", id)
    }

    /// Replace the query filters
    #[must_use]
    pub fn query(mut self, query: ListQuery) -> Self {
        self.query = query;
        self
    }

    /// JSON body from an already-built value
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// JSON body from any serializable payload
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be serialized
    pub fn json_from<T: Serialize>(self, payload: &T) -> AppResult<Self> {
        Ok(self.json(serde_json::to_value(payload)?))
    }

    /// Multipart body
    #[must_use]
    pub fn multipart(mut self, fields: Vec<MultipartField>) -> Self {
        self.body = RequestBody::Multipart(fields);
        self
    }

    /// Custom header applied over the defaults
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Require a JSON response
    #[must_use]
    pub const fn expect_json(mut self) -> Self {
        self.expect_json = true;
        self
    }

    /// `METHOD /path` label for logs and errors
    #[must_use]
    pub fn describe(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

/// Decoded response body
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Body served as `application/json`
    Json(Value),
    /// Any other content type, returned verbatim
    Text(String),
}

impl ResponseBody {
    /// Body as JSON; text bodies become a JSON string
    #[must_use]
    pub fn into_json(self) -> Value {
        match self {
            Self::Json(value) => value,
            Self::Text(text) => Value::String(text),
        }
    }

    /// Whether the body was decoded as JSON
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self, Self::Json(_))
    }
}
