// ABOUTME: Credential pair and admin authentication request payloads
// ABOUTME: Serialized with the backend's camelCase field names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

use serde::{Deserialize, Serialize};

/// Access token plus optional refresh token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// Bearer token sent on authenticated calls
    pub access_token: String,
    /// Token exchanged at the refresh endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// `POST /auth/admin/login` body
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// Admin email
    pub email: String,
    /// Admin password
    pub password: String,
}

/// `POST /auth/admin/register` body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Display name
    pub name: String,
    /// Admin email
    pub email: String,
    /// Initial password
    pub password: String,
    /// Optional phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Optional role (`admin`, `super_admin`, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// `PUT /auth/admin/change-password` body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// Password currently in use
    pub current_password: String,
    /// Replacement password
    pub new_password: String,
}
