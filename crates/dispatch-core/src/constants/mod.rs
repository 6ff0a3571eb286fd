// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Storage keys, backend endpoint templates, env var names and defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! large file. Endpoint templates live in [`endpoints`] and use `:key`
//! placeholders resolved by the config resolver.

/// Backend endpoint path templates (relative to the versioned API prefix)
pub mod endpoints;

/// Persistent credential storage keys
pub mod storage_keys {
    /// Admin access token key
    pub const ADMIN_ACCESS_TOKEN: &str = "admin_access_token";
    /// Admin refresh token key
    pub const ADMIN_REFRESH_TOKEN: &str = "admin_refresh_token";
    /// Generic auth token key used by the non-admin config helper
    pub const GENERIC_AUTH_TOKEN: &str = "authToken";
    /// Generic refresh token key paired with [`GENERIC_AUTH_TOKEN`]
    pub const GENERIC_REFRESH_TOKEN: &str = "refreshToken";
}

/// Environment variable names read by the config resolver
pub mod env_config {
    /// Backend base URL
    pub const API_BASE_URL: &str = "DISPATCH_API_BASE_URL";
    /// Versioned path prefix
    pub const API_VERSION_PREFIX: &str = "DISPATCH_API_VERSION_PREFIX";
    /// Request timeout in milliseconds
    pub const API_TIMEOUT_MS: &str = "DISPATCH_API_TIMEOUT_MS";
    /// Connect timeout in milliseconds
    pub const API_CONNECT_TIMEOUT_MS: &str = "DISPATCH_API_CONNECT_TIMEOUT_MS";
    /// Maximum session refreshes per logical call
    pub const MAX_REFRESH_RETRIES: &str = "DISPATCH_MAX_REFRESH_RETRIES";
    /// Token store file location
    pub const TOKEN_STORE_PATH: &str = "DISPATCH_TOKEN_STORE_PATH";
    /// Default list page size
    pub const DEFAULT_PAGE_LIMIT: &str = "DISPATCH_DEFAULT_PAGE_LIMIT";
    /// Header name carrying the per-request correlation id
    pub const REQUEST_ID_HEADER: &str = "REQUEST_ID_HEADER";
}

/// Default values
pub mod defaults {
    /// Backend base URL for local development
    pub const API_BASE_URL: &str = "http://localhost:5000";
    /// Versioned path prefix
    pub const API_VERSION_PREFIX: &str = "/api/v1";
    /// Request timeout in milliseconds
    pub const API_TIMEOUT_MS: u64 = 30_000;
    /// Connect timeout in milliseconds
    pub const API_CONNECT_TIMEOUT_MS: u64 = 10_000;
    /// One refresh-and-retry per logical call
    pub const MAX_REFRESH_RETRIES: u32 = 1;
    /// Default list page size
    pub const PAGE_LIMIT: u32 = 10;
    /// Correlation header name
    pub const REQUEST_ID_HEADER: &str = "x-request-id";
    /// User agent sent with every request
    pub const USER_AGENT: &str = concat!("dispatch-admin/", env!("CARGO_PKG_VERSION"));
    /// Directory name under the platform config dir
    pub const CONFIG_DIR_NAME: &str = "dispatch-admin";
    /// Token store file name
    pub const TOKEN_STORE_FILE: &str = "tokens.json";
}

/// Fallback values used by the canonical driver transform
pub mod driver_fallbacks {
    /// Placeholder for missing text fields
    pub const NOT_AVAILABLE: &str = "N/A";
    /// Name used when no name field is present
    pub const UNKNOWN_DRIVER: &str = "Unknown Driver";
    /// Document status when nothing has been decided
    pub const DOCUMENT_PENDING: &str = "Pending";
    /// Document status when any document was approved and none rejected
    pub const DOCUMENT_APPROVED: &str = "Approved";
    /// Document status when any document was rejected
    pub const DOCUMENT_REJECTED: &str = "Rejected";
    /// Account status when the backend sends none
    pub const DEFAULT_STATUS: &str = "Active";
    /// Account status for blocked drivers
    pub const BLOCKED_STATUS: &str = "Blocked";
    /// Role filter used by the generic user collection
    pub const RIDER_ROLE: &str = "rider";
}

/// Diagnostic messages surfaced to operators
pub mod messages {
    /// Returned when a JSON endpoint answers with another content type
    pub const NON_JSON_RESPONSE: &str = "Server did not return JSON. Check that the API base URL points at the dispatch backend";
}
