// ABOUTME: HTTP layer for talking to the dispatch backend
// ABOUTME: Client construction, request descriptors, transport and payload unwrapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

/// Shared reqwest client construction
pub mod client;
/// Request and response descriptors
pub mod request;
/// Transport with refresh-and-retry and fallback chains
pub mod transport;
/// Envelope unwrapping helpers
pub mod unwrap;

pub use client::create_client;
pub use request::{ApiRequest, MultipartField, MultipartValue, RequestBody, ResponseBody};
pub use transport::ApiClient;
pub use unwrap::{empty_list_body, extract_list, extract_token_pair, unwrap_payload};
