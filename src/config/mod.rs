// ABOUTME: Configuration module for the backend connection settings
// ABOUTME: Exposes ApiConfig with the URL and header builders used by every client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors
//! Configuration module
//!
//! - **Environment**: base URL, version prefix, timeouts and retry policy
//! - **URL building**: `:key` placeholder substitution for endpoint templates
//! - **Header building**: JSON defaults plus bearer credentials

/// Environment and backend connection configuration
pub mod environment;

pub use environment::{substitute_path_params, ApiConfig};
