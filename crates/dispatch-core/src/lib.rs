// ABOUTME: Core types and constants for the dispatch admin API client
// ABOUTME: Foundation crate with error handling, pagination, models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

#![deny(unsafe_code)]

//! # Dispatch Core
//!
//! Foundation crate providing shared types and constants for the dispatch admin
//! client. This crate is designed to change infrequently, enabling incremental
//! compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Storage keys, endpoint templates and defaults
//! - **pagination**: Page metadata and the filter/pagination descriptor
//! - **models**: Credential pair, canonical driver record, request payloads

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Page metadata, list pages and list query descriptors
pub mod pagination;

/// Core data models (credentials, canonical driver, request payloads)
pub mod models;

pub use errors::{AppError, AppResult, ErrorCode};
pub use pagination::{ListPage, ListQuery, Pagination};
