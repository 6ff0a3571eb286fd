// ABOUTME: Main library entry point for the dispatch admin API client
// ABOUTME: Typed clients, credential storage and view-state stores for the back office
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

#![deny(unsafe_code)]

//! # Dispatch Admin
//!
//! Client layer for the back office of the delivery platform. Every admin
//! surface (the `dispatch-admin` CLI, embedding services, tests) talks to the
//! backend through the types in this crate.
//!
//! ## Architecture
//!
//! - **Config**: base URL, version prefix and `:key` URL templates
//! - **Auth**: injectable credential stores (memory and file backed)
//! - **HTTP**: one transport with bounded refresh-and-retry and an ordered
//!   fallback runner for endpoints exposed under two collections
//! - **Clients**: auth/admin, drivers, bookings, coupons and tickets
//! - **Transform**: canonical driver record built from any backend shape
//! - **State**: list stores holding items, pagination, loading and error flags
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use dispatch_admin::auth::MemoryTokenStore;
//! use dispatch_admin::clients::CouponClient;
//! use dispatch_admin::config::ApiConfig;
//! use dispatch_admin::errors::AppResult;
//! use dispatch_admin::http::ApiClient;
//! use dispatch_admin::pagination::ListQuery;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ApiConfig::from_env()?;
//!     let api = ApiClient::new(config, Arc::new(MemoryTokenStore::admin()));
//!     let coupons = CouponClient::new(api);
//!     let body = coupons
//!         .get_all_coupons(&ListQuery::new().with("status", "Active").page(1))
//!         .await?;
//!     println!("{body}");
//!     Ok(())
//! }
//! ```

pub use dispatch_core::{constants, errors, models, pagination};

/// Credential storage abstraction and backends
pub mod auth;

/// Resource clients for every backend resource family
pub mod clients;

/// Backend connection configuration and URL/header building
pub mod config;

/// HTTP transport, request builder and response unwrapping
pub mod http;

/// Structured logging setup
pub mod logging;

/// View-state list stores
pub mod state;

/// Backend payload normalization
pub mod transform;
