// ABOUTME: Credential storage module for admin sessions
// ABOUTME: Re-exports the CredentialStore trait and its memory and file backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

//! Credential storage
//!
//! Clients receive an `Arc<dyn CredentialStore>` at construction instead of
//! reaching for process-wide state, so tests can hand in a fresh store.

/// Token store trait and backends
pub mod token_store;

pub use token_store::{CredentialStore, FileTokenStore, MemoryTokenStore, TokenKeys};
