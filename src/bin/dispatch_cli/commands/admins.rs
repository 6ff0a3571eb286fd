// ABOUTME: Admin account commands for dispatch-admin
// ABOUTME: Paged listing of back-office accounts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

use dispatch_admin::{clients::AuthClient, errors::AppResult, http::ApiClient, state::AdminsStore};

use crate::helpers::display::print_snapshot;
use crate::ListArgs;

const COLUMNS: &[(&str, &[&str])] = &[
    ("NAME", &["name", "fullName"]),
    ("EMAIL", &["email"]),
    ("ROLE", &["role"]),
    ("ACTIVE", &["isActive", "status"]),
];

/// List admin accounts
pub async fn list(api: &ApiClient, args: &ListArgs) -> AppResult<()> {
    let store = AdminsStore::new(AuthClient::new(api.clone()));
    store.fetch(&args.to_query()).await;
    let snapshot = store.snapshot().await;
    if let Some(err) = snapshot.failure() {
        return Err(err);
    }
    print_snapshot(&snapshot, COLUMNS);
    Ok(())
}
