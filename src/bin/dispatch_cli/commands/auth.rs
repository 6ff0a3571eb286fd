// ABOUTME: Session commands for dispatch-admin
// ABOUTME: Login, logout, profile and refresh against the admin auth endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

use dispatch_admin::{clients::AuthClient, errors::AppResult, http::ApiClient};
use tracing::info;

use crate::helpers::display::print_json;

type Result<T> = AppResult<T>;

/// Sign in and persist the session
pub async fn login(api: &ApiClient, email: &str, password: &str) -> Result<()> {
    let client = AuthClient::new(api.clone());
    client.login(email, password).await?;
    println!("Signed in as {email}");
    Ok(())
}

/// Sign out; the local session is cleared even if the backend call fails
pub async fn logout(api: &ApiClient) -> Result<()> {
    let client = AuthClient::new(api.clone());
    if !client.is_authenticated() {
        println!("Not signed in");
        return Ok(());
    }
    client.logout().await?;
    println!("Signed out");
    Ok(())
}

/// Print the signed-in admin's profile
pub async fn profile(api: &ApiClient) -> Result<()> {
    let body = AuthClient::new(api.clone()).get_profile().await?;
    print_json(&body);
    Ok(())
}

/// Force a session refresh
pub async fn refresh(api: &ApiClient) -> Result<()> {
    AuthClient::new(api.clone()).refresh_token().await?;
    info!("Session refreshed from CLI");
    println!("Session refreshed");
    Ok(())
}
