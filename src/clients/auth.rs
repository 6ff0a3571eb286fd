// ABOUTME: Admin authentication client and admin account management
// ABOUTME: Login/register persist the credential pair, logout always clears it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

use serde_json::Value;
use tracing::{info, warn};

use super::degrade_read;
use crate::constants::endpoints::admin;
use crate::errors::AppResult;
use crate::http::{empty_list_body, extract_token_pair, ApiClient, ApiRequest};
use crate::models::{ChangePasswordRequest, LoginRequest, RegisterRequest, TokenPair};
use crate::pagination::ListQuery;

/// Collection key for the admin list
pub const ADMINS_COLLECTION: &str = "admins";

/// Admin authentication client
#[derive(Clone)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    /// Create an auth client
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Underlying transport
    #[must_use]
    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    fn store_tokens(&self, pair: &TokenPair) -> AppResult<()> {
        self.api.credentials().store_pair(pair)
    }

    /// Register an admin and sign in with the returned credentials
    ///
    /// # Errors
    ///
    /// Returns the backend error, or an invalid response for non-JSON bodies
    pub async fn register(&self, request: &RegisterRequest) -> AppResult<Value> {
        let body = self
            .api
            .execute_json(&ApiRequest::post(admin::REGISTER).json_from(request)?.expect_json())
            .await?;

        if let Ok(pair) = extract_token_pair(&body) {
            self.store_tokens(&pair)?;
            info!(email = %request.email, "Admin registered and signed in");
        }
        Ok(body)
    }

    /// Sign in and persist the credential pair
    ///
    /// # Errors
    ///
    /// Returns the backend error, an invalid response when the server does not
    /// answer with JSON, or when the body carries no access token
    pub async fn login(&self, email: &str, password: &str) -> AppResult<Value> {
        let request = LoginRequest {
            email: email.to_owned(),
            password: password.to_owned(),
        };
        let body = self
            .api
            .execute_json(&ApiRequest::post(admin::LOGIN).json_from(&request)?.expect_json())
            .await?;

        let pair = extract_token_pair(&body)?;
        self.store_tokens(&pair)?;
        info!(email, "Admin signed in");
        Ok(body)
    }

    /// Sign out; stored credentials are cleared whether or not the call succeeds
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error after clearing credentials
    pub async fn logout(&self) -> AppResult<Value> {
        let result = self
            .api
            .execute_json(&ApiRequest::post(admin::LOGOUT))
            .await;

        if let Err(e) = self.api.credentials().clear() {
            warn!(error = %e, "Failed to clear stored credentials on logout");
        }
        match &result {
            Ok(_) => info!("Admin signed out"),
            Err(e) => warn!(error = %e, "Logout request failed; local session cleared"),
        }
        result
    }

    /// Exchange the refresh token for a new credential pair
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` without a refresh token, otherwise the backend error
    pub async fn refresh_token(&self) -> AppResult<TokenPair> {
        self.api.refresh_session().await
    }

    /// Current admin profile
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn get_profile(&self) -> AppResult<Value> {
        self.api.execute_json(&ApiRequest::get(admin::PROFILE)).await
    }

    /// Update the current admin profile
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn update_profile(&self, payload: &Value) -> AppResult<Value> {
        self.api
            .execute_json(&ApiRequest::put(admin::PROFILE).json(payload.clone()))
            .await
    }

    /// Change the current admin's password
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn change_password(&self, request: &ChangePasswordRequest) -> AppResult<Value> {
        self.api
            .execute_json(&ApiRequest::put(admin::CHANGE_PASSWORD).json_from(request)?)
            .await
    }

    /// List admin accounts (read path)
    ///
    /// # Errors
    ///
    /// Returns backend errors; transport failures resolve to an empty list
    pub async fn get_all_admins(&self, query: &ListQuery) -> AppResult<Value> {
        let result = self
            .api
            .execute_json(&ApiRequest::get(admin::ALL).query(query.clone()))
            .await;
        degrade_read(admin::ALL, result, || {
            empty_list_body(
                ADMINS_COLLECTION,
                query
                    .limit_value()
                    .unwrap_or(self.api.config().default_page_limit),
            )
        })
    }

    /// Create another admin account without touching the current session
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn create_admin(&self, payload: &Value) -> AppResult<Value> {
        self.api
            .execute_json(&ApiRequest::post(admin::REGISTER).json(payload.clone()))
            .await
    }

    /// Update an admin account
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn update_admin(&self, id: &str, payload: &Value) -> AppResult<Value> {
        self.api
            .execute_json(&ApiRequest::put(admin::BY_ID).id(id).json(payload.clone()))
            .await
    }

    /// Delete an admin account
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error
    pub async fn delete_admin(&self, id: &str) -> AppResult<Value> {
        self.api
            .execute_json(&ApiRequest::delete(admin::BY_ID).id(id))
            .await
    }

    /// Whether an access token is stored
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.api.credentials().is_authenticated()
    }
}
