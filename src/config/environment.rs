// ABOUTME: Environment configuration for the backend connection and client behaviour
// ABOUTME: Resolves base URL, version prefix, timeouts and retry policy once at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

//! Environment-based configuration management

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use tracing::{debug, warn};
use url::Url;

use crate::auth::CredentialStore;
use crate::constants::{defaults, env_config};
use crate::errors::{AppError, AppResult};

/// Backend connection configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Scheme + host (+ port), without a trailing slash
    pub base_url: String,
    /// Versioned path prefix such as `/api/v1`
    pub version_prefix: String,
    /// Whole-request timeout
    pub timeout: Duration,
    /// TCP connect timeout
    pub connect_timeout: Duration,
    /// Session refreshes allowed per logical call
    pub max_refresh_retries: u32,
    /// Page size used when the caller does not pick one
    pub default_page_limit: u32,
    /// Header carrying the per-request correlation id
    pub request_id_header: String,
    /// File backing the persistent token store
    pub token_store_path: PathBuf,
    /// User agent sent with every request
    pub user_agent: String,
}

impl ApiConfig {
    /// Configuration pointing at `base_url` with every other value defaulted
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an absolute http(s) URL
    pub fn new(base_url: impl Into<String>) -> AppResult<Self> {
        let config = Self {
            base_url: normalize_base_url(&base_url.into()),
            version_prefix: defaults::API_VERSION_PREFIX.to_owned(),
            timeout: Duration::from_millis(defaults::API_TIMEOUT_MS),
            connect_timeout: Duration::from_millis(defaults::API_CONNECT_TIMEOUT_MS),
            max_refresh_retries: defaults::MAX_REFRESH_RETRIES,
            default_page_limit: defaults::PAGE_LIMIT,
            request_id_header: defaults::REQUEST_ID_HEADER.to_owned(),
            token_store_path: default_token_store_path(),
            user_agent: defaults::USER_AGENT.to_owned(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but invalid
    pub fn from_env() -> AppResult<Self> {
        let base_url = env::var(env_config::API_BASE_URL)
            .unwrap_or_else(|_| defaults::API_BASE_URL.to_owned());

        let config = Self {
            base_url: normalize_base_url(&base_url),
            version_prefix: env::var(env_config::API_VERSION_PREFIX)
                .unwrap_or_else(|_| defaults::API_VERSION_PREFIX.to_owned()),
            timeout: Duration::from_millis(parse_env(
                env_config::API_TIMEOUT_MS,
                defaults::API_TIMEOUT_MS,
            )?),
            connect_timeout: Duration::from_millis(parse_env(
                env_config::API_CONNECT_TIMEOUT_MS,
                defaults::API_CONNECT_TIMEOUT_MS,
            )?),
            max_refresh_retries: parse_env(
                env_config::MAX_REFRESH_RETRIES,
                defaults::MAX_REFRESH_RETRIES,
            )?,
            default_page_limit: parse_env(env_config::DEFAULT_PAGE_LIMIT, defaults::PAGE_LIMIT)?,
            request_id_header: env::var(env_config::REQUEST_ID_HEADER)
                .unwrap_or_else(|_| defaults::REQUEST_ID_HEADER.to_owned()),
            token_store_path: env::var(env_config::TOKEN_STORE_PATH)
                .map_or_else(|_| default_token_store_path(), PathBuf::from),
            user_agent: defaults::USER_AGENT.to_owned(),
        };

        config.validate()?;
        debug!(
            base_url = %config.base_url,
            prefix = %config.version_prefix,
            timeout_ms = config.timeout.as_millis() as u64,
            "API configuration loaded from environment"
        );
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid value
    pub fn validate(&self) -> AppResult<()> {
        let parsed = Url::parse(&self.base_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::config(format!(
                "{} must use http or https, got '{}'",
                env_config::API_BASE_URL,
                parsed.scheme()
            )));
        }
        if !self.version_prefix.is_empty() && !self.version_prefix.starts_with('/') {
            return Err(AppError::config(format!(
                "{} must start with '/', got '{}'",
                env_config::API_VERSION_PREFIX,
                self.version_prefix
            )));
        }
        if self.default_page_limit == 0 {
            return Err(AppError::config(format!(
                "{} must be greater than 0",
                env_config::DEFAULT_PAGE_LIMIT
            )));
        }
        if HeaderName::from_bytes(self.request_id_header.as_bytes()).is_err() {
            return Err(AppError::config(format!(
                "{} is not a valid header name: '{}'",
                env_config::REQUEST_ID_HEADER,
                self.request_id_header
            )));
        }
        Ok(())
    }

    /// Builder-style version prefix override
    #[must_use]
    pub fn with_version_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.version_prefix = prefix.into();
        self
    }

    /// Builder-style refresh retry override
    #[must_use]
    pub const fn with_max_refresh_retries(mut self, retries: u32) -> Self {
        self.max_refresh_retries = retries;
        self
    }

    /// Builder-style timeout override
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style token store path override
    #[must_use]
    pub fn with_token_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_store_path = path.into();
        self
    }

    /// Absolute URL for an endpoint template
    ///
    /// Returns `base + prefix + path` with each `:key` token in `path` replaced
    /// by the matching value in `params`. Tokens without a matching entry stay
    /// in the output verbatim. Values are inserted without escaping.
    #[must_use]
    pub fn build_url<K, V>(&self, path: &str, params: &[(K, V)]) -> String
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        format!(
            "{}{}{}",
            self.base_url,
            self.version_prefix,
            substitute_path_params(path, params)
        )
    }

    /// Default JSON headers plus bearer auth, with `custom` applied last
    #[must_use]
    pub fn build_headers(&self, credentials: &dyn CredentialStore, custom: &HeaderMap) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = credentials.access_token() {
            match HeaderValue::from_str(&format!("Bearer {token}")) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => warn!("Stored access token is not a valid header value; sending unauthenticated"),
            }
        }

        for (name, value) in custom {
            headers.insert(name.clone(), value.clone());
        }
        headers
    }
}

/// Replace `:key` tokens in a path template, one pass, no escaping
#[must_use]
pub fn substitute_path_params<K, V>(template: &str, params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find(':') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let key_len = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(after.len());
        let key = &after[..key_len];

        match params.iter().find(|(k, _)| k.as_ref() == key) {
            Some((_, value)) if !key.is_empty() => out.push_str(value.as_ref()),
            _ => {
                out.push(':');
                out.push_str(key);
            }
        }
        rest = &after[key_len..];
    }

    out.push_str(rest);
    out
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

fn default_token_store_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(env::temp_dir)
        .join(defaults::CONFIG_DIR_NAME)
        .join(defaults::TOKEN_STORE_FILE)
}

fn parse_env<T>(name: &str, default: T) -> AppResult<T>
where
    T: std::str::FromStr,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| AppError::config(format!("{name} must be a valid number, got '{raw}'"))),
        _ => Ok(default),
    }
}
