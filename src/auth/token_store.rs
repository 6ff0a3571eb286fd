// ABOUTME: Credential storage for the access/refresh token pair
// ABOUTME: Injectable CredentialStore trait with in-memory and JSON-file backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use dashmap::DashMap;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use tracing::{debug, warn};

use crate::constants::storage_keys;
use crate::errors::{AppError, AppResult};
use crate::models::TokenPair;

/// Storage keys for one credential convention
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenKeys {
    /// Key holding the access token
    pub access: String,
    /// Key holding the refresh token
    pub refresh: String,
}

impl TokenKeys {
    /// `admin_access_token` / `admin_refresh_token`
    #[must_use]
    pub fn admin() -> Self {
        Self {
            access: storage_keys::ADMIN_ACCESS_TOKEN.to_owned(),
            refresh: storage_keys::ADMIN_REFRESH_TOKEN.to_owned(),
        }
    }

    /// `authToken` / `refreshToken`, used outside the admin auth flow
    #[must_use]
    pub fn generic() -> Self {
        Self {
            access: storage_keys::GENERIC_AUTH_TOKEN.to_owned(),
            refresh: storage_keys::GENERIC_REFRESH_TOKEN.to_owned(),
        }
    }
}

impl Default for TokenKeys {
    fn default() -> Self {
        Self::admin()
    }
}

/// Source of bearer credentials for outgoing requests
///
/// Reads never fail: a missing or unreadable value is `None`. Empty strings
/// count as absent.
pub trait CredentialStore: Send + Sync {
    /// Stored access token
    fn access_token(&self) -> Option<String>;

    /// Stored refresh token
    fn refresh_token(&self) -> Option<String>;

    /// Store the access token, and the refresh token only when one is given
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written
    fn set_tokens(&self, access: &str, refresh: Option<&str>) -> AppResult<()>;

    /// Remove both tokens; a no-op when nothing is stored
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written
    fn clear(&self) -> AppResult<()>;

    /// Store a token pair received from the backend
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written
    fn store_pair(&self, pair: &TokenPair) -> AppResult<()> {
        self.set_tokens(&pair.access_token, pair.refresh_token.as_deref())
    }

    /// `Authorization: Bearer <token>` when a token is stored, empty otherwise
    fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(token) = self.access_token() {
            if let Ok(value) = HeaderValue::from_str(&format!("Bearer {token}")) {
                headers.insert(AUTHORIZATION, value);
            }
        }
        headers
    }

    /// Whether an access token is stored
    fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }
}

fn read_key(entries: &DashMap<String, String>, key: &str) -> Option<String> {
    entries
        .get(key)
        .map(|v| v.value().clone())
        .filter(|v| !v.is_empty())
}

fn write_pair(entries: &DashMap<String, String>, keys: &TokenKeys, access: &str, refresh: Option<&str>) {
    entries.insert(keys.access.clone(), access.to_owned());
    if let Some(refresh) = refresh {
        entries.insert(keys.refresh.clone(), refresh.to_owned());
    }
}

fn remove_pair(entries: &DashMap<String, String>, keys: &TokenKeys) {
    entries.remove(&keys.access);
    entries.remove(&keys.refresh);
}

fn snapshot_of(entries: &DashMap<String, String>) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|entry| (entry.key().clone(), entry.value().clone()))
        .collect()
}

/// Process-local credential store
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    keys: TokenKeys,
    entries: DashMap<String, String>,
}

impl MemoryTokenStore {
    /// Empty store using the given keys
    #[must_use]
    pub fn new(keys: TokenKeys) -> Self {
        Self {
            keys,
            entries: DashMap::new(),
        }
    }

    /// Empty store using the admin keys
    #[must_use]
    pub fn admin() -> Self {
        Self::new(TokenKeys::admin())
    }

    /// Store pre-seeded with an access token
    #[must_use]
    pub fn with_access_token(token: &str) -> Self {
        let store = Self::admin();
        write_pair(&store.entries, &store.keys, token, None);
        store
    }
}

impl CredentialStore for MemoryTokenStore {
    fn access_token(&self) -> Option<String> {
        read_key(&self.entries, &self.keys.access)
    }

    fn refresh_token(&self) -> Option<String> {
        read_key(&self.entries, &self.keys.refresh)
    }

    fn set_tokens(&self, access: &str, refresh: Option<&str>) -> AppResult<()> {
        write_pair(&self.entries, &self.keys, access, refresh);
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        remove_pair(&self.entries, &self.keys);
        Ok(())
    }
}

/// Credential store persisted as a JSON key/value file
///
/// Values are cached in memory and every write rewrites the whole file, so
/// keys owned by other conventions in the same file are preserved. Writes go
/// to a sibling temp file that is renamed over the store, one writer at a
/// time; the cache only changes once the file has been replaced.
#[derive(Debug)]
pub struct FileTokenStore {
    keys: TokenKeys,
    path: PathBuf,
    entries: DashMap<String, String>,
    write_lock: Mutex<()>,
}

impl FileTokenStore {
    /// Open the store at `path`; a missing or unreadable file starts empty
    #[must_use]
    pub fn open(path: impl Into<PathBuf>, keys: TokenKeys) -> Self {
        let path = path.into();
        let entries = DashMap::new();
        for (key, value) in load_entries(&path) {
            entries.insert(key, value);
        }
        debug!(path = %path.display(), "Token store opened");
        Self {
            keys,
            path,
            entries,
            write_lock: Mutex::new(()),
        }
    }

    /// Open the store at `path` with the admin keys
    #[must_use]
    pub fn admin(path: impl Into<PathBuf>) -> Self {
        Self::open(path, TokenKeys::admin())
    }

    /// File backing this store
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `change` to a copy of the entries, persist it, then commit it to the cache
    fn update(&self, change: impl FnOnce(&DashMap<String, String>)) -> AppResult<()> {
        let writer = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let next = self.entries.clone();
        change(&next);
        let snapshot = snapshot_of(&next);
        self.persist(&snapshot)?;

        self.entries.retain(|key, _| snapshot.contains_key(key));
        for (key, value) in snapshot {
            self.entries.insert(key, value);
        }
        drop(writer);
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".{}.tmp", std::process::id()));
        PathBuf::from(name)
    }

    fn persist(&self, snapshot: &BTreeMap<String, String>) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::storage(format!(
                    "Failed to create token store directory {}: {e}",
                    parent.display()
                ))
                .with_source(e)
            })?;
        }

        let contents = serde_json::to_string_pretty(snapshot)?;
        let temp = self.temp_path();
        let written = fs::write(&temp, contents).and_then(|()| fs::rename(&temp, &self.path));
        written.map_err(|e| {
            if let Err(cleanup) = fs::remove_file(&temp) {
                debug!(path = %temp.display(), error = %cleanup, "No temp token file to remove");
            }
            AppError::storage(format!(
                "Failed to write token store {}: {e}",
                self.path.display()
            ))
            .with_source(e)
        })
    }
}

fn load_entries(path: &Path) -> BTreeMap<String, String> {
    if !path.exists() {
        return BTreeMap::new();
    }
    match fs::read_to_string(path) {
        Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "Token store is not valid JSON; starting empty");
            BTreeMap::new()
        }),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Token store is unreadable; starting empty");
            BTreeMap::new()
        }
    }
}

impl CredentialStore for FileTokenStore {
    fn access_token(&self) -> Option<String> {
        read_key(&self.entries, &self.keys.access)
    }

    fn refresh_token(&self) -> Option<String> {
        read_key(&self.entries, &self.keys.refresh)
    }

    fn set_tokens(&self, access: &str, refresh: Option<&str>) -> AppResult<()> {
        self.update(|entries| write_pair(entries, &self.keys, access, refresh))
    }

    fn clear(&self) -> AppResult<()> {
        self.update(|entries| remove_pair(entries, &self.keys))
    }
}
