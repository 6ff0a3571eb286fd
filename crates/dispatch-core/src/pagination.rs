// ABOUTME: Page-number pagination metadata and list query descriptors
// ABOUTME: Defines Pagination, ListPage, and the ordered ListQuery filter builder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

use serde::{Deserialize, Serialize};

use crate::constants::defaults;

/// Page metadata as reported by the backend list endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// 1-based page number
    #[serde(default = "first_page", alias = "currentPage")]
    pub page: u32,
    /// Page size
    #[serde(default = "default_limit", alias = "perPage", alias = "pageSize")]
    pub limit: u32,
    /// Total records across all pages
    #[serde(default, alias = "totalItems", alias = "totalCount")]
    pub total: u64,
    /// Total number of pages
    #[serde(default, alias = "totalPages")]
    pub pages: u32,
}

const fn first_page() -> u32 {
    1
}

const fn default_limit() -> u32 {
    defaults::PAGE_LIMIT
}

impl Pagination {
    /// Pagination describing an empty result: `{page:1, limit, total:0, pages:0}`
    #[must_use]
    pub const fn empty(limit: u32) -> Self {
        Self {
            page: 1,
            limit,
            total: 0,
            pages: 0,
        }
    }

    /// Derive pagination for a list returned without metadata
    #[must_use]
    pub fn for_items(page: u32, limit: u32, count: usize) -> Self {
        let total = count as u64;
        let pages = if total == 0 { 0 } else { 1 };
        Self {
            page: page.max(1),
            limit,
            total,
            pages,
        }
    }

    /// Whether a later page exists
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.pages
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::empty(defaults::PAGE_LIMIT)
    }
}

/// A page of records plus its pagination metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPage<T> {
    /// Records on this page
    pub items: Vec<T>,
    /// Page metadata
    pub pagination: Pagination,
}

impl<T> ListPage<T> {
    /// Create a page from items and metadata
    #[must_use]
    pub const fn new(items: Vec<T>, pagination: Pagination) -> Self {
        Self { items, pagination }
    }

    /// The read-path fallback shape: no items, `page:1`, `total:0`
    #[must_use]
    pub const fn empty(limit: u32) -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination::empty(limit),
        }
    }

    /// True when the page holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Filter/pagination descriptor for list calls
///
/// Keys keep their insertion order so the generated query string is stable.
/// Setting an existing key replaces its value in place. Absent and empty
/// values are kept in the descriptor but never serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pairs: Vec<(String, Option<String>)>,
}

impl ListQuery {
    /// Key used for the page number
    pub const PAGE: &'static str = "page";
    /// Key used for the page size
    pub const LIMIT: &'static str = "limit";

    /// Empty descriptor
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Builder-style setter
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.set(key, Some(value.to_string()));
        self
    }

    /// Builder-style setter for an optional value
    #[must_use]
    pub fn with_opt(mut self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        self.set(key, value.map(|v| v.to_string()));
        self
    }

    /// Builder-style page setter
    #[must_use]
    pub fn page(self, page: u32) -> Self {
        self.with(Self::PAGE, page)
    }

    /// Builder-style limit setter
    #[must_use]
    pub fn limit(self, limit: u32) -> Self {
        self.with(Self::LIMIT, limit)
    }

    /// Set or replace a key
    pub fn set(&mut self, key: impl Into<String>, value: Option<String>) {
        let key = key.into();
        if let Some(slot) = self.pairs.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.pairs.push((key, value));
        }
    }

    /// Raw value for a key (empty strings included)
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Page number, if set and numeric
    #[must_use]
    pub fn page_number(&self) -> Option<u32> {
        self.get(Self::PAGE).and_then(|v| v.parse().ok())
    }

    /// Page size, if set and numeric
    #[must_use]
    pub fn limit_value(&self) -> Option<u32> {
        self.get(Self::LIMIT).and_then(|v| v.parse().ok())
    }

    /// Overlay `self` onto `base`: keys in `self` win, `base` order is kept
    #[must_use]
    pub fn merged_over(&self, base: &Self) -> Self {
        let mut merged = base.clone();
        for (key, value) in &self.pairs {
            merged.set(key.clone(), value.clone());
        }
        merged
    }

    /// Serializable pairs, omitting absent and empty-string values
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.pairs
            .iter()
            .filter_map(|(k, v)| match v.as_deref() {
                Some(value) if !value.is_empty() => Some((k.clone(), value.to_owned())),
                _ => None,
            })
            .collect()
    }

    /// True when nothing would be serialized
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_pairs().is_empty()
    }
}
