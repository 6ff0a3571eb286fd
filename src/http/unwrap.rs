// ABOUTME: Envelope unwrapping for backend payloads that nest records under varying keys
// ABOUTME: Ordered unwrap, list extraction with pagination, and token pair extraction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

use serde_json::{json, Value};
use tracing::debug;

use crate::errors::{AppError, AppResult};
use crate::models::TokenPair;
use crate::pagination::{ListPage, ListQuery, Pagination};

/// Return the first `payload[key]` that is an object, trying `keys` in order
///
/// Falls back to `payload` itself when no key matches.
#[must_use]
pub fn unwrap_payload<'a>(payload: &'a Value, keys: &[&str]) -> &'a Value {
    keys.iter()
        .find_map(|key| payload.get(*key).filter(|inner| inner.is_object()))
        .unwrap_or(payload)
}

fn find_array<'a>(container: &'a Value, collection_keys: &[&str]) -> Option<&'a Vec<Value>> {
    if let Value::Array(items) = container {
        return Some(items);
    }
    collection_keys
        .iter()
        .chain(["items", "data"].iter())
        .find_map(|key| container.get(*key).and_then(Value::as_array))
}

fn count_of(container: &Value, keys: &[&str]) -> Option<u64> {
    keys.iter().find_map(|key| match container.get(*key)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn clamp_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Read a `pagination` object field by field, filling gaps from `derived`
///
/// Each field takes the first usable key in order, so a body carrying both a
/// field and its alias (`page` and `currentPage`) or numeric strings still
/// keeps the backend's figures.
fn find_pagination(candidates: &[&Value], derived: &Pagination) -> Option<Pagination> {
    let meta = candidates
        .iter()
        .find_map(|container| container.get("pagination").filter(|p| p.is_object()))?;

    let limit = count_of(meta, &["limit", "perPage", "pageSize"])
        .map(clamp_u32)
        .filter(|limit| *limit > 0)
        .unwrap_or(derived.limit);
    let total = count_of(meta, &["total", "totalItems", "totalCount"]);
    let pages = count_of(meta, &["pages", "totalPages"]).map(clamp_u32);
    if total.is_none() || pages.is_none() {
        debug!(
            has_total = total.is_some(),
            has_pages = pages.is_some(),
            "Partial pagination; filling gaps"
        );
    }
    let total = total.unwrap_or(derived.total);

    Some(Pagination {
        page: count_of(meta, &["page", "currentPage"])
            .map(clamp_u32)
            .filter(|page| *page > 0)
            .unwrap_or(derived.page),
        limit,
        total,
        pages: pages.unwrap_or_else(|| clamp_u32(total.div_ceil(u64::from(limit.max(1))))),
    })
}

/// Pull a record list and its pagination out of any list envelope
///
/// Accepts a bare array, `{key: [...]}`, `{data: [...]}` and
/// `{data: {key: [...]}}`. Pagination is read from a `pagination` object at
/// either level; fields it lacks, or a missing object, are derived from the
/// query and item count.
#[must_use]
pub fn extract_list(
    body: &Value,
    collection_keys: &[&str],
    query: &ListQuery,
    default_limit: u32,
) -> ListPage<Value> {
    let data = body.get("data").unwrap_or(&Value::Null);
    let items = find_array(body, collection_keys)
        .or_else(|| find_array(data, collection_keys))
        .cloned()
        .unwrap_or_default();

    let limit = query.limit_value().unwrap_or(default_limit);
    let derived = Pagination::for_items(query.page_number().unwrap_or(1), limit, items.len());
    let pagination = find_pagination(&[body, data], &derived).unwrap_or_else(|| {
        debug!(count = items.len(), "List response carried no pagination; deriving it");
        derived
    });

    ListPage::new(items, pagination)
}

/// Read-path fallback body: `{key: [], pagination: {page:1, limit, total:0, pages:0}}`
#[must_use]
pub fn empty_list_body(collection_key: &str, limit: u32) -> Value {
    json!({
        collection_key: [],
        "pagination": Pagination::empty(limit),
    })
}

fn first_string(container: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        container
            .get(*key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    })
}

/// Extract the credential pair from a login, register or refresh response
///
/// Looks at the body, then `data`, `tokens` and `data.tokens`, accepting
/// `accessToken`, `access_token` or `token`.
///
/// # Errors
///
/// Returns an error if no access token is present
pub fn extract_token_pair(body: &Value) -> AppResult<TokenPair> {
    let data = body.get("data").unwrap_or(&Value::Null);
    let containers = [
        body,
        data,
        body.get("tokens").unwrap_or(&Value::Null),
        data.get("tokens").unwrap_or(&Value::Null),
    ];

    containers
        .iter()
        .find_map(|container| {
            first_string(container, &["accessToken", "access_token", "token"]).map(|access| {
                TokenPair {
                    access_token: access,
                    refresh_token: first_string(container, &["refreshToken", "refresh_token"])
                        .or_else(|| {
                            containers
                                .iter()
                                .find_map(|c| first_string(c, &["refreshToken", "refresh_token"]))
                        }),
                }
            })
        })
        .ok_or_else(|| {
            AppError::invalid_response("Authentication response did not include an access token")
                .with_details(body.clone())
        })
}
