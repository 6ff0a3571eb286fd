// ABOUTME: Per-resource summary counts derived from the currently loaded page
// ABOUTME: Admin, booking, coupon and ticket stats computed client-side
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

//! Page-scoped stats
//!
//! These summarize only the records on the loaded page, not the whole
//! collection. Use the `stats` endpoints for collection-wide figures.

use serde::Serialize;
use serde_json::Value;

fn lower(record: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| record.get(*key).and_then(Value::as_str))
        .map(str::to_lowercase)
}

fn flag(record: &Value, key: &str) -> Option<bool> {
    record.get(key).and_then(Value::as_bool)
}

fn amount(record: &Value, keys: &[&str]) -> f64 {
    keys.iter()
        .find_map(|key| match record.get(*key) {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.parse().ok(),
            _ => None,
        })
        .unwrap_or(0.0)
}

fn status_in(
    keys: &'static [&'static str],
    wanted: &'static [&'static str],
) -> impl Fn(&Value) -> bool {
    move |record: &Value| lower(record, keys).is_some_and(|s| wanted.contains(&s.as_str()))
}

fn count(items: &[Value], pred: impl Fn(&Value) -> bool) -> usize {
    items.iter().filter(|record| pred(record)).count()
}

/// Admin account counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    /// Records on the page
    pub total: usize,
    /// Active accounts
    pub active: usize,
    /// Deactivated accounts
    pub inactive: usize,
    /// Accounts with the super admin role
    pub super_admins: usize,
}

impl AdminStats {
    /// Summarize a page of admin records
    #[must_use]
    pub fn from_page(items: &[Value]) -> Self {
        let is_active = |r: &Value| {
            flag(r, "isActive").unwrap_or_else(|| match lower(r, &["status"]) {
                Some(status) => status == "active",
                None => true,
            })
        };
        let active = count(items, is_active);
        Self {
            total: items.len(),
            active,
            inactive: items.len() - active,
            super_admins: count(items, |r| {
                lower(r, &["role"]).is_some_and(|role| matches!(role.as_str(), "super_admin" | "superadmin"))
            }),
        }
    }
}

/// Booking counts by status plus completed revenue
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingStats {
    /// Records on the page
    pub total: usize,
    /// Awaiting confirmation
    pub pending: usize,
    /// Confirmed or accepted
    pub confirmed: usize,
    /// Ride under way
    pub in_progress: usize,
    /// Finished
    pub completed: usize,
    /// Cancelled by anyone
    pub cancelled: usize,
    /// Fare total of completed bookings
    pub revenue: f64,
}

impl BookingStats {
    /// Summarize a page of booking records
    #[must_use]
    pub fn from_page(items: &[Value]) -> Self {
        const STATUS: &[&str] = &["status", "bookingStatus"];
        let completed = status_in(STATUS, &["completed"]);
        Self {
            total: items.len(),
            pending: count(items, status_in(STATUS, &["pending"])),
            confirmed: count(items, status_in(STATUS, &["confirmed", "accepted"])),
            in_progress: count(
                items,
                status_in(STATUS, &["in_progress", "in-progress", "ongoing", "started"]),
            ),
            completed: count(items, &completed),
            cancelled: count(items, status_in(STATUS, &["cancelled", "canceled"])),
            revenue: items
                .iter()
                .filter(|r| completed(*r))
                .map(|r| amount(r, &["totalFare", "fare", "totalAmount", "amount"]))
                .sum(),
        }
    }
}

/// Coupon counts by state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponStats {
    /// Records on the page
    pub total: usize,
    /// Redeemable now
    pub active: usize,
    /// Switched off
    pub inactive: usize,
    /// Past their validity window
    pub expired: usize,
}

impl CouponStats {
    /// Summarize a page of coupon records
    #[must_use]
    pub fn from_page(items: &[Value]) -> Self {
        let state = |r: &Value| {
            if flag(r, "isExpired") == Some(true) {
                return "expired".to_owned();
            }
            lower(r, &["status"]).unwrap_or_else(|| match flag(r, "isActive") {
                Some(false) => "inactive".to_owned(),
                _ => "active".to_owned(),
            })
        };
        Self {
            total: items.len(),
            active: count(items, |r| state(r) == "active"),
            inactive: count(items, |r| state(r) == "inactive"),
            expired: count(items, |r| state(r) == "expired"),
        }
    }
}

/// Ticket counts by status and priority
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketStats {
    /// Records on the page
    pub total: usize,
    /// Newly opened
    pub open: usize,
    /// Being worked on
    pub in_progress: usize,
    /// Resolved, awaiting closure
    pub resolved: usize,
    /// Closed
    pub closed: usize,
    /// High or urgent priority
    pub high_priority: usize,
}

impl TicketStats {
    /// Summarize a page of ticket records
    #[must_use]
    pub fn from_page(items: &[Value]) -> Self {
        const STATUS: &[&str] = &["status"];
        Self {
            total: items.len(),
            open: count(items, status_in(STATUS, &["open", "new"])),
            in_progress: count(items, status_in(STATUS, &["in_progress", "in-progress", "pending"])),
            resolved: count(items, status_in(STATUS, &["resolved"])),
            closed: count(items, status_in(STATUS, &["closed"])),
            high_priority: count(items, |r| {
                lower(r, &["priority"]).is_some_and(|p| matches!(p.as_str(), "high" | "urgent"))
            }),
        }
    }
}
