// ABOUTME: Resource clients for every backend resource family
// ABOUTME: Auth/admin, drivers, bookings, coupons and tickets over one shared transport
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

//! Resource clients
//!
//! Every client wraps an [`ApiClient`](crate::http::ApiClient). List methods
//! are read paths: when the backend cannot be reached they resolve to an
//! empty page instead of failing. Every other method propagates its error.

/// Admin authentication and admin account management
pub mod auth;
/// Bookings
pub mod bookings;
/// Coupons
pub mod coupons;
/// Shared CRUD plumbing for conventional REST resources
pub mod crud;
/// Drivers with rider/user endpoint fallback
pub mod drivers;
/// Support tickets
pub mod tickets;

pub use auth::AuthClient;
pub use bookings::BookingClient;
pub use coupons::CouponClient;
pub use crud::ResourceApi;
pub use drivers::DriverClient;
pub use tickets::TicketClient;

use tracing::warn;

use crate::errors::AppResult;

/// Replace a transport failure with `fallback()` on read paths
pub(crate) fn degrade_read<T>(
    operation: &str,
    result: AppResult<T>,
    fallback: impl FnOnce() -> T,
) -> AppResult<T> {
    match result {
        Err(e) if e.is_transport() => {
            warn!(operation, error = %e, "Backend unreachable; returning an empty list");
            Ok(fallback())
        }
        other => other,
    }
}
