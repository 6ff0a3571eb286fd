// ABOUTME: View-state stores for the admin, booking, coupon and ticket lists
// ABOUTME: Generic ResourceStore over the ListResource trait plus page-scoped stats
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

//! View-state stores
//!
//! A [`ResourceStore`] is what a screen binds to: the loaded page, its
//! pagination, loading and error flags, and actions that re-enter loading.

/// `ListResource` implementations for the resource clients
pub mod resources;
/// Page-scoped stats types
pub mod stats;
/// Generic list store
pub mod store;

pub use stats::{AdminStats, BookingStats, CouponStats, TicketStats};
pub use store::{ListResource, ListSnapshot, ResourceStore};

use crate::clients::{AuthClient, BookingClient, CouponClient, TicketClient};

/// Admin accounts list
pub type AdminsStore = ResourceStore<AuthClient>;
/// Bookings list
pub type BookingsStore = ResourceStore<BookingClient>;
/// Coupons list
pub type CouponsStore = ResourceStore<CouponClient>;
/// Support tickets list
pub type TicketsStore = ResourceStore<TicketClient>;
