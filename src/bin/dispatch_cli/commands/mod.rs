// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors
// ABOUTME: Re-exports command modules for dispatch-admin
// ABOUTME: One module per resource family

pub mod admins;
pub mod auth;
pub mod bookings;
pub mod coupons;
pub mod drivers;
pub mod tickets;
