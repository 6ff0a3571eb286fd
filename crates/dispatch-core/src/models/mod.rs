// ABOUTME: Core data models shared by the clients, stores and CLI
// ABOUTME: Credential pair, auth request payloads, and the canonical driver record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

/// Credential pair and admin auth request payloads
pub mod auth;
/// Canonical driver record produced by the driver transform
pub mod driver;

pub use auth::{ChangePasswordRequest, LoginRequest, RegisterRequest, TokenPair};
pub use driver::{BankDetails, DocumentDecision, Driver, DriverDocuments, GeoPoint, VehicleDetails};
