// ABOUTME: Canonical driver record normalized from rider and user payloads
// ABOUTME: Every field carries a fallback so the record is total over backend shapes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Flattened driver record used by every driver view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    /// Backend record id (`_id` or `id`)
    pub id: String,
    /// Business driver id (`riderId`, `driverId`, falls back to `id`)
    pub driver_id: String,
    /// Resolved display name
    pub full_name: String,
    /// Phone number
    pub mobile: String,
    /// Email address
    pub email: String,
    /// Account status (`Active`, `Blocked`, ...)
    pub status: String,
    /// Whether the account is blocked
    pub is_blocked: bool,
    /// Vehicle category (`bike`, `auto`, ...)
    pub vehicle_type: String,
    /// Vehicle registration details
    pub vehicle_details: VehicleDetails,
    /// Uploaded document URLs
    pub documents: DriverDocuments,
    /// Aggregate document review status
    pub document_status: String,
    /// Payout bank account
    pub bank: BankDetails,
    /// Currently accepting rides
    pub online: bool,
    /// Wallet balance
    pub wallet_balance: f64,
    /// Average rating
    pub rating: f64,
    /// Completed ride count
    pub total_rides: u64,
    /// Last reported position
    pub location: Option<GeoPoint>,
    /// Registration timestamp as sent by the backend
    pub joined_at: Option<String>,
    /// The untransformed source object
    pub raw: Value,
}

/// Vehicle registration details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDetails {
    /// Registration plate
    pub number: String,
    /// Make and model
    pub model: String,
    /// Paint colour
    pub color: String,
    /// Manufacture year
    pub year: String,
}

/// Document image URLs, `None` when not uploaded
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverDocuments {
    /// Driving licence
    pub driving_license: Option<String>,
    /// Vehicle registration certificate
    pub vehicle_rc: Option<String>,
    /// Vehicle insurance
    pub insurance: Option<String>,
    /// National id card
    pub aadhar_card: Option<String>,
    /// Tax id card
    pub pan_card: Option<String>,
    /// Profile photo
    pub profile_photo: Option<String>,
}

impl DriverDocuments {
    /// Whether at least one document has been uploaded
    #[must_use]
    pub const fn has_any(&self) -> bool {
        self.driving_license.is_some()
            || self.vehicle_rc.is_some()
            || self.insurance.is_some()
            || self.aadhar_card.is_some()
            || self.pan_card.is_some()
            || self.profile_photo.is_some()
    }
}

/// Payout bank account details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankDetails {
    /// Name on the account
    pub account_holder_name: String,
    /// Account number
    pub account_number: String,
    /// Branch routing code
    pub ifsc_code: String,
    /// Bank name
    pub bank_name: String,
}

/// Latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

/// Approve/reject body sent to the document review endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDecision {
    /// `approved` or `rejected`
    pub status: String,
    /// Reason shown to the driver on rejection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl DocumentDecision {
    /// Approval body
    #[must_use]
    pub fn approved() -> Self {
        Self {
            status: "approved".to_owned(),
            reason: None,
        }
    }

    /// Rejection body
    #[must_use]
    pub fn rejected(reason: Option<String>) -> Self {
        Self {
            status: "rejected".to_owned(),
            reason,
        }
    }
}
