// ABOUTME: Canonical driver record built from rider-collection and user-collection payloads
// ABOUTME: Field resolution order is fixed and every field has a fallback value
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

//! Driver payload normalization
//!
//! The backend serves drivers from two collections with different field
//! names. [`transform_driver_data`] flattens either shape into [`Driver`].
//! Only a payload that is not an object at all is an error; every missing
//! field resolves to `"N/A"`, `0`, `false` or `None`.

use serde_json::{Map, Value};
use tracing::warn;

use crate::constants::driver_fallbacks::{
    BLOCKED_STATUS, DEFAULT_STATUS, DOCUMENT_APPROVED, DOCUMENT_PENDING, DOCUMENT_REJECTED,
    NOT_AVAILABLE, UNKNOWN_DRIVER,
};
use crate::errors::{AppError, AppResult};
use crate::http::unwrap_payload;
use crate::models::{BankDetails, Driver, DriverDocuments, GeoPoint, VehicleDetails};

/// Keys a single driver may be wrapped under
pub const DRIVER_WRAPPERS: &[&str] = &["rider", "user", "data"];

type Fields = Map<String, Value>;

/// Non-empty string (or number rendered as string) under the first matching key
fn text(fields: &Fields, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match fields.get(*key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn text_or_na(fields: &Fields, keys: &[&str]) -> String {
    text(fields, keys).unwrap_or_else(|| NOT_AVAILABLE.to_owned())
}

fn number(fields: &Fields, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| match fields.get(*key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn is_true(fields: &Fields, key: &str) -> bool {
    matches!(fields.get(key), Some(Value::Bool(true)))
}

fn object<'a>(fields: &'a Fields, keys: &[&str]) -> Option<&'a Fields> {
    keys.iter()
        .find_map(|key| fields.get(*key).and_then(Value::as_object))
}

/// `name`+`lname`, then `firstName`+`lastName`, then any single name field
fn resolve_name(fields: &Fields) -> String {
    for (first_key, last_key) in [("name", "lname"), ("firstName", "lastName")] {
        if let (Some(first), Some(last)) = (text(fields, &[first_key]), text(fields, &[last_key])) {
            if first != last {
                return format!("{first} {last}");
            }
        }
    }
    text(
        fields,
        &["name", "firstName", "fullName", "lname", "lastName"],
    )
    .unwrap_or_else(|| UNKNOWN_DRIVER.to_owned())
}

fn resolve_online(fields: &Fields) -> bool {
    is_true(fields, "isOnline")
        || is_true(fields, "online")
        || fields.get("onlineStatus").and_then(Value::as_str) == Some("online")
        || fields.get("status").and_then(Value::as_str) == Some("online")
}

fn resolve_blocked(fields: &Fields) -> bool {
    is_true(fields, "isBlocked") || is_true(fields, "blocked")
}

/// Account status; `status` values that describe presence are not account states
fn resolve_status(fields: &Fields, blocked: bool) -> String {
    if blocked {
        return BLOCKED_STATUS.to_owned();
    }
    text(fields, &["status", "accountStatus"])
        .filter(|s| !matches!(s.as_str(), "online" | "offline"))
        .or_else(|| text(fields, &["accountStatus"]))
        .unwrap_or_else(|| DEFAULT_STATUS.to_owned())
}

fn decision_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.to_lowercase()),
        Value::Object(inner) => inner
            .get("status")
            .and_then(Value::as_str)
            .map(str::to_lowercase),
        _ => None,
    }
}

/// Explicit non-`Pending` status wins; otherwise rejected beats approved beats pending
fn resolve_document_status(fields: &Fields) -> String {
    if let Some(explicit) = text(fields, &["documentStatus"]) {
        if explicit != DOCUMENT_PENDING {
            return explicit;
        }
    }

    let decisions: Vec<String> = object(fields, &["documentApprovals"])
        .map(|approvals| approvals.values().filter_map(decision_of).collect())
        .unwrap_or_default();

    if decisions.iter().any(|d| d == "rejected") {
        DOCUMENT_REJECTED.to_owned()
    } else if decisions.iter().any(|d| d == "approved") {
        DOCUMENT_APPROVED.to_owned()
    } else {
        DOCUMENT_PENDING.to_owned()
    }
}

fn document_url(fields: Option<&Fields>, keys: &[&str]) -> Option<String> {
    let fields = fields?;
    keys.iter().find_map(|key| match fields.get(*key) {
        Some(Value::String(url)) if !url.trim().is_empty() => Some(url.trim().to_owned()),
        Some(Value::Object(inner)) => text(inner, &["url", "secure_url", "path"]),
        _ => None,
    })
}

fn resolve_documents(fields: &Fields) -> DriverDocuments {
    let docs = object(fields, &["documents"]);
    DriverDocuments {
        driving_license: document_url(docs, &["drivingLicense", "drivingLicence", "license"]),
        vehicle_rc: document_url(docs, &["vehicleRC", "vehicleRc", "rc"]),
        insurance: document_url(docs, &["insurance"]),
        aadhar_card: document_url(docs, &["aadharCard", "aadhar"]),
        pan_card: document_url(docs, &["panCard", "pan"]),
        profile_photo: document_url(docs, &["profilePhoto", "profileImage", "photo"])
            .or_else(|| document_url(Some(fields), &["profileImage", "profilePhoto", "avatar"])),
    }
}

fn resolve_vehicle(fields: &Fields) -> (String, VehicleDetails) {
    let nested = object(fields, &["vehicleDetails", "vehicle"]);
    let nested_text = |keys: &[&str]| nested.and_then(|n| text(n, keys));

    let vehicle_type = text(fields, &["vehicleType"])
        .or_else(|| nested_text(&["type", "vehicleType"]))
        .unwrap_or_else(|| NOT_AVAILABLE.to_owned());

    let details = VehicleDetails {
        number: nested_text(&["number", "vehicleNumber", "registrationNumber"])
            .or_else(|| text(fields, &["vehicleNumber"]))
            .unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
        model: nested_text(&["model", "vehicleModel"])
            .or_else(|| text(fields, &["vehicleModel"]))
            .unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
        color: nested_text(&["color", "vehicleColor"])
            .or_else(|| text(fields, &["vehicleColor"]))
            .unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
        year: nested_text(&["year", "vehicleYear"])
            .or_else(|| text(fields, &["vehicleYear"]))
            .unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
    };

    (vehicle_type, details)
}

fn resolve_bank(fields: &Fields) -> BankDetails {
    let bank = object(fields, &["bankDetails", "bank"]);
    let bank_text = |keys: &[&str]| {
        bank.and_then(|b| text(b, keys))
            .unwrap_or_else(|| NOT_AVAILABLE.to_owned())
    };
    BankDetails {
        account_holder_name: bank_text(&["accountHolderName", "holderName", "accountName"]),
        account_number: bank_text(&["accountNumber"]),
        ifsc_code: bank_text(&["ifscCode", "ifsc"]),
        bank_name: bank_text(&["bankName"]),
    }
}

fn resolve_location(fields: &Fields) -> Option<GeoPoint> {
    let location = object(fields, &["location", "currentLocation"])?;

    if let (Some(lat), Some(lng)) = (
        number(location, &["lat", "latitude"]),
        number(location, &["lng", "lon", "longitude"]),
    ) {
        return Some(GeoPoint { lat, lng });
    }

    // GeoJSON stores [lng, lat]
    let coordinates = location.get("coordinates")?.as_array()?;
    match coordinates.as_slice() {
        [lng, lat, ..] => Some(GeoPoint {
            lat: lat.as_f64()?,
            lng: lng.as_f64()?,
        }),
        _ => None,
    }
}

fn resolve_wallet(fields: &Fields) -> f64 {
    number(fields, &["walletBalance", "wallet"])
        .or_else(|| object(fields, &["wallet"]).and_then(|w| number(w, &["balance"])))
        .unwrap_or(0.0)
}

/// Normalize one driver payload into the canonical record
///
/// The payload may be wrapped under `rider`, `user` or `data`.
///
/// # Errors
///
/// Returns an error only when the payload is not a JSON object
pub fn transform_driver_data(payload: &Value) -> AppResult<Driver> {
    let fields = unwrap_payload(payload, DRIVER_WRAPPERS)
        .as_object()
        .ok_or_else(|| {
            AppError::invalid_response("Driver payload is not an object")
                .with_details(payload.clone())
        })?;

    let id = text_or_na(fields, &["_id", "id"]);
    let driver_id = text(fields, &["riderId", "driverId", "userId"]).unwrap_or_else(|| id.clone());
    let is_blocked = resolve_blocked(fields);
    let (vehicle_type, vehicle_details) = resolve_vehicle(fields);

    Ok(Driver {
        id,
        driver_id,
        full_name: resolve_name(fields),
        mobile: text_or_na(fields, &["mobile", "phone", "phoneNumber", "mobileNumber"]),
        email: text_or_na(fields, &["email"]),
        status: resolve_status(fields, is_blocked),
        is_blocked,
        vehicle_type,
        vehicle_details,
        documents: resolve_documents(fields),
        document_status: resolve_document_status(fields),
        bank: resolve_bank(fields),
        online: resolve_online(fields),
        wallet_balance: resolve_wallet(fields),
        rating: number(fields, &["rating", "averageRating"]).unwrap_or(0.0),
        total_rides: number(fields, &["totalRides", "totalTrips", "ridesCompleted"])
            .map_or(0, |n| n.max(0.0) as u64),
        location: resolve_location(fields),
        joined_at: text(fields, &["createdAt", "joinedAt", "registeredAt"]),
        raw: payload.clone(),
    })
}

/// Normalize a list of driver payloads, skipping entries that are not objects
#[must_use]
pub fn transform_driver_list(payloads: &[Value]) -> Vec<Driver> {
    payloads
        .iter()
        .filter_map(|payload| match transform_driver_data(payload) {
            Ok(driver) => Some(driver),
            Err(e) => {
                warn!(error = %e, "Skipping malformed driver record");
                None
            }
        })
        .collect()
}
