// ABOUTME: Booking commands for dispatch-admin
// ABOUTME: Paged listing through the bookings store, detail, status change and backend stats
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

use dispatch_admin::{
    clients::BookingClient,
    errors::AppResult,
    http::ApiClient,
    state::BookingsStore,
};

use crate::helpers::display::{print_json, print_snapshot};
use crate::ListArgs;

type Result<T> = AppResult<T>;

const COLUMNS: &[(&str, &[&str])] = &[
    ("STATUS", &["status", "bookingStatus"]),
    ("CUSTOMER", &["customerName", "userName", "customer"]),
    ("DRIVER", &["driverName", "driverId"]),
    ("FARE", &["totalFare", "fare", "totalAmount", "amount"]),
];

/// List bookings
pub async fn list(api: &ApiClient, args: &ListArgs) -> Result<()> {
    let store = BookingsStore::new(BookingClient::new(api.clone()));
    store.fetch(&args.to_query()).await;
    let snapshot = store.snapshot().await;
    if let Some(err) = snapshot.failure() {
        return Err(err);
    }
    print_snapshot(&snapshot, COLUMNS);
    Ok(())
}

/// Show one booking
pub async fn show(api: &ApiClient, id: &str) -> Result<()> {
    let body = BookingClient::new(api.clone()).get_booking_by_id(id).await?;
    print_json(&body);
    Ok(())
}

/// Move a booking to a new status
pub async fn set_status(api: &ApiClient, id: &str, status: &str) -> Result<()> {
    BookingClient::new(api.clone())
        .update_booking_status(id, status)
        .await?;
    println!("Booking {id} is now {status}");
    Ok(())
}

/// Backend-computed booking stats
pub async fn stats(api: &ApiClient) -> Result<()> {
    let body = BookingClient::new(api.clone()).get_booking_stats().await?;
    print_json(&body);
    Ok(())
}
