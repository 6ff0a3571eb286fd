// ABOUTME: Coupon commands for dispatch-admin
// ABOUTME: Paged listing, code validation against an order amount, status toggle and stats
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

use dispatch_admin::{
    clients::CouponClient,
    errors::AppResult,
    http::ApiClient,
    state::CouponsStore,
};

use crate::helpers::display::{print_json, print_snapshot};
use crate::ListArgs;

type Result<T> = AppResult<T>;

const COLUMNS: &[(&str, &[&str])] = &[
    ("CODE", &["code"]),
    ("STATUS", &["status"]),
    ("DISCOUNT", &["discountValue", "discount"]),
    ("EXPIRES", &["expiryDate", "validUntil"]),
];

/// List coupons
pub async fn list(api: &ApiClient, args: &ListArgs) -> Result<()> {
    let store = CouponsStore::new(CouponClient::new(api.clone()));
    store.fetch(&args.to_query()).await;
    let snapshot = store.snapshot().await;
    if let Some(err) = snapshot.failure() {
        return Err(err);
    }
    print_snapshot(&snapshot, COLUMNS);
    Ok(())
}

/// Check what a code would do to an order
pub async fn apply(
    api: &ApiClient,
    code: &str,
    order_amount: f64,
    user_id: Option<&str>,
) -> Result<()> {
    let body = CouponClient::new(api.clone())
        .apply_coupon(code, order_amount, user_id)
        .await?;
    print_json(&body);
    Ok(())
}

/// Flip a coupon between active and inactive
pub async fn toggle(api: &ApiClient, id: &str) -> Result<()> {
    let body = CouponClient::new(api.clone())
        .toggle_coupon_status(id)
        .await?;
    print_json(&body);
    Ok(())
}

/// Backend-computed coupon stats
pub async fn stats(api: &ApiClient) -> Result<()> {
    let body = CouponClient::new(api.clone()).get_coupon_stats().await?;
    print_json(&body);
    Ok(())
}
