// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors
// ABOUTME: Output formatting helpers for dispatch-admin
// ABOUTME: Tables for drivers and passthrough records, pagination footers, JSON dumps

use dispatch_admin::models::Driver;
use dispatch_admin::pagination::Pagination;
use dispatch_admin::state::ListSnapshot;
use serde::Serialize;
use serde_json::Value;

/// Pretty-print any serializable value
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("Could not render response: {e}"),
    }
}

/// `page 2/5 (47 total)` footer
pub fn print_pagination(pagination: &Pagination) {
    println!("{}", "-".repeat(80));
    println!(
        "page {}/{} ({} total, {} per page)",
        pagination.page,
        pagination.pages.max(1),
        pagination.total,
        pagination.limit
    );
    if pagination.has_next() {
        println!("more: --page {}", pagination.page + 1);
    }
}

/// One line per driver
pub fn print_driver_table(drivers: &[Driver]) {
    if drivers.is_empty() {
        println!("No drivers found");
        return;
    }
    println!(
        "{:<26} {:<24} {:<14} {:<9} {:<9} {:<7}",
        "ID", "NAME", "MOBILE", "STATUS", "DOCS", "ONLINE"
    );
    for driver in drivers {
        println!(
            "{:<26} {:<24} {:<14} {:<9} {:<9} {:<7}",
            driver.id,
            truncate(&driver.full_name, 24),
            driver.mobile,
            driver.status,
            driver.document_status,
            if driver.online { "yes" } else { "no" }
        );
    }
}

/// Full driver card
pub fn print_driver_detail(driver: &Driver) {
    println!("\n{}", driver.full_name);
    println!("{}", "=".repeat(60));
    println!("   ID: {} (driver {})", driver.id, driver.driver_id);
    println!("   Mobile: {}", driver.mobile);
    println!("   Email: {}", driver.email);
    println!("   Status: {}", driver.status);
    println!("   Online: {}", if driver.online { "yes" } else { "no" });
    println!("   Rating: {:.1} over {} rides", driver.rating, driver.total_rides);
    println!("   Wallet: {:.2}", driver.wallet_balance);

    println!("\nVehicle");
    println!("   Type: {}", driver.vehicle_type);
    println!(
        "   {} {} {} ({})",
        driver.vehicle_details.color,
        driver.vehicle_details.model,
        driver.vehicle_details.year,
        driver.vehicle_details.number
    );

    println!("\nDocuments ({})", driver.document_status);
    let docs = &driver.documents;
    if docs.has_any() {
        for (label, url) in [
            ("Driving licence", &docs.driving_license),
            ("Vehicle RC", &docs.vehicle_rc),
            ("Insurance", &docs.insurance),
            ("Aadhar card", &docs.aadhar_card),
            ("PAN card", &docs.pan_card),
            ("Profile photo", &docs.profile_photo),
        ] {
            println!("   {label}: {}", url.as_deref().unwrap_or("not uploaded"));
        }
    } else {
        println!("   none uploaded");
    }

    println!("\nBank");
    println!("   {} / {}", driver.bank.bank_name, driver.bank.account_holder_name);
    println!("   {} ({})", driver.bank.account_number, driver.bank.ifsc_code);

    if let Some(location) = driver.location {
        println!("\nLast seen at {:.5}, {:.5}", location.lat, location.lng);
    }
}

fn field(record: &Value, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| match record.get(*key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(b.to_string()),
            _ => None,
        })
        .unwrap_or_else(|| "-".to_owned())
}

/// One line per passthrough record, showing id plus the given columns
fn print_record_table(items: &[Value], columns: &[(&str, &[&str])]) {
    if items.is_empty() {
        println!("No records found");
        return;
    }
    let mut header = format!("{:<26}", "ID");
    for (title, _) in columns {
        header.push_str(&format!(" {title:<18}"));
    }
    println!("{header}");

    for record in items {
        let mut line = format!("{:<26}", field(record, &["_id", "id"]));
        for (_, keys) in columns {
            line.push_str(&format!(" {:<18}", truncate(&field(record, keys), 18)));
        }
        println!("{line}");
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_owned()
    } else {
        let mut short: String = text.chars().take(width.saturating_sub(1)).collect();
        short.push('~');
        short
    }
}

/// Render a loaded store snapshot: records, footer and page stats
pub fn print_snapshot<S: Serialize>(snapshot: &ListSnapshot<S>, columns: &[(&str, &[&str])]) {
    print_record_table(&snapshot.items, columns);
    print_pagination(&snapshot.pagination);
    println!("\nThis page");
    print_json(&snapshot.stats);
}
