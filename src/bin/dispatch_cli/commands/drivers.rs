// ABOUTME: Driver commands for dispatch-admin
// ABOUTME: Listing, detail, block/unblock, document review, deletion and document upload
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

use std::path::Path;

use dispatch_admin::{
    clients::DriverClient,
    errors::{AppError, AppResult},
    http::{ApiClient, MultipartField},
};

use crate::helpers::display::{print_driver_detail, print_driver_table, print_json, print_pagination};
use crate::ListArgs;

type Result<T> = AppResult<T>;

/// List drivers
pub async fn list(api: &ApiClient, args: &ListArgs) -> Result<()> {
    let page = DriverClient::new(api.clone())
        .get_all_drivers(&args.to_query())
        .await?;
    print_driver_table(&page.items);
    print_pagination(&page.pagination);
    Ok(())
}

/// Show one driver
pub async fn show(api: &ApiClient, id: &str) -> Result<()> {
    let driver = DriverClient::new(api.clone()).get_driver_by_id(id).await?;
    print_driver_detail(&driver);
    Ok(())
}

/// Block or unblock a driver
pub async fn set_blocked(api: &ApiClient, id: &str, blocked: bool) -> Result<()> {
    let client = DriverClient::new(api.clone());
    if blocked {
        client.block_driver(id).await?;
        println!("Driver {id} blocked");
    } else {
        client.unblock_driver(id).await?;
        println!("Driver {id} unblocked");
    }
    Ok(())
}

/// Approve one document
pub async fn approve_document(api: &ApiClient, id: &str, doc_type: &str) -> Result<()> {
    DriverClient::new(api.clone())
        .approve_document(id, doc_type)
        .await?;
    println!("{doc_type} approved for driver {id}");
    Ok(())
}

/// Reject one document
pub async fn reject_document(
    api: &ApiClient,
    id: &str,
    doc_type: &str,
    reason: Option<&str>,
) -> Result<()> {
    DriverClient::new(api.clone())
        .reject_document(id, doc_type, reason)
        .await?;
    println!("{doc_type} rejected for driver {id}");
    Ok(())
}

/// Delete a driver
pub async fn delete(api: &ApiClient, id: &str) -> Result<()> {
    DriverClient::new(api.clone()).delete_driver(id).await?;
    println!("Driver {id} deleted");
    Ok(())
}

/// Upload `field=path` documents for the driver registered under `phone`
pub async fn upload(api: &ApiClient, phone: &str, files: &[String]) -> Result<()> {
    let mut fields = Vec::with_capacity(files.len());
    for entry in files {
        let (name, path) = entry.split_once('=').ok_or_else(|| {
            AppError::invalid_input(format!("Expected field=path, got '{entry}'"))
        })?;
        let path = Path::new(path);
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map_or_else(|| name.to_owned(), |n| n.to_string_lossy().into_owned());
        fields.push(MultipartField::file(name, file_name, guess_mime(path), bytes));
    }

    let body = DriverClient::new(api.clone())
        .upload_documents(phone, fields)
        .await?;
    print_json(&body);
    Ok(())
}

fn guess_mime(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        _ => return None,
    };
    Some(mime.to_owned())
}
