// ABOUTME: Support ticket commands for dispatch-admin
// ABOUTME: Paged listing, detail, comments, status changes and stats
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

use dispatch_admin::{
    clients::TicketClient,
    errors::AppResult,
    http::ApiClient,
    state::TicketsStore,
};

use crate::helpers::display::{print_json, print_snapshot};
use crate::ListArgs;

type Result<T> = AppResult<T>;

const COLUMNS: &[(&str, &[&str])] = &[
    ("SUBJECT", &["subject", "title"]),
    ("STATUS", &["status"]),
    ("PRIORITY", &["priority"]),
    ("ASSIGNED", &["assignedTo"]),
];

/// List tickets
pub async fn list(api: &ApiClient, args: &ListArgs) -> Result<()> {
    let store = TicketsStore::new(TicketClient::new(api.clone()));
    store.fetch(&args.to_query()).await;
    let snapshot = store.snapshot().await;
    if let Some(err) = snapshot.failure() {
        return Err(err);
    }
    print_snapshot(&snapshot, COLUMNS);
    Ok(())
}

/// Show one ticket
pub async fn show(api: &ApiClient, id: &str) -> Result<()> {
    let body = TicketClient::new(api.clone()).get_ticket_by_id(id).await?;
    print_json(&body);
    Ok(())
}

/// Post a comment on a ticket
pub async fn comment(api: &ApiClient, id: &str, message: &str) -> Result<()> {
    TicketClient::new(api.clone()).add_comment(id, message).await?;
    println!("Comment added to ticket {id}");
    Ok(())
}

/// Move a ticket to a new status
pub async fn set_status(api: &ApiClient, id: &str, status: &str) -> Result<()> {
    TicketClient::new(api.clone())
        .update_ticket_status(id, status)
        .await?;
    println!("Ticket {id} is now {status}");
    Ok(())
}

/// Backend-computed ticket stats
pub async fn stats(api: &ApiClient) -> Result<()> {
    let body = TicketClient::new(api.clone()).get_ticket_stats().await?;
    print_json(&body);
    Ok(())
}
