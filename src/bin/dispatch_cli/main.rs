// ABOUTME: Dispatch admin CLI - operator tool for the delivery platform back office
// ABOUTME: Drives the auth, driver, booking, coupon, ticket and admin clients from the terminal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors
//!
//! Usage:
//! ```bash
//! # Sign in (the session is kept in the token store file)
//! dispatch-admin auth login --email ops@example.com --password secret
//!
//! # List drivers awaiting document review
//! dispatch-admin drivers list --status Pending
//!
//! # Approve a driver's licence
//! dispatch-admin drivers approve-doc 65f0c2 drivingLicense
//!
//! # Active coupons, page 2
//! dispatch-admin coupons list --status Active --page 2
//!
//! # Reply on a support ticket
//! dispatch-admin tickets comment 77ab01 "Refund issued"
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use dispatch_admin::{
    auth::FileTokenStore,
    config::ApiConfig,
    errors::{AppError, AppResult},
    http::ApiClient,
    logging::LoggingConfig,
    pagination::ListQuery,
};
use tracing::debug;

type Result<T> = AppResult<T>;

#[derive(Parser)]
#[command(
    name = "dispatch-admin",
    about = "Dispatch back office CLI",
    long_about = "Command-line access to the dispatch admin API: drivers, bookings, coupons, tickets and admin accounts."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Backend base URL override
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Token store file override
    #[arg(long, global = true)]
    token_file: Option<PathBuf>,

    /// Request timeout override in milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

/// Page, size and common filters shared by list commands
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Page number (1-based)
    #[arg(long)]
    page: Option<u32>,

    /// Page size
    #[arg(long)]
    limit: Option<u32>,

    /// Status filter
    #[arg(long)]
    status: Option<String>,

    /// Free-text search
    #[arg(long)]
    search: Option<String>,
}

impl ListArgs {
    /// Filters in query-string order
    pub fn to_query(&self) -> ListQuery {
        ListQuery::new()
            .with_opt("status", self.status.as_ref())
            .with_opt("search", self.search.as_ref())
            .with_opt(ListQuery::PAGE, self.page)
            .with_opt(ListQuery::LIMIT, self.limit)
    }
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Session management
    Auth {
        #[command(subcommand)]
        action: AuthCommand,
    },

    /// Driver management
    Drivers {
        #[command(subcommand)]
        action: DriverCommand,
    },

    /// Booking management
    Bookings {
        #[command(subcommand)]
        action: BookingCommand,
    },

    /// Coupon management
    Coupons {
        #[command(subcommand)]
        action: CouponCommand,
    },

    /// Support tickets
    Tickets {
        #[command(subcommand)]
        action: TicketCommand,
    },

    /// Admin accounts
    Admins {
        #[command(subcommand)]
        action: AdminCommand,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum AuthCommand {
    /// Sign in and store the session
    Login {
        /// Admin email
        #[arg(long)]
        email: String,

        /// Admin password
        #[arg(long)]
        password: String,
    },
    /// Sign out and clear the stored session
    Logout,
    /// Show the signed-in admin
    Profile,
    /// Exchange the refresh token for a new session
    Refresh,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum DriverCommand {
    /// List drivers
    List(ListArgs),
    /// Show one driver
    Show {
        /// Driver id
        id: String,
    },
    /// Block a driver
    Block {
        /// Driver id
        id: String,
    },
    /// Unblock a driver
    Unblock {
        /// Driver id
        id: String,
    },
    /// Approve a document
    ApproveDoc {
        /// Driver id
        id: String,
        /// Document type (e.g. `drivingLicense`)
        doc_type: String,
    },
    /// Reject a document
    RejectDoc {
        /// Driver id
        id: String,
        /// Document type (e.g. `vehicleRC`)
        doc_type: String,
        /// Reason shown to the driver
        #[arg(long)]
        reason: Option<String>,
    },
    /// Delete a driver
    Delete {
        /// Driver id
        id: String,
    },
    /// Upload documents for the driver registered under a phone number
    Upload {
        /// Driver phone number
        #[arg(long)]
        phone: String,

        /// `field=path` pairs, e.g. `drivingLicense=./dl.jpg`
        #[arg(long = "file", required = true)]
        files: Vec<String>,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum BookingCommand {
    /// List bookings
    List(ListArgs),
    /// Show one booking
    Show {
        /// Booking id
        id: String,
    },
    /// Change a booking's status
    Status {
        /// Booking id
        id: String,
        /// New status
        status: String,
    },
    /// Server-side booking stats
    Stats,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum CouponCommand {
    /// List coupons
    List(ListArgs),
    /// Price an order with a coupon code
    Apply {
        /// Coupon code
        code: String,
        /// Order amount
        #[arg(long)]
        amount: f64,
        /// Customer id
        #[arg(long)]
        user: Option<String>,
    },
    /// Flip a coupon between active and inactive
    Toggle {
        /// Coupon id
        id: String,
    },
    /// Server-side coupon stats
    Stats,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum TicketCommand {
    /// List tickets
    List(ListArgs),
    /// Show one ticket
    Show {
        /// Ticket id
        id: String,
    },
    /// Add a comment
    Comment {
        /// Ticket id
        id: String,
        /// Comment text
        message: String,
    },
    /// Change a ticket's status
    Status {
        /// Ticket id
        id: String,
        /// New status
        status: String,
    },
    /// Server-side ticket stats
    Stats,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum AdminCommand {
    /// List admin accounts
    List(ListArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    logging
        .init()
        .map_err(|e| AppError::internal(format!("{e:#}")))?;

    let mut config = ApiConfig::from_env()?;
    if let Some(base_url) = cli.base_url {
        config = ApiConfig {
            base_url: base_url.trim_end_matches('/').to_owned(),
            ..config
        };
        config.validate()?;
    }
    if let Some(path) = cli.token_file {
        config = config.with_token_store_path(path);
    }
    if let Some(ms) = cli.timeout_ms {
        config = config.with_timeout(Duration::from_millis(ms));
    }
    debug!(base_url = %config.base_url, "Using backend");

    let credentials = Arc::new(FileTokenStore::admin(config.token_store_path.clone()));
    let api = ApiClient::new(config, credentials);

    match cli.command {
        Command::Auth { action } => match action {
            AuthCommand::Login { email, password } => {
                commands::auth::login(&api, &email, &password).await?;
            }
            AuthCommand::Logout => commands::auth::logout(&api).await?,
            AuthCommand::Profile => commands::auth::profile(&api).await?,
            AuthCommand::Refresh => commands::auth::refresh(&api).await?,
        },
        Command::Drivers { action } => match action {
            DriverCommand::List(args) => commands::drivers::list(&api, &args).await?,
            DriverCommand::Show { id } => commands::drivers::show(&api, &id).await?,
            DriverCommand::Block { id } => commands::drivers::set_blocked(&api, &id, true).await?,
            DriverCommand::Unblock { id } => {
                commands::drivers::set_blocked(&api, &id, false).await?;
            }
            DriverCommand::ApproveDoc { id, doc_type } => {
                commands::drivers::approve_document(&api, &id, &doc_type).await?;
            }
            DriverCommand::RejectDoc {
                id,
                doc_type,
                reason,
            } => {
                commands::drivers::reject_document(&api, &id, &doc_type, reason.as_deref())
                    .await?;
            }
            DriverCommand::Delete { id } => commands::drivers::delete(&api, &id).await?,
            DriverCommand::Upload { phone, files } => {
                commands::drivers::upload(&api, &phone, &files).await?;
            }
        },
        Command::Bookings { action } => match action {
            BookingCommand::List(args) => commands::bookings::list(&api, &args).await?,
            BookingCommand::Show { id } => commands::bookings::show(&api, &id).await?,
            BookingCommand::Status { id, status } => {
                commands::bookings::set_status(&api, &id, &status).await?;
            }
            BookingCommand::Stats => commands::bookings::stats(&api).await?,
        },
        Command::Coupons { action } => match action {
            CouponCommand::List(args) => commands::coupons::list(&api, &args).await?,
            CouponCommand::Apply { code, amount, user } => {
                commands::coupons::apply(&api, &code, amount, user.as_deref()).await?;
            }
            CouponCommand::Toggle { id } => commands::coupons::toggle(&api, &id).await?,
            CouponCommand::Stats => commands::coupons::stats(&api).await?,
        },
        Command::Tickets { action } => match action {
            TicketCommand::List(args) => commands::tickets::list(&api, &args).await?,
            TicketCommand::Show { id } => commands::tickets::show(&api, &id).await?,
            TicketCommand::Comment { id, message } => {
                commands::tickets::comment(&api, &id, &message).await?;
            }
            TicketCommand::Status { id, status } => {
                commands::tickets::set_status(&api, &id, &status).await?;
            }
            TicketCommand::Stats => commands::tickets::stats(&api).await?,
        },
        Command::Admins { action } => match action {
            AdminCommand::List(args) => commands::admins::list(&api, &args).await?,
        },
    }

    Ok(())
}
