//! Run one warranty expiration sweep from the command line.
//!
//! Intended for the scheduler collaborator: a daily cron entry invokes this
//! binary, which selects overdue `valid` warranties, expires them, and emits
//! one event per transition through the structured log publisher.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::Parser;
use mockable::{Clock, DefaultClock};
use tokio::runtime::Builder;

use warranty_backend::domain::ExpirationSweepService;
use warranty_backend::domain::ports::{ExpirationSweep, SweepRequest};
use warranty_backend::outbound::notifications::LogWarrantyNotificationPublisher;
use warranty_backend::outbound::persistence::{DbPool, DieselWarrantyRepository, PoolConfig};

/// `run-sweep` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "run-sweep",
    about = "Expire overdue valid warranties and emit one event per transition",
    version
)]
struct CliArgs {
    /// Sweep reference date as `YYYY-MM-DD`. Defaults to the current date.
    #[arg(long = "as-of", value_name = "date", value_parser = parse_reference_date)]
    as_of: Option<NaiveDate>,
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

fn main() -> io::Result<()> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;

    let database_url = resolve_database_url(args.database_url)?;
    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;

    let repository = Arc::new(DieselWarrantyRepository::new(pool));
    let notifications = Arc::new(LogWarrantyNotificationPublisher);
    let sweep = ExpirationSweepService::new(repository, notifications);

    let as_of = args.as_of.unwrap_or_else(|| DefaultClock.utc().date_naive());
    let outcome = sweep
        .sweep(SweepRequest { as_of })
        .await
        .map_err(|error| io::Error::other(format!("sweep failed: {error}")))?;

    println!("as_of={as_of}");
    println!("expired={}", outcome.expired);
    println!("skipped={}", outcome.skipped);
    println!("notification_failures={}", outcome.notification_failures);
    for failure in &outcome.failures {
        println!("failed={} message={}", failure.warranty_id, failure.message);
    }

    Ok(())
}

fn parse_reference_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|error| format!("failed to parse reference date: {error}"))
}

fn resolve_database_url(cli_value: Option<String>) -> io::Result<String> {
    match cli_value {
        Some(url) => Ok(url),
        None => env::var("DATABASE_URL")
            .map_err(|_| io::Error::other("provide --database-url or set DATABASE_URL")),
    }
}
