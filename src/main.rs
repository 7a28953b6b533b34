mod actors;
mod collaborators;
mod config;
mod engine;
mod extraction;
mod models;
mod storage;
mod types;

use std::io::{stderr, stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::collaborators::{DryRunLedger, LogNotifier};
use crate::config::Settings;
use crate::engine::{AsyncEngine, Pipeline};
use crate::models::Transaction;
use crate::storage::TransactionStorage;

/// Reads payment notification emails from a mailbox export and tracks them to the ledger.
#[derive(Debug, Parser)]
#[command(name = "mf-auto-reg", version)]
struct Args {
    /// CSV mailbox export with `id,data` columns (data is the base64url message body)
    messages: PathBuf,

    /// CSV reaction log with `email_id,reaction` columns
    #[arg(long)]
    reactions: Option<PathBuf>,

    /// error, warn, info, debug or trace
    #[arg(long, default_value = "error")]
    log_level: String
}

#[derive(Serialize)]
struct TransactionRow<'a> {
    id: String,
    email_id: &'a str,
    transaction_date: String,
    amount: i64,
    store: &'a str,
    status: &'static str,
    created_at: String,
    updated_at: String,
    error_message: &'a str
}

impl<'a> From<&'a Transaction> for TransactionRow<'a> {
    fn from(transaction: &'a Transaction) -> Self {
        Self {
            id: transaction.id().to_string(),
            email_id: transaction.email_id(),
            transaction_date: transaction.transaction_date().to_rfc3339(),
            amount: transaction.amount().value(),
            store: transaction.store(),
            status: transaction.status().as_str(),
            created_at: transaction.created_at().to_rfc3339(),
            updated_at: transaction.updated_at().to_rfc3339(),
            error_message: transaction.error_message().unwrap_or_default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(parse_log_level(&args.log_level));

    let settings = Settings::from_env()?;
    let storage = Arc::new(TransactionStorage::new());
    let pipeline = Arc::new(Pipeline::new(settings, storage.clone(), Arc::new(LogNotifier), Arc::new(DryRunLedger)));
    let engine = AsyncEngine::new(pipeline);

    let messages = args.messages.to_str().context("messages path is not valid UTF-8")?;
    let reactions = match &args.reactions {
        Some(path) => Some(path.to_str().context("reactions path is not valid UTF-8")?),
        None => None
    };

    let timer = Instant::now();
    let summary = engine.run(messages, reactions).await?;
    let duration = timer.elapsed();

    info!("Processed mailbox in: {duration:?} | {summary:?}");

    write_results_to_stdout(&storage)?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the CSV result, so logs go to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_results_to_stdout(storage: &TransactionStorage) -> Result<()> {
    let mut transactions: Vec<Transaction> = storage.iter().map(|entry| entry.value().clone()).collect();
    transactions.sort_by(|left, right| {
        left.transaction_date().cmp(&right.transaction_date())
            .then_with(|| left.email_id().cmp(right.email_id()))
    });

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(stdout().lock());

    writer.write_record(["id", "email_id", "transaction_date", "amount", "store", "status", "created_at", "updated_at", "error_message"])?;

    for transaction in &transactions {
        writer.serialize(TransactionRow::from(transaction))?;
    }

    writer.flush()?;

    Ok(())
}
