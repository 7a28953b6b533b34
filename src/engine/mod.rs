mod async_engine;
mod pipeline;

use serde::Deserialize;

pub use async_engine::AsyncEngine;
pub use pipeline::{Outcome, Pipeline};

/// One message of a mailbox export: the message ID and its base64url body.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageRow {
    pub id: String,
    pub data: String
}

/// A reaction left on a notification, keyed by the email that produced it.
#[derive(Debug, Clone, Deserialize)]
pub struct ReactionRow {
    pub email_id: String,
    pub reaction: String
}

/// Per-outcome counters for one engine run.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct RunSummary {
    pub notified: usize,
    pub failed: usize,
    pub not_matched: usize,
    pub duplicates: usize,
    pub rejected: usize,
    pub undecodable: usize,
    pub extraction_errors: usize,
    pub orphan_reactions: usize
}
