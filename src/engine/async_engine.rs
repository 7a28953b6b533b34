use crate::actors::TransactionActor;
use crate::engine::{MessageRow, Outcome, Pipeline, ReactionRow, RunSummary};
use crate::extraction::decode_message_body;
use crate::types::EmailId;
use anyhow::Context;
use csv::{ReaderBuilder, Trim};
use futures::future::join_all;
use serde::de::DeserializeOwned;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::{error, warn};

/// Drives a mailbox export and a reaction log through the pipeline.
pub struct AsyncEngine {
    pipeline: Arc<Pipeline>,
    backpressure: usize
}

impl AsyncEngine {
    /// Creates a new engine around the provided pipeline.
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        let backpressure = pipeline.settings().backpressure;

        Self {
            pipeline,
            backpressure
        }
    }

    /// Processes every message in `messages_path`, then every reaction in `reactions_path`.
    ///
    /// # Errors
    /// Fails if either file cannot be opened. Malformed rows are logged and skipped.
    pub async fn run(&self, messages_path: &str, reactions_path: Option<&str>) -> anyhow::Result<RunSummary> {
        let mut summary = RunSummary::default();

        let messages = open_csv(messages_path)?;
        let reactions = reactions_path.map(open_csv).transpose()?;

        let (sender, receiver) = mpsc::channel::<MessageRow>(self.backpressure);
        let reader_handle = spawn_csv_reader(messages, sender);
        self.process_messages(receiver, &mut summary).await;

        if let Err(error) = reader_handle.await {
            error!("Mailbox ingestion failed: {error}");
        }

        if let Some(reactions) = reactions {
            let (sender, receiver) = mpsc::channel::<ReactionRow>(self.backpressure);
            let reader_handle = spawn_csv_reader(reactions, sender);
            self.process_reactions(receiver, &mut summary).await?;

            if let Err(error) = reader_handle.await {
                error!("Reaction ingestion failed: {error}");
            }
        }

        Ok(summary)
    }

    async fn process_messages(&self, mut receiver: mpsc::Receiver<MessageRow>, summary: &mut RunSummary) {
        while let Some(message) = receiver.recv().await {
            let body = match decode_message_body(&message.data) {
                Ok(body) => body,
                Err(error) => {
                    warn!("Skipping email [{}]: {error}", message.id);
                    summary.undecodable += 1;
                    continue;
                }
            };

            match self.pipeline.process_email(&message.id, &body) {
                Ok(Outcome::NotMatched) => summary.not_matched += 1,
                Ok(Outcome::Duplicate) => summary.duplicates += 1,
                Ok(Outcome::Rejected(_)) => summary.rejected += 1,
                Ok(Outcome::Notified(_)) => summary.notified += 1,
                Ok(Outcome::Failed(_)) => summary.failed += 1,
                Err(error) => {
                    error!("Extraction failed for email [{}]: {error}", message.id);
                    summary.extraction_errors += 1;
                }
            }
        }
    }

    async fn process_reactions(&self, mut receiver: mpsc::Receiver<ReactionRow>, summary: &mut RunSummary) -> anyhow::Result<()> {
        let mut actors = HashMap::<EmailId, TransactionActor>::new();

        // One actor per transaction keeps updates to the same transaction strictly ordered.
        while let Some(row) = receiver.recv().await {
            let actor = match actors.entry(row.email_id.clone()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => match self.pipeline.storage().load(&row.email_id) {
                    Some(transaction) => entry.insert(TransactionActor::new(transaction, self.pipeline.clone())),
                    None => {
                        warn!("Reaction [{}] refers to unknown email [{}]", row.reaction, row.email_id);
                        summary.orphan_reactions += 1;
                        continue;
                    }
                }
            };

            if !actor.accept(row.reaction) {
                error!("Transaction actor for email [{}] could not accept a reaction", row.email_id);
            }
        }

        let despawns = actors.into_values().map(|actor| actor.despawn());

        for result in join_all(despawns).await {
            if let Err(error) = result {
                error!("A transaction actor did not despawn gracefully: {error:?}");
            }
        }

        Ok(())
    }
}

fn open_csv(path: &str) -> anyhow::Result<File> {
    File::open(path).with_context(|| format!("Error opening CSV at path: {path}"))
}

fn spawn_csv_reader<T>(file: File, sender: mpsc::Sender<T>) -> JoinHandle<()>
where
    T: DeserializeOwned + Send + 'static,
{
    spawn_blocking(move || {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(BufReader::new(file));

        for result in reader.deserialize::<T>() {
            match result {
                Ok(row) => {
                    if sender.blocking_send(row).is_err() {
                        break;
                    }
                }
                Err(error) => {
                    error!("CSV deserialization error: {error}");
                }
            }
        }
    })
}
