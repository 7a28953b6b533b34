use std::sync::Arc;

use tokio::spawn;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tracing::debug;

use crate::engine::Pipeline;
use crate::models::Transaction;

/// Owns one transaction while reactions for it are being applied.
///
/// Reactions queue on an unbounded channel and are applied one at a time, so a
/// transaction never has two writers. The final state is saved on despawn.
pub struct TransactionActor {
    sender: mpsc::UnboundedSender<String>,
    handle: JoinHandle<()>
}

impl TransactionActor {
    /// Spawns a new actor for `transaction`.
    pub fn new(mut transaction: Transaction, pipeline: Arc<Pipeline>) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<String>();

        let handle = spawn(async move {
            while let Some(reaction) = receiver.recv().await {
                let changes = pipeline.apply_reaction(&mut transaction, &reaction);
                debug!("Reaction [{reaction}] on email [{}] applied {} change(s)", transaction.email_id(), changes.len());
            }

            pipeline.storage().save(transaction);
        });

        Self { sender, handle }
    }

    /// Queues a reaction. Returns `false` if the actor has already stopped.
    pub fn accept(&self, reaction: String) -> bool {
        self.sender.send(reaction).is_ok()
    }

    /// Closes the queue and waits until every queued reaction is applied and saved.
    pub async fn despawn(self) -> Result<(), JoinError> {
        drop(self.sender);
        self.handle.await
    }
}
