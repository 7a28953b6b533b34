use super::TransactionActor;
use crate::collaborators::testing::Recorder;
use crate::config::Settings;
use crate::engine::{Outcome, Pipeline};
use crate::models::{Transaction, TransactionStatus};
use crate::storage::{Storage, TransactionStorage};
use anyhow::{anyhow, Result};
use std::sync::Arc;

fn notified_transaction(pipeline: &Pipeline, email_id: &str, store: &str) -> Result<Transaction> {
    let body = format!("ご利用日時：2025-03-29 14:05:52\nご利用金額：8,250円\nご利用店舗：{store}");

    match pipeline.process_email(email_id, &body)? {
        Outcome::Notified(transaction) => Ok(transaction),
        other => Err(anyhow!("expected a notified transaction, got {other:?}"))
    }
}

fn create_pipeline(storage: Arc<TransactionStorage>, ledger: Arc<Recorder>) -> Result<Arc<Pipeline>> {
    let settings = Settings::from_lookup(|_| None)?;
    Ok(Arc::new(Pipeline::new(settings, storage, Arc::new(Recorder::default()), ledger)))
}

#[tokio::test]
async fn test_actor_isolation_and_storage_persistence() -> Result<()> {
    let storage = Arc::new(TransactionStorage::new());
    let ledger = Arc::new(Recorder::default());
    let pipeline = create_pipeline(storage.clone(), ledger.clone())?;

    let actor_email_1 = TransactionActor::new(notified_transaction(&pipeline, "msg-1", "yyy")?, pipeline.clone());
    let actor_email_2 = TransactionActor::new(notified_transaction(&pipeline, "msg-2", "zzz")?, pipeline.clone());

    assert!(actor_email_1.accept("white_check_mark".to_string()));
    assert!(actor_email_2.accept("x".to_string()));

    actor_email_1.despawn().await?;
    actor_email_2.despawn().await?;

    let transaction_1 = storage.load("msg-1").ok_or_else(|| anyhow!("msg-1 missing from storage"))?;
    let transaction_2 = storage.load("msg-2").ok_or_else(|| anyhow!("msg-2 missing from storage"))?;

    assert_eq!(transaction_1.status(), TransactionStatus::Registered);
    assert_eq!(transaction_2.status(), TransactionStatus::Skipped);
    assert_eq!(ledger.calls(), vec!["msg-1".to_string()]);

    Ok(())
}

#[tokio::test]
async fn test_actor_applies_reactions_in_order_and_stops_at_terminal_status() -> Result<()> {
    let storage = Arc::new(TransactionStorage::new());
    let ledger = Arc::new(Recorder::default());
    let pipeline = create_pipeline(storage.clone(), ledger.clone())?;
    let actor = TransactionActor::new(notified_transaction(&pipeline, "msg-1", "yyy")?, pipeline.clone());

    // Unrelated -> Skip -> Approve (ignored, already completed)
    actor.accept("eyes".to_string());
    actor.accept("x".to_string());
    actor.accept("white_check_mark".to_string());

    actor.despawn().await?;

    let transaction = storage.load("msg-1").ok_or_else(|| anyhow!("Transaction missing from storage"))?;

    assert_eq!(transaction.status(), TransactionStatus::Skipped);
    assert!(ledger.calls().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_actor_records_ledger_failure() -> Result<()> {
    let storage = Arc::new(TransactionStorage::new());
    let pipeline = create_pipeline(storage.clone(), Arc::new(Recorder::failing("session expired")))?;
    let actor = TransactionActor::new(notified_transaction(&pipeline, "msg-1", "yyy")?, pipeline.clone());

    actor.accept("white_check_mark".to_string());
    actor.despawn().await?;

    let transaction = storage.load("msg-1").ok_or_else(|| anyhow!("Transaction missing from storage"))?;

    assert_eq!(transaction.status(), TransactionStatus::Failed);
    assert!(transaction.error_message().is_some_and(|error| error.contains("session expired")));

    Ok(())
}
