use super::{Storage, TransactionStorage};
use crate::models::{Transaction, TransactionStatus};
use crate::types::Yen;
use anyhow::{anyhow, Result};
use chrono::{FixedOffset, TimeZone};

fn create_transaction(email_id: &str, amount: i64) -> Result<Transaction> {
    let date = FixedOffset::east_opt(9 * 3600)
        .and_then(|offset| offset.with_ymd_and_hms(2025, 3, 29, 14, 5, 52).single())
        .ok_or_else(|| anyhow!("invalid date"))?;

    Ok(Transaction::new(email_id, date, Yen::new(amount), "Test Store")?)
}

#[test]
fn test_storage_basic_insert_and_load_operations() -> Result<()> {
    let storage = TransactionStorage::new();

    assert!(storage.load("missing").is_none());

    let transaction = create_transaction("msg-1", 100)?;
    let id = transaction.id();
    assert!(storage.insert_new(transaction));

    let retrieved = storage.load("msg-1").ok_or_else(|| anyhow!("Transaction not found in storage"))?;

    assert_eq!(retrieved.id(), id);
    assert_eq!(retrieved.amount(), Yen::new(100));

    Ok(())
}

#[test]
fn test_storage_rejects_duplicate_email_ids() -> Result<()> {
    let storage = TransactionStorage::new();
    let original = create_transaction("msg-1", 100)?;
    let original_id = original.id();

    assert!(storage.insert_new(original));
    assert!(!storage.insert_new(create_transaction("msg-1", 999)?));

    let retrieved = storage.load("msg-1").ok_or_else(|| anyhow!("Transaction not found in storage"))?;

    assert_eq!(retrieved.id(), original_id);
    assert_eq!(retrieved.amount(), Yen::new(100));

    Ok(())
}

#[test]
fn test_storage_iterator_collects_all_transactions() -> Result<()> {
    let storage = TransactionStorage::new();
    storage.insert_new(create_transaction("msg-1", 1)?);
    storage.insert_new(create_transaction("msg-2", 2)?);
    storage.insert_new(create_transaction("msg-3", 3)?);

    assert_eq!(storage.iter().count(), 3);

    Ok(())
}

#[test]
fn test_storage_save_overwrites_status() -> Result<()> {
    let storage = TransactionStorage::new();
    storage.insert_new(create_transaction("msg-1", 10)?);

    let mut transaction = storage.load("msg-1").ok_or_else(|| anyhow!("Transaction missing"))?;
    transaction.update_status(TransactionStatus::Notified, None);
    storage.save(transaction);

    let final_transaction = storage.load("msg-1").ok_or_else(|| anyhow!("Final transaction missing"))?;

    assert_eq!(final_transaction.status(), TransactionStatus::Notified);

    Ok(())
}
