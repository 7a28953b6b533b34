use super::testing::Recorder;
use super::{CollaboratorError, DryRunLedger, Ledger, LogNotifier, Notifier};
use crate::models::Transaction;
use crate::types::Yen;
use anyhow::{anyhow, Result};
use chrono::{FixedOffset, TimeZone};

fn create_transaction(email_id: &str) -> Result<Transaction> {
    let date = FixedOffset::east_opt(9 * 3600)
        .and_then(|offset| offset.with_ymd_and_hms(2025, 3, 29, 14, 5, 52).single())
        .ok_or_else(|| anyhow!("invalid date"))?;

    Ok(Transaction::new(email_id, date, Yen::new(8250), "yyy")?)
}

#[test]
fn test_log_collaborators_always_succeed() -> Result<()> {
    let transaction = create_transaction("msg-1")?;

    LogNotifier.notify(&transaction)?;
    DryRunLedger.register(&transaction)?;

    Ok(())
}

#[test]
fn test_failing_collaborator_reports_transaction_id() -> Result<()> {
    let transaction = create_transaction("msg-1")?;
    let recorder = Recorder::failing("channel_not_found");

    let error = recorder.notify(&transaction).err().ok_or_else(|| anyhow!("expected a failure"))?;

    assert!(matches!(error, CollaboratorError::Notification { .. }));
    assert!(error.to_string().contains(&transaction.id().to_string()));
    assert!(error.to_string().contains("channel_not_found"));
    assert_eq!(recorder.calls(), vec!["msg-1".to_string()]);

    Ok(())
}
