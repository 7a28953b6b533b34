use super::{ConfigError, Settings};
use crate::models::TransactionStatus;
use anyhow::Result;
use std::collections::HashMap;

fn settings_from(pairs: &[(&str, &str)]) -> Result<Settings, ConfigError> {
    let values: HashMap<String, String> = pairs.iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

    Settings::from_lookup(|key| values.get(key).cloned())
}

#[test]
fn test_settings_fall_back_to_defaults() -> Result<()> {
    let settings = settings_from(&[])?;

    assert_eq!(settings.approve_reaction, "white_check_mark");
    assert_eq!(settings.skip_reaction, "x");
    assert_eq!(settings.utc_offset.local_minus_utc(), 9 * 3600);
    assert_eq!(settings.backpressure, 256);

    Ok(())
}

#[test]
fn test_settings_read_overrides() -> Result<()> {
    let settings = settings_from(&[
        ("MF_AUTO_REG_APPROVE_REACTION", ":+1:"),
        ("MF_AUTO_REG_SKIP_REACTION", "no_entry"),
        ("MF_AUTO_REG_UTC_OFFSET_HOURS", "0"),
        ("MF_AUTO_REG_BACKPRESSURE", "8")
    ])?;

    assert_eq!(settings.approve_reaction, "+1");
    assert_eq!(settings.skip_reaction, "no_entry");
    assert_eq!(settings.utc_offset.local_minus_utc(), 0);
    assert_eq!(settings.backpressure, 8);

    Ok(())
}

#[test]
fn test_settings_reject_invalid_values() {
    assert!(matches!(
        settings_from(&[("MF_AUTO_REG_UTC_OFFSET_HOURS", "nine")]),
        Err(ConfigError::InvalidValue { key: "MF_AUTO_REG_UTC_OFFSET_HOURS", .. })
    ));
    assert!(settings_from(&[("MF_AUTO_REG_UTC_OFFSET_HOURS", "48")]).is_err());
    assert!(settings_from(&[("MF_AUTO_REG_BACKPRESSURE", "0")]).is_err());
    assert!(settings_from(&[("MF_AUTO_REG_APPROVE_REACTION", "  ")]).is_err());
    assert!(settings_from(&[("MF_AUTO_REG_SKIP_REACTION", "white_check_mark")]).is_err());
}

#[test]
fn test_reaction_decision_maps_known_reactions() -> Result<()> {
    let settings = settings_from(&[])?;

    assert_eq!(settings.reaction_decision("white_check_mark"), Some(TransactionStatus::Approved));
    assert_eq!(settings.reaction_decision(":x:"), Some(TransactionStatus::Skipped));
    assert_eq!(settings.reaction_decision("eyes"), None);

    Ok(())
}
