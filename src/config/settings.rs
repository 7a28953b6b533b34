use chrono::FixedOffset;

use crate::config::ConfigError;
use crate::models::TransactionStatus;

const APPROVE_REACTION_KEY: &str = "MF_AUTO_REG_APPROVE_REACTION";
const SKIP_REACTION_KEY: &str = "MF_AUTO_REG_SKIP_REACTION";
const UTC_OFFSET_HOURS_KEY: &str = "MF_AUTO_REG_UTC_OFFSET_HOURS";
const BACKPRESSURE_KEY: &str = "MF_AUTO_REG_BACKPRESSURE";

const DEFAULT_APPROVE_REACTION: &str = "white_check_mark";
const DEFAULT_SKIP_REACTION: &str = "x";
const DEFAULT_UTC_OFFSET_HOURS: i32 = 9;
const DEFAULT_BACKPRESSURE: usize = 256;

/// Process-wide settings, built once at start-up and handed to the pipeline.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Reaction name that approves a notified transaction.
    pub approve_reaction: String,
    /// Reaction name that skips a notified transaction.
    pub skip_reaction: String,
    /// Offset of the timestamps written in notification bodies.
    pub utc_offset: FixedOffset,
    /// Capacity of the channel between the mailbox reader and the pipeline.
    pub backpressure: usize
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads every `MF_AUTO_REG_*` key through `lookup`, falling back to defaults for absent keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let approve_reaction = reaction(&lookup, APPROVE_REACTION_KEY, DEFAULT_APPROVE_REACTION)?;
        let skip_reaction = reaction(&lookup, SKIP_REACTION_KEY, DEFAULT_SKIP_REACTION)?;

        if approve_reaction == skip_reaction {
            return Err(ConfigError::invalid_value(SKIP_REACTION_KEY, "must differ from the approve reaction"));
        }

        let offset_hours = match lookup(UTC_OFFSET_HOURS_KEY) {
            Some(value) => value.trim().parse::<i32>()
                .map_err(|error| ConfigError::invalid_value(UTC_OFFSET_HOURS_KEY, error.to_string()))?,
            None => DEFAULT_UTC_OFFSET_HOURS
        };

        let utc_offset = offset_hours.checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| ConfigError::invalid_value(UTC_OFFSET_HOURS_KEY, format!("{offset_hours} is out of range")))?;

        let backpressure = match lookup(BACKPRESSURE_KEY) {
            Some(value) => value.trim().parse::<usize>()
                .map_err(|error| ConfigError::invalid_value(BACKPRESSURE_KEY, error.to_string()))?,
            None => DEFAULT_BACKPRESSURE
        };

        if backpressure == 0 {
            return Err(ConfigError::invalid_value(BACKPRESSURE_KEY, "must be greater than zero"));
        }

        Ok(Self {
            approve_reaction,
            skip_reaction,
            utc_offset,
            backpressure
        })
    }

    /// Maps a chat reaction to the decision it records. Surrounding colons are ignored.
    pub fn reaction_decision(&self, reaction: &str) -> Option<TransactionStatus> {
        let reaction = reaction.trim().trim_matches(':');

        if reaction == self.approve_reaction {
            Some(TransactionStatus::Approved)
        } else if reaction == self.skip_reaction {
            Some(TransactionStatus::Skipped)
        } else {
            None
        }
    }
}

fn reaction<F>(lookup: &F, key: &'static str, default: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => {
            let value = value.trim().trim_matches(':');

            if value.is_empty() {
                return Err(ConfigError::invalid_value(key, "reaction name is empty"));
            }

            Ok(value.to_string())
        }
        None => Ok(default.to_string())
    }
}
