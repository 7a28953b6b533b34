use crate::types::YenError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::LazyLock;

const GROUP_SEPARATOR: char = ',';
const GROUP_SIZE: usize = 3;

// Plain digits, or thousands groups of exactly three after the leading group. No sign.
static AMOUNT_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^(?:\d{1,3}(?:,\d{3})+|\d+)$"));

/// A whole-yen amount. JPY has no minor unit in notification emails.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Yen(i64);

impl Yen {
    pub fn new(value: i64) -> Self {
        Yen(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

/// Renders with the yen sign and thousands grouping, e.g. `¥1,234,567`.
impl Display for Yen {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / GROUP_SIZE);

        for (index, digit) in digits.chars().enumerate() {
            if index > 0 && (digits.len() - index) % GROUP_SIZE == 0 {
                grouped.push(GROUP_SEPARATOR);
            }
            grouped.push(digit);
        }

        write!(formatter, "{sign}¥{grouped}")
    }
}

/// Parses raw amount text as it appears in notification bodies (`1,234`).
impl FromStr for Yen {
    type Err = YenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Err(YenError::InvalidFormat("Value is an empty string".to_string()));
        }

        let pattern = AMOUNT_PATTERN.as_ref()
            .map_err(|error| YenError::InvalidFormat(format!("Amount pattern failed to compile: {error}")))?;

        if !pattern.is_match(value) {
            return Err(YenError::InvalidFormat(format!("Value is not a grouped whole number: {value}")));
        }

        let digits: String = value.chars().filter(|c| *c != GROUP_SEPARATOR).collect();

        Ok(Yen::new(digits.parse()?))
    }
}
