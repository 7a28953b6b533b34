use regex::Regex;

use crate::extraction::ExtractionError;

/// The three compiled label patterns of one template. Capture group 1 holds the value.
pub(crate) struct Patterns {
    pub date: Regex,
    pub amount: Regex,
    pub store: Regex
}

impl Patterns {
    pub fn compile(date: &str, amount: &str, store: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            date: Regex::new(date)?,
            amount: Regex::new(amount)?,
            store: Regex::new(store)?
        })
    }
}

/// Borrows the lazily compiled patterns, turning a compile failure into a hard extraction error.
pub(crate) fn compiled<'a>(template: &'static str, patterns: &'a Result<Patterns, regex::Error>) -> Result<&'a Patterns, ExtractionError> {
    patterns.as_ref().map_err(|error| ExtractionError::Pattern {
        template,
        source: error.clone()
    })
}

pub(crate) fn capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern.captures(text)
        .and_then(|captures| captures.get(1))
        .map(|value| value.as_str().trim().to_string())
}
