mod ana_pay;
mod decode;
mod errors;
mod patterns;
mod rakuten_pay;

pub use ana_pay::AnaPayTemplate;
pub use decode::decode_message_body;
pub use errors::{DecodeError, ExtractionError};
pub use rakuten_pay::RakutenPayTemplate;

/// Raw candidate fields found in a notification body.
///
/// Every field is `None` when its label was not found. A label that was found
/// with nothing after it yields `Some("")`.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ExtractedFields {
    pub date: Option<String>,
    pub amount: Option<String>,
    pub store: Option<String>
}

impl ExtractedFields {
    /// True when no label matched at all, i.e. the email is not a notification we know.
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.amount.is_none() && self.store.is_none()
    }
}

/// A notification template the extractor knows how to read.
///
/// Unknown shapes must come back as empty fields, not as an error. Errors are
/// reserved for the matching engine itself failing.
pub trait ExtractionStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn extract(&self, text: &str) -> Result<ExtractedFields, ExtractionError>;
}

/// Runs each template in order and keeps the first one that recognised anything.
pub struct Extractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>
}

impl Extractor {
    pub fn new(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn extract(&self, text: &str) -> Result<ExtractedFields, ExtractionError> {
        for strategy in &self.strategies {
            let fields = strategy.extract(text)?;

            if !fields.is_empty() {
                return Ok(fields);
            }
        }

        Ok(ExtractedFields::default())
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(vec![Box::new(AnaPayTemplate), Box::new(RakutenPayTemplate)])
    }
}
