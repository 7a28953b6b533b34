use std::sync::LazyLock;

use crate::extraction::patterns::{capture, compiled, Patterns};
use crate::extraction::{ExtractedFields, ExtractionError, ExtractionStrategy};

// ご利用日時：2025-03-29 14:05:52
// ご利用金額：8,250円
// ご利用店舗：yyy
static PATTERNS: LazyLock<Result<Patterns, regex::Error>> = LazyLock::new(|| {
    Patterns::compile(
        r"ご利用日時：(.*)",
        r"ご利用金額：\s*([\d,]+)\s*円",
        r"ご利用店舗：(.*)"
    )
});

/// ANA Pay "ご利用のお知らせ" notification.
pub struct AnaPayTemplate;

impl ExtractionStrategy for AnaPayTemplate {
    fn name(&self) -> &'static str {
        "ANA Pay"
    }

    fn extract(&self, text: &str) -> Result<ExtractedFields, ExtractionError> {
        let patterns = compiled(self.name(), &PATTERNS)?;

        Ok(ExtractedFields {
            date: capture(&patterns.date, text),
            amount: capture(&patterns.amount, text),
            store: capture(&patterns.store, text)
        })
    }
}
