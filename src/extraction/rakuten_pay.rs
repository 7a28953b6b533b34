use std::sync::LazyLock;

use crate::extraction::patterns::{capture, compiled, Patterns};
use crate::extraction::{ExtractedFields, ExtractionError, ExtractionStrategy};

// ご利用日時	2025/03/13(木) 14:52
// ご利用店舗	パティスリー　シェ・シシ
// 電話番号	092-791-3617
// 決済総額	¥6,770
static PATTERNS: LazyLock<Result<Patterns, regex::Error>> = LazyLock::new(|| {
    Patterns::compile(
        r"ご利用日時\s+(\d{4}/\d{2}/\d{2})\(\S\)\s(\d{2}:\d{2})",
        r"決済総額\s+¥([\d,]+)",
        r"ご利用店舗\s+([\s\S]+?)(?:\r\n|\n|\r)\s*電話番号"
    )
});

/// Rakuten Pay "ご利用明細" notification.
///
/// The date line splits the day and the time around a weekday marker, so the
/// two captures are joined with a single space.
pub struct RakutenPayTemplate;

impl ExtractionStrategy for RakutenPayTemplate {
    fn name(&self) -> &'static str {
        "Rakuten Pay"
    }

    fn extract(&self, text: &str) -> Result<ExtractedFields, ExtractionError> {
        let patterns = compiled(self.name(), &PATTERNS)?;

        let date = patterns.date.captures(text).and_then(|captures| {
            let day = captures.get(1)?.as_str();
            let time = captures.get(2)?.as_str();
            Some(format!("{day} {time}"))
        });

        Ok(ExtractedFields {
            date,
            amount: capture(&patterns.amount, text),
            store: capture(&patterns.store, text)
        })
    }
}
