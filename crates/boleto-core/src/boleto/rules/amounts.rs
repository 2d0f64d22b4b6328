//! Amount extraction for boletos (Brazilian format: 1.234,56).

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::trace;

use super::{ExtractionMatch, FieldExtractor};
use super::patterns::{AMOUNT_STANDALONE, AMOUNT_WITH_MARKER};

/// Amount field extractor.
///
/// Amounts behind an "R$" or "Valor" marker are searched first; bare
/// amount-shaped tokens are only considered when no marker match exists at
/// all. The largest candidate is the boleto value.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text)
            .into_iter()
            .max_by(|a, b| a.value.cmp(&b.value))
            .filter(|m| m.value > Decimal::ZERO)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut candidates: Vec<_> = AMOUNT_WITH_MARKER
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .collect();

        if candidates.is_empty() {
            candidates = AMOUNT_STANDALONE
                .captures_iter(text)
                .filter_map(|caps| caps.get(1))
                .collect();
        }

        candidates
            .into_iter()
            .filter_map(|m| match parse_brl_amount(m.as_str()) {
                Some(amount) => Some(
                    ExtractionMatch::new(amount, m.as_str()).with_position(m.start(), m.end()),
                ),
                None => {
                    trace!("Discarding amount candidate {:?}: not a representable decimal", m.as_str());
                    None
                }
            })
            .collect()
    }
}

/// Extract the boleto value, or zero when nothing positive is found.
pub fn extract_amount(text: &str) -> Decimal {
    AmountExtractor::new()
        .extract(text)
        .map(|m| m.value)
        .unwrap_or(Decimal::ZERO)
}

/// Parse a Brazilian-formatted amount (`.` thousands, `,` decimals).
///
/// Numerals beyond `Decimal`'s 96-bit range yield `None` and the candidate
/// is dropped.
pub fn parse_brl_amount(s: &str) -> Option<Decimal> {
    let normalized = s.replace('.', "").replace(',', ".");
    Decimal::from_str(&normalized).ok()
}

/// Format amount in Brazilian style (1.234,56).
pub fn format_brl_amount(amount: Decimal) -> String {
    let s = format!("{:.2}", amount.round_dp(2));
    let (integer_part, decimal_part) = match s.split_once('.') {
        Some(parts) => parts,
        None => return s,
    };

    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer_part),
    };

    let chars: Vec<char> = digits.chars().collect();
    let mut formatted = String::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push('.');
        }
        formatted.push(*c);
    }

    format!("{}{},{}", sign, formatted, decimal_part)
}
