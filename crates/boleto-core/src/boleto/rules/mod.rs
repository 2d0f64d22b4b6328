//! Rule-based field extractors for boletos.

pub mod normalize;
pub mod document;
pub mod dates;
pub mod amounts;
pub mod barcode;
pub mod patterns;

pub use normalize::normalize_digits;
pub use document::{extract_payer_document, PayerDocumentExtractor};
pub use dates::{extract_due_date, format_date, DueDateExtractor, DATE_FORMAT};
pub use amounts::{extract_amount, parse_brl_amount, format_brl_amount, AmountExtractor};
pub use barcode::{recognize_barcode, BarcodeMatch, BarcodeRecognizer};
pub use patterns::*;


/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text, applying the extractor's selection policy.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract every surviving candidate for the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A value extracted from text together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Position in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
