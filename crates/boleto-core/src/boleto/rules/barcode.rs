//! Digit-line (linha digitável) recognition.
//!
//! Three layouts are known. They are tried in a fixed order and the first
//! layout that matches anywhere in the text wins, even when a later layout
//! would also match: a standard bank line is never reported as a compact or
//! collection line.

use regex::Regex;

use crate::models::record::BarcodeLayout;

use super::{normalize_digits, FieldExtractor};
use super::patterns::{BARCODE_BANK, BARCODE_COLLECTION, BARCODE_COMPACT_BANK};

/// A recognized digit-line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarcodeMatch {
    /// Layout whose pattern matched.
    pub layout: BarcodeLayout,
    /// Matched substring, separators included.
    pub raw: String,
    /// Byte range of the match in the searched text.
    pub position: (usize, usize),
}

impl BarcodeMatch {
    /// The digit-line with every separator removed.
    pub fn digits(&self) -> String {
        normalize_digits(Some(&self.raw)).unwrap_or_default()
    }
}

impl BarcodeLayout {
    /// Layouts in recognition priority order.
    pub const PRIORITY: [BarcodeLayout; 3] = [
        BarcodeLayout::Bank,
        BarcodeLayout::CompactBank,
        BarcodeLayout::Collection,
    ];

    fn pattern(self) -> &'static Regex {
        match self {
            BarcodeLayout::Bank => &BARCODE_BANK,
            BarcodeLayout::CompactBank => &BARCODE_COMPACT_BANK,
            BarcodeLayout::Collection => &BARCODE_COLLECTION,
        }
    }

    /// Find this layout's first match in `text`.
    pub fn find(self, text: &str) -> Option<BarcodeMatch> {
        self.pattern().find(text).map(|m| BarcodeMatch {
            layout: self,
            raw: m.as_str().to_string(),
            position: (m.start(), m.end()),
        })
    }
}

/// Ordered digit-line recognizer.
pub struct BarcodeRecognizer {
    layouts: Vec<BarcodeLayout>,
}

impl BarcodeRecognizer {
    pub fn new() -> Self {
        Self {
            layouts: BarcodeLayout::PRIORITY.to_vec(),
        }
    }
}

impl Default for BarcodeRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for BarcodeRecognizer {
    type Output = BarcodeMatch;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.layouts.iter().find_map(|layout| layout.find(text))
    }

    /// First match of every layout that matches, in priority order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.layouts.iter().filter_map(|layout| layout.find(text)).collect()
    }
}

/// Recognize the digit-line in text.
pub fn recognize_barcode(text: &str) -> Option<BarcodeMatch> {
    BarcodeRecognizer::new().extract(text)
}
