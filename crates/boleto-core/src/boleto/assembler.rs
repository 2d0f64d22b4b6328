//! Turns one unit of text into an [`ExtractedRecord`].

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::config::ExtractionConfig;
use crate::models::record::ExtractedRecord;

use super::rules::{
    AmountExtractor, BarcodeRecognizer, DueDateExtractor, FieldExtractor,
    PayerDocumentExtractor,
};
use super::ExtractionMode;

/// Label for a page-level record: `"<file> (page <n>)"`, `n` 1-based.
pub fn page_label(name: &str, page: usize) -> String {
    format!("{} (page {})", name, page)
}

/// Combines the digit-line recognizer and the field extractors.
pub struct RecordAssembler {
    mode: ExtractionMode,
    barcodes: BarcodeRecognizer,
    documents: PayerDocumentExtractor,
    dates: DueDateExtractor,
    amounts: AmountExtractor,
}

impl RecordAssembler {
    /// Create an assembler with default extractors.
    pub fn new(mode: ExtractionMode) -> Self {
        Self {
            mode,
            barcodes: BarcodeRecognizer::new(),
            documents: PayerDocumentExtractor::new(),
            dates: DueDateExtractor::new(),
            amounts: AmountExtractor::new(),
        }
    }

    /// Create an assembler from extraction settings.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(config.mode).with_year_window(config.min_year, config.max_year)
    }

    /// Set the due date year window.
    pub fn with_year_window(mut self, min_year: i32, max_year: i32) -> Self {
        self.dates = DueDateExtractor::new().with_year_window(min_year, max_year);
        self
    }

    pub fn mode(&self) -> ExtractionMode {
        self.mode
    }

    /// Build the record for one unit of text.
    ///
    /// In strict mode a unit without a digit-line yields `None` and no other
    /// extractor runs. In lenient mode a record is always returned.
    pub fn assemble(&self, source_label: &str, text: &str) -> Option<ExtractedRecord> {
        let barcode = self.barcodes.extract(text);

        if barcode.is_none() && self.mode == ExtractionMode::Strict {
            debug!("No digit-line in {}, skipping", source_label);
            return None;
        }

        let record = ExtractedRecord {
            source_label: source_label.to_string(),
            payer_document: self.documents.extract(text).map(|m| m.value),
            due_date: self.dates.extract(text).map(|m| m.value),
            amount: self
                .amounts
                .extract(text)
                .map(|m| m.value)
                .unwrap_or(Decimal::ZERO),
            barcode_digits: barcode.as_ref().map(|b| b.digits()),
            barcode_layout: barcode.map(|b| b.layout),
        };

        match record.barcode_layout {
            Some(layout) => debug!("Extracted {} boleto from {}", layout.as_str(), source_label),
            None => debug!("No digit-line in {}, keeping as pending", source_label),
        }

        Some(record)
    }
}

impl Default for RecordAssembler {
    fn default() -> Self {
        Self::new(ExtractionMode::default())
    }
}
