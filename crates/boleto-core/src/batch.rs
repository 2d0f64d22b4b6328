//! Batch orchestration over many documents.
//!
//! Each document is processed on its own; a document that cannot be read is
//! recorded as a [`BatchFailure`] and the batch carries on. Records come out
//! in the order their documents (and pages) went in.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::boleto::{page_label, ExtractionMode, RecordAssembler};
use crate::models::config::BoletoConfig;
use crate::models::record::ExtractedRecord;

/// A document whose text can be read page by page.
pub trait DocumentSource {
    /// Identifier used in record labels and failure reports.
    fn name(&self) -> &str;

    /// Text of every page, in page order. A page with no text is an empty
    /// string, not an error.
    fn page_texts(&self) -> crate::Result<Vec<String>>;

    /// Text of the whole document.
    fn document_text(&self) -> crate::Result<String> {
        Ok(self.page_texts()?.join("\n"))
    }
}

impl<T: DocumentSource + ?Sized> DocumentSource for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn page_texts(&self) -> crate::Result<Vec<String>> {
        (**self).page_texts()
    }

    fn document_text(&self) -> crate::Result<String> {
        (**self).document_text()
    }
}

/// Already-extracted text held in memory.
#[derive(Debug, Clone)]
pub struct TextDocument {
    name: String,
    pages: Vec<String>,
}

impl TextDocument {
    pub fn new(name: impl Into<String>, pages: Vec<String>) -> Self {
        Self {
            name: name.into(),
            pages,
        }
    }

    /// A single-page document.
    pub fn single(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name, vec![text.into()])
    }
}

impl DocumentSource for TextDocument {
    fn name(&self) -> &str {
        &self.name
    }

    fn page_texts(&self) -> crate::Result<Vec<String>> {
        Ok(self.pages.clone())
    }
}

/// Receives progress events while a batch runs.
///
/// Progress is `completed / total` documents. All methods default to no-ops.
pub trait BatchProgress {
    /// Called after each document, whether it succeeded or failed.
    fn on_document_complete(&self, completed: usize, total: usize) {
        let _ = (completed, total);
    }

    /// Called when a document could not be read.
    fn on_document_failed(&self, failure: &BatchFailure) {
        let _ = failure;
    }
}

/// Progress sink that ignores every event.
pub struct NoProgress;

impl BatchProgress for NoProgress {}

/// A document that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchFailure {
    /// Document identifier.
    pub source: String,
    /// Human-readable reason.
    pub message: String,
}

impl BatchFailure {
    pub fn new(source: impl Into<String>, message: impl ToString) -> Self {
        Self {
            source: source.into(),
            message: message.to_string(),
        }
    }
}

/// Totals over a finished batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    /// Documents submitted.
    pub documents: usize,
    /// Documents that could not be read.
    pub failed_documents: usize,
    /// Records produced.
    pub records: usize,
    /// Records without a digit-line.
    pub pending: usize,
    /// Sum of record amounts.
    pub total_amount: Decimal,
}

/// Output of a batch run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchResult {
    /// Records in input order.
    pub records: Vec<ExtractedRecord>,
    /// One entry per failed document, in input order.
    pub failures: Vec<BatchFailure>,
    documents: usize,
}

impl BatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the outcome of one document.
    pub fn push_outcome(&mut self, outcome: Result<Vec<ExtractedRecord>, BatchFailure>) {
        self.documents += 1;
        match outcome {
            Ok(records) => self.records.extend(records),
            Err(failure) => self.failures.push(failure),
        }
    }

    /// Append the outcome of one document out of `total`, reporting it to
    /// `progress`.
    pub fn record_outcome(
        &mut self,
        outcome: Result<Vec<ExtractedRecord>, BatchFailure>,
        total: usize,
        progress: &dyn BatchProgress,
    ) {
        if let Err(failure) = &outcome {
            warn!("Failed to read {}: {}", failure.source, failure.message);
            progress.on_document_failed(failure);
        }

        self.push_outcome(outcome);
        progress.on_document_complete(self.documents, total);
    }

    /// Log the totals and hand the result back.
    pub fn finish(self) -> Self {
        let summary = self.summary();
        info!(
            "Batch complete: {} records ({} pending) from {} documents, {} failed",
            summary.records, summary.pending, summary.documents, summary.failed_documents
        );
        self
    }

    /// True when no record was extracted.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            documents: self.documents,
            failed_documents: self.failures.len(),
            records: self.records.len(),
            pending: self.records.iter().filter(|r| r.is_pending()).count(),
            total_amount: self.records.iter().map(|r| r.amount).sum(),
        }
    }
}

/// Runs the record assembler over documents.
pub struct BatchProcessor {
    assembler: RecordAssembler,
}

impl BatchProcessor {
    pub fn new(assembler: RecordAssembler) -> Self {
        Self { assembler }
    }

    pub fn from_config(config: &BoletoConfig) -> Self {
        Self::new(RecordAssembler::from_config(&config.extraction))
    }

    pub fn mode(&self) -> ExtractionMode {
        self.assembler.mode()
    }

    /// Extract the records of a single document.
    pub fn process_document<S: DocumentSource + ?Sized>(
        &self,
        source: &S,
    ) -> Result<Vec<ExtractedRecord>, BatchFailure> {
        let name = source.name();

        match self.assembler.mode() {
            ExtractionMode::Strict => {
                let pages = source
                    .page_texts()
                    .map_err(|e| BatchFailure::new(name, e))?;

                let records: Vec<ExtractedRecord> = pages
                    .iter()
                    .enumerate()
                    .filter_map(|(i, text)| self.assembler.assemble(&page_label(name, i + 1), text))
                    .collect();

                debug!("{}: {} of {} pages kept", name, records.len(), pages.len());
                Ok(records)
            }
            ExtractionMode::Lenient => {
                let text = source
                    .document_text()
                    .map_err(|e| BatchFailure::new(name, e))?;

                Ok(self.assembler.assemble(name, &text).into_iter().collect())
            }
        }
    }

    /// Process every document in order.
    pub fn process<S: DocumentSource>(
        &self,
        sources: &[S],
        progress: &dyn BatchProgress,
    ) -> BatchResult {
        let total = sources.len();
        let mut result = BatchResult::new();

        info!("Processing {} documents in {} mode", total, self.mode());

        for source in sources {
            result.record_outcome(self.process_document(source), total, progress);
        }

        result.finish()
    }
}
