//! Core library for Brazilian boleto extraction.
//!
//! This crate provides:
//! - Digit-line recognition for bank and utility/collection boletos
//! - Payer document (CNPJ/CPF), due date and amount extraction
//! - Strict (per page) and lenient (per document) record assembly
//! - Batch processing with per-document failure isolation
//! - PDF text extraction (feature `pdf`)

pub mod error;
pub mod models;
pub mod boleto;
pub mod batch;
#[cfg(feature = "pdf")]
pub mod pdf;

pub use error::{BoletoError, PdfError, Result};
pub use models::config::BoletoConfig;
pub use models::record::{BarcodeLayout, ExtractedRecord};
pub use boleto::{ExtractionMode, RecordAssembler};
pub use boleto::rules::{normalize_digits, recognize_barcode, BarcodeMatch};
pub use batch::{
    BatchFailure, BatchProcessor, BatchProgress, BatchResult, BatchSummary, DocumentSource,
    NoProgress, TextDocument,
};
#[cfg(feature = "pdf")]
pub use pdf::{PdfDocument, PdfExtractor, PdfProcessor};
