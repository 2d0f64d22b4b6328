//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{PdfProcessor, Result};
use crate::batch::DocumentSource;
use crate::error::PdfError;

/// PDF text extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Text of the first `max_pages` pages (all pages when 0).
    ///
    /// A page whose content stream cannot be decoded contributes an empty
    /// string so page numbering stays aligned.
    pub fn extract_pages(&self, max_pages: usize) -> Result<Vec<String>> {
        let page_count = self.page_count();
        if self.document.is_none() {
            return Err(PdfError::Parse("No document loaded".to_string()));
        }

        let limit = match max_pages {
            0 => page_count,
            n => page_count.min(n as u32),
        };

        let pages = (1..=limit)
            .map(|page| {
                self.extract_page_text(page).unwrap_or_else(|e| {
                    warn!("No text for page {}: {}", page, e);
                    String::new()
                })
            })
            .collect();

        Ok(pages)
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract needs the decrypted bytes
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        if self.document.is_none() {
            return Err(PdfError::Parse("No document loaded".to_string()));
        }
        // pdf-extract panics on some font dictionaries lopdf accepts
        panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(&self.raw_data)
        }))
        .map_err(|payload| PdfError::TextExtraction(panic_message(payload)))?
        .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self.document.as_ref().ok_or(PdfError::Parse("No document loaded".to_string()))?;

        if page == 0 || page > self.page_count() {
            return Err(PdfError::InvalidPage(page));
        }

        doc.extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown cause".to_string());
    format!("text extractor panicked: {}", detail)
}

/// A PDF file on disk, read when its text is requested.
#[derive(Debug, Clone)]
pub struct PdfDocument {
    path: PathBuf,
    name: String,
    max_pages: usize,
    prefer_embedded_text: bool,
}

impl PdfDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self {
            path,
            name,
            max_pages: 0,
            prefer_embedded_text: true,
        }
    }

    /// Apply the `pdf` configuration section.
    pub fn with_config(mut self, config: &crate::models::config::PdfConfig) -> Self {
        self.max_pages = config.max_pages;
        self.prefer_embedded_text = config.prefer_embedded_text;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> crate::Result<PdfExtractor> {
        let data = std::fs::read(&self.path)?;
        let mut extractor = PdfExtractor::new();
        extractor.load(&data)?;
        Ok(extractor)
    }
}

impl DocumentSource for PdfDocument {
    fn name(&self) -> &str {
        &self.name
    }

    fn page_texts(&self) -> crate::Result<Vec<String>> {
        Ok(self.open()?.extract_pages(self.max_pages)?)
    }

    fn document_text(&self) -> crate::Result<String> {
        let extractor = self.open()?;

        if self.prefer_embedded_text && self.max_pages == 0 {
            match extractor.extract_text() {
                Ok(text) => return Ok(text),
                Err(e) => warn!("{}: {}, joining page text instead", self.name, e),
            }
        }

        Ok(extractor.extract_pages(self.max_pages)?.join("\n"))
    }
}
