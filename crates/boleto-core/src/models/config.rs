//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

use crate::boleto::ExtractionMode;

/// Main configuration for boleto extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoletoConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Per-page strict filtering or whole-document lenient extraction.
    pub mode: ExtractionMode,

    /// First year accepted for due dates.
    pub min_year: i32,

    /// Last year accepted for due dates.
    pub max_year: i32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            mode: ExtractionMode::Strict,
            min_year: 2020,
            max_year: 2030,
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages read per document (0 = unlimited).
    pub max_pages: usize,

    /// In lenient mode, read the whole document with the layout-aware text
    /// extractor instead of joining per-page text.
    pub prefer_embedded_text: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            max_pages: 0,
            prefer_embedded_text: true,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format name (json, csv or text).
    pub format: String,

    /// Field delimiter for CSV export.
    pub csv_delimiter: char,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            csv_delimiter: ',',
        }
    }
}

impl BoletoConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Check that the configured values are usable.
    pub fn validate(&self) -> crate::Result<()> {
        if self.extraction.min_year > self.extraction.max_year {
            return Err(crate::BoletoError::Config(format!(
                "extraction.min_year ({}) is after extraction.max_year ({})",
                self.extraction.min_year, self.extraction.max_year
            )));
        }
        if !self.output.csv_delimiter.is_ascii() {
            return Err(crate::BoletoError::Config(format!(
                "output.csv_delimiter must be an ASCII character, got {:?}",
                self.output.csv_delimiter
            )));
        }
        Ok(())
    }
}
