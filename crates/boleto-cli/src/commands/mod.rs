//! Subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod process;

use std::path::{Path, PathBuf};

use console::style;
use indicatif::ProgressBar;

use boleto_core::{BatchFailure, BatchProgress, BoletoConfig, ExtractionMode};

/// Extraction mode as accepted on the command line.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ModeArg {
    /// One record per page; pages without a digit-line are dropped
    Strict,
    /// One record per file; files without a digit-line are kept as pending
    Lenient,
}

impl From<ModeArg> for ExtractionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Strict => ExtractionMode::Strict,
            ModeArg::Lenient => ExtractionMode::Lenient,
        }
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("boleto")
        .join("config.json")
}

/// Load the configuration from `--config`, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<BoletoConfig> {
    let config = match config_path {
        Some(path) => BoletoConfig::from_file(Path::new(path))?,
        None => {
            let path = default_config_path();
            if path.exists() {
                BoletoConfig::from_file(&path)?
            } else {
                BoletoConfig::default()
            }
        }
    };

    config.validate()?;
    Ok(config)
}

/// Forwards batch progress to a terminal progress bar.
pub struct ProgressBarSink {
    pb: ProgressBar,
}

impl ProgressBarSink {
    pub fn new(pb: ProgressBar) -> Self {
        Self { pb }
    }
}

impl BatchProgress for ProgressBarSink {
    fn on_document_complete(&self, completed: usize, _total: usize) {
        self.pb.set_position(completed as u64);
    }

    fn on_document_failed(&self, failure: &BatchFailure) {
        self.pb.println(format!(
            "{} {}: {}",
            style("✗").red(),
            failure.source,
            failure.message
        ));
    }
}
