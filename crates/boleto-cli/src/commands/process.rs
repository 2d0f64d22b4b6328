//! Process command - extract boletos from a single PDF file.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use boleto_core::{BatchProcessor, BatchResult, PdfDocument};

use super::{load_config, ModeArg};
use crate::output::{self, OutputFormat};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Extraction mode (default: from config)
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let mut config = load_config(config_path)?;

    if let Some(mode) = args.mode {
        config.extraction.mode = mode.into();
    }
    let format = OutputFormat::resolve(args.format, &config.output.format)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Reading {}...", args.input.display()));

    let processor = BatchProcessor::from_config(&config);
    let document = PdfDocument::new(&args.input).with_config(&config.pdf);

    let mut result = BatchResult::new();
    let outcome = processor.process_document(&document);
    pb.finish_and_clear();

    if let Err(failure) = &outcome {
        anyhow::bail!("Failed to read {}: {}", failure.source, failure.message);
    }
    result.push_outcome(outcome);

    if result.is_empty() {
        eprintln!(
            "{} No boletos found in {}",
            style("ℹ").blue(),
            args.input.display()
        );
    }

    let rendered = output::render(&result, format, config.output.csv_delimiter)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &rendered)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", rendered);
        if !rendered.ends_with('\n') {
            println!();
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
