//! Batch processing command for multiple boleto files.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use futures_util::stream::{self, StreamExt};
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use boleto_core::{
    BatchFailure, BatchProcessor, BatchProgress, BatchResult, DocumentSource, PdfDocument,
};

use super::{load_config, ModeArg, ProgressBarSink};
use crate::output::{self, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input glob pattern (e.g. "boletos/*.pdf")
    #[arg(required = true)]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Extraction mode (default: from config)
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Number of files read concurrently
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Exit with an error when any file could not be read
    #[arg(long)]
    fail_on_error: bool,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let mut config = load_config(config_path)?;

    if let Some(mode) = args.mode {
        config.extraction.mode = mode.into();
    }
    let format = OutputFormat::resolve(args.format, &config.output.format)?;

    // Expand glob pattern
    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        })
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let documents: Vec<PdfDocument> = files
        .iter()
        .map(|path| PdfDocument::new(path).with_config(&config.pdf))
        .collect();

    let pb = ProgressBar::new(documents.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );
    let sink = ProgressBarSink::new(pb.clone());

    let processor = BatchProcessor::from_config(&config);
    info!(
        "Processing {} files in {} mode with {} jobs",
        documents.len(),
        processor.mode(),
        args.jobs
    );

    let result = if args.jobs > 1 {
        process_concurrent(Arc::new(processor), documents, args.jobs, &sink).await
    } else {
        processor.process(&documents, &sink)
    };

    pb.finish_and_clear();

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

    // Text output already carries the totals
    let totals_shown = args.output.is_none() && format == OutputFormat::Text;
    print_summary(&result, start, !totals_shown);

    if args.fail_on_error && !result.failures.is_empty() {
        anyhow::bail!("{} files could not be processed", result.failures.len());
    }

    Ok(())
}

/// Read documents on the blocking pool, keeping results in input order.
async fn process_concurrent(
    processor: Arc<BatchProcessor>,
    documents: Vec<PdfDocument>,
    jobs: usize,
    progress: &dyn BatchProgress,
) -> BatchResult {
    let total = documents.len();
    let mut result = BatchResult::new();

    let mut outcomes = stream::iter(documents)
        .map(|document| {
            let processor = Arc::clone(&processor);
            let name = document.name().to_string();
            async move {
                tokio::task::spawn_blocking(move || processor.process_document(&document))
                    .await
                    .unwrap_or_else(|e| Err(BatchFailure::new(name, format!("worker failed: {}", e))))
            }
        })
        .buffered(jobs);

    while let Some(outcome) = outcomes.next().await {
        result.record_outcome(outcome, total, progress);
    }

    result.finish()
}

fn print_summary(result: &BatchResult, start: Instant, with_totals: bool) {
    let summary = result.summary();

    eprintln!();
    if result.is_empty() {
        eprintln!("{} No boletos found", style("ℹ").blue());
    }
    if with_totals {
        eprint!("{}", output::format_summary(&summary));
    }
    eprintln!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        summary.documents,
        start.elapsed()
    );

    if !result.failures.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for failure in &result.failures {
            eprintln!("  - {}: {}", failure.source, failure.message);
        }
    }
}
