//! Rendering of extraction results.

use std::fmt::Write as _;

use serde::Serialize;

use boleto_core::boleto::rules::{format_brl_amount, format_date};
use boleto_core::{BatchFailure, BatchResult, BatchSummary, ExtractedRecord};

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV spreadsheet, one row per boleto
    Csv,
    /// Plain text table with totals
    Text,
}

impl OutputFormat {
    /// Resolve the format from the flag or the configured default.
    pub fn resolve(flag: Option<OutputFormat>, configured: &str) -> anyhow::Result<Self> {
        if let Some(format) = flag {
            return Ok(format);
        }
        match configured.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "text" => Ok(Self::Text),
            other => anyhow::bail!("Unknown output format in config: {}", other),
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    records: &'a [ExtractedRecord],
    failures: &'a [BatchFailure],
    summary: BatchSummary,
}

pub fn render(result: &BatchResult, format: OutputFormat, csv_delimiter: char) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => format_json(result),
        OutputFormat::Csv => format_csv(&result.records, csv_delimiter),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_json(result: &BatchResult) -> anyhow::Result<String> {
    let report = JsonReport {
        records: &result.records,
        failures: &result.failures,
        summary: result.summary(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Spreadsheet export: fixed five columns, empty cells for absent fields.
pub fn format_csv(records: &[ExtractedRecord], delimiter: char) -> anyhow::Result<String> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter as u8)
        .from_writer(vec![]);

    wtr.write_record(ExtractedRecord::EXPORT_COLUMNS)?;
    for record in records {
        wtr.write_record(record.export_row())?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &BatchResult) -> String {
    let mut output = String::new();

    for record in &result.records {
        let _ = writeln!(output, "{}", record.source_label);
        let _ = writeln!(
            output,
            "  Document: {}",
            record.payer_document.as_deref().unwrap_or("-")
        );
        let _ = writeln!(
            output,
            "  Due date: {}",
            record.due_date.map(format_date).unwrap_or_else(|| "-".to_string())
        );
        let _ = writeln!(output, "  Amount:   R$ {}", format_brl_amount(record.amount));
        let _ = writeln!(
            output,
            "  Barcode:  {}",
            record.barcode_digits.as_deref().unwrap_or("(pending)")
        );
        output.push('\n');
    }

    output.push_str(&format_summary(&result.summary()));
    output
}

/// Dashboard-style totals.
pub fn format_summary(summary: &BatchSummary) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Total amount:  R$ {}", format_brl_amount(summary.total_amount));
    let _ = writeln!(output, "Boletos found: {}", summary.records);
    if summary.pending > 0 {
        let _ = writeln!(output, "Pending:       {}", summary.pending);
    }
    let _ = writeln!(
        output,
        "Files:         {} ({} failed)",
        summary.documents, summary.failed_documents
    );
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BatchResult {
        let mut record = ExtractedRecord::empty("a.pdf (page 1)");
        record.barcode_digits = Some("858000000070364503282024510041100011800000000036".to_string());
        record.payer_document = Some("123.456.789-09".to_string());

        let mut result = BatchResult::new();
        result.push_outcome(Ok(vec![record, ExtractedRecord::empty("b.pdf")]));
        result.push_outcome(Err(BatchFailure::new("c.pdf", "PDF is encrypted")));
        result
    }

    #[test]
    fn test_csv_header_and_empty_cells() {
        let csv = format_csv(&sample().records, ',').unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "source_label,payer_document,due_date,amount,barcode_digits");
        assert_eq!(
            lines[1],
            "a.pdf (page 1),123.456.789-09,,0.00,858000000070364503282024510041100011800000000036"
        );
        assert_eq!(lines[2], "b.pdf,,,0.00,");
    }

    #[test]
    fn test_csv_custom_delimiter() {
        let csv = format_csv(&sample().records, ';').unwrap();
        assert!(csv.starts_with("source_label;payer_document;due_date;amount;barcode_digits\n"));
    }

    #[test]
    fn test_json_report() {
        let json = render(&sample(), OutputFormat::Json, ',').unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["records"].as_array().unwrap().len(), 2);
        assert_eq!(value["failures"][0]["source"], "c.pdf");
        assert_eq!(value["summary"]["pending"], 1);
    }

    #[test]
    fn test_text_marks_pending() {
        let text = render(&sample(), OutputFormat::Text, ',').unwrap();
        assert!(text.contains("(pending)"));
        assert!(text.contains("Files:         2 (1 failed)"));
    }

    #[test]
    fn test_resolve_format() {
        assert_eq!(OutputFormat::resolve(None, "CSV").unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::resolve(Some(OutputFormat::Text), "json").unwrap(), OutputFormat::Text);
        assert!(OutputFormat::resolve(None, "xlsx").is_err());
    }
}
