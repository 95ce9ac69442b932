//! CLI subcommands.

pub mod amount;
pub mod batch;
pub mod config;
pub mod extract;
pub mod template;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use invext_core::models::config::InvextConfig;
use invext_core::pdf::{PdfExtractor, PdfProcessor};
use invext_core::{ExtractionReport, FieldOutcome};

/// Output format for extraction results.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output (one row per match)
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("invext")
        .join("config.json")
}

/// Load the configuration given on the command line, then the default
/// config file, then built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<InvextConfig> {
    if let Some(path) = config_path {
        return Ok(InvextConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        return Ok(InvextConfig::from_file(&default_path)?);
    }

    Ok(InvextConfig::default())
}

/// Read the plain text of an invoice document.
pub fn read_document(path: &Path, config: &InvextConfig) -> anyhow::Result<String> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let text = match extension.as_str() {
        "pdf" => {
            let data = fs::read(path)?;
            let mut extractor = PdfExtractor::new().with_max_pages(config.pdf.max_pages);
            extractor.load(&data)?;
            debug!("PDF has {} pages", extractor.page_count());

            let text = extractor.extract_text()?;
            if text.trim().len() < config.pdf.min_text_length {
                anyhow::bail!("No text extracted from PDF: {}", path.display());
            }
            text
        }
        "txt" | "text" | "" => fs::read_to_string(path)?,
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    };

    Ok(text)
}

/// Serialize JSON honoring the pretty-print setting.
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}

pub fn format_report(
    report: &ExtractionReport,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => to_json(report, pretty),
        OutputFormat::Csv => format_csv(report),
        OutputFormat::Text => Ok(format_text(report)),
    }
}

fn format_csv(report: &ExtractionReport) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["field", "value", "status"])?;

    for (name, outcome) in report.fields.iter() {
        match outcome {
            FieldOutcome::Matches(values) => {
                for value in values {
                    wtr.write_record([name, value.as_str(), "match"])?;
                }
            }
            FieldOutcome::NotFound => wtr.write_record([name, "", "not_found"])?,
            FieldOutcome::InvalidPattern(message) => {
                wtr.write_record([name, message.as_str(), "invalid_pattern"])?
            }
        }
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(report: &ExtractionReport) -> String {
    let mut output = String::new();

    for (name, outcome) in report.fields.iter() {
        match outcome {
            FieldOutcome::Matches(values) => {
                output.push_str(&format!("{}: {}\n", name, values.join(" | ")));
            }
            FieldOutcome::NotFound => output.push_str(&format!("{}: -\n", name)),
            FieldOutcome::InvalidPattern(message) => {
                output.push_str(&format!("{}: ERROR {}\n", name, message));
            }
        }
    }

    let summary = &report.summary;
    if let Some(period) = &summary.period {
        output.push_str(&format!("\nPeriod: {} - {}\n", period.start, period.end));
    }
    if let Some(gross) = summary.gross_amount {
        output.push_str(&format!("Gross: {}\n", gross));
    }

    output
}
