//! Extract command - pull fields out of a single invoice file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use invext_core::invoice::{InvoiceParser, RegexInvoiceParser};

use super::{format_report, load_config, read_document, to_json, OutputFormat};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (PDF or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Directory to write extracted data and template JSON files to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for stdout
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Print extraction warnings to stderr
    #[arg(long)]
    show_warnings: bool,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    info!("Processing file: {}", args.input.display());

    let text = read_document(&args.input, &config)?;
    let parser = RegexInvoiceParser::from_config(&config.extraction);
    let report = parser.parse(&text)?;

    if args.show_warnings && !report.warnings.is_empty() {
        eprintln!("{}", style("Extraction warnings:").yellow());
        for warning in &report.warnings {
            eprintln!("  - {}", warning);
        }
    }

    match &args.output_dir {
        Some(output_dir) => {
            fs::create_dir_all(output_dir)?;

            let data_path = output_dir.join(&config.output.data_file);
            fs::write(&data_path, to_json(&report.fields, config.output.pretty)?)?;

            let template_path = output_dir.join(&config.output.template_file);
            fs::write(&template_path, to_json(&report.template, config.output.pretty)?)?;

            println!(
                "{} Extracted data written to {}",
                style("✓").green(),
                data_path.display()
            );
            println!(
                "{} Extraction template written to {}",
                style("✓").green(),
                template_path.display()
            );
        }
        None => {
            let output = format_report(&report, args.format, config.output.pretty)?;
            println!("{}", output);
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
