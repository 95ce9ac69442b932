//! Template command - describe the active field pattern table.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use invext_core::ExtractionTemplate;

use super::{load_config, to_json};

/// Arguments for the template command.
#[derive(Args)]
pub struct TemplateArgs {
    /// Write the template to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: TemplateArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let template = ExtractionTemplate::from_table(&config.extraction.fields);
    let json = to_json(&template, config.output.pretty)?;

    match args.output {
        Some(path) => {
            fs::write(&path, json)?;
            println!(
                "{} Extraction template written to {}",
                style("✓").green(),
                path.display()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}
