//! Amount command - normalize monetary amounts in text fragments.

use std::io::{self, BufRead};

use clap::Args;
use serde::Serialize;

use invext_core::amount::AmountNormalizer;

/// Arguments for the amount command.
#[derive(Args)]
pub struct AmountArgs {
    /// Text fragments to normalize (reads one fragment per stdin line if omitted)
    fragments: Vec<String>,

    /// Emit JSON objects instead of one value per line
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct NormalizedFragment<'a> {
    input: &'a str,
    amount: String,
}

pub fn run(args: AmountArgs) -> anyhow::Result<()> {
    let fragments = if args.fragments.is_empty() {
        io::stdin().lock().lines().collect::<io::Result<Vec<_>>>()?
    } else {
        args.fragments
    };

    let normalizer = AmountNormalizer::new();
    let results: Vec<NormalizedFragment> = fragments
        .iter()
        .map(|fragment| NormalizedFragment {
            input: fragment,
            amount: normalizer.normalize(fragment).into_string(),
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for result in &results {
            println!("{}", result.amount);
        }
    }

    Ok(())
}
