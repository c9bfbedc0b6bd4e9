//! Parse command - run the local rule parser over label text.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::debug;

use geolabel_core::LabelParser;

use super::{format_fields, OutputFormat};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Text file to parse (default: stdin)
    input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Report missing or inconsistent fields
    #[arg(long)]
    validate: bool,
}

pub fn run(args: ParseArgs) -> anyhow::Result<()> {
    let text = match &args.input {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Input file not found: {}", path.display());
            }
            fs::read_to_string(path)?
        }
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let result = LabelParser::new().parse(&text);
    debug!("Parsed label text in {}us", result.processing_time_us);

    if args.validate && !result.issues.is_empty() {
        eprintln!("{}", style("Validation issues:").yellow());
        for issue in &result.issues {
            eprintln!("  - {}", issue);
        }
    }

    println!("{}", format_fields(&result.fields, args.format)?);

    Ok(())
}
