//! Scan command - read one label photo with a single provider.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use geolabel_core::contract::coerce_reply;
use geolabel_core::{parse_sample_label, Credentials, ExtractedFields, ProviderSelector, VisionProvider};

use super::{format_fields, load_config, print_issues, read_image, OutputFormat};

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Label photo (png, jpeg, gif, webp, bmp, tiff)
    #[arg(required = true)]
    input: PathBuf,

    /// Provider to use (claude, openai, gemini); defaults to OCR_PROVIDER
    #[arg(short, long)]
    provider: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Report missing or inconsistent fields
    #[arg(long)]
    validate: bool,

    /// Fill fields the provider missed by parsing its raw reply locally
    #[arg(long)]
    reparse: bool,
}

pub async fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let credentials = Credentials::from_env();

    let image = read_image(&args.input)?;
    let provider = ProviderSelector::new(&credentials, &config).select(args.provider.as_deref())?;

    info!("Scanning {} with {}", args.input.display(), provider.name());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.set_message(format!("Waiting for {}...", provider.name()));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = recognize(provider.as_ref(), &image, args.reparse).await;
    pb.finish_and_clear();
    let fields = result?;

    if args.validate {
        print_issues(&fields);
    }

    let output = format_fields(&fields, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!("{} Output written to {}", style("✓").green(), output_path.display());
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Recognize one image, optionally backing the reply up with the rule parser.
pub async fn recognize(provider: &dyn VisionProvider, image: &str, reparse: bool) -> anyhow::Result<ExtractedFields> {
    if !reparse {
        return Ok(provider.recognize(image).await?);
    }

    let reply = provider.transcribe(image).await?;
    let raw = reply.clone().unwrap_or_default();

    match coerce_reply(provider.name(), reply) {
        Ok(fields) if fields.is_complete() => Ok(fields),
        Ok(fields) => {
            debug!("Filling missing fields from raw {} reply", provider.name());
            Ok(fields.or_else(parse_sample_label(&raw)))
        }
        Err(e) if !raw.trim().is_empty() => {
            warn!("{} reply was not usable JSON ({}), parsing it as text", provider.name(), e);
            Ok(parse_sample_label(&raw))
        }
        Err(e) => Err(e.into()),
    }
}
