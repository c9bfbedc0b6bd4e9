//! Batch command - read many label photos with one provider.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{Local, NaiveDateTime};
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use geolabel_core::{Credentials, ExtractedFields, ProviderSelector, SampleRecord, VisionProvider};

use super::{format_fields, load_config, read_image, OutputFormat};

const IMAGE_EXTENSIONS: [&str; 8] = ["png", "jpg", "jpeg", "gif", "webp", "bmp", "tif", "tiff"];

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern for label photos
    #[arg(required = true)]
    input: String,

    /// Provider to use (claude, openai, gemini)
    #[arg(short, long)]
    provider: Option<String>,

    /// Output directory for per-file results
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also write a summary CSV with one sample row per file
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Fill fields the provider missed by parsing its raw reply locally
    #[arg(long)]
    reparse: bool,
}

/// Result of scanning one file.
struct ScanResult {
    path: PathBuf,
    fields: Option<ExtractedFields>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let credentials = Credentials::from_env();

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| has_image_extension(p))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    // Fail on a missing credential before touching any file.
    let provider = ProviderSelector::new(&credentials, &config).select(args.provider.as_deref())?;

    println!(
        "{} Found {} files to scan with {}",
        style("ℹ").blue(),
        files.len(),
        provider.name()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let result = scan_file(provider.as_ref(), &path, args.reparse).await;
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(fields) => {
                if let Some(output_dir) = &args.output_dir {
                    write_output(output_dir, &path, &fields, args.format)?;
                }
                results.push(ScanResult {
                    path,
                    fields: Some(fields),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to scan {}: {}", path.display(), error_msg);
                    results.push(ScanResult {
                        path,
                        fields: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to scan {}: {}", path.display(), error_msg);
                    overall_pb.abandon();
                    anyhow::bail!("Scanning failed: {}", error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results, Local::now().naive_local())?;
        println!("{} Summary written to {}", style("✓").green(), summary_path.display());
    }

    let successful = results.iter().filter(|r| r.fields.is_some()).count();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    println!();
    println!(
        "{} Scanned {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn has_image_extension(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

async fn scan_file(provider: &dyn VisionProvider, path: &Path, reparse: bool) -> anyhow::Result<ExtractedFields> {
    let image = read_image(path)?;
    super::scan::recognize(provider, &image, reparse).await
}

fn write_output(output_dir: &Path, path: &Path, fields: &ExtractedFields, format: OutputFormat) -> anyhow::Result<()> {
    let output_name = path.file_stem().and_then(|s| s.to_str()).unwrap_or("label");
    let output_path = output_dir.join(format!("{}.{}", output_name, format.extension()));

    fs::write(&output_path, format_fields(fields, format)?)?;
    debug!("Wrote output to {}", output_path.display());
    Ok(())
}

/// Write one line per file: the sample row when complete, the reason otherwise.
fn write_summary(path: &Path, results: &[ScanResult], recorded_at: NaiveDateTime) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "timestamp",
        "well",
        "company",
        "depth_from",
        "depth_to",
        "box_code",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result.path.file_name().and_then(|s| s.to_str()).unwrap_or("");
        let time_ms = result.processing_time_ms.to_string();

        let record = match &result.fields {
            Some(fields) => SampleRecord::try_from(fields.clone()).map_err(|e| e.to_string()),
            None => Err(result.error.clone().unwrap_or_default()),
        };

        match record {
            Ok(record) => {
                let [timestamp, well, company, depth_from, depth_to, box_code] = record.to_row(recorded_at);
                wtr.write_record([
                    filename, "success", &timestamp, &well, &company, &depth_from, &depth_to, &box_code, &time_ms, "",
                ])?;
            }
            Err(reason) => {
                let status = if result.fields.is_some() { "incomplete" } else { "error" };
                wtr.write_record([filename, status, "", "", "", "", "", "", &time_ms, &reason])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
