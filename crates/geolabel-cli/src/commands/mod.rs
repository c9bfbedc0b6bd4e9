//! Subcommand implementations and the helpers they share.

pub mod batch;
pub mod compare;
pub mod config;
pub mod parse;
pub mod providers;
pub mod scan;

use std::fs;
use std::path::Path;

use chrono::Local;
use tracing::debug;

use geolabel_core::models::sample::ROW_HEADERS;
use geolabel_core::{encode_data_url, ExtractedFields, LabelConfig, SampleRecord};

/// Output format for extracted fields.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Sample sheet row (requires well and both depths)
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// Load configuration from `--config`, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<LabelConfig> {
    if let Some(path) = config_path {
        return Ok(LabelConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(LabelConfig::from_file(&default_path)?)
    } else {
        Ok(LabelConfig::default())
    }
}

/// Read an image file and encode it as a data URL.
pub fn read_image(path: &Path) -> anyhow::Result<String> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let bytes = fs::read(path)?;
    let data_url = encode_data_url(&bytes)
        .map_err(|e| anyhow::anyhow!("{} is not a supported image: {}", path.display(), e))?;
    debug!("Encoded {} ({} bytes)", path.display(), bytes.len());

    Ok(data_url)
}

pub fn format_fields(fields: &ExtractedFields, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(fields)?),
        OutputFormat::Csv => format_csv(fields),
        OutputFormat::Text => Ok(format_text(fields)),
    }
}

fn format_csv(fields: &ExtractedFields) -> anyhow::Result<String> {
    let record = SampleRecord::try_from(fields.clone())
        .map_err(|e| anyhow::anyhow!("Cannot build sample row: {}", e))?;

    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(ROW_HEADERS)?;
    wtr.write_record(record.to_row(Local::now().naive_local()))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

pub fn format_text(fields: &ExtractedFields) -> String {
    fn or_dash(value: &str) -> &str {
        if value.is_empty() { "-" } else { value }
    }

    let depth = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string());

    let mut output = String::new();
    output.push_str(&format!("Well:       {}\n", or_dash(&fields.well)));
    output.push_str(&format!("Company:    {}\n", or_dash(&fields.company)));
    output.push_str(&format!(
        "Depth:      {} - {}\n",
        depth(fields.depth_from),
        depth(fields.depth_to)
    ));
    output.push_str(&format!("Box Code:   {}\n", or_dash(&fields.box_code)));
    output
}

/// Print advisory validation issues to stderr.
pub fn print_issues(fields: &ExtractedFields) {
    let issues = fields.validate();
    if !issues.is_empty() {
        eprintln!("{}", console::style("Validation issues:").yellow());
        for issue in &issues {
            eprintln!("  - {}", issue);
        }
    }
}
