//! CLI application for geological sample label capture.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, compare, config, parse, providers, scan};

/// Geological sample label capture - read well, company, depth and box code from label photos
#[derive(Parser)]
#[command(name = "geolabel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read one label photo with a vision provider
    Scan(scan::ScanArgs),

    /// Run every provider on one label photo and compare results
    Compare(compare::CompareArgs),

    /// Extract label fields from text with the local rule parser
    Parse(parse::ParseArgs),

    /// Read many label photos
    Batch(batch::BatchArgs),

    /// List providers and their credential status
    Providers(providers::ProvidersArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Scan(args) => scan::run(args, config_path).await,
        Commands::Compare(args) => compare::run(args, config_path).await,
        Commands::Parse(args) => parse::run(args),
        Commands::Batch(args) => batch::run(args, config_path).await,
        Commands::Providers(args) => providers::run(args, config_path),
        Commands::Config(args) => config::run(args).await,
    }
}
