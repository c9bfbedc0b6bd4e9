//! Providers command - show which vision providers can be used.

use clap::Args;
use console::style;

use geolabel_core::compare::format_usd;
use geolabel_core::{Credentials, ProviderKind, ProviderSelector};

use super::load_config;

/// Arguments for the providers command.
#[derive(Args)]
pub struct ProvidersArgs {
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: ProvidersArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let credentials = Credentials::from_env();
    let selected = ProviderSelector::new(&credentials, &config).resolve(None).ok();

    if args.json {
        let providers: Vec<_> = ProviderKind::ALL
            .iter()
            .map(|kind| {
                serde_json::json!({
                    "provider": kind,
                    "configured": credentials.has(*kind),
                    "credential": kind.credential_variable(),
                    "model": config.providers.settings(*kind).model,
                    "estimatedCost": config.costs.for_kind(*kind),
                    "default": selected == Some(*kind),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&providers)?);
        return Ok(());
    }

    println!("{}", style("Vision providers:").bold());
    println!();

    for kind in ProviderKind::ALL {
        let status = if credentials.has(kind) {
            style("configured").green()
        } else {
            style("not configured").yellow()
        };
        let default_marker = if selected == Some(kind) { " (default)" } else { "" };

        println!("  {}{}", style(kind).bold(), default_marker);
        println!("    Model:      {}", config.providers.settings(kind).model);
        println!("    Credential: {} [{}]", kind.credential_variable(), status);
        println!("    Cost:       {} per image", format_usd(config.costs.for_kind(kind)));
        println!();
    }

    if selected.is_none() {
        println!(
            "Set {} (or another provider's key) to enable scanning.",
            ProviderKind::FALLBACK.credential_variable()
        );
    }

    Ok(())
}
