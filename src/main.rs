//! price-scout - One-shot product price statistics CLI

use anyhow::{Context, Result};
use clap::Parser;
use price_scout::commands::AnalyzeCommand;
use price_scout::config::{Config, OutputFormat};
use price_scout::format::Formatter;
use price_scout::PriceReport;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "price-scout",
    version,
    about = "One-shot product price statistics CLI",
    long_about = "Queries the PriceAPI job queue for a product, waits for the \
                  search to finish, and prints summary price statistics."
)]
struct Cli {
    /// Product name to search for
    product: String,

    /// Also save the full report to a timestamped JSON file
    #[arg(long)]
    json: bool,

    /// API token
    #[arg(long, env = "PRICE_SCOUT_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Marketplace country code
    #[arg(long)]
    country: Option<String>,

    /// Maximum seconds to wait for the job
    #[arg(long)]
    max_wait: Option<u64>,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table")]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    config.format = cli.format;

    if let Some(token) = cli.token {
        config.token = Some(token);
    }
    if let Some(country) = cli.country {
        config.country = country;
    }
    if let Some(max_wait) = cli.max_wait {
        config.max_wait_secs = max_wait;
    }

    let format = config.format;
    let cmd = AnalyzeCommand::new(config);
    let report = cmd.execute(&cli.product).await?;

    let formatter = Formatter::new(format);
    println!("\n{}", formatter.format_report(&report));

    if cli.json {
        let path = export_report(&report)?;
        println!("\nFull results saved to: {}", path.display());
    }

    Ok(())
}

/// Writes the full report to `price_analysis_<unix-ts>.json` in the working
/// directory and returns the path.
fn export_report(report: &PriceReport) -> Result<PathBuf> {
    let timestamp =
        SystemTime::now().duration_since(UNIX_EPOCH).context("System clock before epoch")?.as_secs();

    let path = PathBuf::from(format!("price_analysis_{}.json", timestamp));
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(&path, json)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;

    Ok(path)
}
