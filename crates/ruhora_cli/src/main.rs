//! Ruhora CLI - headless runs of the RUHORA page
//!
//! - `ruhora simulate <scenario.json>` runs a scripted session and writes a JSON report
//! - `ruhora check-assets <public_dir>` verifies every referenced image exists
//! - `ruhora links` prints the outbound links

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ruhora_cli::{Runner, Scenario, SiteConfig};
use ruhora_site::{assets, links, products};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Headless tools for the RUHORA landing page
#[derive(Parser, Debug)]
#[command(name = "ruhora")]
#[command(about = "Headless tools for the RUHORA landing page")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a scenario script against the page
    Simulate {
        /// Scenario file (JSON)
        scenario: PathBuf,

        /// Directory containing ruhora.toml, or the file itself
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Force reduced motion regardless of config and host
        #[arg(long)]
        reduced_motion: bool,

        /// Write the JSON report here instead of stdout
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Check that every referenced image exists
    CheckAssets {
        /// Directory the site is served from
        public_dir: PathBuf,
    },

    /// Print the social profiles and per-product order links
    Links,
}

fn init_tracing(filter: &str, verbose: bool) {
    let fallback = if verbose { "debug" } else { filter };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            scenario,
            config,
            reduced_motion,
            report,
        } => {
            let config = SiteConfig::load_or_default(config.as_deref())?;
            init_tracing(&config.log.filter, cli.verbose);
            cmd_simulate(&config, &scenario, reduced_motion, report.as_deref())
        }
        Commands::CheckAssets { public_dir } => {
            init_tracing("info", cli.verbose);
            cmd_check_assets(&public_dir)
        }
        Commands::Links => {
            init_tracing("info", cli.verbose);
            cmd_links()
        }
    }
}

fn cmd_simulate(
    config: &SiteConfig,
    scenario_path: &Path,
    reduced_motion: bool,
    report_path: Option<&Path>,
) -> Result<()> {
    let scenario = Scenario::load(scenario_path)?;
    info!(
        scenario = %scenario_path.display(),
        steps = scenario.steps.len(),
        width = config.viewport.width,
        height = config.viewport.height,
        "Running scenario"
    );

    let runner = Runner::new(config, reduced_motion).context("Failed to mount the page")?;
    let report = runner.run(&scenario);
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;

    match report_path {
        Some(path) => {
            fs::write(path, &json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(report = %path.display(), "Report written");
        }
        None => println!("{json}"),
    }

    if !report.passed {
        anyhow::bail!(
            "Scenario failed at step {}: {}",
            report.failed_step.unwrap_or_default(),
            report.message.as_deref().unwrap_or("unknown failure")
        );
    }
    info!(frames = report.frames, elapsed_ms = report.elapsed_ms, "Scenario passed");
    Ok(())
}

fn cmd_check_assets(public_dir: &Path) -> Result<()> {
    if !public_dir.is_dir() {
        anyhow::bail!("{} is not a directory", public_dir.display());
    }

    let missing = assets::missing_assets(public_dir);
    for path in &missing {
        warn!(path = %path.display(), "Missing asset");
    }
    if !missing.is_empty() {
        anyhow::bail!("{} referenced asset(s) missing", missing.len());
    }

    info!(
        count = assets::referenced_assets().len(),
        dir = %public_dir.display(),
        "All assets present"
    );
    Ok(())
}

fn cmd_links() -> Result<()> {
    for link in links::social_links() {
        println!("{:<10} {}", link.kind, link.url()?);
    }
    for product in products() {
        let url = links::order_link(product.order_message)
            .with_context(|| format!("Failed to build order link for {}", product.id))?;
        println!("{:<10} {}", product.id, url);
    }
    Ok(())
}
