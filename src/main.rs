//! Lexcrawl main entry point
//!
//! This is the command-line interface for the Lexcrawl word-frequency crawler.

use anyhow::Context;
use clap::Parser;
use lexcrawl::config::{load_config_with_hash, validate, Config};
use lexcrawl::crawler::build_scheduler;
use lexcrawl::url::Address;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Lexcrawl: a depth- and time-bounded word-frequency crawler
///
/// Lexcrawl crawls outward from a seed page, following links up to a maximum
/// depth for at most a fixed amount of time, and writes a word-frequency table
/// for every page it reads.
#[derive(Parser, Debug)]
#[command(name = "lexcrawl")]
#[command(version)]
#[command(about = "A depth- and time-bounded word-frequency crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Start from this address instead of the configured seed
    #[arg(long, value_name = "URL")]
    seed: Option<String>,

    /// Override the maximum link depth
    #[arg(long, value_name = "DEPTH")]
    max_depth: Option<u32>,

    /// Override the run time budget (milliseconds)
    #[arg(long, value_name = "MS")]
    max_run_time_ms: Option<u64>,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    apply_overrides(&mut config, &cli)?;

    if cli.dry_run {
        handle_dry_run(&config);
    } else {
        handle_crawl(&config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("lexcrawl=info,warn"),
            1 => EnvFilter::new("lexcrawl=debug,info"),
            2 => EnvFilter::new("lexcrawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Applies command-line overrides and re-validates the result
fn apply_overrides(config: &mut Config, cli: &Cli) -> anyhow::Result<()> {
    if let Some(seed) = &cli.seed {
        config.crawler.seed = seed.clone();
    }
    if let Some(max_depth) = cli.max_depth {
        config.crawler.max_depth = max_depth;
    }
    if let Some(max_run_time_ms) = cli.max_run_time_ms {
        config.crawler.max_run_time_ms = max_run_time_ms;
    }

    validate(config).context("Invalid command-line override")?;
    Ok(())
}

/// Handles the --dry-run mode: shows the resolved configuration
fn handle_dry_run(config: &Config) {
    println!("=== Lexcrawl Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Seed: {}", config.crawler.seed);
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Max run time: {}ms", config.crawler.max_run_time_ms);
    println!("  Workers: {}", config.crawler.max_workers);

    println!("\nFetcher:");
    println!("  User agent: {}", config.fetcher.user_agent);
    println!("  Timeout: {}ms", config.fetcher.timeout_ms);
    println!("  Connect timeout: {}ms", config.fetcher.connect_timeout_ms);

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);
    println!(
        "  Stopwords: {}",
        config
            .output
            .stopwords_path
            .as_deref()
            .unwrap_or("(built-in English list)")
    );

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    let seed = Address::parse(&config.crawler.seed).context("Invalid seed address")?;
    let scheduler = build_scheduler(config).context("Failed to set up the crawler")?;

    scheduler.start(seed);

    tokio::select! {
        _ = scheduler.wait() => {}
        result = tokio::signal::ctrl_c() => {
            result.context("Failed to listen for Ctrl-C")?;
            tracing::info!("Interrupted, stopping crawl");
            scheduler.stop();
        }
    }

    match scheduler.summary() {
        Some(summary) => {
            match summary.stop_reason {
                Some(reason) if reason.is_natural() => {
                    tracing::info!("Crawl finished: {}", reason)
                }
                Some(reason) => tracing::warn!("Crawl ended early: {}", reason),
                None => {}
            }
            println!("{}", summary);
        }
        None => tracing::warn!("No crawl run was recorded"),
    }

    Ok(())
}
