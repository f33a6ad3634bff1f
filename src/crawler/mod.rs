//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching and HTML parsing
//! - Crawl tasks that fetch, process and expand a single address
//! - The scheduler that admits, deduplicates and bounds those tasks

mod fetcher;
mod page;
mod parser;
mod scheduler;
mod task;

#[cfg(test)]
pub(crate) mod testing;

pub use fetcher::{build_http_client, HttpFetcher};
pub use page::{Page, PageFetcher, TextSink};
pub use parser::parse_html;
pub use scheduler::{RunHandle, Scheduler, SchedulerSettings};
pub use task::{child_addresses, Execution, Submit, Task};

use crate::analysis::FrequencyAnalyzer;
use crate::config::Config;
use crate::state::RunSummary;
use crate::url::Address;
use std::sync::Arc;

/// Wires the HTTP fetcher and the word-frequency analyzer into a scheduler
///
/// # Arguments
///
/// * `config` - The validated crawler configuration
///
/// # Returns
///
/// * `Ok(Scheduler)` - An idle scheduler, ready to start
/// * `Err(LexcrawlError)` - The HTTP client, stopword list or output
///   directory could not be set up
pub fn build_scheduler(config: &Config) -> crate::Result<Scheduler> {
    let fetcher = HttpFetcher::new(&config.fetcher)?;
    let analyzer = FrequencyAnalyzer::from_config(&config.output)?;

    Ok(Scheduler::new(
        SchedulerSettings::from(&config.crawler),
        Arc::new(fetcher),
        Arc::new(analyzer),
    ))
}

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client and the analyzer
/// 2. Start a run from the configured seed
/// 3. Wait until the run completes or exhausts its time budget
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(RunSummary)` - Statistics of the finished run
/// * `Err(LexcrawlError)` - Crawl could not be set up
pub async fn crawl(config: &Config) -> crate::Result<RunSummary> {
    let seed = Address::parse(&config.crawler.seed)?;
    let scheduler = build_scheduler(config)?;

    scheduler.start(seed);
    scheduler.wait().await;

    Ok(scheduler
        .summary()
        .unwrap_or_else(|| crate::state::RunStats::new().snapshot(0, 0)))
}
