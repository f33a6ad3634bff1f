use serde::Deserialize;
use std::time::Duration;

/// Default size of the worker pool
pub const DEFAULT_MAX_WORKERS: usize = 150;

/// Main configuration structure for Lexcrawl
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Address the crawl starts from
    pub seed: String,

    /// Maximum number of link hops from the seed
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Wall-clock budget for a whole run (milliseconds)
    #[serde(rename = "max-run-time-ms")]
    pub max_run_time_ms: u64,

    /// Number of pages processed concurrently
    #[serde(rename = "max-workers", default = "default_max_workers")]
    pub max_workers: usize,
}

impl CrawlerConfig {
    /// Returns the run time budget as a duration
    pub fn max_run_time(&self) -> Duration {
        Duration::from_millis(self.max_run_time_ms)
    }
}

/// HTTP fetcher configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Total request timeout (milliseconds)
    #[serde(rename = "timeout-ms", default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Connection timeout (milliseconds)
    #[serde(rename = "connect-timeout-ms", default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory the per-page frequency tables are written to
    pub directory: String,

    /// Optional stopword list, one word per line
    #[serde(rename = "stopwords-path", default)]
    pub stopwords_path: Option<String>,
}

fn default_max_workers() -> usize {
    DEFAULT_MAX_WORKERS
}

fn default_user_agent() -> String {
    format!("lexcrawl/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_connect_timeout_ms() -> u64 {
    10_000
}
