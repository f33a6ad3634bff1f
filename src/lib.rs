//! Lexcrawl: a depth- and time-bounded word-frequency crawler
//!
//! This crate crawls a web graph breadth-first from a seed address on a bounded
//! pool of workers, deduplicating addresses and stopping when every branch has
//! exhausted its depth budget, the run's time budget has elapsed, or no work is
//! left in flight. Each fetched page is handed to a text-analysis sink that
//! writes a word-frequency table per page.

pub mod analysis;
pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Lexcrawl operations
#[derive(Debug, Error)]
pub enum LexcrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Reasons a page could not be acquired
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Expected HTML from {url}, got {content_type}")]
    ContentMismatch { url: String, content_type: String },

    #[error("Page not found: {url}")]
    NotFound { url: String },
}

/// Result type alias for Lexcrawl operations
pub type Result<T> = std::result::Result<T, LexcrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use analysis::{FrequencyAnalyzer, Lemmatizer, SuffixLemmatizer};
pub use config::Config;
pub use crawler::{HttpFetcher, Page, PageFetcher, Scheduler, Submit, Task, TextSink};
pub use state::{RunSummary, StopReason};
pub use url::Address;
