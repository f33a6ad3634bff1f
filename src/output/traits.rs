//! Output handler traits and types
//!
//! This module defines the trait interface for frequency-table stores.

use crate::analysis::WordCount;
use crate::url::Address;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for frequency-table stores
///
/// A store receives one sorted table per processed page. Implementations must
/// be thread-safe; pages are stored from many workers at once.
pub trait FrequencyStore: Send + Sync {
    /// Persists the frequency table of one page
    ///
    /// # Arguments
    ///
    /// * `source` - The address the page was fetched from
    /// * `counts` - Word frequencies, already sorted
    ///
    /// # Returns
    ///
    /// * `Ok(PathBuf)` - Where the table was written
    /// * `Err(OutputError)` - The table could not be written
    fn store(&self, source: &Address, counts: &[WordCount]) -> OutputResult<PathBuf>;
}
