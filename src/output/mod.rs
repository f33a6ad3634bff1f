//! Output module for persisting per-page word-frequency tables
//!
//! This module handles:
//! - The store interface the analyzer writes through
//! - CSV tables named after the page address

mod csv_writer;
mod traits;

pub use csv_writer::{table_file_name, CsvWriter};
pub use traits::{FrequencyStore, OutputError, OutputResult};
