//! URL handling module for Lexcrawl
//!
//! This module provides URL normalization, link resolution and the
//! [`Address`] newtype used as the crawl's deduplication key.

mod address;
mod normalize;

// Re-export main types and functions
pub use address::Address;
pub use normalize::{normalize_url, resolve_link};
