//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `RunStats`: live per-run counters updated by the scheduler and its tasks
//! - `RunSummary`: a snapshot of those counters for reporting
//! - `StopReason`: why a run ended (completion, time budget, external request)

mod run_stats;
mod stop_reason;

// Re-export main types
pub use run_stats::{RunStats, RunSummary};
pub use stop_reason::StopReason;
