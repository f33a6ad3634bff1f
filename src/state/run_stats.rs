//! Per-run counters shared by every task of a crawl run

use crate::state::StopReason;
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Live statistics of one crawl run
///
/// Counters are plain relaxed atomics: they are observational and never take
/// part in admission or completion decisions.
#[derive(Debug)]
pub struct RunStats {
    started_at: DateTime<Utc>,
    admitted: AtomicU64,
    duplicates: AtomicU64,
    expired: AtomicU64,
    fetched: AtomicU64,
    fetch_failures: AtomicU64,
    children_submitted: AtomicU64,
    stopped: Mutex<Option<(StopReason, DateTime<Utc>)>>,
}

impl RunStats {
    /// Creates zeroed statistics stamped with the current wall-clock time
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            admitted: AtomicU64::new(0),
            duplicates: AtomicU64::new(0),
            expired: AtomicU64::new(0),
            fetched: AtomicU64::new(0),
            fetch_failures: AtomicU64::new(0),
            children_submitted: AtomicU64::new(0),
            stopped: Mutex::new(None),
        }
    }

    pub fn record_admitted(&self) {
        self.admitted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_duplicate(&self) {
        self.duplicates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_expired(&self) {
        self.expired.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fetched(&self) {
        self.fetched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fetch_failure(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_children(&self, count: u64) {
        self.children_submitted.fetch_add(count, Ordering::Relaxed);
    }

    /// Records how the run ended; only the first call sticks
    pub fn record_stop(&self, reason: StopReason) {
        let mut stopped = self.stopped.lock().unwrap_or_else(|e| e.into_inner());
        if stopped.is_none() {
            *stopped = Some((reason, Utc::now()));
        }
    }

    /// Takes a consistent-enough snapshot for reporting
    pub fn snapshot(&self, in_flight: usize, visited: usize) -> RunSummary {
        let stopped = *self.stopped.lock().unwrap_or_else(|e| e.into_inner());
        RunSummary {
            started_at: self.started_at,
            stopped_at: stopped.map(|(_, at)| at),
            stop_reason: stopped.map(|(reason, _)| reason),
            admitted: self.admitted.load(Ordering::Relaxed),
            duplicates: self.duplicates.load(Ordering::Relaxed),
            expired: self.expired.load(Ordering::Relaxed),
            fetched: self.fetched.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
            children_submitted: self.children_submitted.load(Ordering::Relaxed),
            in_flight,
            visited,
        }
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time view of a run's statistics
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub stopped_at: Option<DateTime<Utc>>,
    pub stop_reason: Option<StopReason>,

    /// Tasks handed to the worker pool
    pub admitted: u64,

    /// Submissions discarded because the address was already visited
    pub duplicates: u64,

    /// Submissions or executions skipped because the time budget elapsed
    pub expired: u64,

    /// Pages acquired successfully
    pub fetched: u64,

    /// Pages that could not be acquired
    pub fetch_failures: u64,

    /// Child tasks submitted by expanding pages
    pub children_submitted: u64,

    pub in_flight: usize,
    pub visited: usize,
}

impl RunSummary {
    /// Wall-clock duration of the run, if it has stopped
    pub fn duration(&self) -> Option<Duration> {
        self.stopped_at
            .and_then(|stopped| (stopped - self.started_at).to_std().ok())
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Crawl Summary ===")?;
        writeln!(f, "  Started: {}", self.started_at.to_rfc3339())?;
        match (self.stop_reason, self.duration()) {
            (Some(reason), Some(duration)) => {
                writeln!(f, "  Stopped: {} after {:.1}s", reason, duration.as_secs_f64())?
            }
            (Some(reason), None) => writeln!(f, "  Stopped: {}", reason)?,
            _ => writeln!(f, "  Still running")?,
        }
        writeln!(f, "  Pages admitted: {}", self.admitted)?;
        writeln!(f, "  Pages fetched: {}", self.fetched)?;
        writeln!(f, "  Fetch failures: {}", self.fetch_failures)?;
        writeln!(f, "  Duplicate submissions: {}", self.duplicates)?;
        writeln!(f, "  Skipped after deadline: {}", self.expired)?;
        writeln!(f, "  Child tasks submitted: {}", self.children_submitted)?;
        write!(f, "  Unique addresses: {}", self.visited)
    }
}
