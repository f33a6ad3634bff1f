//! Why a crawl run ended

use std::fmt;

/// The event that flipped a run from active to stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// The last in-flight task finished
    Completed,

    /// The run's time budget elapsed
    TimeBudget,

    /// `stop()` was called from outside the crawl
    Requested,
}

impl StopReason {
    /// Returns true if the run ended without pre-emption
    pub fn is_natural(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Short lowercase label used in logs and summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::TimeBudget => "time_budget",
            Self::Requested => "requested",
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
