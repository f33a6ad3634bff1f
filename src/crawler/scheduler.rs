//! Scheduler for admitting crawl tasks and detecting the end of a run
//!
//! This module handles:
//! - Deduplication of addresses within a run
//! - Bounding concurrency with a fixed-size worker pool (semaphore)
//! - Time-budget pre-emption, both at submission and at execution
//! - Completion detection through the in-flight task counter
//! - Idempotent start/stop with abrupt cancellation of outstanding work

use crate::config::{CrawlerConfig, DEFAULT_MAX_WORKERS};
use crate::crawler::task::{Execution, Submit, Task};
use crate::crawler::{PageFetcher, TextSink};
use crate::state::{RunStats, RunSummary, StopReason};
use crate::url::Address;
use futures::FutureExt;
use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tokio::sync::{watch, Semaphore};

/// Budgets and pool size fixed for the lifetime of a scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerSettings {
    /// Remaining depth given to the root task
    pub max_depth: u32,

    /// Wall-clock budget of a run, measured from its start
    pub max_run_time: Duration,

    /// Number of tasks allowed to execute at once
    pub max_workers: usize,
}

impl SchedulerSettings {
    pub fn new(max_depth: u32, max_run_time: Duration) -> Self {
        Self {
            max_depth,
            max_run_time,
            max_workers: DEFAULT_MAX_WORKERS,
        }
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers.max(1);
        self
    }
}

impl From<&CrawlerConfig> for SchedulerSettings {
    fn from(config: &CrawlerConfig) -> Self {
        Self::new(config.max_depth, config.max_run_time()).with_max_workers(config.max_workers)
    }
}

/// Admission control and completion detection for a self-expanding crawl
///
/// A scheduler is built once and may run several crawls, one at a time.
/// Cloning is cheap and every clone drives the same scheduler.
#[derive(Clone)]
pub struct Scheduler {
    shared: Arc<Shared>,
}

struct Shared {
    settings: SchedulerSettings,
    fetcher: Arc<dyn PageFetcher>,
    sink: Arc<dyn TextSink>,

    /// Set while a run is active
    running: AtomicBool,

    /// The active run, or the last one once it has stopped.
    /// Start and stop transitions happen under this lock.
    current: Mutex<Option<Arc<Run>>>,

    runs_started: AtomicU64,

    /// Mirrors `running` for `wait()`
    state_tx: watch::Sender<bool>,
}

/// State scoped to a single crawl run
struct Run {
    id: u64,
    started_at: Instant,
    max_run_time: Duration,
    visited: Mutex<HashSet<Address>>,
    in_flight: AtomicUsize,
    workers: Semaphore,
    shutdown: watch::Sender<bool>,
    stats: RunStats,
}

impl Run {
    fn new(id: u64, settings: &SchedulerSettings) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            id,
            started_at: Instant::now(),
            max_run_time: settings.max_run_time,
            visited: Mutex::new(HashSet::new()),
            in_flight: AtomicUsize::new(0),
            workers: Semaphore::new(settings.max_workers),
            shutdown,
            stats: RunStats::new(),
        }
    }

    fn expired(&self) -> bool {
        self.started_at.elapsed() > self.max_run_time
    }

    fn is_shut_down(&self) -> bool {
        self.workers.is_closed()
    }

    /// Inserts the address and counts the task in flight in one step
    ///
    /// Returns false if the address was already visited in this run.
    fn admit(&self, address: &Address) -> bool {
        let mut visited = lock(&self.visited);
        if !visited.insert(address.clone()) {
            return false;
        }
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        true
    }

    /// Releases the worker pool and cancels every queued or executing task
    fn shut_down(&self, reason: StopReason) {
        self.stats.record_stop(reason);
        self.workers.close();
        self.shutdown.send_replace(true);
    }

    fn summary(&self) -> RunSummary {
        let visited = lock(&self.visited).len();
        self.stats
            .snapshot(self.in_flight.load(Ordering::SeqCst), visited)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Scheduler {
    /// Creates an idle scheduler
    ///
    /// # Arguments
    ///
    /// * `settings` - Depth budget, time budget and worker pool size
    /// * `fetcher` - Page acquisition collaborator
    /// * `sink` - Text analysis collaborator every fetched page is handed to
    pub fn new(
        settings: SchedulerSettings,
        fetcher: Arc<dyn PageFetcher>,
        sink: Arc<dyn TextSink>,
    ) -> Self {
        let (state_tx, _) = watch::channel(false);
        Self {
            shared: Arc::new(Shared {
                settings,
                fetcher,
                sink,
                running: AtomicBool::new(false),
                current: Mutex::new(None),
                runs_started: AtomicU64::new(0),
                state_tx,
            }),
        }
    }

    /// Starts a crawl from `root` unless one is already running
    ///
    /// Resets the visited set and in-flight counter, records the start time,
    /// provisions the worker pool and submits the root task at the configured
    /// maximum depth. Returns immediately; returns false if a run was already
    /// active, in which case nothing changes.
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime, tasks are spawned onto it.
    pub fn start(&self, root: Address) -> bool {
        Shared::start(&self.shared, root)
    }

    /// Stops the active run
    ///
    /// Returns true if this call performed the teardown; stopping an idle
    /// scheduler is a no-op.
    pub fn stop(&self) -> bool {
        self.shared.stop(None, StopReason::Requested)
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }

    /// Resolves once no run is active
    pub async fn wait(&self) {
        let mut state = self.shared.state_tx.subscribe();
        // The sender lives as long as `self`, so this cannot fail
        let _ = state.wait_for(|running| !*running).await;
    }

    /// Number of runs begun by this scheduler
    pub fn runs_started(&self) -> u64 {
        self.shared.runs_started.load(Ordering::SeqCst)
    }

    /// Statistics of the active run, or of the last run once it has stopped
    pub fn summary(&self) -> Option<RunSummary> {
        lock(&self.shared.current).as_ref().map(|run| run.summary())
    }

    /// Addresses admitted during the active or last run, sorted
    pub fn visited(&self) -> Vec<Address> {
        let current = lock(&self.shared.current).clone();
        let mut visited: Vec<Address> = current
            .map(|run| lock(&run.visited).iter().cloned().collect())
            .unwrap_or_default();
        visited.sort();
        visited
    }

    /// Tasks admitted and not yet completed in the active or last run
    pub fn in_flight(&self) -> usize {
        lock(&self.shared.current)
            .as_ref()
            .map_or(0, |run| run.in_flight.load(Ordering::SeqCst))
    }
}

impl Shared {
    fn start(this: &Arc<Self>, root: Address) -> bool {
        let run = {
            let mut current = lock(&this.current);
            if this.running.swap(true, Ordering::SeqCst) {
                tracing::debug!("Crawl already running, ignoring start for {}", root);
                return false;
            }

            let id = this.runs_started.fetch_add(1, Ordering::SeqCst) + 1;
            let run = Arc::new(Run::new(id, &this.settings));
            *current = Some(Arc::clone(&run));
            this.state_tx.send_replace(true);
            run
        };

        tracing::info!(
            "Starting crawl run {} from {} (max depth {}, time budget {:?}, {} workers)",
            run.id,
            root,
            this.settings.max_depth,
            this.settings.max_run_time,
            this.settings.max_workers
        );

        let handle = RunHandle {
            shared: Arc::clone(this),
            run,
        };
        handle.submit(Task::new(i64::from(this.settings.max_depth), root));
        true
    }

    /// Flips `running` off and tears down the run
    ///
    /// With `run_id` set, only that run may be stopped; a late completion of
    /// an older run never touches a newer one.
    fn stop(&self, run_id: Option<u64>, reason: StopReason) -> bool {
        let current = lock(&self.current);
        let Some(run) = current.as_ref() else {
            return false;
        };
        if run_id.is_some_and(|id| id != run.id) {
            return false;
        }
        if !self.running.swap(false, Ordering::SeqCst) {
            return false;
        }

        run.shut_down(reason);
        self.state_tx.send_replace(false);

        let summary = run.summary();
        tracing::info!(
            "Crawl run {} stopped ({}): {} admitted, {} fetched, {} failed, {} abandoned in flight",
            run.id,
            reason,
            summary.admitted,
            summary.fetched,
            summary.fetch_failures,
            summary.in_flight
        );
        true
    }
}

/// A task's view of the run it belongs to
///
/// Implements [`Submit`] so tasks can add children to their own run without
/// access to any other scheduler state.
#[derive(Clone)]
pub struct RunHandle {
    shared: Arc<Shared>,
    run: Arc<Run>,
}

impl Submit for RunHandle {
    /// Admission, in order:
    /// 1. Time budget elapsed: stop the run, discard the task
    /// 2. Address already visited: discard
    /// 3. Otherwise count it in flight, mark visited and spawn it
    fn submit(&self, task: Task) {
        let run = &self.run;

        if run.is_shut_down() {
            tracing::trace!("Run {} is stopped, dropping {}", run.id, task.address());
            return;
        }

        if run.expired() {
            run.stats.record_expired();
            tracing::debug!("Time budget exhausted, discarding {}", task.address());
            self.shared.stop(Some(run.id), StopReason::TimeBudget);
            return;
        }

        if !run.admit(task.address()) {
            run.stats.record_duplicate();
            tracing::trace!("Already visited {}", task.address());
            return;
        }

        run.stats.record_admitted();
        tracing::debug!(
            "Admitted {} (remaining depth {})",
            task.address(),
            task.remaining_depth()
        );

        tokio::spawn(self.clone().work(task));
    }
}

impl RunHandle {
    /// Worker body: runs the task unless the run is shut down first
    async fn work(self, task: Task) {
        let mut shutdown = self.run.shutdown.subscribe();
        let cancelled = async move {
            let _ = shutdown.wait_for(|stopped| *stopped).await;
        };
        tokio::select! {
            _ = cancelled => {
                tracing::trace!("Abandoned {}", task.address());
            }
            _ = self.execute(&task) => {}
        }
    }

    async fn execute(&self, task: &Task) {
        let run = &self.run;

        // Closed when the run stops; queued tasks exit here
        let Ok(_permit) = run.workers.acquire().await else {
            return;
        };

        // Admission may have happened long before a worker became free
        if run.expired() {
            run.stats.record_expired();
            tracing::debug!(
                "Time budget exhausted before {} started",
                task.address()
            );
            self.shared.stop(Some(run.id), StopReason::TimeBudget);
            return;
        }

        let fetcher = self.shared.fetcher.as_ref();
        let sink = self.shared.sink.as_ref();
        match AssertUnwindSafe(task.execute(fetcher, sink, self))
            .catch_unwind()
            .await
        {
            Ok(Execution::Processed { children }) => {
                run.stats.record_fetched();
                run.stats.record_children(children as u64);
            }
            Ok(Execution::FetchFailed) => run.stats.record_fetch_failure(),
            Ok(Execution::OutOfDepth) => {}
            Err(_) => tracing::error!("Task for {} panicked", task.address()),
        }

        self.complete();
    }

    /// Counts the task out; the last one out stops the run
    fn complete(&self) {
        let previous = self.run.in_flight.fetch_sub(1, Ordering::SeqCst);
        if previous == 1 {
            self.shared.stop(Some(self.run.id), StopReason::Completed);
        }
    }
}
