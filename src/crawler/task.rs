//! One unit of crawl work: fetch, process and expand a single address

use crate::crawler::{Page, PageFetcher, TextSink};
use crate::url::Address;
use std::collections::HashSet;

/// Submission capability handed to executing tasks
///
/// This is the only way a task can reach the scheduler. Implementations decide
/// admission; `submit` never reports back.
pub trait Submit: Send + Sync {
    fn submit(&self, task: Task);
}

/// What a single task execution did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Execution {
    /// The depth budget was already negative; nothing was fetched
    OutOfDepth,

    /// The page could not be acquired
    FetchFailed,

    /// The page was processed; `children` tasks were submitted
    Processed { children: usize },
}

/// Fetch + process one address at a given remaining depth
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    remaining_depth: i64,
    address: Address,
}

impl Task {
    pub fn new(remaining_depth: i64, address: Address) -> Self {
        Self {
            remaining_depth,
            address,
        }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn remaining_depth(&self) -> i64 {
        self.remaining_depth
    }

    /// Runs the task
    ///
    /// 1. Negative depth: return immediately
    /// 2. Fetch the page; on failure log and return without children
    /// 3. Hand the page to the text sink
    /// 4. Depth zero: stop here
    /// 5. Submit one child per distinct normalized outgoing link, one hop
    ///    shallower
    pub async fn execute<S>(
        &self,
        fetcher: &dyn PageFetcher,
        sink: &dyn TextSink,
        submitter: &S,
    ) -> Execution
    where
        S: Submit + ?Sized,
    {
        if self.remaining_depth < 0 {
            return Execution::OutOfDepth;
        }

        let page = match fetcher.fetch(&self.address).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Could not retrieve page {}: {}", self.address, e);
                return Execution::FetchFailed;
            }
        };

        tracing::info!(
            "{}, {}",
            page.title.as_deref().unwrap_or("<untitled>"),
            self.address
        );

        sink.process(&page, &self.address).await;

        if self.remaining_depth == 0 {
            return Execution::Processed { children: 0 };
        }

        let children = child_addresses(&page);
        let count = children.len();
        for address in children {
            submitter.submit(Task::new(self.remaining_depth - 1, address));
        }

        Execution::Processed { children: count }
    }
}

/// Normalizes the page's links, skipping malformed ones and duplicates
///
/// Order of first appearance is preserved.
pub fn child_addresses(page: &Page) -> Vec<Address> {
    let mut seen = HashSet::new();
    let mut addresses = Vec::new();

    for link in &page.links {
        let address = match Address::parse(link) {
            Ok(address) => address,
            Err(e) => {
                tracing::trace!("Skipping link {}: {}", link, e);
                continue;
            }
        };
        if seen.insert(address.clone()) {
            addresses.push(address);
        }
    }

    addresses
}
