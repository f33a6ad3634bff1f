//! Collaborator contracts consumed by crawl tasks
//!
//! The scheduler and its tasks only ever see these traits. The HTTP
//! implementation lives in `fetcher`, the word-frequency implementation in
//! [`crate::analysis`].

use crate::url::Address;
use crate::FetchError;
use async_trait::async_trait;
use std::sync::Arc;

/// A fetched and parsed page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// The page title (from <title> tag)
    pub title: Option<String>,

    /// Visible body text, whitespace-collapsed
    pub body_text: String,

    /// Outgoing link targets resolved to absolute URLs, not yet normalized
    pub links: Vec<String>,
}

/// Page acquisition: retrieve and parse the page behind an address
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, address: &Address) -> Result<Page, FetchError>;
}

/// Text analysis: consume a fetched page
///
/// The crawl never inspects the outcome. Implementations report their own
/// failures and must be safe to call from many workers at once.
#[async_trait]
pub trait TextSink: Send + Sync {
    async fn process(&self, page: &Page, source: &Address);
}

#[async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for Arc<T> {
    async fn fetch(&self, address: &Address) -> Result<Page, FetchError> {
        (**self).fetch(address).await
    }
}

#[async_trait]
impl<T: TextSink + ?Sized> TextSink for Arc<T> {
    async fn process(&self, page: &Page, source: &Address) {
        (**self).process(page, source).await
    }
}
