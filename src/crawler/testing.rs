//! In-memory collaborators for crawler tests

use crate::crawler::{Page, PageFetcher, TextSink};
use crate::url::Address;
use crate::FetchError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

pub fn page_with_links(links: &[&str]) -> Page {
    Page {
        title: None,
        body_text: String::new(),
        links: links.iter().map(|l| l.to_string()).collect(),
    }
}

struct StubPage {
    page: Page,
    delay: Option<Duration>,
}

/// Serves a fixed link graph; unknown addresses fail with `NotFound`
#[derive(Default)]
pub struct GraphFetcher {
    pages: HashMap<String, StubPage>,
    fetched: Mutex<Vec<String>>,
}

impl GraphFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, url: &str, links: &[&str]) -> Self {
        self.insert(url, links, None)
    }

    /// A page whose fetch takes `delay` before answering
    pub fn slow_page(self, url: &str, links: &[&str], delay: Duration) -> Self {
        self.insert(url, links, Some(delay))
    }

    fn insert(mut self, url: &str, links: &[&str], delay: Option<Duration>) -> Self {
        let key = Address::parse(url).expect("test url").to_string();
        let mut page = page_with_links(links);
        page.title = Some(key.clone());
        page.body_text = format!("body of {}", key);
        self.pages.insert(key, StubPage { page, delay });
        self
    }

    /// Every address fetched so far, in call order
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }

    pub fn fetch_count(&self, url: &str) -> usize {
        self.fetched().iter().filter(|f| f.as_str() == url).count()
    }
}

#[async_trait]
impl PageFetcher for GraphFetcher {
    async fn fetch(&self, address: &Address) -> Result<Page, FetchError> {
        self.fetched.lock().unwrap().push(address.to_string());

        let Some(stub) = self.pages.get(address.as_str()) else {
            return Err(FetchError::NotFound {
                url: address.to_string(),
            });
        };
        if let Some(delay) = stub.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(stub.page.clone())
    }
}

/// Remembers every address it was asked to process
#[derive(Default)]
pub struct RecordingSink {
    processed: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn processed(&self) -> Vec<String> {
        self.processed.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextSink for RecordingSink {
    async fn process(&self, _page: &Page, source: &Address) {
        self.processed.lock().unwrap().push(source.to_string());
    }
}
