//! Text analysis: turns page text into per-page word-frequency tables
//!
//! Pipeline, per page:
//! 1. Replace everything but ASCII letters and spaces, lowercase
//! 2. Split on whitespace
//! 3. Lemmatize each token
//! 4. Drop stopwords
//! 5. Count and sort
//! 6. Persist through a [`FrequencyStore`]

mod frequency;
mod lemma;
mod stopwords;
mod text;

pub use frequency::{count_frequencies, WordCount};
pub use lemma::{IdentityLemmatizer, Lemmatizer, SuffixLemmatizer};
pub use stopwords::Stopwords;
pub use text::{prepare_text, tokenize};

use crate::config::OutputConfig;
use crate::crawler::{Page, TextSink};
use crate::output::{CsvWriter, FrequencyStore, OutputResult};
use crate::url::Address;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Word-frequency analysis of fetched pages
///
/// Cloning is cheap; clones share the stopword list, lemmatizer and store.
#[derive(Clone)]
pub struct FrequencyAnalyzer {
    inner: Arc<Inner>,
}

struct Inner {
    stopwords: Stopwords,
    lemmatizer: Box<dyn Lemmatizer>,
    store: Box<dyn FrequencyStore>,
}

impl FrequencyAnalyzer {
    pub fn new(
        stopwords: Stopwords,
        lemmatizer: impl Lemmatizer + 'static,
        store: impl FrequencyStore + 'static,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                stopwords,
                lemmatizer: Box::new(lemmatizer),
                store: Box::new(store),
            }),
        }
    }

    /// Builds the analyzer described by the output configuration
    ///
    /// Uses the configured stopword file if any, the built-in English list
    /// otherwise, and writes CSV tables into the output directory (created if
    /// missing).
    pub fn from_config(config: &OutputConfig) -> crate::Result<Self> {
        let stopwords = match &config.stopwords_path {
            Some(path) => {
                let stopwords = Stopwords::load(Path::new(path))?;
                tracing::debug!("Loaded {} stopwords from {}", stopwords.len(), path);
                stopwords
            }
            None => Stopwords::english(),
        };
        let store = CsvWriter::new(&config.directory)?;

        Ok(Self::new(stopwords, SuffixLemmatizer, store))
    }

    /// Computes the sorted frequency table of `text`
    ///
    /// A token is dropped if either its surface form or its lemma is a
    /// stopword.
    pub fn analyze(&self, text: &str) -> Vec<WordCount> {
        self.inner.analyze(text)
    }

    /// Analyzes `text` and persists the table for `source`
    pub fn analyze_and_store(&self, source: &Address, text: &str) -> OutputResult<PathBuf> {
        self.inner.analyze_and_store(source, text)
    }
}

impl Inner {
    fn analyze(&self, text: &str) -> Vec<WordCount> {
        let prepared = prepare_text(text);
        let lemmas = tokenize(&prepared).filter_map(|token| {
            if self.stopwords.contains(token) {
                return None;
            }
            let lemma = self.lemmatizer.lemmatize(token);
            if lemma.is_empty() || self.stopwords.contains(&lemma) {
                return None;
            }
            Some(lemma)
        });
        count_frequencies(lemmas)
    }

    fn analyze_and_store(&self, source: &Address, text: &str) -> OutputResult<PathBuf> {
        let table = self.analyze(text);
        self.store.store(source, &table)
    }
}

#[async_trait]
impl TextSink for FrequencyAnalyzer {
    /// Runs the analysis on the blocking pool; failures are logged, never
    /// propagated to the crawl
    async fn process(&self, page: &Page, source: &Address) {
        let inner = Arc::clone(&self.inner);
        let text = page.body_text.clone();
        let address = source.clone();

        let result =
            tokio::task::spawn_blocking(move || inner.analyze_and_store(&address, &text)).await;

        match result {
            Ok(Ok(path)) => tracing::debug!("Wrote {} for {}", path.display(), source),
            Ok(Err(e)) => tracing::warn!("Could not store word frequencies for {}: {}", source, e),
            Err(e) => tracing::warn!("Analysis of {} did not finish: {}", source, e),
        }
    }
}
