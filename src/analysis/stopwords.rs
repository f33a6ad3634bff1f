//! Stopword lists

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

/// Built-in English list
const ENGLISH: &str = include_str!("../../resources/en-stopwords.txt");

/// A set of words excluded from frequency tables
#[derive(Debug, Clone, Default)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    /// The built-in English list
    pub fn english() -> Self {
        Self::parse(ENGLISH)
    }

    /// Loads a list from a file, one word per line
    pub fn load(path: &Path) -> io::Result<Self> {
        Ok(Self::parse(&fs::read_to_string(path)?))
    }

    /// Parses a list: one word per line, blank lines and `#` comments skipped
    ///
    /// Words are trimmed and lowercased.
    pub fn parse(content: &str) -> Self {
        let words = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_lowercase)
            .collect();
        Self { words }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
