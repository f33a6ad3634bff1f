use crate::url::normalize_url;
use crate::{UrlError, UrlResult};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// A normalized absolute page address
///
/// An `Address` can only be built through [`normalize_url`], so two addresses
/// that differ only in their fragment compare equal and hash the same. This is
/// the key of the scheduler's visited set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(Url);

impl Address {
    /// Parses and normalizes an absolute URL
    pub fn parse(url_str: &str) -> UrlResult<Self> {
        normalize_url(url_str).map(Self)
    }

    /// Returns the normalized URL as a string slice
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the underlying URL
    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl TryFrom<Url> for Address {
    type Error = UrlError;

    fn try_from(url: Url) -> Result<Self, Self::Error> {
        Self::parse(url.as_str())
    }
}

impl FromStr for Address {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
