//! Word lemmatization
//!
//! Tokens are reduced to a base form before counting so that `pages` and
//! `page` land in the same bucket.

/// Maps a lowercase token to its base form
pub trait Lemmatizer: Send + Sync {
    fn lemmatize(&self, token: &str) -> String;
}

/// Leaves every token unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityLemmatizer;

impl Lemmatizer for IdentityLemmatizer {
    fn lemmatize(&self, token: &str) -> String {
        token.to_string()
    }
}

/// Irregular forms checked before the suffix rules
const IRREGULAR: &[(&str, &str)] = &[
    ("is", "be"),
    ("are", "be"),
    ("was", "be"),
    ("were", "be"),
    ("been", "be"),
    ("being", "be"),
    ("am", "be"),
    ("has", "have"),
    ("had", "have"),
    ("having", "have"),
    ("does", "do"),
    ("did", "do"),
    ("doing", "do"),
    ("done", "do"),
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("people", "person"),
    ("mice", "mouse"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("geese", "goose"),
];

/// Light English lemmatizer built from irregular forms and plural rules
///
/// Rules, first match wins:
///
/// | Ending | Result | Example |
/// |--------|--------|---------|
/// | irregular form | table entry | `were` -> `be` |
/// | `ies` (longer than 4) | `y` | `libraries` -> `library` |
/// | `sses` | `ss` | `classes` -> `class` |
/// | `xes`, `ches`, `shes` | drop `es` | `boxes` -> `box` |
/// | `s` (longer than 3, not `ss`, `us`, `is`) | drop `s` | `pages` -> `page` |
#[derive(Debug, Clone, Copy, Default)]
pub struct SuffixLemmatizer;

impl Lemmatizer for SuffixLemmatizer {
    fn lemmatize(&self, token: &str) -> String {
        if let Some((_, base)) = IRREGULAR.iter().find(|(form, _)| *form == token) {
            return base.to_string();
        }

        if token.len() > 4 {
            if let Some(stem) = token.strip_suffix("ies") {
                return format!("{}y", stem);
            }
        }
        if let Some(stem) = token.strip_suffix("sses") {
            return format!("{}ss", stem);
        }
        for suffix in ["xes", "ches", "shes"] {
            if token.ends_with(suffix) {
                return token[..token.len() - 2].to_string();
            }
        }
        if token.len() > 3
            && token.ends_with('s')
            && !["ss", "us", "is"].iter().any(|end| token.ends_with(end))
        {
            return token[..token.len() - 1].to_string();
        }

        token.to_string()
    }
}
