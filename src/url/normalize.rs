use crate::{UrlError, UrlResult};
use url::Url;

/// Normalizes a URL for deduplication
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed or relative
/// 2. Accept only `http` and `https` schemes
/// 3. Require a host
/// 4. Remove the fragment (everything after #)
///
/// Scheme, authority, path and query are kept as parsed. Parsing already
/// lowercases the scheme and host, drops default ports and turns an empty
/// path into `/`, so `https://Example.com:443` and `https://example.com/`
/// normalize to the same string.
///
/// # Arguments
///
/// * `url_str` - The URL string to normalize
///
/// # Returns
///
/// * `Ok(Url)` - Normalized URL
/// * `Err(UrlError)` - Failed to parse or normalize the URL
///
/// # Examples
///
/// ```
/// use lexcrawl::url::normalize_url;
///
/// let url = normalize_url("https://example.com/page?q=1#section").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/page?q=1");
/// ```
pub fn normalize_url(url_str: &str) -> UrlResult<Url> {
    // Step 1: Parse the URL
    let mut url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    // Step 2: Validate scheme
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    // Step 3: Require a host
    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost(url_str.to_string()));
    }

    // Step 4: Remove fragment
    url.set_fragment(None);

    Ok(url)
}

/// Resolves a possibly-relative link against the page it was found on
///
/// Returns `None` for links that cannot be resolved into a URL at all. The
/// result still has to go through [`normalize_url`].
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    base_url.join(href).ok()
}
