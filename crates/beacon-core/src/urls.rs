//! Resolution of relative asset URLs against the content API origin.

use url::Url;

/// Base URL for resolving relative asset paths: the API endpoint with its
/// trailing `/graphql` path segment removed.
pub fn api_base(endpoint: &Url) -> Url {
    let trimmed = endpoint.as_str().trim_end_matches('/');
    let base = trimmed.strip_suffix("/graphql").unwrap_or(trimmed);
    Url::parse(base).unwrap_or_else(|_| endpoint.clone())
}

/// Resolves a possibly-relative URL to an absolute one.
///
/// Already-absolute URLs pass through unchanged; everything else is
/// joined against [`api_base`]. A value that cannot be joined is returned
/// as-is rather than dropped.
pub fn make_absolute(url: &str, endpoint: &Url) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_string();
    }
    let base = api_base(endpoint);
    base.join(url)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| url.to_string())
}
