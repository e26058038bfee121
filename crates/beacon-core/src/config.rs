//! Configuration types and fixed asset/endpoint constants.

use std::time::Duration;

/// Environment variable supplying the content API endpoint URL.
///
/// Its absence is logged as a warning at startup but does not halt the
/// server; queries simply fail at call time.
pub const CONTENT_API_ENV: &str = "WORDPRESS_GRAPHQL_URL";

/// Local asset substituted when an item has no featured image.
pub const FALLBACK_IMAGE: &str = "/img/hero/default.jpg";

/// HTTP client configuration for content API calls.
pub struct HttpConfig {
    pub timeout: Duration,
    pub user_agent: &'static str,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: "Beacon/0.1 (content-site)",
        }
    }
}
