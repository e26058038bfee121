use std::collections::HashMap;
use std::sync::Mutex;

use beacon_core::config::{HttpConfig, CONTENT_API_ENV};
use beacon_core::error::AppError;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::graphql::{GraphQlRequest, GraphQlResponse};

/// Freshness policy for one query execution.
///
/// List call sites choose per query: the homepage news strip always wants
/// fresh items (network-only) while publication lists tolerate a cached
/// payload for speed (cache-first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPolicy {
    /// Serve the cached payload when present; fetch and store otherwise.
    CacheFirst,
    /// Always fetch; the cache is neither read nor written. Used for
    /// surfaces that must stay current, slug lookups included: a cached
    /// miss would otherwise outlive the item's publication.
    NetworkOnly,
}

/// Result of one query execution.
///
/// GraphQL allows `data` and `errors` to coexist, so an ordinary query
/// failure is not an `Err`: it comes back here as error messages next to
/// a possibly-partial payload. Only transport and configuration failures
/// surface as `AppError`.
#[derive(Debug)]
pub struct QueryReply {
    pub data: Option<Value>,
    pub errors: Vec<String>,
}

impl QueryReply {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

type CacheKey = (String, String);

/// HTTP client for the content API.
///
/// Holds one configured `reqwest::Client`, the optional endpoint URL, and
/// a response cache keyed by query document + serialized variables. One
/// instance is shared across the whole server process; the cache mutex is
/// the only shared mutable state.
pub struct ContentClient {
    http: Client,
    endpoint: Option<Url>,
    cache: Mutex<HashMap<CacheKey, Value>>,
}

impl ContentClient {
    /// Creates a client for the given endpoint.
    ///
    /// A missing endpoint is tolerated: it is logged as a warning here and
    /// queries fail later with [`AppError::EndpointNotConfigured`]. An
    /// endpoint that is present but malformed is a hard error.
    pub fn new(endpoint: Option<&str>) -> Result<Self, AppError> {
        let endpoint = match endpoint {
            Some(raw) => {
                Some(Url::parse(raw).map_err(|_| AppError::InvalidUrl(raw.to_string()))?)
            }
            None => {
                warn!(
                    "{} is not set; content queries will fail at call time",
                    CONTENT_API_ENV
                );
                None
            }
        };

        let config = HttpConfig::default();
        let http = Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::ClientError(e.to_string()))?;

        Ok(Self {
            http,
            endpoint,
            cache: Mutex::new(HashMap::new()),
        })
    }

    /// The configured endpoint, if any. Normalizers use it to resolve
    /// relative asset URLs against the API origin.
    pub fn endpoint(&self) -> Option<&Url> {
        self.endpoint.as_ref()
    }

    /// Executes one parameterized read query.
    ///
    /// Returns `Ok` with a [`QueryReply`] for every well-formed response,
    /// including responses that carry GraphQL errors. Returns `Err` for
    /// transport failures: unreachable host, timeout, non-2xx status, or
    /// a body that is not a GraphQL envelope.
    pub async fn query(
        &self,
        query: &str,
        variables: Value,
        policy: FetchPolicy,
    ) -> Result<QueryReply, AppError> {
        let endpoint = self
            .endpoint
            .clone()
            .ok_or(AppError::EndpointNotConfigured)?;

        let key = cache_key(query, &variables);
        if policy == FetchPolicy::CacheFirst {
            if let Some(data) = self.cache_get(&key) {
                debug!("content query served from cache");
                return Ok(QueryReply {
                    data: Some(data),
                    errors: Vec::new(),
                });
            }
        }

        let response = self
            .http
            .post(endpoint)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::ClientError(format!(
                "HTTP {} from content API",
                status.as_u16()
            )));
        }

        let body: GraphQlResponse = response
            .json()
            .await
            .map_err(|e| AppError::ClientError(format!("Failed to parse response: {}", e)))?;

        let errors: Vec<String> = body
            .errors
            .unwrap_or_default()
            .into_iter()
            .map(|e| e.message)
            .collect();

        let data = match body.data {
            None | Some(Value::Null) => None,
            Some(value) => Some(value),
        };

        // Only clean cache-first responses are stored: network-only
        // queries are per-request (slug lookups vary without bound, so
        // storing them would grow the cache indefinitely).
        if policy == FetchPolicy::CacheFirst && errors.is_empty() {
            if let Some(data) = &data {
                self.cache_put(key, data.clone());
            }
        }

        Ok(QueryReply { data, errors })
    }

    fn cache_get(&self, key: &CacheKey) -> Option<Value> {
        let cache = self.cache.lock().unwrap_or_else(|p| p.into_inner());
        cache.get(key).cloned()
    }

    fn cache_put(&self, key: CacheKey, data: Value) {
        let mut cache = self.cache.lock().unwrap_or_else(|p| p.into_inner());
        cache.insert(key, data);
    }

    #[cfg(test)]
    pub(crate) fn prime_cache(&self, query: &str, variables: &Value, data: Value) {
        self.cache_put(cache_key(query, variables), data);
    }
}

fn cache_key(query: &str, variables: &Value) -> CacheKey {
    (query.to_string(), variables.to_string())
}

fn classify_transport_error(e: reqwest::Error) -> AppError {
    if e.is_timeout() {
        AppError::Timeout(HttpConfig::default().timeout.as_secs())
    } else if e.is_connect() {
        AppError::NetworkError(format!("Connection failed: {}", e))
    } else {
        AppError::ClientError(e.to_string())
    }
}
