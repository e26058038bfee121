use thiserror::Error;

/// Application-wide error types.
///
/// This enum represents all errors that can occur while talking to the
/// content API or preparing data for rendering. It uses the `thiserror`
/// crate for ergonomic error handling and automatic conversion from
/// underlying library errors.
///
/// Note that GraphQL-level errors (an `errors` array in an otherwise
/// well-formed response) are *not* represented here: they travel alongside
/// the data payload and end up in a [`Diagnostic`](crate::Diagnostic).
/// `AppError` covers transport and configuration failures only.
#[derive(Error, Debug)]
pub enum AppError {
    /// The content API endpoint environment variable is not set.
    ///
    /// Startup tolerates a missing endpoint (it is only logged as a
    /// warning); queries made afterwards fail with this error.
    #[error("Content API endpoint is not configured")]
    EndpointNotConfigured,

    /// The configured content API endpoint is not a valid URL.
    #[error("Invalid content API URL: {0}")]
    InvalidUrl(String),

    /// HTTP client request failed.
    ///
    /// Covers non-2xx responses and response bodies that cannot be
    /// decoded as a GraphQL envelope.
    #[error("API client error: {0}")]
    ClientError(String),

    /// Network or connection error.
    ///
    /// The remote server was unreachable, DNS failed, or the connection
    /// was refused or reset.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Request timeout.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// JSON serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Rendering a page template failed.
    #[error("Template error: {0}")]
    TemplateError(String),

    /// Generic application error for cases not covered by specific variants.
    #[error("Error: {0}")]
    Generic(String),
}

impl AppError {
    /// Returns a user-friendly error message suitable for log output and
    /// the on-page debug panel.
    pub fn user_message(&self) -> String {
        match self {
            AppError::EndpointNotConfigured => {
                "Content API endpoint is not configured.\n   Set the WORDPRESS_GRAPHQL_URL environment variable.".to_string()
            }
            AppError::InvalidUrl(url) => {
                format!(
                    "Invalid content API URL: {}\n   Example: https://cms.example.org/graphql",
                    url
                )
            }
            AppError::ClientError(msg) => {
                format!("API error: {}", msg)
            }
            AppError::NetworkError(msg) => {
                format!("Cannot reach the content API: {}", msg)
            }
            AppError::Timeout(secs) => {
                format!("Request timed out after {} seconds. The content backend may be slow or unreachable.", secs)
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::Timeout(30);
        assert_eq!(err.to_string(), "Request timed out after 30 seconds");
    }

    #[test]
    fn test_generic_error() {
        let err = AppError::Generic("Something went wrong".to_string());
        assert_eq!(err.to_string(), "Error: Something went wrong");
    }

    #[test]
    fn test_user_message_missing_endpoint() {
        let err = AppError::EndpointNotConfigured;
        assert!(err.user_message().contains("WORDPRESS_GRAPHQL_URL"));
    }

    #[test]
    fn test_user_message_invalid_url() {
        let err = AppError::InvalidUrl("not a url".to_string());
        assert!(err.user_message().contains("not a url"));
    }

    #[test]
    fn test_error_from_serde() {
        let json = "{ invalid json }";
        let result: Result<serde_json::Value, _> = serde_json::from_str(json);
        let serde_err = result.unwrap_err();
        let app_err: AppError = serde_err.into();
        assert!(matches!(app_err, AppError::SerializationError(_)));
    }
}
