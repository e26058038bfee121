use std::sync::Arc;

use beacon_client::ContentClient;
use beacon_core::AppError;

use crate::views::Views;

/// Shared per-process state: the content client (with its response cache)
/// and the compiled page templates.
pub struct AppState {
    pub client: ContentClient,
    pub views: Views,
}

impl AppState {
    pub fn new(endpoint: Option<&str>) -> Result<Self, AppError> {
        Ok(Self {
            client: ContentClient::new(endpoint)?,
            views: Views::new()?,
        })
    }
}

pub type SharedState = Arc<AppState>;
