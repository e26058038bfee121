//! Beacon Core - Domain types, error handling, and content helpers.

pub mod config;
pub mod dates;
pub mod error;
pub mod models;
pub mod readtime;
pub mod text;
pub mod urls;

pub use config::{HttpConfig, CONTENT_API_ENV, FALLBACK_IMAGE};
pub use error::AppError;
pub use models::{
    ContentBatch, ContentDetail, ContentKind, ContentRecord, DetailImage, Diagnostic,
};
pub use readtime::calculate_reading_time;
