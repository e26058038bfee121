//! Reading-time estimation for editorial content.

use crate::text::strip_html;

/// Assumed average reading speed.
pub const WORDS_PER_MINUTE: usize = 200;

/// Estimates reading time for HTML content at the default reading speed.
///
/// Tags are stripped before counting words. The result is rounded up to a
/// whole minute and floored at "1 min read", including for empty content.
pub fn calculate_reading_time(content: &str) -> String {
    reading_time_at(content, WORDS_PER_MINUTE)
}

/// Estimates reading time at an explicit words-per-minute speed.
///
/// A speed of zero is treated as one word per minute.
pub fn reading_time_at(content: &str, words_per_minute: usize) -> String {
    if content.is_empty() {
        return "1 min read".to_string();
    }
    let text = strip_html(content);
    let words = text.split_whitespace().count();
    let minutes = words.div_ceil(words_per_minute.max(1)).max(1);
    format!("{} min read", minutes)
}
