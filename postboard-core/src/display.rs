//! Presentation-only transforms. Nothing here is ever written back.

use chrono::{DateTime, Utc};

/// Post titles in page headers are cut to this many characters
pub const DISPLAY_TITLE_LEN: usize = 55;

/// Truncate a title for display, respecting char boundaries.
pub fn truncate_title(title: &str) -> &str {
    match title.char_indices().nth(DISPLAY_TITLE_LEN) {
        Some((idx, _)) => &title[..idx],
        None => title,
    }
}

/// Human date used on rendered pages, e.g. "February 6, 2026".
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}
