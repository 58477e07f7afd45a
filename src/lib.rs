//! Eventdesk Library
//!
//! Core library for the Eventdesk desktop application.

pub mod api;
pub mod app;
pub mod nav;
pub mod storage;
pub mod ui;

/// Shorten a label for display, cutting at a char boundary, never panics.
pub fn truncate_label(s: &str, max_bytes: usize) -> String {
    if s.len() <= max_bytes {
        return s.to_string();
    }
    // Walk backwards from max_bytes to find a valid char boundary
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}
