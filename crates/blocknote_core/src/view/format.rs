//! Display helpers shared by the editor and list views.

use crate::model::note::{Note, Timestamp};
use chrono::TimeDelta;
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Maximum characters kept in a list-row preview.
pub const PREVIEW_MAX_CHARS: usize = 100;

/// Derives the one-line body preview of a note.
///
/// Rules:
/// - Legacy `content` wins when non-blank, otherwise block text is joined.
/// - Whitespace runs (including newlines) collapse to one space.
/// - The first [`PREVIEW_MAX_CHARS`] characters are kept.
/// - `None` when nothing but whitespace remains.
pub fn derive_preview(note: &Note) -> Option<String> {
    let source = match note.legacy_content.as_deref() {
        Some(content) if !content.trim().is_empty() => content.to_string(),
        _ => note.plain_text(),
    };

    let normalized = WHITESPACE_RE.replace_all(&source, " ");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.chars().take(PREVIEW_MAX_CHARS).collect())
    }
}

/// Short last-modified label for list rows.
///
/// Under a minute reads "Just now", under an hour "N min ago", under a day
/// "N h ago"; anything older (or in the future) is an absolute date.
pub fn modified_label(updated_at: Timestamp, now: Timestamp) -> String {
    let age = now - updated_at;
    if age < TimeDelta::zero() {
        return absolute_date(updated_at);
    }
    if age < TimeDelta::minutes(1) {
        return "Just now".to_string();
    }
    if age < TimeDelta::hours(1) {
        return format!("{} min ago", age.num_minutes());
    }
    if age < TimeDelta::days(1) {
        return format!("{} h ago", age.num_hours());
    }
    absolute_date(updated_at)
}

/// Absolute date, e.g. `Mar 4, 2026`.
pub fn absolute_date(value: Timestamp) -> String {
    value.format("%b %-d, %Y").to_string()
}

/// Editor footer text, e.g. `Last edited Mar 4, 2026 at 09:15 UTC`.
pub fn last_edited_label(updated_at: Timestamp) -> String {
    format!(
        "Last edited {}",
        updated_at.format("%b %-d, %Y at %H:%M UTC")
    )
}
