//! Display helpers for list cards.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub const VENUE_LABEL_LIMIT: usize = 17;
pub const EVENT_SUMMARY_LIMIT: usize = 80;

const ELLIPSIS: &str = "...";

/// Returns `text` unchanged when it has at most `limit` characters, otherwise
/// its first `keep` characters followed by `...`.
pub fn truncate_with_ellipsis(text: &str, limit: usize, keep: usize) -> String {
    if text.chars().count() > limit {
        let mut out: String = text.chars().take(keep).collect();
        out.push_str(ELLIPSIS);
        out
    } else {
        text.to_string()
    }
}

/// Venue card label: names longer than 17 characters become 16 characters plus an ellipsis.
pub fn venue_label(name: &str) -> String {
    truncate_with_ellipsis(name, VENUE_LABEL_LIMIT, VENUE_LABEL_LIMIT - 1)
}

pub fn event_summary(description: &str) -> String {
    truncate_with_ellipsis(description, EVENT_SUMMARY_LIMIT, EVENT_SUMMARY_LIMIT - 1)
}

/// Parses the date formats the backend emits (ISO with or without offset,
/// or the space separated form used by its cache). An offset is kept as sent,
/// not converted to UTC.
pub fn parse_event_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

pub fn event_date_label(raw: &str) -> String {
    match parse_event_date(raw) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => raw.to_string(),
    }
}
