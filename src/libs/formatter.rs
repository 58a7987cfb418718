//! Display formatting for durations, dates and table cells.
//!
//! Durations are shown as `HH:MM` (zero-padded, no seconds, negatives as
//! `00:00`). Dates and times use the format strings from the `display`
//! configuration section; a format string chrono cannot render falls back
//! to ISO form instead of failing the command.
//!
//! ```rust
//! use smart_nippo::libs::formatter::format_minutes;
//!
//! assert_eq!(format_minutes(510), "08:30");
//! assert_eq!(format_minutes(-5), "00:00");
//! ```

use crate::libs::field::DATE_FORMAT;
use chrono::NaiveDate;
use std::fmt::Write;

pub fn format_minutes(minutes: i64) -> String {
    let minutes = minutes.max(0);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Renders `date` with a user supplied chrono format.
pub fn format_date(date: NaiveDate, format: &str) -> String {
    let mut out = String::new();
    match write!(out, "{}", date.format(format)) {
        Ok(()) if !format.trim().is_empty() => out,
        _ => date.format(DATE_FORMAT).to_string(),
    }
}

/// First line of `value`, cut to `width` characters with a trailing `…`.
pub fn preview(value: &str, width: usize) -> String {
    let line = value.lines().next().unwrap_or("");
    let more_lines = value.lines().nth(1).is_some();
    if line.chars().count() <= width && !more_lines {
        return line.to_string();
    }
    let cut: String = line.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", cut)
}
