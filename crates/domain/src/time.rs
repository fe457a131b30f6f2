//! Time and timestamp helpers.

use chrono::NaiveDateTime;

/// Wall-clock start time in the venue's local time zone, as published by the
/// events API (`start.local`).
pub type LocalTimestamp = NaiveDateTime;

/// Format a local timestamp for display (e.g. `Sat, 1 Jun 2024, 19:00`).
#[must_use]
pub fn display_local(ts: &LocalTimestamp) -> String {
    ts.format("%a, %-d %b %Y, %H:%M").to_string()
}
