// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting and calendar-day math.
//!
//! Calendar days are evaluated in UTC, the canonical clock of the store;
//! the day window is 00:00:00.000 through 23:59:59.999 inclusive.

use chrono::{DateTime, Duration, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Bounds of the calendar day containing `ts`: (00:00:00.000, 23:59:59.999).
pub fn utc_day_bounds(ts: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = ts
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always valid")
        .and_utc();
    let end = start + Duration::days(1) - Duration::milliseconds(1);
    (start, end)
}
