//! Alloc-free Date and Time Rendering
//!
//! Convenience projections of a [`Timestamp`] into fixed-capacity
//! [`heapless::String`]s, for log lines and small displays. Thin consumers
//! of the calendar converter, not part of the core path.

use core::fmt::Write;

use heapless::String;

use crate::calendar::{DateTime, Timestamp};

/// Render the date portion as `YYYY-MM-DD`.
///
/// Capacity assumes four-digit years; the crate's practical horizon ends
/// long before year 10000.
pub fn render_date(ts: Timestamp) -> String<10> {
    let dt = DateTime::from_timestamp(ts);
    let mut out = String::new();
    let _ = write!(out, "{:04}-{:02}-{:02}", dt.year, dt.month, dt.day);
    out
}

/// Render the time-of-day portion as `HH:MM:SS`.
pub fn render_time(ts: Timestamp) -> String<8> {
    let dt = DateTime::from_timestamp(ts);
    let mut out = String::new();
    let _ = write!(out, "{:02}:{:02}:{:02}", dt.hour, dt.minute, dt.second);
    out
}
