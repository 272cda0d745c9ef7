//! Error Types for Clock and Calendar Operations
//!
//! The error enum is kept small (a discriminant plus at most one byte of
//! payload) and `Copy`, since errors cross the API boundary on every getter
//! call and may be stored in no-alloc contexts. All messages are static —
//! no `String`, no heap.
//!
//! The reference hardware designs these errors replace were silent: reading
//! the clock before it was ever set produced a plausible-looking 1970-era
//! timestamp, and a dead crystal hung the init loop forever. Each of those
//! failure modes gets an explicit variant here.

use thiserror_no_std::Error;

/// Result type for clock and calendar operations
pub type TimeResult<T> = Result<T, TimeError>;

/// Civil field that failed range validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DateField {
    /// Year below the 1970 epoch
    Year,
    /// Month outside 1..=12
    Month,
    /// Day outside 1..=days-in-month for the given year/month
    Day,
    /// Hour outside 0..=23
    Hour,
    /// Minute outside 0..=59
    Minute,
    /// Second outside 0..=59
    Second,
}

/// Clock and calendar errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeError {
    /// A civil date/time field was out of range (e.g. Feb 29 in a non-leap year)
    #[error("date field {field:?} out of range")]
    InvalidDate {
        /// The first field found out of range, checked in year..second order
        field: DateField,
    },

    /// Clock read before any absolute time was set
    ///
    /// The epoch offset is not persisted across restarts; the caller must
    /// re-anchor with `set_datetime` or `anchor_to_year` after every boot.
    #[error("epoch offset not established; set an absolute time first")]
    OffsetNotSet,

    /// Hardware ready condition never came true within the poll budget
    #[error("RTC synchronization wait exceeded poll limit")]
    SyncTimeout,

    /// Hour offset pushed the target time before the 1970 epoch
    #[error("adjusted timestamp precedes the 1970 epoch")]
    TimestampUnderflow,

    /// Target timestamp minus the year anchor does not fit the 32-bit counter
    #[error("target timestamp does not fit the 32-bit counter")]
    CounterRange,
}

#[cfg(feature = "defmt")]
impl defmt::Format for TimeError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidDate { field } =>
                defmt::write!(fmt, "date field {} out of range", match field {
                    DateField::Year => "year",
                    DateField::Month => "month",
                    DateField::Day => "day",
                    DateField::Hour => "hour",
                    DateField::Minute => "minute",
                    DateField::Second => "second",
                }),
            Self::OffsetNotSet =>
                defmt::write!(fmt, "epoch offset not established"),
            Self::SyncTimeout =>
                defmt::write!(fmt, "RTC sync poll limit exceeded"),
            Self::TimestampUnderflow =>
                defmt::write!(fmt, "timestamp precedes 1970 epoch"),
            Self::CounterRange =>
                defmt::write!(fmt, "timestamp outside counter range"),
        }
    }
}
