//! Time and Calendar Constants
//!
//! Unit conversions, Gregorian calendar tables, and hardware defaults shared
//! across the crate. Everything here is `const` so the compiler can fold the
//! calendar math down to plain integer arithmetic.

// ===== TIME UNIT CONVERSIONS =====

/// Seconds per minute.
pub const SECONDS_PER_MINUTE: u64 = 60;

/// Minutes per hour.
pub const MINUTES_PER_HOUR: u64 = 60;

/// Hours per day.
pub const HOURS_PER_DAY: u64 = 24;

/// Seconds per hour.
pub const SECONDS_PER_HOUR: u64 = SECONDS_PER_MINUTE * MINUTES_PER_HOUR;

/// Seconds per day.
pub const SECONDS_PER_DAY: u64 = SECONDS_PER_HOUR * HOURS_PER_DAY;

// ===== GREGORIAN CALENDAR =====

/// First year representable by a [`Timestamp`](crate::calendar::Timestamp).
///
/// The Unix epoch: 1970-01-01T00:00:00 UTC maps to timestamp 0.
pub const EPOCH_YEAR: u16 = 1970;

/// Days in a common (non-leap) year.
pub const DAYS_PER_YEAR: u64 = 365;

/// Days in a leap year.
pub const DAYS_PER_LEAP_YEAR: u64 = 366;

/// Month lengths for a common year, January first.
///
/// February reads 28 here; leap handling adds the extra day in
/// [`days_in_month`](crate::calendar::days_in_month).
pub const DAYS_IN_MONTH: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

// ===== HARDWARE DEFAULTS =====

/// Prescaler divisor for a 32.768 kHz low-speed crystal.
///
/// Dividing by 32767 + 1 yields exactly one counter tick per second, the only
/// rate this crate supports. Devices driven from a different clock source
/// override [`RtcDevice::PRESCALER_1HZ`](crate::device::RtcDevice::PRESCALER_1HZ).
pub const LSE_PRESCALER_1HZ: u32 = 32767;

/// Upper bound on busy-poll iterations for hardware ready conditions.
///
/// A healthy RTC synchronizes within a few counter ticks; exhausting this
/// limit means the peripheral is dead or its clock source never started, and
/// the caller gets [`TimeError::SyncTimeout`](crate::errors::TimeError::SyncTimeout)
/// instead of an infinite hang.
pub const SYNC_POLL_LIMIT: u32 = 1_000_000;
