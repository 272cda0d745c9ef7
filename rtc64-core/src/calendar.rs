//! Civil Calendar Conversion
//!
//! Pure, hardware-free mapping between 64-bit Unix timestamps and proleptic
//! Gregorian calendar fields. Fully deterministic, so everything here is
//! testable on the host without any peripheral in sight.
//!
//! ## Design notes
//!
//! Validation lives in [`DateTime::new`]; the conversion routines themselves
//! do no range checking. Converting a hand-built `DateTime` with out-of-range
//! fields yields a mathematically consistent but meaningless timestamp —
//! construct through `new` unless the fields are known good.
//!
//! [`DateTime::from_timestamp`] resolves the year with a linear subtract-a-year
//! loop starting at 1970. That is O(years since epoch), which is fine for an
//! RTC read a handful of times per second with a ~2200 horizon (≤ 230
//! iterations); a hot path over long horizons would want the closed-form
//! civil-from-days algorithm instead.

use crate::{
    constants::{
        DAYS_IN_MONTH, DAYS_PER_LEAP_YEAR, DAYS_PER_YEAR, EPOCH_YEAR, HOURS_PER_DAY,
        MINUTES_PER_HOUR, SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
    },
    errors::{DateField, TimeError, TimeResult},
};

/// Seconds elapsed since 1970-01-01T00:00:00 UTC.
///
/// 64 bits wide so the clock keeps working decades past 2106, where the
/// hardware's native 32-bit counter wraps.
pub type Timestamp = u64;

/// Gregorian leap year test: divisible by 4 and (not by 100, or by 400).
pub const fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Length of `month` (1-based) in `year`, accounting for leap Februaries.
///
/// Caller contract: `1 <= month <= 12`.
pub const fn days_in_month(year: u16, month: u8) -> u8 {
    let base = DAYS_IN_MONTH[(month - 1) as usize];
    if month == 2 && is_leap_year(year) {
        base + 1
    } else {
        base
    }
}

/// Civil date and time, second resolution, proleptic Gregorian, no time zone.
///
/// The derived ordering is lexicographic over (year, month, day, hour, minute,
/// second), which matches chronological order for valid values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DateTime {
    /// Year, 1970 or later
    pub year: u16,
    /// Month, 1..=12
    pub month: u8,
    /// Day of month, 1..=days_in_month(year, month)
    pub day: u8,
    /// Hour, 0..=23
    pub hour: u8,
    /// Minute, 0..=59
    pub minute: u8,
    /// Second, 0..=59
    pub second: u8,
}

impl DateTime {
    /// Build a validated `DateTime`.
    ///
    /// Checks fields in year → second order and reports the first one out of
    /// range; the day bound is leap-aware, so `new(2025, 2, 29, ..)` is
    /// rejected while `new(2024, 2, 29, ..)` is accepted.
    pub fn new(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> TimeResult<Self> {
        if year < EPOCH_YEAR {
            return Err(TimeError::InvalidDate { field: DateField::Year });
        }
        if month < 1 || month > 12 {
            return Err(TimeError::InvalidDate { field: DateField::Month });
        }
        if day < 1 || day > days_in_month(year, month) {
            return Err(TimeError::InvalidDate { field: DateField::Day });
        }
        if hour >= HOURS_PER_DAY as u8 {
            return Err(TimeError::InvalidDate { field: DateField::Hour });
        }
        if minute >= MINUTES_PER_HOUR as u8 {
            return Err(TimeError::InvalidDate { field: DateField::Minute });
        }
        if second >= SECONDS_PER_MINUTE as u8 {
            return Err(TimeError::InvalidDate { field: DateField::Second });
        }
        Ok(Self { year, month, day, hour, minute, second })
    }

    /// Convert to seconds since the Unix epoch.
    ///
    /// No range checking: fields outside their documented ranges produce a
    /// self-consistent but meaningless result.
    pub fn to_timestamp(&self) -> Timestamp {
        let mut days: u64 = 0;

        // Whole years since the epoch
        let mut y = EPOCH_YEAR;
        while y < self.year {
            days += if is_leap_year(y) { DAYS_PER_LEAP_YEAR } else { DAYS_PER_YEAR };
            y += 1;
        }

        // Whole months within the target year
        let mut m = 1;
        while m < self.month {
            days += days_in_month(self.year, m) as u64;
            m += 1;
        }

        days += (self.day as u64).saturating_sub(1);

        days * SECONDS_PER_DAY
            + self.hour as u64 * SECONDS_PER_HOUR
            + self.minute as u64 * SECONDS_PER_MINUTE
            + self.second as u64
    }

    /// Convert seconds since the Unix epoch back to civil fields.
    ///
    /// Total over all of `u64`; overflowing dates (year > 65535) are outside
    /// any realistic horizon for a battery-backed RTC and are not handled.
    pub fn from_timestamp(ts: Timestamp) -> Self {
        let mut days = ts / SECONDS_PER_DAY;
        let mut secs = ts % SECONDS_PER_DAY;

        let hour = (secs / SECONDS_PER_HOUR) as u8;
        secs %= SECONDS_PER_HOUR;
        let minute = (secs / SECONDS_PER_MINUTE) as u8;
        let second = (secs % SECONDS_PER_MINUTE) as u8;

        // Peel off whole years until fewer than a year's days remain
        let mut year = EPOCH_YEAR;
        loop {
            let len = if is_leap_year(year) { DAYS_PER_LEAP_YEAR } else { DAYS_PER_YEAR };
            if days < len {
                break;
            }
            days -= len;
            year += 1;
        }

        // Then whole months within the resolved year
        let mut month: u8 = 1;
        while month < 12 {
            let len = days_in_month(year, month) as u64;
            if days < len {
                break;
            }
            days -= len;
            month += 1;
        }

        Self {
            year,
            month,
            day: days as u8 + 1,
            hour,
            minute,
            second,
        }
    }
}

impl core::fmt::Display for DateTime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DateTime {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_anchor_is_zero() {
        let epoch = DateTime::new(1970, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(epoch.to_timestamp(), 0);
        assert_eq!(DateTime::from_timestamp(0), epoch);
    }

    #[test]
    fn known_timestamp_2025() {
        // Cross-checked against `date -d 2025-01-01T00:00:00Z +%s`
        let dt = DateTime::new(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(dt.to_timestamp(), 1_735_689_600);
    }

    #[test]
    fn leap_year_rule() {
        assert!(is_leap_year(2024)); // div 4
        assert!(!is_leap_year(2025));
        assert!(!is_leap_year(2100)); // century, not div 400
        assert!(is_leap_year(2000)); // div 400
    }

    #[test]
    fn leap_day_is_one_day_after_feb_28() {
        let feb28 = DateTime::new(2024, 2, 28, 0, 0, 0).unwrap();
        let feb29 = DateTime::new(2024, 2, 29, 0, 0, 0).unwrap();
        assert_eq!(feb29.to_timestamp() - feb28.to_timestamp(), SECONDS_PER_DAY);
    }

    #[test]
    fn feb_29_rejected_in_common_year() {
        let err = DateTime::new(2025, 2, 29, 0, 0, 0).unwrap_err();
        assert_eq!(err, TimeError::InvalidDate { field: DateField::Day });
    }

    #[test]
    fn day_after_feb_28_normalizes_to_march() {
        // One day past Feb 28 in a common year must read back as Mar 1,
        // never as a phantom Feb 29.
        let feb28 = DateTime::new(2025, 2, 28, 0, 0, 0).unwrap();
        let next = DateTime::from_timestamp(feb28.to_timestamp() + SECONDS_PER_DAY);
        assert_eq!(next, DateTime::new(2025, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn validation_reports_first_bad_field() {
        assert_eq!(
            DateTime::new(1969, 12, 31, 23, 59, 59).unwrap_err(),
            TimeError::InvalidDate { field: DateField::Year }
        );
        assert_eq!(
            DateTime::new(2025, 13, 1, 0, 0, 0).unwrap_err(),
            TimeError::InvalidDate { field: DateField::Month }
        );
        assert_eq!(
            DateTime::new(2025, 4, 31, 0, 0, 0).unwrap_err(),
            TimeError::InvalidDate { field: DateField::Day }
        );
        assert_eq!(
            DateTime::new(2025, 4, 30, 24, 0, 0).unwrap_err(),
            TimeError::InvalidDate { field: DateField::Hour }
        );
        assert_eq!(
            DateTime::new(2025, 4, 30, 23, 60, 0).unwrap_err(),
            TimeError::InvalidDate { field: DateField::Minute }
        );
        assert_eq!(
            DateTime::new(2025, 4, 30, 23, 59, 60).unwrap_err(),
            TimeError::InvalidDate { field: DateField::Second }
        );
    }

    #[test]
    fn roundtrip_past_u32_wraparound() {
        // 2150 is well past the 2106 wrap of a 32-bit seconds counter
        let dt = DateTime::new(2150, 7, 20, 6, 30, 15).unwrap();
        let ts = dt.to_timestamp();
        assert!(ts > u32::MAX as u64);
        assert_eq!(DateTime::from_timestamp(ts), dt);
    }

    #[test]
    fn year_end_boundary() {
        let nye = DateTime::new(2024, 12, 31, 23, 59, 59).unwrap();
        let after = DateTime::from_timestamp(nye.to_timestamp() + 1);
        assert_eq!(after, DateTime::new(2025, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    #[cfg(feature = "std")]
    fn display_format() {
        let dt = DateTime::new(2025, 6, 5, 9, 3, 7).unwrap();
        assert_eq!(format!("{dt}"), "2025-06-05 09:03:07");
    }
}
