//! Property tests for the civil calendar converter
//!
//! Exercises the round-trip and ordering contracts over the full supported
//! horizon (1970..=2200) rather than hand-picked dates.

use proptest::prelude::*;

use rtc64_core::{days_in_month, DateTime, Timestamp};

/// Last representable instant of the tested horizon: 2200-12-31 23:59:59.
fn horizon_end() -> Timestamp {
    DateTime::new(2200, 12, 31, 23, 59, 59).unwrap().to_timestamp()
}

proptest! {
    #[test]
    fn timestamp_roundtrips_through_civil(ts in 0u64..=7_289_654_399) {
        let dt = DateTime::from_timestamp(ts);
        prop_assert_eq!(dt.to_timestamp(), ts);
    }

    #[test]
    fn civil_roundtrips_through_timestamp(
        year in 1970u16..=2200,
        month in 1u8..=12,
        day_seed in 0u8..31,
        hour in 0u8..24,
        minute in 0u8..60,
        second in 0u8..60,
    ) {
        // Fold the day seed into the valid range for this year/month
        let day = day_seed % days_in_month(year, month) + 1;
        let dt = DateTime::new(year, month, day, hour, minute, second).unwrap();
        prop_assert_eq!(DateTime::from_timestamp(dt.to_timestamp()), dt);
    }

    #[test]
    fn conversion_is_monotonic(a in 0u64..=7_289_654_399, b in 0u64..=7_289_654_399) {
        let (t1, t2) = if a <= b { (a, b) } else { (b, a) };
        // DateTime's derived ordering is lexicographic over
        // (year, month, day, hour, minute, second)
        prop_assert!(DateTime::from_timestamp(t1) <= DateTime::from_timestamp(t2));
    }
}

#[test]
fn horizon_bound_matches_literal() {
    // The literal used in the proptest ranges above
    assert_eq!(horizon_end(), 7_289_654_399);
}
