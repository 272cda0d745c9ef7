//! 64-bit Unix-epoch clock on top of a 32-bit hardware RTC counter
//!
//! Many MCU real-time clocks expose nothing but a 32-bit seconds register,
//! which wraps in 2106. This crate extends such a peripheral into an apparent
//! 64-bit timestamp by tracking an epoch offset that is re-anchored to the
//! start of the calendar year each time the clock is set, and provides pure
//! civil-calendar conversion between timestamps and (year, month, day, hour,
//! minute, second) fields.
//!
//! Key constraints:
//! - no_std, no alloc, no unsafe
//! - hardware behind a trait; the calendar math is pure and host-testable
//! - single-threaded embedded control loop as the design target
//!
//! ```
//! use rtc64_core::{DateTime, EpochClock, SimulatedRtc};
//!
//! let mut clock = EpochClock::new(SimulatedRtc::new());
//! clock.init().unwrap();
//!
//! let dt = DateTime::new(2025, 6, 15, 12, 0, 0).unwrap();
//! let ts = clock.set_datetime(dt, 0).unwrap();
//!
//! assert_eq!(clock.now().unwrap(), ts);
//! assert_eq!(clock.datetime().unwrap(), dt);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod calendar;
pub mod clock;
pub mod constants;
pub mod device;
pub mod errors;
pub mod format;

// Public API
pub use calendar::{days_in_month, is_leap_year, DateTime, Timestamp};
pub use clock::EpochClock;
pub use device::{RtcDevice, SimulatedRtc};
pub use errors::{DateField, TimeError, TimeResult};

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
