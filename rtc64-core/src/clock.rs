//! 64-bit Epoch Clock over a 32-bit Counter
//!
//! [`EpochClock`] owns an [`RtcDevice`] and a 64-bit epoch offset. The
//! apparent time is always `raw_counter + offset`; the offset is re-anchored
//! to the start of the target calendar year on every absolute time set, so
//! the 32-bit counter gets its full ~136 years of headroom from that point
//! forward instead of wrapping in 2106.
//!
//! The offset is deliberately *not* persisted: after every boot (warm or
//! cold) reads fail with [`TimeError::OffsetNotSet`] until the caller
//! re-anchors via [`set_datetime`](EpochClock::set_datetime) or
//! [`anchor_to_year`](EpochClock::anchor_to_year). Implementors with a spare
//! backup register can layer persistence on top.
//!
//! Single-threaded by design: the target is an embedded control loop with no
//! preemption. Wrap the clock in a critical-section mutex if interrupts also
//! touch it.

use core::convert::Infallible;

use crate::{
    calendar::{DateTime, Timestamp},
    constants::{SECONDS_PER_HOUR, SYNC_POLL_LIMIT},
    device::RtcDevice,
    errors::{TimeError, TimeResult},
};

// Macro for optional logging
#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

/// Epoch offset anchored at Jan 1 of `year`.
fn year_anchor(year: u16) -> TimeResult<Timestamp> {
    Ok(DateTime::new(year, 1, 1, 0, 0, 0)?.to_timestamp())
}

/// A 64-bit Unix-epoch clock backed by a 32-bit hardware counter.
pub struct EpochClock<D: RtcDevice> {
    device: D,
    offset: Timestamp,
    anchored: bool,
}

impl<D: RtcDevice> EpochClock<D> {
    /// Wrap a device. The clock is unusable for reads until an absolute
    /// time is set; call [`init`](Self::init) first, then
    /// [`set_datetime`](Self::set_datetime).
    pub fn new(device: D) -> Self {
        Self {
            device,
            offset: 0,
            anchored: false,
        }
    }

    /// Bring the peripheral up.
    ///
    /// Cold start (no persisted marker): starts the clock source, programs
    /// the 1 Hz prescaler, zeroes the counter, and persists the marker.
    /// Warm start: only waits for register synchronization — the running
    /// counter is left untouched.
    ///
    /// Every hardware ready condition is polled at most
    /// [`SYNC_POLL_LIMIT`] times; a dead peripheral yields
    /// [`TimeError::SyncTimeout`] instead of hanging the control loop.
    pub fn init(&mut self) -> TimeResult<()> {
        if self.device.is_initialized() {
            log_debug!("rtc warm start: clock domain already configured");
            return self.poll_bounded(D::wait_for_sync);
        }

        log_debug!("rtc cold start: configuring clock source and 1 Hz prescaler");
        self.poll_bounded(D::start_clock_source)?;
        self.poll_bounded(D::wait_for_sync)?;

        self.device.enter_config();
        self.device.set_prescaler(D::PRESCALER_1HZ);
        self.device.write_counter(0);
        self.device.exit_config();
        self.poll_bounded(D::wait_for_sync)?;

        self.device.mark_initialized();
        Ok(())
    }

    /// Re-anchor the epoch offset to Jan 1 of `year` and return it.
    ///
    /// Does not touch the hardware counter; the caller takes over the
    /// `counter + offset` invariant. Prefer [`set_datetime`](Self::set_datetime),
    /// which maintains it.
    pub fn anchor_to_year(&mut self, year: u16) -> TimeResult<Timestamp> {
        let anchor = year_anchor(year)?;
        self.offset = anchor;
        self.anchored = true;
        Ok(anchor)
    }

    /// Set the absolute date and time; the only mutator of both the offset
    /// and the hardware counter.
    ///
    /// `hour_offset` is applied verbatim as `hour_offset * 3600` signed
    /// seconds on top of the already-complete civil time. Whether it means a
    /// timezone bias or a correction is the caller's decision; nothing is
    /// inferred. A negative value that lands before the 1970 epoch fails
    /// with [`TimeError::TimestampUnderflow`].
    ///
    /// The offset is re-anchored to Jan 1 of `dt.year`, then
    /// `target − offset` is written to the counter. Returns the fully
    /// adjusted target timestamp.
    pub fn set_datetime(&mut self, dt: DateTime, hour_offset: i32) -> TimeResult<Timestamp> {
        let bias = hour_offset as i64 * SECONDS_PER_HOUR as i64;
        let target = dt
            .to_timestamp()
            .checked_add_signed(bias)
            .ok_or(TimeError::TimestampUnderflow)?;

        // Validate everything before mutating any state
        let anchor = year_anchor(dt.year)?;
        let counter = target
            .checked_sub(anchor)
            .and_then(|c| u32::try_from(c).ok())
            .ok_or(TimeError::CounterRange)?;

        self.device.enter_config();
        self.device.write_counter(counter);
        self.device.exit_config();
        self.poll_bounded(D::wait_for_sync)?;

        self.offset = anchor;
        self.anchored = true;
        log_debug!("rtc set: target={} anchor={} counter={}", target, anchor, counter);
        Ok(target)
    }

    /// Apparent 64-bit timestamp: `raw_counter + offset`. Side-effect free.
    ///
    /// Errors with [`TimeError::OffsetNotSet`] until an absolute time has
    /// been established this boot.
    pub fn now(&self) -> TimeResult<Timestamp> {
        if !self.anchored {
            return Err(TimeError::OffsetNotSet);
        }
        Ok(self.device.read_counter() as u64 + self.offset)
    }

    /// Current civil date and time.
    pub fn datetime(&self) -> TimeResult<DateTime> {
        Ok(DateTime::from_timestamp(self.now()?))
    }

    /// Current year.
    pub fn year(&self) -> TimeResult<u16> {
        Ok(self.datetime()?.year)
    }

    /// Current month (1..=12).
    pub fn month(&self) -> TimeResult<u8> {
        Ok(self.datetime()?.month)
    }

    /// Current day of month (1..=31).
    pub fn day(&self) -> TimeResult<u8> {
        Ok(self.datetime()?.day)
    }

    /// Current hour (0..=23).
    pub fn hour(&self) -> TimeResult<u8> {
        Ok(self.datetime()?.hour)
    }

    /// Current minute (0..=59).
    pub fn minute(&self) -> TimeResult<u8> {
        Ok(self.datetime()?.minute)
    }

    /// Current second (0..=59).
    pub fn second(&self) -> TimeResult<u8> {
        Ok(self.datetime()?.second)
    }

    /// Current epoch offset (timestamp corresponding to raw counter 0).
    pub fn offset(&self) -> Timestamp {
        self.offset
    }

    /// Borrow the underlying device.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Mutably borrow the underlying device, e.g. to drive a simulated
    /// counter or reach platform-specific registers.
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Consume the clock and return the device.
    pub fn release(self) -> D {
        self.device
    }

    fn poll_bounded(
        &mut self,
        mut op: impl FnMut(&mut D) -> nb::Result<(), Infallible>,
    ) -> TimeResult<()> {
        for _ in 0..SYNC_POLL_LIMIT {
            match op(&mut self.device) {
                Ok(()) => return Ok(()),
                Err(nb::Error::WouldBlock) => continue,
                Err(nb::Error::Other(e)) => match e {},
            }
        }
        Err(TimeError::SyncTimeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::SimulatedRtc;

    fn ready_clock() -> EpochClock<SimulatedRtc> {
        let mut clock = EpochClock::new(SimulatedRtc::new());
        clock.init().unwrap();
        clock
    }

    #[test]
    fn read_before_set_is_an_error() {
        let clock = ready_clock();
        assert_eq!(clock.now(), Err(TimeError::OffsetNotSet));
        assert_eq!(clock.year(), Err(TimeError::OffsetNotSet));
    }

    #[test]
    fn counter_is_anchored_at_year_start() {
        let mut clock = ready_clock();
        let dt = DateTime::new(2025, 6, 15, 12, 0, 0).unwrap();
        let target = clock.set_datetime(dt, 0).unwrap();

        // Counter holds only seconds since Jan 1 of the target year,
        // leaving the 32-bit range full headroom going forward.
        let jan1 = DateTime::new(2025, 1, 1, 0, 0, 0).unwrap().to_timestamp();
        assert_eq!(clock.offset(), jan1);
        assert_eq!(clock.device().counter() as u64, target - jan1);
    }

    #[test]
    fn anchor_alone_enables_reads() {
        let mut clock = ready_clock();
        let anchor = clock.anchor_to_year(2030).unwrap();
        assert_eq!(anchor, DateTime::new(2030, 1, 1, 0, 0, 0).unwrap().to_timestamp());
        assert_eq!(clock.now().unwrap(), anchor);
    }

    #[test]
    fn negative_hour_offset_before_epoch_fails() {
        let mut clock = ready_clock();
        let epoch = DateTime::new(1970, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            clock.set_datetime(epoch, -1),
            Err(TimeError::TimestampUnderflow)
        );
    }

    #[test]
    fn oversized_hour_offset_exceeds_counter() {
        let mut clock = ready_clock();
        // 2_000_000 hours past a Jan 1 anchor is ~7.2e9 seconds, beyond u32
        let dt = DateTime::new(1970, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            clock.set_datetime(dt, 2_000_000),
            Err(TimeError::CounterRange)
        );
    }

    #[test]
    fn failed_set_leaves_state_untouched() {
        let mut clock = ready_clock();
        let good = DateTime::new(2025, 3, 1, 8, 0, 0).unwrap();
        let expected = clock.set_datetime(good, 0).unwrap();

        let epoch = DateTime::new(1970, 1, 1, 0, 0, 0).unwrap();
        assert!(clock.set_datetime(epoch, -5).is_err());
        assert_eq!(clock.now().unwrap(), expected);
    }
}
