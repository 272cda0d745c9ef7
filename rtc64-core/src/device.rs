//! RTC Peripheral Abstraction
//!
//! This module provides the [`RtcDevice`] trait which abstracts the hardware
//! real-time clock across different embedded platforms and test environments.
//!
//! ## Design Goals
//!
//! - **Platform Independence**: works on any MCU whose RTC exposes a 32-bit
//!   seconds counter behind a config-mode/sync-wait protocol (the STM32F1/CH32
//!   family shape, but nothing here is vendor specific)
//! - **Testability**: [`SimulatedRtc`] gives deterministic host-side tests
//!   without touching real registers
//! - **Non-blocking**: ready conditions are `nb`-style polls, so the caller
//!   decides the waiting policy (and can bound it)
//!
//! ## Implementation Requirements
//!
//! - `enter_config` / `exit_config` must be paired; counter and prescaler
//!   writes are only valid between them
//! - `wait_for_sync` must be polled to completion after any clock-domain
//!   change before `read_counter` is trusted
//! - the initialization marker must survive warm resets for as long as the
//!   backup power domain is retained (e.g. a battery-backed register)

use core::convert::Infallible;

use crate::constants::LSE_PRESCALER_1HZ;

/// Hardware real-time clock with a 32-bit seconds counter.
///
/// Implementations wrap the vendor peripheral registers. All operations are
/// infallible at this layer; a peripheral that never becomes ready simply
/// keeps returning [`nb::Error::WouldBlock`], and the clock layer above turns
/// an exhausted poll budget into an explicit timeout error.
pub trait RtcDevice {
    /// Prescaler divisor that makes the counter tick once per second.
    ///
    /// 32767 for the common 32.768 kHz crystal; devices clocked differently
    /// supply their own value.
    const PRESCALER_1HZ: u32 = LSE_PRESCALER_1HZ;

    /// Read the raw 32-bit seconds counter.
    ///
    /// Only valid after `wait_for_sync` has completed since the last
    /// clock-domain change.
    fn read_counter(&self) -> u32;

    /// Write the raw counter. Must be called inside a config-mode pair.
    fn write_counter(&mut self, value: u32);

    /// Poll the registers-synchronized condition.
    ///
    /// `Ok(())` once shadow registers match the clock domain and the counter
    /// is safe to read; `WouldBlock` until then.
    fn wait_for_sync(&mut self) -> nb::Result<(), Infallible>;

    /// Poll the clock source (oscillator) ready condition.
    ///
    /// Starts the source on first call if the hardware requires it.
    fn start_clock_source(&mut self) -> nb::Result<(), Infallible>;

    /// Acquire write access to counter and prescaler.
    fn enter_config(&mut self);

    /// Release write access, committing pending register writes.
    fn exit_config(&mut self);

    /// Set the prescaler divisor. Must be called inside a config-mode pair.
    fn set_prescaler(&mut self, divisor: u32);

    /// Whether the clock domain was configured on a previous boot.
    ///
    /// Backed by persistent storage in the backup power domain.
    fn is_initialized(&self) -> bool;

    /// Persist the configured marker. Written once per cold start.
    fn mark_initialized(&mut self);
}

/// In-memory RTC for host-side tests and simulation.
///
/// The counter does not tick on its own; drive it with [`tick`](Self::tick).
/// A stalled peripheral (crystal never starts, sync never completes) is
/// simulated with [`stall`](Self::stall).
#[derive(Debug, Clone, Default)]
pub struct SimulatedRtc {
    counter: u32,
    prescaler: u32,
    initialized: bool,
    config_depth: u8,
    stalled: bool,
}

impl SimulatedRtc {
    /// Fresh device: cold start, counter 0, no persisted marker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Device carrying state from a previous boot (warm start).
    pub fn warm(counter: u32) -> Self {
        Self {
            counter,
            prescaler: LSE_PRESCALER_1HZ,
            initialized: true,
            ..Self::default()
        }
    }

    /// Advance the counter by `seconds`, wrapping like the hardware does.
    pub fn tick(&mut self, seconds: u32) {
        self.counter = self.counter.wrapping_add(seconds);
    }

    /// Make every ready-condition poll return `WouldBlock` from now on.
    pub fn stall(&mut self) {
        self.stalled = true;
    }

    /// Current raw counter value, for assertions.
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Last prescaler divisor written, for assertions.
    pub fn prescaler(&self) -> u32 {
        self.prescaler
    }
}

impl RtcDevice for SimulatedRtc {
    fn read_counter(&self) -> u32 {
        self.counter
    }

    fn write_counter(&mut self, value: u32) {
        debug_assert!(self.config_depth > 0, "counter write outside config mode");
        self.counter = value;
    }

    fn wait_for_sync(&mut self) -> nb::Result<(), Infallible> {
        if self.stalled {
            Err(nb::Error::WouldBlock)
        } else {
            Ok(())
        }
    }

    fn start_clock_source(&mut self) -> nb::Result<(), Infallible> {
        if self.stalled {
            Err(nb::Error::WouldBlock)
        } else {
            Ok(())
        }
    }

    fn enter_config(&mut self) {
        self.config_depth += 1;
    }

    fn exit_config(&mut self) {
        debug_assert!(self.config_depth > 0, "unbalanced exit_config");
        self.config_depth -= 1;
    }

    fn set_prescaler(&mut self, divisor: u32) {
        debug_assert!(self.config_depth > 0, "prescaler write outside config mode");
        self.prescaler = divisor;
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn mark_initialized(&mut self) {
        self.initialized = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_wraps_like_hardware() {
        let mut rtc = SimulatedRtc::warm(u32::MAX);
        rtc.tick(1);
        assert_eq!(rtc.read_counter(), 0);
    }

    #[test]
    fn stalled_device_never_syncs() {
        let mut rtc = SimulatedRtc::new();
        assert_eq!(rtc.wait_for_sync(), Ok(()));
        rtc.stall();
        assert_eq!(rtc.wait_for_sync(), Err(nb::Error::WouldBlock));
    }

    #[test]
    fn warm_device_reports_initialized() {
        let rtc = SimulatedRtc::warm(12345);
        assert!(rtc.is_initialized());
        assert_eq!(rtc.counter(), 12345);
    }
}
