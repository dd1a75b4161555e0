//! User-visible status reporting and the downlink-driven output.
//!
//! The reference firmware toggled between blink codes and stdio prints with
//! a compile-time switch; here the same choice is a [`StatusSink`] strategy
//! picked at construction, so the control loop is written once.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// On/off time of one status pulse.
const PULSE_MS: u32 = 200;

/// Digital output driven by downlink payloads and (optionally) by status
/// pulses.
///
/// The level is the raw downlink byte, deliberately not normalized to 0/1:
/// payloads in the field use values like 0xFF, and what a non-binary level
/// does is the platform's business, not this crate's.
pub trait Led {
    fn write(&mut self, level: u8);
}

/// Adapter for strictly binary GPIO drivers: zero is low, anything else is
/// high.
pub struct PinLed<P: OutputPin>(pub P);

impl<P: OutputPin> Led for PinLed<P> {
    fn write(&mut self, level: u8) {
        let _ = if level == 0 { self.0.set_low() } else { self.0.set_high() };
    }
}

/// Strategy for progress and failure reporting.
///
/// Backends implement whichever channel they have; the other method stays a
/// no-op. Pulse counts follow the reference vocabulary: 1 = ok,
/// 2 = progress tick or soft failure, 4 = fatal.
pub trait StatusSink {
    fn info(&mut self, _msg: &str) {}
    fn pulses(&mut self, _n: u8) {}
}

/// Visual signaling through an LED, for headless boards.
pub struct LedSink<L: Led, D: DelayNs> {
    led: L,
    delay: D,
}

impl<L: Led, D: DelayNs> LedSink<L, D> {
    pub fn new(led: L, delay: D) -> Self {
        Self { led, delay }
    }
}

impl<L: Led, D: DelayNs> StatusSink for LedSink<L, D> {
    fn pulses(&mut self, n: u8) {
        for _ in 0..n {
            self.led.write(1);
            self.delay.delay_ms(PULSE_MS);
            self.led.write(0);
            self.delay.delay_ms(PULSE_MS);
        }
    }
}

/// Textual reporting through the crate's logging macros.
pub struct LogSink;

impl StatusSink for LogSink {
    fn info(&mut self, msg: &str) {
        info!("{=str}", msg);
    }
}

/// Discards everything.
pub struct NullSink;

impl StatusSink for NullSink {}
