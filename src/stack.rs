//! Contract of the external LoRaWAN MAC/PHY stack.
//!
//! The stack is a black box to this crate: join handshake internals, channel
//! management, duty-cycle enforcement and encryption all live behind this
//! trait. The device loop only triggers operations and polls for their
//! completion, matching the blocking, single-threaded shape of the C
//! bindings this trait abstracts over.

use crate::config::DeviceConfig;

/// Outcome of servicing the stack for a bounded interval.
///
/// A pure timeout is not an error; it merely means no radio event fired
/// before the deadline and control returns to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum ProcessResult {
    /// An event (tx done, rx done, join accept, ...) occurred before the
    /// deadline.
    Event,
    /// The deadline elapsed with nothing to report.
    Timeout,
}

/// A downlink delivered by the stack into the caller's buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct Received {
    /// Number of payload bytes written into the receive buffer.
    pub length: usize,
    /// Application port the downlink arrived on.
    pub port: u8,
}

pub trait LorawanStack {
    type Error: core::fmt::Debug;

    /// Bring up the radio and the MAC with the given pin map, region and
    /// OTAA credentials. A failure here is fatal to the device: there is no
    /// runtime path to different parameters, so the caller must not retry.
    fn init(&mut self, config: &DeviceConfig) -> Result<(), Self::Error>;

    /// Trigger the OTAA join procedure. Fire-and-forget; completion is
    /// observed by polling [`is_joined`](Self::is_joined) while servicing
    /// the stack with [`process_timeout_ms`](Self::process_timeout_ms).
    fn join(&mut self);

    fn is_joined(&self) -> bool;

    /// Service the stack's internal state machine, blocking until either an
    /// event fires or `timeout_ms` elapses, whichever comes first. May be
    /// called repeatedly.
    fn process_timeout_ms(&mut self, timeout_ms: u32) -> ProcessResult;

    /// Queue an unconfirmed uplink on the given port.
    fn send_unconfirmed(&mut self, payload: &[u8], port: u8) -> Result<(), Self::Error>;

    /// Non-blocking check for a pending downlink. Copies the payload into
    /// `buf` and reports its length and port, or returns `None` when
    /// nothing is waiting.
    fn receive(&mut self, buf: &mut [u8]) -> Option<Received>;
}
