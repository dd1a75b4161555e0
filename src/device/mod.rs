/*

The device lifecycle is a strict pipeline driven by one logical thread:

   Init ──> RadioInit ──> Joining ──> Joined
              │             ^  │       │
              │ init fails  └──┘       │  sample -> send -> wait -> receive
              v             1 s poll   └── repeats forever
            halt (fatal)

RadioInit failure is fail-stop: a misconfigured radio cannot self-correct at
runtime, so the device signals the fatal code and idles until power-cycled.
The join poll and the steady-state cycle are unbounded liveness loops; a
timeout in either is a normal outcome, not an error.

*/
use crate::config::DeviceConfig;
use crate::sampler::{Adc, SampleError, Sampler};
use crate::stack::{LorawanStack, ProcessResult};
use crate::status::{Led, StatusSink};
use crate::MAX_PAYLOAD;

#[cfg(test)]
mod test;

/// Application port for sensor uplinks.
pub const UPLINK_PORT: u8 = 2;
/// Stack service interval while waiting for the join accept.
pub const JOIN_POLL_MS: u32 = 1000;
/// How long each cycle waits for an uplink-complete or downlink event.
pub const RX_WAIT_MS: u32 = 30_000;

/// Join progress as observed by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum JoinState {
    NotStarted,
    Joining,
    Joined,
}

/// What one steady-state cycle did after its uplink attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum CycleOutcome {
    /// The wait elapsed with no stack event.
    Timeout,
    /// The stack reported an event but no downlink was pending.
    Event,
    /// A downlink arrived; its first byte was applied to the output.
    Downlink(u8),
}

/// The control loop, generic over its four collaborator seams so the same
/// logic runs against hardware bindings or the scripted stubs in tests.
pub struct Device<S, A, L, K>
where
    S: LorawanStack,
    A: Adc,
    L: Led,
    K: StatusSink,
{
    stack: S,
    sampler: Sampler<A>,
    led: L,
    status: K,
    config: DeviceConfig,
    join_state: JoinState,
}

impl<S, A, L, K> Device<S, A, L, K>
where
    S: LorawanStack,
    A: Adc,
    L: Led,
    K: StatusSink,
{
    pub fn new(stack: S, adc: A, led: L, status: K, config: DeviceConfig) -> Self {
        Self {
            stack,
            sampler: Sampler::new(adc),
            led,
            status,
            config,
            join_state: JoinState::NotStarted,
        }
    }

    pub fn join_state(&self) -> JoinState {
        self.join_state
    }

    /// Bring up the sampling hardware and the LoRaWAN stack.
    ///
    /// An `Err` here is fatal: the caller must not retry and must fall
    /// through to [`halt`](Self::halt).
    pub fn start(&mut self) -> Result<(), S::Error> {
        self.sampler.init();

        self.status.info("initializing lorawan stack");
        self.status.pulses(1);
        self.stack.init(&self.config)?;
        self.status.info("stack initialized");
        self.status.pulses(1);
        Ok(())
    }

    /// Signal the fatal code forever. Only reached after a failed
    /// [`start`](Self::start).
    pub fn halt(mut self) -> ! {
        loop {
            self.status.info("lorawan init failed");
            self.status.pulses(4);
        }
    }

    /// Trigger the OTAA join and service the stack until it reports
    /// joined. Unbounded by design: the device either joins eventually or
    /// is power-cycled from outside.
    pub fn join(&mut self) {
        self.status.info("joining network");
        self.stack.join();
        self.join_state = JoinState::Joining;

        while !self.stack.is_joined() {
            self.stack.process_timeout_ms(JOIN_POLL_MS);
            self.status.pulses(2);
        }

        self.join_state = JoinState::Joined;
        self.status.info("joined");
        self.status.pulses(1);
    }

    /// One steady-state cycle: sample, uplink, wait, apply any downlink.
    ///
    /// A send failure is absorbed (signaled, then the cycle proceeds to
    /// its wait; the next cycle will try again with a fresh reading). Only
    /// a sampling failure surfaces to the caller, which skips the cycle.
    pub fn run_cycle(&mut self) -> Result<CycleOutcome, SampleError<A::Error>> {
        debug_assert_eq!(self.join_state, JoinState::Joined);

        let reading = self.sampler.sample()?;
        let payload = reading.encode();
        debug!("uplink payload: {=str}", payload.as_str());

        match self.stack.send_unconfirmed(payload.as_bytes(), UPLINK_PORT) {
            Ok(()) => {
                self.status.info("uplink queued");
                self.status.pulses(1);
            }
            // Non-fatal and non-retried; the next cycle sends again.
            Err(_) => {
                warn!("uplink send failed");
                self.status.info("uplink failed");
                self.status.pulses(2);
            }
        }

        if self.stack.process_timeout_ms(RX_WAIT_MS) == ProcessResult::Timeout {
            return Ok(CycleOutcome::Timeout);
        }

        let mut buf = [0u8; MAX_PAYLOAD];
        match self.stack.receive(&mut buf) {
            // Only byte 0 is interpreted; the port and any remaining
            // payload bytes are discarded.
            Some(rx) if rx.length > 0 => {
                debug!("downlink on port {}: {=u8} ({} bytes)", rx.port, buf[0], rx.length);
                self.led.write(buf[0]);
                Ok(CycleOutcome::Downlink(buf[0]))
            }
            _ => Ok(CycleOutcome::Event),
        }
    }

    /// Run the device to completion, which is to say forever: init (or
    /// fail-stop), join, then cycle until reset.
    pub fn run(mut self) -> ! {
        if self.start().is_err() {
            self.halt();
        }
        self.join();
        loop {
            if self.run_cycle().is_err() {
                // Transient by policy, like a failed send.
                self.status.info("sampling failed");
                self.status.pulses(2);
            }
        }
    }
}
