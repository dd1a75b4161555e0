#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Application control loop for a LoRaWAN class A sensor node.
//!
//! The LoRaWAN MAC/PHY stack, the ADC and the status output are external
//! collaborators reached through narrow traits, so the whole loop runs
//! unmodified against real hardware or against the scripted stubs used by
//! the tests. The loop itself is the classic OTAA sketch: join the network,
//! then forever sample two analog channels, uplink the readings as text and
//! let the first byte of any downlink drive an output pin.
//!
//! ## Feature flags
#![doc = document_features::document_features!(feature_label = r#"<span class="stab portability"><code>{feature}</code></span>"#)]

mod fmt;

pub mod config;
pub mod device;
pub mod sampler;
pub mod stack;
pub mod status;

pub use config::{AppEui, AppKey, DevEui, DeviceConfig, Otaa, RadioPins, Region, SpiPins};
pub use device::{CycleOutcome, Device, JoinState};
pub use sampler::{Adc, SampleError, Sampler, SensorReading};
pub use stack::{LorawanStack, ProcessResult, Received};
pub use status::{Led, LedSink, LogSink, NullSink, PinLed, StatusSink};

/// Largest application payload accepted by the stack for any region and
/// data rate (the LoRaWAN ceiling for DR with maximum dwell).
pub const MAX_PAYLOAD: usize = 242;
