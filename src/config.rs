//! Immutable device configuration, built once at startup and passed through
//! unmodified to the stack's init call.
//!
//! The OTAA identifiers are opaque to this crate: they are forwarded to the
//! network stack as the hex strings the provisioning tooling hands out, and
//! never parsed or validated here.

/// Pin assignment for the radio's SPI bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct SpiPins {
    pub mosi: u8,
    pub miso: u8,
    pub sck: u8,
    pub nss: u8,
}

/// Pin map for an SX12xx radio module.
///
/// SX127x parts signal on `dio0`, SX126x parts on `dio1` with an extra
/// `busy` line; leave the pin that does not apply as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct RadioPins {
    pub spi: SpiPins,
    pub reset: u8,
    pub busy: u8,
    pub dio0: Option<u8>,
    pub dio1: Option<u8>,
}

/// LoRaWAN regional channel plan identifier, forwarded to the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[allow(clippy::upper_case_acronyms)]
pub enum Region {
    AS923_1,
    AS923_2,
    AS923_3,
    AS923_4,
    AU915,
    EU433,
    EU868,
    IN865,
    US915,
}

macro_rules! otaa_id {
    (
        $(#[$outer:meta])*
        pub struct $type:ident;
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
        pub struct $type(&'static str);

        impl $type {
            pub const fn new(id: &'static str) -> Self {
                $type(id)
            }

            pub const fn as_str(&self) -> &'static str {
                self.0
            }
        }

        impl From<&'static str> for $type {
            fn from(id: &'static str) -> Self {
                $type(id)
            }
        }
    };
}

otaa_id!(
    /// Device EUI (64-bit), as a hex string.
    pub struct DevEui;
);
otaa_id!(
    /// Application / Join EUI (64-bit), as a hex string.
    pub struct AppEui;
);
otaa_id!(
    /// Application key (128-bit), as a hex string.
    pub struct AppKey;
);

/// Over-the-air activation credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct Otaa {
    pub dev_eui: DevEui,
    pub app_eui: AppEui,
    pub app_key: AppKey,
    /// Per-region sub-channel mask; `None` selects the stack's default
    /// mask for the region.
    pub channel_mask: Option<&'static str>,
}

/// Everything the stack needs to bring the radio up, owned by the device
/// for its entire lifetime and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct DeviceConfig {
    pub radio: RadioPins,
    pub region: Region,
    pub otaa: Otaa,
}
