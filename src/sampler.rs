//! ADC sampling and conversion to calibrated physical units.
//!
//! The sampler owns the ADC handle exclusively: selecting the active input
//! channel is peripheral-wide mutable state, so routing every conversion
//! through one owner keeps the temperature and battery paths from stepping
//! on each other.

use core::fmt::Write;

use crate::MAX_PAYLOAD;

/// ADC input wired to the die-temperature sensor.
pub const TEMPERATURE_CHANNEL: u8 = 4;
/// ADC input wired to the battery sense divider.
pub const BATTERY_CHANNEL: u8 = 3;

const ADC_VREF: f32 = 3.3;

/// Narrow contract of the ADC peripheral.
pub trait Adc {
    type Error: core::fmt::Debug;

    /// One-time peripheral bring-up (clocking, temperature sensor enable).
    fn init(&mut self);

    /// Route `channel` to the converter. Peripheral-wide side effect.
    fn select_channel(&mut self, channel: u8);

    /// Perform one conversion on the currently selected channel.
    fn read(&mut self) -> Result<u16, Self::Error>;
}

/// A sampling attempt failed at the hardware. No value is fabricated on
/// this path; the caller decides whether to skip the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum SampleError<E> {
    Adc(E),
}

/// One cycle's worth of calibrated readings. Both fields are finite by
/// construction (the conversion is a linear map over a 12-bit sample).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    pub temperature_c: f32,
    pub battery_v: f32,
}

impl SensorReading {
    /// Render the uplink payload: `"<temp>,<battery>"`, two decimal digits
    /// each, ASCII, no surrounding whitespace.
    pub fn encode(&self) -> heapless::String<MAX_PAYLOAD> {
        let mut payload = heapless::String::new();
        // Two fixed-precision f32s can never approach the 242-byte ceiling.
        write!(&mut payload, "{:.2},{:.2}", self.temperature_c, self.battery_v).unwrap();
        payload
    }
}

#[cfg(feature = "defmt-03")]
impl defmt::Format for SensorReading {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "SensorReading {{ {} 'C, {} V }}", self.temperature_c, self.battery_v)
    }
}

pub struct Sampler<A: Adc> {
    adc: A,
}

impl<A: Adc> Sampler<A> {
    pub fn new(adc: A) -> Self {
        Self { adc }
    }

    /// One-time hardware bring-up; must run before the first conversion.
    pub fn init(&mut self) {
        self.adc.init();
    }

    /// Die temperature in degrees Celsius.
    ///
    /// Maps the raw 12-bit sample to a voltage against the 3.3 V reference,
    /// then applies the RP2040 datasheet model (§4.9.4): the sensor reads
    /// 0.706 V at 27 °C with a -1.721 mV/°C slope, so temperature falls as
    /// the raw sample rises.
    pub fn read_temperature(&mut self) -> Result<f32, SampleError<A::Error>> {
        self.adc.select_channel(TEMPERATURE_CHANNEL);
        let raw = self.adc.read().map_err(SampleError::Adc)?;
        let voltage = raw as f32 * ADC_VREF / 4095.0;
        Ok(27.0 - (voltage - 0.706) / 0.001721)
    }

    /// Battery voltage in volts, upstream of the on-board divider.
    ///
    /// The sense line passes through a 1:3 divider before the ADC, hence
    /// the x3.0 in the scale. The 4096 denominator (vs 4095 on the
    /// temperature path) reproduces the reference calibration as observed.
    pub fn read_battery(&mut self) -> Result<f32, SampleError<A::Error>> {
        self.adc.select_channel(BATTERY_CHANNEL);
        let raw = self.adc.read().map_err(SampleError::Adc)?;
        Ok(raw as f32 * (ADC_VREF * 3.0 / 4096.0))
    }

    /// Fresh reading of both channels, temperature first.
    pub fn sample(&mut self) -> Result<SensorReading, SampleError<A::Error>> {
        let temperature_c = self.read_temperature()?;
        let battery_v = self.read_battery()?;
        Ok(SensorReading { temperature_c, battery_v })
    }
}
