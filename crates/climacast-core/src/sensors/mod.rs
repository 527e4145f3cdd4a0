//! Sensor trait definitions
//!
//! The cycle controller only needs two scalar readings per cycle. Drivers for
//! real hardware live behind feature flags; the host agent supplies its own
//! synthetic implementation.

#[cfg(feature = "sensor-sht40")]
mod sht40;

#[cfg(feature = "sensor-sht40")]
pub use sht40::Sht40Sensor;

use thiserror_no_std::Error;

/// Error types for sensor reads
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// Communication with the sensor failed
    #[error("{sensor}: failed to {operation}: {details}")]
    ReadFailed {
        /// Sensor name
        sensor: &'static str,
        /// What was attempted
        operation: &'static str,
        /// Additional context
        details: &'static str,
    },
}

/// A temperature/humidity sensor read once per cycle.
///
/// Each reading may fail independently. Implementations may return NaN as
/// well; the controller treats any non-finite value like a failed read.
pub trait ClimateSensor {
    /// Read the temperature in degrees Celsius
    fn read_temperature(&mut self) -> impl Future<Output = Result<f32, SensorError>>;

    /// Read the relative humidity in percent
    fn read_humidity(&mut self) -> impl Future<Output = Result<f32, SensorError>>;
}

/// Convert a sensor result into an optional sample.
///
/// Failed reads and non-finite values both become `None`.
pub fn sample_from(result: Result<f32, SensorError>) -> Option<f32> {
    match result {
        Ok(value) if value.is_finite() => Some(value),
        _ => None,
    }
}
