//! Application-wide state and error types for climacast
//!
//! [`TelemetryContext`] owns everything that persists between cycles: both
//! smoothing filters, the series registry and the cycle counter. It is passed
//! by `&mut` into each tick, so there is no process-wide mutable state.

mod series;

pub use series::*;

use thiserror_no_std::Error;

use crate::config::{AgentConfig, ConfigError};
use crate::filter::SmoothingFilter;
use crate::protocol::{EncodeError, PlotLabels, SeriesRegistry};
use crate::transport::Destination;

/// Setup-time errors. All of them abort startup.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(ConfigError),
    #[error("Series registration failed: {0}")]
    Registry(EncodeError),
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<EncodeError> for AppError {
    fn from(value: EncodeError) -> Self {
        Self::Registry(value)
    }
}

/// Monotonic cycle index that wraps on overflow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleCounter(u32);

impl CycleCounter {
    /// Counter starting at cycle 0
    pub const fn new() -> Self {
        Self(0)
    }

    /// Counter starting at an arbitrary cycle
    pub const fn starting_at(cycle: u32) -> Self {
        Self(cycle)
    }

    /// Index of the next cycle
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Return the current cycle index and move to the next one
    pub fn advance(&mut self) -> u32 {
        let cycle = self.0;
        self.0 = self.0.wrapping_add(1);
        cycle
    }
}

/// State carried from one cycle to the next
#[derive(Debug)]
pub struct TelemetryContext {
    pub temperature: SmoothingFilter,
    pub humidity: SmoothingFilter,
    pub registry: SeriesRegistry,
    pub counter: CycleCounter,
    /// Metadata is re-announced when `cycle % metadata_cadence == 0`
    pub metadata_cadence: u32,
    pub labels: PlotLabels<'static>,
    pub destination: Destination,
}

impl TelemetryContext {
    /// Validate `config`, build both filters and declare the climate series
    pub fn from_config(config: &AgentConfig) -> Result<Self, AppError> {
        config.validate()?;
        let (temperature, humidity) = config.filters()?;

        let mut registry = SeriesRegistry::new();
        declare_climate_series(&mut registry)?;

        Ok(Self {
            temperature,
            humidity,
            registry,
            counter: CycleCounter::new(),
            metadata_cadence: config.metadata_cadence,
            labels: CLIMATE_LABELS,
            destination: config.destination,
        })
    }

    /// Whether `cycle` re-announces the plot metadata
    pub fn announces_metadata(&self, cycle: u32) -> bool {
        // from_config rejects zero; a zero set afterwards announces every cycle
        self.metadata_cadence <= 1 || cycle % self.metadata_cadence == 0
    }
}
