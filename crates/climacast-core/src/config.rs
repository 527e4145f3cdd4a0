//! Agent configuration
//!
//! Every option is fixed at process start; there is no runtime
//! reconfiguration. Defaults match the deployed agent.

use serde::{Deserialize, Deserializer};
use thiserror_no_std::Error;

use crate::filter::{FilterError, SmoothingFilter};
use crate::transport::Destination;

/// Default UDP port the plotting consumer listens on
pub const DEFAULT_PORT: u16 = 52791;

/// Default metadata re-announcement cadence, in cycles
pub const DEFAULT_METADATA_CADENCE: u32 = 10;

/// Default cycle period in milliseconds
pub const DEFAULT_CYCLE_PERIOD_MS: u32 = 2000;

/// Default temperature smoothing: weight 0.1, seeded at 25 °C
pub const DEFAULT_TEMPERATURE_FILTER: FilterConfig = FilterConfig::new(0.1, 25.0);

/// Default humidity smoothing: weight 0.1, seeded at 50 %RH
pub const DEFAULT_HUMIDITY_FILTER: FilterConfig = FilterConfig::new(0.1, 50.0);

/// Error types for configuration validation
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Smoothing parameters of one filter are invalid
    #[error("{quantity} filter: {reason}")]
    Filter {
        /// Which filter
        quantity: &'static str,
        /// Underlying filter error
        reason: FilterError,
    },

    /// Cadence of zero cycles
    #[error("Metadata cadence must be at least one cycle")]
    InvalidCadence,

    /// Cycle period of zero
    #[error("Cycle period must be positive")]
    InvalidPeriod,

    /// Destination port zero
    #[error("Destination port must be non-zero")]
    InvalidPort,
}

/// Smoothing parameters for one quantity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterConfig {
    /// Weight of each new sample, in (0, 1]
    pub weight: f32,
    /// Initial smoothed value before any sample arrives
    pub seed: f32,
}

impl FilterConfig {
    pub const fn new(weight: f32, seed: f32) -> Self {
        Self { weight, seed }
    }

    /// Build the filter described by this configuration
    pub fn build(&self) -> Result<SmoothingFilter, FilterError> {
        SmoothingFilter::new(self.weight, self.seed)
    }

    /// Fill the keys missing from `partial` with this configuration's values
    pub fn merged(&self, partial: PartialFilterConfig) -> Self {
        Self {
            weight: partial.weight.unwrap_or(self.weight),
            seed: partial.seed.unwrap_or(self.seed),
        }
    }
}

/// A filter table as written in a settings file, where either key may be
/// left out
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialFilterConfig {
    pub weight: Option<f32>,
    pub seed: Option<f32>,
}

fn temperature_filter<'de, D>(deserializer: D) -> Result<FilterConfig, D::Error>
where
    D: Deserializer<'de>,
{
    PartialFilterConfig::deserialize(deserializer).map(|p| DEFAULT_TEMPERATURE_FILTER.merged(p))
}

fn humidity_filter<'de, D>(deserializer: D) -> Result<FilterConfig, D::Error>
where
    D: Deserializer<'de>,
{
    PartialFilterConfig::deserialize(deserializer).map(|p| DEFAULT_HUMIDITY_FILTER.merged(p))
}

/// Complete agent configuration
///
/// Every key is optional when deserialized. A filter table that sets only
/// `weight` or only `seed` keeps that quantity's default for the other.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Temperature smoothing (°C)
    #[serde(deserialize_with = "temperature_filter")]
    pub temperature: FilterConfig,
    /// Humidity smoothing (%RH)
    #[serde(deserialize_with = "humidity_filter")]
    pub humidity: FilterConfig,
    /// Metadata is re-announced every this many cycles
    pub metadata_cadence: u32,
    /// Time between cycles
    pub cycle_period_ms: u32,
    /// Where frames are broadcast
    pub destination: Destination,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE_FILTER,
            humidity: DEFAULT_HUMIDITY_FILTER,
            metadata_cadence: DEFAULT_METADATA_CADENCE,
            cycle_period_ms: DEFAULT_CYCLE_PERIOD_MS,
            destination: Destination::new(Destination::BROADCAST, DEFAULT_PORT),
        }
    }
}

impl AgentConfig {
    /// Build the temperature and humidity filters
    pub fn filters(&self) -> Result<(SmoothingFilter, SmoothingFilter), ConfigError> {
        let temperature = self
            .temperature
            .build()
            .map_err(|reason| ConfigError::Filter {
                quantity: "temperature",
                reason,
            })?;
        let humidity = self
            .humidity
            .build()
            .map_err(|reason| ConfigError::Filter {
                quantity: "humidity",
                reason,
            })?;
        Ok((temperature, humidity))
    }

    /// Check every option, returning the first problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.filters()?;

        if self.metadata_cadence == 0 {
            return Err(ConfigError::InvalidCadence);
        }
        if self.cycle_period_ms == 0 {
            return Err(ConfigError::InvalidPeriod);
        }
        if self.destination.port == 0 {
            return Err(ConfigError::InvalidPort);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AgentConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.temperature.seed, 25.0);
        assert_eq!(config.humidity.seed, 50.0);
        assert_eq!(config.metadata_cadence, 10);
        assert_eq!(config.cycle_period_ms, 2000);
        assert_eq!(config.destination.address, [255, 255, 255, 255]);
    }

    #[test]
    fn test_partial_filter_keeps_missing_defaults() {
        let weight_only = PartialFilterConfig {
            weight: Some(0.3),
            seed: None,
        };
        assert_eq!(
            DEFAULT_TEMPERATURE_FILTER.merged(weight_only),
            FilterConfig::new(0.3, 25.0)
        );

        let seed_only = PartialFilterConfig {
            weight: None,
            seed: Some(40.0),
        };
        assert_eq!(
            DEFAULT_HUMIDITY_FILTER.merged(seed_only),
            FilterConfig::new(0.1, 40.0)
        );
    }

    #[test]
    fn test_rejects_bad_weight() {
        let mut config = AgentConfig::default();
        config.humidity.weight = 0.0;

        assert_eq!(
            config.validate(),
            Err(ConfigError::Filter {
                quantity: "humidity",
                reason: FilterError::InvalidWeight { weight: 0.0 },
            })
        );
    }

    #[test]
    fn test_rejects_zero_cadence_period_and_port() {
        let mut config = AgentConfig::default();
        config.metadata_cadence = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidCadence));

        let mut config = AgentConfig::default();
        config.cycle_period_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidPeriod));

        let mut config = AgentConfig::default();
        config.destination.port = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidPort));
    }
}
