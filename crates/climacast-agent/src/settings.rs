//! Agent settings: optional TOML file plus `CLIMACAST_*` environment overrides
//!
//! ```toml
//! max_cycles = 100
//! dropout_every = 7
//!
//! [telemetry]
//! metadata_cadence = 10
//! cycle_period_ms = 2000
//!
//! [telemetry.temperature]
//! weight = 0.1
//! seed = 25.0
//!
//! [telemetry.destination]
//! address = [192, 168, 1, 255]
//! port = 52791
//! ```

use std::net::Ipv4Addr;
use std::path::Path;
use std::str::FromStr;
use std::{env, fs};

use climacast_core::config::AgentConfig;
use log::{debug, warn};
use serde::Deserialize;
use thiserror_no_std::Error;

/// Names the TOML settings file
pub const CONFIG_PATH_VAR: &str = "CLIMACAST_CONFIG";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read {path}: {details}")]
    Read { path: String, details: String },
    #[error("Failed to parse {path}: {details}")]
    Parse { path: String, details: String },
    #[error("Invalid value {value:?} for {key}")]
    InvalidOverride { key: &'static str, value: String },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Core telemetry options
    pub telemetry: AgentConfig,
    /// Stop after this many cycles; run forever when unset
    pub max_cycles: Option<u64>,
    /// Make every Nth synthetic reading fail
    pub dropout_every: Option<u32>,
}

impl Settings {
    /// Parse settings from TOML text; `origin` only labels errors
    pub fn from_toml(text: &str, origin: &str) -> Result<Self, SettingsError> {
        toml::from_str(text).map_err(|e| SettingsError::Parse {
            path: origin.to_string(),
            details: e.to_string(),
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path).map_err(|e| SettingsError::Read {
            path: path.display().to_string(),
            details: e.to_string(),
        })?;
        Self::from_toml(&text, &path.display().to_string())
    }

    /// Apply `CLIMACAST_*` overrides obtained through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let telemetry = &mut self.telemetry;

        if let Some(address) = parse_var::<Ipv4Addr, _>(&lookup, "CLIMACAST_BROADCAST_ADDR")? {
            telemetry.destination.address = address.octets();
        }
        override_with(&lookup, "CLIMACAST_PORT", &mut telemetry.destination.port)?;
        override_with(&lookup, "CLIMACAST_CADENCE", &mut telemetry.metadata_cadence)?;
        override_with(&lookup, "CLIMACAST_PERIOD_MS", &mut telemetry.cycle_period_ms)?;
        override_with(
            &lookup,
            "CLIMACAST_TEMPERATURE_WEIGHT",
            &mut telemetry.temperature.weight,
        )?;
        override_with(&lookup, "CLIMACAST_TEMPERATURE_SEED", &mut telemetry.temperature.seed)?;
        override_with(&lookup, "CLIMACAST_HUMIDITY_WEIGHT", &mut telemetry.humidity.weight)?;
        override_with(&lookup, "CLIMACAST_HUMIDITY_SEED", &mut telemetry.humidity.seed)?;

        if let Some(max) = parse_var(&lookup, "CLIMACAST_MAX_CYCLES")? {
            self.max_cycles = Some(max);
        }
        if let Some(every) = parse_var(&lookup, "CLIMACAST_DROPOUT_EVERY")? {
            self.dropout_every = Some(every);
        }
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, SettingsError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };

    debug!("Override {}={}", key, raw);
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|_| SettingsError::InvalidOverride { key, value: raw })
}

fn override_with<T, F>(lookup: &F, key: &'static str, target: &mut T) -> Result<(), SettingsError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = parse_var(lookup, key)? {
        *target = value;
    }
    Ok(())
}

/// Load `.env` into the process environment, if present
pub fn load_dotenv() {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            warn!("Ignoring unreadable .env file: {}", e);
        }
    }
}

/// Resolve settings from the file named by `CLIMACAST_CONFIG` (if any) and the
/// process environment
pub fn load() -> Result<Settings, SettingsError> {
    let mut settings = match env::var(CONFIG_PATH_VAR) {
        Ok(path) => Settings::from_file(Path::new(&path))?,
        Err(_) => Settings::default(),
    };
    settings.apply_overrides(|key| env::var(key).ok())?;
    Ok(settings)
}
