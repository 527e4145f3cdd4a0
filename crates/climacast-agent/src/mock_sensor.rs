//! Synthetic climate sensor for running the agent without hardware

use climacast_core::sensors::{ClimateSensor, SensorError};
use log::debug;

/// Generates temperature and humidity readings that drift over time.
///
/// With a dropout period of `n`, every `n`th cycle fails the way a flaky
/// sensor does: the temperature read errors and humidity comes back as NaN.
pub struct MockClimateSensor {
    /// Seconds of simulated time since start
    elapsed_secs: f64,
    /// Simulated time per cycle
    step_secs: f64,
    /// Cycles started so far
    cycles: u64,
    dropout_every: Option<u32>,
}

impl MockClimateSensor {
    pub fn new(step_secs: f64, dropout_every: Option<u32>) -> Self {
        Self {
            elapsed_secs: 0.0,
            step_secs,
            cycles: 0,
            dropout_every: dropout_every.filter(|&n| n > 0),
        }
    }

    /// Whether the current cycle is a dropout
    fn dropping_out(&self) -> bool {
        self.dropout_every
            .is_some_and(|n| self.cycles > 0 && self.cycles % u64::from(n) == 0)
    }

    /// Temperature: 20–26 °C sinusoidal with slow drift
    fn temperature_at(t: f64) -> f32 {
        (23.0 + 3.0 * (t / 120.0).sin() + 0.5 * (t / 37.0).cos()) as f32
    }

    /// Humidity: 40–60 % with a different period
    fn humidity_at(t: f64) -> f32 {
        (50.0 + 10.0 * (t / 180.0).sin() + 2.0 * (t / 23.0).cos()) as f32
    }
}

impl ClimateSensor for MockClimateSensor {
    // Temperature is read first in every cycle, so it drives the clock
    async fn read_temperature(&mut self) -> Result<f32, SensorError> {
        self.cycles += 1;
        self.elapsed_secs += self.step_secs;

        if self.dropping_out() {
            debug!("Simulating sensor dropout on cycle {}", self.cycles);
            return Err(SensorError::ReadFailed {
                sensor: "mock",
                operation: "read temperature",
                details: "simulated dropout",
            });
        }
        Ok(Self::temperature_at(self.elapsed_secs))
    }

    async fn read_humidity(&mut self) -> Result<f32, SensorError> {
        if self.dropping_out() {
            return Ok(f32::NAN);
        }
        Ok(Self::humidity_at(self.elapsed_secs))
    }
}
