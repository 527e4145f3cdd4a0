use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;
use sht4x::Sht4xAsync;

use super::{ClimateSensor, SensorError};

/// Sensirion SHT40 temperature/humidity sensor.
///
/// One measurement yields both quantities. `read_temperature` triggers it and
/// keeps the humidity for the following `read_humidity` call, so a cycle costs
/// a single bus transaction.
pub struct Sht40Sensor<I, D> {
    sensor: Sht4xAsync<I, D>,
    delay: D,
    pending_humidity: Option<f32>,
}

impl<I: I2c, D: DelayNs> Sht40Sensor<I, D> {
    pub fn new(i2c: I, delay: D) -> Self {
        Self {
            sensor: Sht4xAsync::<I, D>::new(i2c),
            delay,
            pending_humidity: None,
        }
    }

    async fn measure(&mut self) -> Result<(f32, f32), SensorError> {
        let measurement = self
            .sensor
            .measure(sht4x::Precision::High, &mut self.delay)
            .await
            .map_err(|e| {
                log::error!("SHT40 measurement failed: {:?}", e);
                SensorError::ReadFailed {
                    sensor: "SHT40",
                    operation: "measure temperature/humidity",
                    details: "I2C communication error or sensor not responding",
                }
            })?;

        Ok((
            measurement.temperature_celsius().to_num::<f32>(),
            measurement.humidity_percent().to_num::<f32>(),
        ))
    }
}

impl<I: I2c, D: DelayNs> ClimateSensor for Sht40Sensor<I, D> {
    async fn read_temperature(&mut self) -> Result<f32, SensorError> {
        self.pending_humidity = None;
        let (temperature, humidity) = self.measure().await?;
        self.pending_humidity = Some(humidity);
        Ok(temperature)
    }

    async fn read_humidity(&mut self) -> Result<f32, SensorError> {
        match self.pending_humidity.take() {
            Some(humidity) => Ok(humidity),
            None => self.measure().await.map(|(_, humidity)| humidity),
        }
    }
}
