//! Transmission cycle controller
//!
//! One [`CycleController::tick`] samples the sensor, updates the filters,
//! builds a frame and hands it to the transport. The outer scheduler owns the
//! cadence of ticks and must never overlap them.
//!
//! ## Cycle steps
//!
//! 1. Read temperature and humidity. Failed or non-finite readings become
//!    `None` and leave their filter untouched.
//! 2. Apply valid readings to their filters.
//! 3. Advance the cycle counter.
//! 4. Re-announce metadata if the cycle index is a multiple of the cadence.
//! 5. Append one data line per series. Filtered values are always sent, so a
//!    failing sensor keeps retransmitting the last good smoothed value.
//! 6. Send the frame as one datagram. Send failures are reported, never
//!    retried; the next tick is the retry.

use log::{debug, trace, warn};
use thiserror_no_std::Error;

use crate::app_state::{
    FILTERED_HUMIDITY, FILTERED_TEMPERATURE, RAW_HUMIDITY, RAW_TEMPERATURE, TelemetryContext,
};
use crate::protocol::EncodeError;
use crate::sensors::{ClimateSensor, sample_from};
use crate::transport::{Transport, TransportError};

/// Controller state between and during ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    /// Waiting for the next tick
    Idle,
    /// Building or handing off a frame
    Transmitting,
}

/// Errors reported by a tick.
///
/// The context has already been advanced when either is returned, so the
/// caller logs it and keeps ticking.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleError {
    /// The frame could not be built
    #[error("Frame encoding failed: {0}")]
    Encode(EncodeError),
    /// The frame was built but not delivered
    #[error("Frame send failed: {0}")]
    Transport(TransportError),
}

impl From<EncodeError> for CycleError {
    fn from(value: EncodeError) -> Self {
        Self::Encode(value)
    }
}

impl From<TransportError> for CycleError {
    fn from(value: TransportError) -> Self {
        Self::Transport(value)
    }
}

/// Summary of a successfully transmitted cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleReport {
    /// Index of this cycle
    pub cycle: u32,
    /// Whether the frame carried the metadata lines
    pub metadata: bool,
    /// Frame size in bytes
    pub frame_len: usize,
    /// Raw temperature, if the read succeeded
    pub temperature: Option<f32>,
    /// Raw humidity, if the read succeeded
    pub humidity: Option<f32>,
}

/// Drives one sensor and one transport through transmission cycles
pub struct CycleController<S, T> {
    sensor: S,
    transport: T,
    state: CycleState,
}

impl<S, T> CycleController<S, T>
where
    S: ClimateSensor,
    T: Transport,
{
    pub fn new(sensor: S, transport: T) -> Self {
        Self {
            sensor,
            transport,
            state: CycleState::Idle,
        }
    }

    /// Current controller state
    pub fn state(&self) -> CycleState {
        self.state
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Release the sensor and transport
    pub fn into_parts(self) -> (S, T) {
        (self.sensor, self.transport)
    }

    /// Run one complete cycle.
    ///
    /// Always returns to [`CycleState::Idle`], whether the frame was sent or
    /// not.
    pub async fn tick(&mut self, ctx: &mut TelemetryContext) -> Result<CycleReport, CycleError> {
        self.state = CycleState::Transmitting;
        let result = self.transmit(ctx).await;
        self.state = CycleState::Idle;
        result
    }

    async fn transmit(&mut self, ctx: &mut TelemetryContext) -> Result<CycleReport, CycleError> {
        let temperature_reading = self.sensor.read_temperature().await;
        let humidity_reading = self.sensor.read_humidity().await;

        if let Err(e) = &temperature_reading {
            warn!("Temperature read failed: {}", e);
        }
        if let Err(e) = &humidity_reading {
            warn!("Humidity read failed: {}", e);
        }

        let temperature = sample_from(temperature_reading);
        let humidity = sample_from(humidity_reading);
        debug!("Raw readings: temperature={:?} humidity={:?}", temperature, humidity);

        if let Some(t) = temperature {
            ctx.temperature.apply(t);
        }
        if let Some(h) = humidity {
            ctx.humidity.apply(h);
        }

        let cycle = ctx.counter.advance();
        let metadata = ctx.announces_metadata(cycle);

        let mut builder = ctx.registry.begin_frame();
        if metadata {
            builder.render_metadata(&ctx.labels)?;
        }
        builder.render_data(RAW_TEMPERATURE, temperature)?;
        builder.render_data(RAW_HUMIDITY, humidity)?;
        builder.render_data(FILTERED_TEMPERATURE, Some(ctx.temperature.value()))?;
        builder.render_data(FILTERED_HUMIDITY, Some(ctx.humidity.value()))?;
        let frame = builder.end_frame();

        trace!(
            "Cycle {}: {} lines, {} bytes, metadata={}",
            cycle,
            frame.line_count(),
            frame.len(),
            metadata
        );

        self.transport
            .send(&ctx.destination, frame.as_bytes())
            .await?;

        Ok(CycleReport {
            cycle,
            metadata,
            frame_len: frame.len(),
            temperature,
            humidity,
        })
    }
}
