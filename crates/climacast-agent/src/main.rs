//! Host agent for the climacast telemetry pipeline.
//!
//! Samples a synthetic climate sensor, smooths the readings and broadcasts one
//! TIMEPLOT frame per cycle over UDP so a plotting consumer on the local
//! network can be exercised without hardware.
//!
//! # Environment
//!
//! | Variable                       | Meaning                               |
//! |--------------------------------|---------------------------------------|
//! | `CLIMACAST_CONFIG`             | Path to a TOML settings file          |
//! | `CLIMACAST_BROADCAST_ADDR`     | IPv4 destination address              |
//! | `CLIMACAST_PORT`               | UDP destination port                  |
//! | `CLIMACAST_PERIOD_MS`          | Cycle period                          |
//! | `CLIMACAST_CADENCE`            | Metadata re-announcement cadence      |
//! | `CLIMACAST_TEMPERATURE_WEIGHT` | Temperature smoothing weight          |
//! | `CLIMACAST_TEMPERATURE_SEED`   | Initial smoothed temperature          |
//! | `CLIMACAST_HUMIDITY_WEIGHT`    | Humidity smoothing weight             |
//! | `CLIMACAST_HUMIDITY_SEED`      | Initial smoothed humidity             |
//! | `CLIMACAST_MAX_CYCLES`         | Exit after this many cycles           |
//! | `CLIMACAST_DROPOUT_EVERY`      | Fail every Nth synthetic reading      |
//!
//! Variables may also be set in a `.env` file. Log output is controlled by
//! `RUST_LOG`.

mod mock_sensor;
mod settings;
mod udp;

use std::process;
use std::thread;
use std::time::{Duration, Instant};

use embassy_futures::block_on;
use log::{debug, error, info};

use climacast_core::app_state::TelemetryContext;
use climacast_core::cycle::{CycleController, CycleError};

use mock_sensor::MockClimateSensor;
use udp::UdpBroadcastTransport;

// ---------------------------------------------------------------------------
// Setup
// ---------------------------------------------------------------------------

fn fail(context: &str, error: impl core::fmt::Display) -> ! {
    error!("{}: {}", context, error);
    process::exit(1);
}

fn main() {
    settings::load_dotenv();
    env_logger::init();

    info!("Starting climacast agent");

    let settings = settings::load().unwrap_or_else(|e| fail("Invalid settings", e));
    let config = settings.telemetry;

    let mut ctx =
        TelemetryContext::from_config(&config).unwrap_or_else(|e| fail("Setup failed", e));

    let transport =
        UdpBroadcastTransport::bind_any().unwrap_or_else(|e| fail("Cannot open UDP socket", e));

    let period = Duration::from_millis(u64::from(config.cycle_period_ms));
    let sensor = MockClimateSensor::new(period.as_secs_f64(), settings.dropout_every);
    let mut controller = CycleController::new(sensor, transport);

    info!(
        "Broadcasting to {} every {} ms, metadata every {} cycles",
        ctx.destination, config.cycle_period_ms, ctx.metadata_cadence
    );

    // -----------------------------------------------------------------------
    // Cycle loop
    // -----------------------------------------------------------------------

    let mut completed: u64 = 0;
    loop {
        let started = Instant::now();

        match block_on(controller.tick(&mut ctx)) {
            Ok(report) => {
                debug!(
                    "Cycle {}: {} bytes{}, filtered {} °C / {} %RH",
                    report.cycle,
                    report.frame_len,
                    if report.metadata { " with metadata" } else { "" },
                    ctx.temperature.value(),
                    ctx.humidity.value()
                );
            }
            Err(CycleError::Transport(e)) => error!("Frame not delivered: {}", e),
            Err(e) => error!("Cycle failed: {}", e),
        }

        completed += 1;
        if settings.max_cycles.is_some_and(|max| completed >= max) {
            break;
        }

        // Cycles never overlap; a slow cycle just starts the next one late
        if let Some(remaining) = period.checked_sub(started.elapsed()) {
            thread::sleep(remaining);
        }
    }

    info!("Stopping after {} cycles", completed);
}
