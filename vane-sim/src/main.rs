//! Vane host simulator
//!
//! Runs the watch face coordinator on the embassy std executor against a
//! simulated clock, a loopback companion link and a console renderer.
//!
//! # Usage
//!
//! ```bash
//! # Two simulated hours at four minutes per second
//! vane-sim
//!
//! # With config file
//! vane-sim --config vane-sim/vane.toml
//!
//! # Flaky companion, 12-hour clock, verbose logging
//! RUST_LOG=debug vane-sim --fail-every 2 --twelve-hour
//! ```

mod channels;
mod config;
mod renderer;
mod tasks;
mod ticks;
mod transport;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use embassy_executor::Spawner;
use log::{error, info, warn};

use vane_core::{Coordinator, HourFormat, Timestamp};

use channels::{AppEvent, EVENT_CHANNEL};
use config::SimConfig;
use renderer::ConsoleRenderer;
use tasks::CompanionScript;
use ticks::SimClock;
use transport::LoopbackTransport;

/// Vane watch face simulator
#[derive(Parser, Debug)]
#[command(name = "vane-sim")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Start time (HH:MM)
    #[arg(short = 's', long)]
    start: Option<String>,

    /// Simulated minutes to run
    #[arg(short = 'm', long)]
    minutes: Option<u32>,

    /// Real milliseconds per simulated minute
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Weather refresh interval in minutes
    #[arg(short = 'r', long)]
    refresh: Option<u8>,

    /// Force 12-hour display
    #[arg(long)]
    twelve_hour: bool,

    /// Fail every Nth trigger delivery
    #[arg(long)]
    fail_every: Option<u32>,
}

impl Args {
    /// Load the file (if any) and apply command-line overrides
    fn into_config(self) -> Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => SimConfig::load(path)?,
            None => SimConfig::default(),
        };

        if let Some(start) = self.start {
            config.simulation.start = start;
        }
        if let Some(minutes) = self.minutes {
            config.simulation.minutes = minutes;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.simulation.tick_ms = tick_ms;
        }
        if let Some(refresh) = self.refresh {
            config.watchface.refresh_interval_min = refresh;
        }
        if self.twelve_hour {
            config.watchface.hour_format_override = Some(HourFormat::Hour12);
        }
        if let Some(fail_every) = self.fail_every {
            config.simulation.fail_every = fail_every;
        }

        config.validate()?;
        Ok(config)
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let code = match run(spawner).await {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            1
        }
    };
    std::process::exit(code);
}

async fn run(spawner: Spawner) -> Result<()> {
    let config = Args::parse().into_config()?;
    let simulation = config.simulation;

    let (hour, minute) = simulation.start_time()?;
    SimClock::set(Timestamp::from_day_time(0, hour, minute), simulation.use_24h);
    info!(
        "Vane simulator starting at {:02}:{:02}, refresh every {} min",
        hour, minute, config.watchface.refresh_interval_min
    );

    let mut coordinator = Coordinator::new(
        config.watchface,
        LoopbackTransport,
        SimClock,
        ConsoleRenderer::default(),
    )
    .map_err(|e| anyhow!("invalid watch face config: {:?}", e))?;

    spawner
        .spawn(tasks::tick_task(simulation.tick_ms))
        .map_err(|e| anyhow!("spawning tick task: {:?}", e))?;
    spawner
        .spawn(tasks::companion_task(CompanionScript {
            reports: simulation.weather,
            reply_delay_ms: simulation.reply_delay_ms,
            fail_every: simulation.fail_every,
        }))
        .map_err(|e| anyhow!("spawning companion task: {:?}", e))?;

    if let Err(e) = coordinator.start() {
        warn!("Companion link unavailable, clock only: {:?}", e);
    }

    let mut remaining = simulation.minutes;
    while remaining > 0 {
        let event = EVENT_CHANNEL.receive().await;
        if matches!(event, AppEvent::Tick { .. }) {
            remaining -= 1;
        }
        coordinator.handle(event.as_event());
    }

    coordinator.stop();

    let diagnostics = coordinator.diagnostics();
    info!(
        "Simulation finished: {} frames, {} requests sent, {} delivered, {} failures",
        coordinator.renderer().frames(),
        diagnostics.requests_sent,
        diagnostics.requests_delivered,
        diagnostics.total_failures()
    );
    Ok(())
}
