//! Simulator configuration
//!
//! Loaded from an optional TOML file:
//!
//! ```toml
//! [watchface]
//! refresh_interval_min = 30
//! hour_format_override = "Hour12"
//!
//! [simulation]
//! tick_ms = 200
//! start = "10:28"
//! minutes = 90
//! fail_every = 3
//!
//! [[simulation.weather]]
//! kelvin_x100 = 29415
//! conditions = "Sunny"
//! ```
//!
//! Command-line flags override file values.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use vane_core::VaneConfig;

/// Complete simulator configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Watch face settings
    pub watchface: VaneConfig,
    /// Simulated environment
    pub simulation: SimulationConfig,
}

/// One weather report the companion can send
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherReport {
    /// Temperature in hundredths of a Kelvin, as weather services report it
    pub kelvin_x100: i32,
    /// Short conditions text
    pub conditions: String,
}

/// Simulated environment settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Real milliseconds per simulated minute
    pub tick_ms: u64,
    /// Wall-clock start time, `HH:MM`
    pub start: String,
    /// System 24-hour style flag
    pub use_24h: bool,
    /// Simulated minutes to run before stopping
    pub minutes: u32,
    /// Companion reply delay in real milliseconds
    pub reply_delay_ms: u64,
    /// Fail every Nth trigger delivery (0 = never)
    pub fail_every: u32,
    /// Reports the companion cycles through
    pub weather: Vec<WeatherReport>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_ms: 250,
            start: "10:28".into(),
            use_24h: true,
            minutes: 120,
            reply_delay_ms: 50,
            fail_every: 0,
            weather: vec![
                WeatherReport {
                    kelvin_x100: 29_415,
                    conditions: "Sunny".into(),
                },
                WeatherReport {
                    kelvin_x100: 28_815,
                    conditions: "Partly cloudy".into(),
                },
                WeatherReport {
                    kelvin_x100: 28_315,
                    conditions: "Rain".into(),
                },
            ],
        }
    }
}

impl SimulationConfig {
    /// Parse the `HH:MM` start time
    pub fn start_time(&self) -> Result<(u8, u8)> {
        let Some((hour, minute)) = self.start.split_once(':') else {
            bail!("start time {:?} is not HH:MM", self.start);
        };
        let hour: u8 = hour
            .trim()
            .parse()
            .with_context(|| format!("invalid hour in {:?}", self.start))?;
        let minute: u8 = minute
            .trim()
            .parse()
            .with_context(|| format!("invalid minute in {:?}", self.start))?;
        if hour > 23 || minute > 59 {
            bail!("start time {:?} out of range", self.start);
        }
        Ok((hour, minute))
    }
}

impl SimConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn parse(text: &str) -> Result<Self> {
        let config: SimConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section
    pub fn validate(&self) -> Result<()> {
        if let Err(e) = self.watchface.validate() {
            bail!("invalid [watchface] section: {:?}", e);
        }
        self.simulation.start_time()?;
        if self.simulation.tick_ms == 0 {
            bail!("tick_ms must be at least 1");
        }
        if self.simulation.weather.is_empty() {
            bail!("[simulation] needs at least one weather report");
        }
        Ok(())
    }
}
