//! Configuration types
//!
//! Board-agnostic settings for the watch face. Hosts may deserialize these
//! with serde (feature `serde`); nothing is persisted across restarts.

use crate::clock::HourFormat;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default refresh cadence in minutes
pub const DEFAULT_REFRESH_INTERVAL_MIN: u8 = 30;

/// Longest accepted refresh cadence in minutes
pub const MAX_REFRESH_INTERVAL_MIN: u8 = 60;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Refresh interval outside 1..=60 minutes
    InvalidRefreshInterval(u8),
}

/// Watch face configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VaneConfig {
    /// Request weather on minutes that are a multiple of this value
    pub refresh_interval_min: u8,
    /// Force 12h or 24h display instead of following the system setting
    pub hour_format_override: Option<HourFormat>,
}

impl Default for VaneConfig {
    fn default() -> Self {
        Self {
            refresh_interval_min: DEFAULT_REFRESH_INTERVAL_MIN,
            hour_format_override: None,
        }
    }
}

impl VaneConfig {
    /// Check configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh_interval_min == 0 || self.refresh_interval_min > MAX_REFRESH_INTERVAL_MIN {
            return Err(ConfigError::InvalidRefreshInterval(
                self.refresh_interval_min,
            ));
        }
        Ok(())
    }
}
