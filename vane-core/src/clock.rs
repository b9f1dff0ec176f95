//! Clock source
//!
//! Turns a wall-clock timestamp into a per-tick time sample and renders it
//! as `HH:MM` text.

use core::fmt::Write;

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Capacity of the rendered time text
pub const TIME_TEXT_CAPACITY: usize = 6;

/// Text shown in the time region before the first tick
pub const TIME_PLACEHOLDER: &str = "00:00";

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_DAY: u64 = 24 * 60 * SECONDS_PER_MINUTE;

/// Rendered time text
pub type TimeText = String<TIME_TEXT_CAPACITY>;

/// Local wall-clock time in seconds since the epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// Build a timestamp from a day count and a time of day
    pub const fn from_day_time(day: u64, hour: u8, minute: u8) -> Self {
        Timestamp(day * SECONDS_PER_DAY + (hour as u64 * 60 + minute as u64) * SECONDS_PER_MINUTE)
    }

    /// This timestamp advanced by whole minutes
    pub const fn plus_minutes(self, minutes: u64) -> Self {
        Timestamp(self.0.saturating_add(minutes.saturating_mul(SECONDS_PER_MINUTE)))
    }
}

/// 12-hour or 24-hour display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HourFormat {
    /// `01`–`12`, no AM/PM marker
    Hour12,
    /// `00`–`23`
    #[default]
    Hour24,
}

impl HourFormat {
    /// Format selected by the system 24h-style flag
    pub const fn from_24h_flag(use_24h: bool) -> Self {
        if use_24h {
            HourFormat::Hour24
        } else {
            HourFormat::Hour12
        }
    }
}

/// Time of day captured at one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeSample {
    hour: u8,
    minute: u8,
    format: HourFormat,
}

impl TimeSample {
    /// Create a sample, rejecting out-of-range fields
    pub fn new(hour: u8, minute: u8, format: HourFormat) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self {
            hour,
            minute,
            format,
        })
    }

    /// Hour of day (0-23)
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Minute of hour (0-59)
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Display format
    pub fn format(&self) -> HourFormat {
        self.format
    }

    /// Hour as it appears on the display
    pub fn display_hour(&self) -> u8 {
        match self.format {
            HourFormat::Hour24 => self.hour,
            HourFormat::Hour12 => match self.hour % 12 {
                0 => 12,
                h => h,
            },
        }
    }
}

/// Converts timestamps into time samples
///
/// An optional override pins the hour format regardless of the system flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockSource {
    format_override: Option<HourFormat>,
}

impl ClockSource {
    /// Create a clock source that follows the system format flag
    pub const fn new() -> Self {
        Self {
            format_override: None,
        }
    }

    /// Create a clock source with a fixed hour format
    pub const fn with_override(format_override: Option<HourFormat>) -> Self {
        Self { format_override }
    }

    /// Take a sample of `now`
    pub fn sample(&self, now: Timestamp, use_24h: bool) -> TimeSample {
        let seconds_today = now.0 % SECONDS_PER_DAY;
        let minutes_today = seconds_today / SECONDS_PER_MINUTE;

        TimeSample {
            hour: (minutes_today / 60) as u8,
            minute: (minutes_today % 60) as u8,
            format: self
                .format_override
                .unwrap_or(HourFormat::from_24h_flag(use_24h)),
        }
    }

    /// Render a sample as `HH:MM` / `hh:mm`
    pub fn format(sample: &TimeSample) -> TimeText {
        let mut text = TimeText::new();
        // Two digits, a colon and two digits always fit
        let _ = write!(text, "{:02}:{:02}", sample.display_hour(), sample.minute);
        text
    }
}
