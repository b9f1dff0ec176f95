//! Display composition
//!
//! Merges the latest time sample and weather fields into the text shown on
//! the watch face.

pub mod composer;
pub mod snapshot;

pub use composer::{DisplayComposer, WeatherText, LOADING_TEXT, WEATHER_TEXT_CAPACITY};
pub use snapshot::WeatherSnapshot;
