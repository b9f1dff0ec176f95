//! Display composer
//!
//! Owns the time and weather text buffers and pushes them to the renderer.

use heapless::String;
use vane_protocol::text::push_truncated;
use vane_protocol::{temperature_text, WeatherField};

use super::snapshot::WeatherSnapshot;
use crate::clock::{ClockSource, TimeSample, TimeText, TIME_PLACEHOLDER};
use crate::traits::{Region, Renderer};

/// Capacity of the weather line
pub const WEATHER_TEXT_CAPACITY: usize = 32;

/// Weather line shown until both fields are known
pub const LOADING_TEXT: &str = "Loading...";

/// Rendered weather line
pub type WeatherText = String<WEATHER_TEXT_CAPACITY>;

/// Display composer
///
/// The time region changes only on ticks and the weather region only on
/// weather batches; neither update touches the other region's buffer.
#[derive(Debug, Clone)]
pub struct DisplayComposer {
    time_text: TimeText,
    weather_text: WeatherText,
    snapshot: WeatherSnapshot,
}

impl Default for DisplayComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayComposer {
    /// Create a composer showing the placeholders
    pub fn new() -> Self {
        let mut composer = Self {
            time_text: TimeText::new(),
            weather_text: WeatherText::new(),
            snapshot: WeatherSnapshot::new(),
        };
        composer.reset();
        composer
    }

    /// Current time text
    pub fn time_text(&self) -> &str {
        &self.time_text
    }

    /// Current weather text
    pub fn weather_text(&self) -> &str {
        &self.weather_text
    }

    /// Last known weather values
    pub fn snapshot(&self) -> &WeatherSnapshot {
        &self.snapshot
    }

    /// Render a new time sample
    pub fn on_tick<R: Renderer>(&mut self, sample: &TimeSample, renderer: &mut R) {
        self.time_text = ClockSource::format(sample);
        renderer.set_text(Region::Time, &self.time_text);
    }

    /// Merge a batch of decoded fields and render the weather line
    ///
    /// Returns the number of fields merged.
    pub fn on_weather_batch<I, R>(&mut self, fields: I, renderer: &mut R) -> usize
    where
        I: IntoIterator<Item = WeatherField>,
        R: Renderer,
    {
        let mut merged = 0;
        for field in fields {
            match self.snapshot.merge(field) {
                Ok(()) => merged += 1,
                Err(e) => warn!("Weather field rejected: {:?}", e),
            }
        }

        self.compose_weather();
        self.render_weather(renderer);
        merged
    }

    /// Push the weather region to the renderer as it is
    pub fn render_weather<R: Renderer>(&self, renderer: &mut R) {
        renderer.set_text(Region::Weather, &self.weather_text);
    }

    /// Drop all weather data and return to the placeholders
    pub fn reset(&mut self) {
        self.snapshot.clear();
        self.time_text.clear();
        let _ = self.time_text.push_str(TIME_PLACEHOLDER);
        self.set_loading();
    }

    fn compose_weather(&mut self) {
        match compose_line(&self.snapshot) {
            Some(line) => self.weather_text = line,
            None => self.set_loading(),
        }
    }

    fn set_loading(&mut self) {
        self.weather_text.clear();
        let _ = self.weather_text.push_str(LOADING_TEXT);
    }
}

/// `"<temperature>, <conditions>"`, or `None` until both are known
fn compose_line(snapshot: &WeatherSnapshot) -> Option<WeatherText> {
    let celsius = snapshot.temperature()?;
    let conditions = snapshot.conditions()?;
    // The snapshot only holds renderable temperatures
    let temperature = temperature_text(celsius).ok()?;

    let mut line = WeatherText::new();
    push_truncated(&mut line, &temperature);
    push_truncated(&mut line, ", ");
    push_truncated(&mut line, conditions);
    Some(line)
}
