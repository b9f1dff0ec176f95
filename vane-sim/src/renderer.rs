//! Console renderer
//!
//! Prints the watch face as a single log line whenever a region changes.

use log::info;
use vane_core::{Region, Renderer};

/// Renderer that logs the face to the console
#[derive(Debug, Default)]
pub struct ConsoleRenderer {
    time: String,
    weather: String,
    frames: u32,
}

impl ConsoleRenderer {
    /// Number of visible changes so far
    pub fn frames(&self) -> u32 {
        self.frames
    }
}

impl Renderer for ConsoleRenderer {
    fn set_text(&mut self, region: Region, text: &str) {
        let slot = match region {
            Region::Time => &mut self.time,
            Region::Weather => &mut self.weather,
        };
        if slot.as_str() == text {
            return;
        }
        slot.clear();
        slot.push_str(text);

        self.frames += 1;
        info!("[ {:>5} | {:<32} ]", self.time, self.weather);
    }
}
