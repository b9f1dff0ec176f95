//! Renderer trait for the watch face

/// Text regions on the watch face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Region {
    /// Large centered clock
    Time,
    /// Weather summary line below the clock
    Weather,
}

/// Trait for the display layer
///
/// The renderer owns the actual layers and fonts; the coordinator only hands
/// it finished text. Calls are synchronous, non-blocking, and idempotent:
/// setting the same text twice has no visible effect.
pub trait Renderer {
    /// Replace the text shown in `region`
    fn set_text(&mut self, region: Region, text: &str);
}
