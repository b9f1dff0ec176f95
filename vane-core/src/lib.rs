//! Board-agnostic core logic for the weather watch face
//!
//! This crate contains all application logic that does not depend on a
//! specific platform:
//!
//! - Collaborator traits (transport, tick service, renderer)
//! - Clock source and time formatting
//! - Weather refresh state machine and scheduler
//! - Display composition and the weather snapshot
//! - The coordinator that ties them together
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

// Must come first so the logging macros are visible to every module
#[macro_use]
mod fmt;

pub mod clock;
pub mod compose;
pub mod config;
pub mod coordinator;
pub mod diagnostics;
pub mod event;
pub mod refresh;
pub mod traits;

#[cfg(test)]
mod testing;

pub use clock::{ClockSource, HourFormat, TimeSample, Timestamp};
pub use compose::{DisplayComposer, WeatherSnapshot};
pub use config::{ConfigError, VaneConfig};
pub use coordinator::{Coordinator, Lifecycle};
pub use diagnostics::Diagnostics;
pub use event::Event;
pub use refresh::{RefreshScheduler, RefreshState};
pub use traits::{
    DropReason, Region, Renderer, SendFailure, TickService, Transport, TransportError,
};
