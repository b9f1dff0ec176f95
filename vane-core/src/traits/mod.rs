//! Collaborator traits
//!
//! These traits define the interface between the coordinator and the
//! platform: the companion transport, the tick service, and the renderer.

pub mod display;
pub mod ticks;
pub mod transport;

pub use display::{Region, Renderer};
pub use ticks::TickService;
pub use transport::{DropReason, SendFailure, Transport, TransportError};
