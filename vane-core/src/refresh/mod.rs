//! Weather refresh scheduling
//!
//! Decides on each minute tick whether to ask the companion for fresh
//! weather, and tracks the single outstanding request. The state machine is
//! explicit, finite, and deterministic.

pub mod events;
pub mod machine;
pub mod scheduler;

pub use events::RefreshEvent;
pub use machine::RefreshState;
pub use scheduler::{OutcomeDisposition, RefreshScheduler};
