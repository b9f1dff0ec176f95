//! Embassy tasks for the simulated platform

mod companion;
mod tick;

pub use companion::{companion_task, CompanionScript};
pub use tick::tick_task;
