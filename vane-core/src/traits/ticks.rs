//! Tick service trait

use crate::clock::Timestamp;

/// Trait for the system clock and its minute tick subscription
///
/// While subscribed, the platform delivers one
/// [`Event::Tick`](crate::Event::Tick) per minute boundary, each boundary
/// exactly once.
pub trait TickService {
    /// Current local wall-clock time
    fn now(&self) -> Timestamp;

    /// Whether the user selected 24-hour time
    fn is_24h_style(&self) -> bool;

    /// Start delivering minute ticks
    fn subscribe_minutes(&mut self);

    /// Stop delivering ticks
    fn unsubscribe(&mut self);
}
