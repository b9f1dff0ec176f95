//! Simulated wall clock
//!
//! Simulated minutes advance on the tick task's schedule, much faster than
//! real time.

use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use vane_core::{TickService, Timestamp};

static NOW_SECS: AtomicU64 = AtomicU64::new(0);
static USE_24H: AtomicBool = AtomicBool::new(true);
static SUBSCRIBED: AtomicBool = AtomicBool::new(false);

/// Handle to the shared simulated clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SimClock;

impl SimClock {
    /// Set the clock and the 24-hour style flag
    pub fn set(now: Timestamp, use_24h: bool) {
        NOW_SECS.store(now.0, Ordering::Release);
        USE_24H.store(use_24h, Ordering::Release);
    }

    /// Advance one minute and return the new time
    pub fn advance_minute() -> Timestamp {
        let now = Timestamp(NOW_SECS.load(Ordering::Acquire)).plus_minutes(1);
        NOW_SECS.store(now.0, Ordering::Release);
        now
    }

    /// Whether minute ticks should be delivered
    pub fn is_subscribed() -> bool {
        SUBSCRIBED.load(Ordering::Acquire)
    }
}

impl TickService for SimClock {
    fn now(&self) -> Timestamp {
        Timestamp(NOW_SECS.load(Ordering::Acquire))
    }

    fn is_24h_style(&self) -> bool {
        USE_24H.load(Ordering::Acquire)
    }

    fn subscribe_minutes(&mut self) {
        SUBSCRIBED.store(true, Ordering::Release);
    }

    fn unsubscribe(&mut self) {
        SUBSCRIBED.store(false, Ordering::Release);
    }
}
