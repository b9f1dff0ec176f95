//! Minute tick task
//!
//! Advances the simulated clock one minute per period and, while the watch
//! face is subscribed, delivers the boundary as a tick event.

use embassy_time::{Duration, Ticker};
use log::{info, trace};
use vane_core::TickService;

use crate::channels::{AppEvent, EVENT_CHANNEL};
use crate::ticks::SimClock;

#[embassy_executor::task]
pub async fn tick_task(period_ms: u64) {
    info!("Tick task started ({} ms per minute)", period_ms);

    let mut ticker = Ticker::every(Duration::from_millis(period_ms));

    loop {
        ticker.next().await;

        let now = SimClock::advance_minute();
        if !SimClock::is_subscribed() {
            trace!("Tick at {} with no subscriber", now.0);
            continue;
        }

        EVENT_CHANNEL
            .send(AppEvent::Tick {
                now,
                use_24h: SimClock.is_24h_style(),
            })
            .await;
    }
}
