//! Simulated companion
//!
//! Pushes weather once as soon as the link opens, then answers every
//! trigger with a delivery outcome followed by a fresh weather batch.

use core::sync::atomic::Ordering;

use embassy_time::Timer;
use log::{debug, info, warn};
use vane_core::{DropReason, SendFailure};
use vane_protocol::{encode_weather, kelvin_to_celsius};

use crate::channels::{AppEvent, EVENT_CHANNEL, LINK_OPEN, OUTBOX};
use crate::config::WeatherReport;

/// Poll period while waiting for the watch to open the link
const LINK_POLL_MS: u64 = 10;

/// Companion behaviour
#[derive(Debug, Clone)]
pub struct CompanionScript {
    /// Reports served in rotation
    pub reports: Vec<WeatherReport>,
    /// Delay before acknowledging a trigger
    pub reply_delay_ms: u64,
    /// Fail every Nth delivery (0 = never)
    pub fail_every: u32,
}

impl CompanionScript {
    fn should_fail(&self, delivery: u32) -> bool {
        self.fail_every != 0 && delivery % self.fail_every == 0
    }
}

#[embassy_executor::task]
pub async fn companion_task(script: CompanionScript) {
    info!("Companion task started");

    while !LINK_OPEN.load(Ordering::Acquire) {
        Timer::after_millis(LINK_POLL_MS).await;
    }

    let mut reports = script.reports.iter().cycle();
    if let Some(report) = reports.next() {
        push_weather(report).await;
    }

    let mut deliveries = 0u32;
    loop {
        let request = OUTBOX.receive().await;
        Timer::after_millis(script.reply_delay_ms).await;

        if !LINK_OPEN.load(Ordering::Acquire) {
            debug!("Link closed, request {:?} lost", request.id());
            continue;
        }

        deliveries = deliveries.wrapping_add(1);
        if script.should_fail(deliveries) {
            EVENT_CHANNEL
                .send(AppEvent::OutboxFailed(request.id(), SendFailure::Timeout))
                .await;
            continue;
        }

        EVENT_CHANNEL.send(AppEvent::OutboxSent(request.id())).await;
        if let Some(report) = reports.next() {
            push_weather(report).await;
        }
    }
}

async fn push_weather(report: &WeatherReport) {
    let celsius = kelvin_to_celsius(report.kelvin_x100);
    debug!("Companion -> {}C, {}", celsius, report.conditions);

    match encode_weather(Some(celsius), Some(&report.conditions)) {
        Ok(bytes) => EVENT_CHANNEL.send(AppEvent::Inbound(bytes)).await,
        Err(e) => {
            warn!("Weather batch does not fit: {:?}", e);
            EVENT_CHANNEL
                .send(AppEvent::InboundDropped(DropReason::BufferOverflow))
                .await;
        }
    }
}
