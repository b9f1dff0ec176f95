//! Inter-task communication channels
//!
//! Every platform callback is funneled through [`EVENT_CHANNEL`] so the
//! coordinator sees one event at a time, in arrival order.

use core::sync::atomic::AtomicBool;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use heapless::Vec;

use vane_core::{DropReason, Event, SendFailure, Timestamp};
use vane_protocol::{OutboundRequest, RequestId, MAX_WEATHER_MESSAGE_SIZE};

/// Channel capacity for coordinator events
const EVENT_CHANNEL_SIZE: usize = 8;

/// Outbox holds a single message, like the watch's
const OUTBOX_SIZE: usize = 1;

/// Owned form of [`Event`] that can cross task boundaries
#[derive(Debug, Clone)]
pub enum AppEvent {
    Tick { now: Timestamp, use_24h: bool },
    Inbound(Vec<u8, MAX_WEATHER_MESSAGE_SIZE>),
    InboundDropped(DropReason),
    OutboxSent(RequestId),
    OutboxFailed(RequestId, SendFailure),
}

impl AppEvent {
    /// Borrow as a coordinator event
    pub fn as_event(&self) -> Event<'_> {
        match self {
            AppEvent::Tick { now, use_24h } => Event::Tick {
                now: *now,
                use_24h: *use_24h,
            },
            AppEvent::Inbound(bytes) => Event::Inbound(bytes),
            AppEvent::InboundDropped(reason) => Event::InboundDropped(*reason),
            AppEvent::OutboxSent(id) => Event::OutboxSent(*id),
            AppEvent::OutboxFailed(id, reason) => Event::OutboxFailed(*id, *reason),
        }
    }
}

/// Events for the coordinator run loop
pub static EVENT_CHANNEL: Channel<CriticalSectionRawMutex, AppEvent, EVENT_CHANNEL_SIZE> =
    Channel::new();

/// Triggers queued by the watch for the companion
pub static OUTBOX: Channel<CriticalSectionRawMutex, OutboundRequest, OUTBOX_SIZE> =
    Channel::new();

/// Companion link state
pub static LINK_OPEN: AtomicBool = AtomicBool::new(false);
