//! In-memory collaborators for unit tests

use std::string::{String, ToString};
use std::vec::Vec;

use vane_protocol::OutboundRequest;

use crate::clock::Timestamp;
use crate::traits::{Region, Renderer, TickService, Transport, TransportError};

/// Renderer that records every call
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<(Region, String)>,
}

impl RecordingRenderer {
    /// Most recent text set on `region`
    pub fn last(&self, region: Region) -> Option<&str> {
        self.calls
            .iter()
            .rev()
            .find(|(r, _)| *r == region)
            .map(|(_, text)| text.as_str())
    }
}

impl Renderer for RecordingRenderer {
    fn set_text(&mut self, region: Region, text: &str) {
        self.calls.push((region, text.to_string()));
    }
}

/// Transport with scripted failures
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    pub is_open: bool,
    pub opened: u32,
    pub closed: u32,
    pub sent: Vec<OutboundRequest>,
    /// Error returned by every `open` while set
    pub fail_open: Option<TransportError>,
    /// Error returned by the next `send`
    pub reject_next: Option<TransportError>,
}

impl Transport for ScriptedTransport {
    fn open(&mut self) -> Result<(), TransportError> {
        if let Some(error) = self.fail_open {
            return Err(error);
        }
        self.is_open = true;
        self.opened += 1;
        Ok(())
    }

    fn close(&mut self) {
        self.is_open = false;
        self.closed += 1;
    }

    fn send(&mut self, request: &OutboundRequest) -> Result<(), TransportError> {
        if !self.is_open {
            return Err(TransportError::Closed);
        }
        if let Some(error) = self.reject_next.take() {
            return Err(error);
        }
        self.sent.push(*request);
        Ok(())
    }
}

/// Tick service with a hand-set clock
#[derive(Debug)]
pub struct ManualTicks {
    pub now: Timestamp,
    pub use_24h: bool,
    pub subscribed: bool,
    pub subscriptions: u32,
}

impl ManualTicks {
    pub fn new(now: Timestamp, use_24h: bool) -> Self {
        Self {
            now,
            use_24h,
            subscribed: false,
            subscriptions: 0,
        }
    }
}

impl TickService for ManualTicks {
    fn now(&self) -> Timestamp {
        self.now
    }

    fn is_24h_style(&self) -> bool {
        self.use_24h
    }

    fn subscribe_minutes(&mut self) {
        self.subscribed = true;
        self.subscriptions += 1;
    }

    fn unsubscribe(&mut self) {
        self.subscribed = false;
    }
}
