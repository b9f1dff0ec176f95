//! Loopback transport to the simulated companion

use core::sync::atomic::Ordering;

use log::trace;
use vane_core::{Transport, TransportError};
use vane_protocol::OutboundRequest;

use crate::channels::{LINK_OPEN, OUTBOX};

/// Transport backed by the in-process outbox channel
#[derive(Debug, Default)]
pub struct LoopbackTransport;

impl Transport for LoopbackTransport {
    fn open(&mut self) -> Result<(), TransportError> {
        LINK_OPEN.store(true, Ordering::Release);
        Ok(())
    }

    fn close(&mut self) {
        LINK_OPEN.store(false, Ordering::Release);
        OUTBOX.clear();
    }

    fn send(&mut self, request: &OutboundRequest) -> Result<(), TransportError> {
        if !LINK_OPEN.load(Ordering::Acquire) {
            return Err(TransportError::Closed);
        }
        trace!("Outbox <- {:02x?}", request.as_bytes());
        OUTBOX
            .try_send(*request)
            .map_err(|_| TransportError::Busy)
    }
}
