//! Companion transport trait

use vane_protocol::OutboundRequest;

/// Errors returned synchronously by the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Transport is not open
    Closed,
    /// Outbox already holds a message
    Busy,
    /// Companion is not connected
    NotConnected,
    /// Platform refused to open the link
    OpenFailed,
}

/// Why an inbound message was discarded before decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DropReason {
    /// Message larger than the inbox
    BufferOverflow,
    /// Inbox still held an unprocessed message
    Busy,
    /// Message could not be routed to this app
    Unroutable,
    /// Any other platform reason
    Other,
}

/// Why an accepted send was not delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SendFailure {
    /// Companion did not acknowledge in time
    Timeout,
    /// Companion refused the message
    Rejected,
    /// Link dropped while sending
    NotConnected,
    /// Any other platform reason
    Other,
}

/// Trait for the companion link
///
/// `send` only hands the message to the platform outbox. The delivery
/// outcome arrives later as [`Event::OutboxSent`](crate::Event::OutboxSent)
/// or [`Event::OutboxFailed`](crate::Event::OutboxFailed) carrying the
/// request id. Inbound batches arrive as [`Event::Inbound`](crate::Event::Inbound).
pub trait Transport {
    /// Open the link; inbound traffic may start immediately afterwards
    fn open(&mut self) -> Result<(), TransportError>;

    /// Close the link
    fn close(&mut self);

    /// Queue an encoded trigger for delivery
    fn send(&mut self, request: &OutboundRequest) -> Result<(), TransportError>;
}
