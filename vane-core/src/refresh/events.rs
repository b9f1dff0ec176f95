//! Events that trigger refresh state transitions

use vane_protocol::RequestId;

/// Events that can trigger refresh state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RefreshEvent {
    // Tick events
    /// A refresh is due and a new request id was allocated
    Trigger(RequestId),
    /// A refresh is due while the previous request never reported back
    TimedOut,

    // Send events
    /// Transport accepted the encoded trigger
    SendAccepted,
    /// Transport refused the encoded trigger synchronously
    SendRejected,

    // Outcome events
    /// Companion acknowledged delivery
    Delivered,
    /// Delivery failed after the send was accepted
    DeliveryFailed,
}

impl RefreshEvent {
    /// Check if this event ends a request without delivering it
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            RefreshEvent::SendRejected | RefreshEvent::DeliveryFailed | RefreshEvent::TimedOut
        )
    }
}
