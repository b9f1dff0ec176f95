//! Refresh state machine definition
//!
//! Whether a new request may be issued is a function of the current state
//! alone.

use vane_protocol::RequestId;

use super::events::RefreshEvent;

/// Refresh states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RefreshState {
    /// No request outstanding
    #[default]
    Idle,
    /// Request allocated, send being attempted
    Pending(RequestId),
    /// Send accepted, waiting for the delivery outcome
    InFlight(RequestId),
}

impl RefreshState {
    /// Check if a new request may start
    pub fn is_idle(&self) -> bool {
        matches!(self, RefreshState::Idle)
    }

    /// Identifier of the outstanding request, if any
    pub fn request_id(&self) -> Option<RequestId> {
        match self {
            RefreshState::Idle => None,
            RefreshState::Pending(id) | RefreshState::InFlight(id) => Some(*id),
        }
    }

    /// Number of outstanding requests (0 or 1)
    pub fn outstanding(&self) -> usize {
        usize::from(!self.is_idle())
    }

    /// Process an event and return the next state
    pub fn transition(self, event: RefreshEvent) -> Self {
        use RefreshEvent::*;
        use RefreshState::*;

        match (self, event) {
            // Only an idle machine may start a request
            (Idle, Trigger(id)) => Pending(id),

            // Pending transitions
            (Pending(id), SendAccepted) => InFlight(id),
            (Pending(_), SendRejected) => Idle,

            // InFlight transitions
            (InFlight(_), Delivered) => Idle,
            (InFlight(_), DeliveryFailed) => Idle,

            // An outstanding request that never reported back is abandoned
            (Pending(_) | InFlight(_), TimedOut) => Idle,

            // Default: stay in current state
            _ => self,
        }
    }
}
