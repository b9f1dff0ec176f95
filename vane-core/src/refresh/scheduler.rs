//! Refresh scheduler
//!
//! Owns the refresh state machine and the request id counter, and applies
//! the refresh cadence: a request is due on every minute that is a multiple
//! of the refresh interval. A failed request is not retried early; the next
//! due minute is the retry. A request whose outcome never arrives is
//! abandoned at the next due minute, which issues a fresh one.

use vane_protocol::RequestId;

use super::events::RefreshEvent;
use super::machine::RefreshState;
use crate::config::DEFAULT_REFRESH_INTERVAL_MIN;

/// What happened to a delivery outcome report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutcomeDisposition {
    /// Outcome closed the outstanding request
    Applied,
    /// Outcome names a request that is not in flight
    Stale,
}

/// Weather refresh scheduler
#[derive(Debug, Clone)]
pub struct RefreshScheduler {
    /// Current refresh state
    state: RefreshState,
    /// Identifier for the next request
    next_id: RequestId,
    /// Refresh cadence in minutes
    interval_min: u8,
    /// Requests that ended undelivered since the last delivery
    consecutive_failures: u8,
}

impl RefreshScheduler {
    /// Create a scheduler with the given cadence
    ///
    /// An interval of zero falls back to the default cadence.
    pub fn new(interval_min: u8) -> Self {
        Self {
            state: RefreshState::Idle,
            next_id: RequestId::default(),
            interval_min: if interval_min == 0 {
                DEFAULT_REFRESH_INTERVAL_MIN
            } else {
                interval_min
            },
            consecutive_failures: 0,
        }
    }

    /// Get current refresh state
    pub fn state(&self) -> RefreshState {
        self.state
    }

    /// Get refresh cadence in minutes
    pub fn interval_min(&self) -> u8 {
        self.interval_min
    }

    /// Requests that ended undelivered since the last delivery
    pub fn consecutive_failures(&self) -> u8 {
        self.consecutive_failures
    }

    /// Check if `minute` is a refresh minute
    pub fn is_due(&self, minute: u8) -> bool {
        minute % self.interval_min == 0
    }

    /// Evaluate a minute tick
    ///
    /// Returns the id of a new request if one is due. A request still
    /// outstanding at a due minute is abandoned first, so at most one is ever
    /// outstanding. The scheduler is then `Pending` until the caller reports
    /// [`send_accepted`](Self::send_accepted) or
    /// [`send_rejected`](Self::send_rejected).
    pub fn on_tick(&mut self, minute: u8) -> Option<RequestId> {
        if !self.is_due(minute) {
            return None;
        }
        if !self.state.is_idle() {
            self.apply(RefreshEvent::TimedOut);
        }

        let id = self.next_id;
        self.next_id = id.next();
        self.apply(RefreshEvent::Trigger(id));
        Some(id)
    }

    /// Transport accepted the trigger for `id`
    pub fn send_accepted(&mut self, id: RequestId) {
        if self.state == RefreshState::Pending(id) {
            self.apply(RefreshEvent::SendAccepted);
        }
    }

    /// Transport refused the trigger for `id`
    pub fn send_rejected(&mut self, id: RequestId) {
        if self.state == RefreshState::Pending(id) {
            self.apply(RefreshEvent::SendRejected);
        }
    }

    /// Delivery outcome for `id` arrived
    pub fn on_outcome(&mut self, id: RequestId, delivered: bool) -> OutcomeDisposition {
        if self.state != RefreshState::InFlight(id) {
            return OutcomeDisposition::Stale;
        }

        let event = if delivered {
            RefreshEvent::Delivered
        } else {
            RefreshEvent::DeliveryFailed
        };
        self.apply(event);
        OutcomeDisposition::Applied
    }

    /// Forget any outstanding request
    pub fn reset(&mut self) {
        self.state = RefreshState::Idle;
        self.consecutive_failures = 0;
    }

    fn apply(&mut self, event: RefreshEvent) {
        if event.is_failure() {
            self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        } else if event == RefreshEvent::Delivered {
            self.consecutive_failures = 0;
        }
        self.state = self.state.transition(event);
    }
}

impl Default for RefreshScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_REFRESH_INTERVAL_MIN)
    }
}
