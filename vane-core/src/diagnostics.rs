//! Diagnostic counters
//!
//! Every non-fatal failure is logged and counted here. Nothing in this
//! system is surfaced to the user beyond a stale or "Loading..." line.

/// Running totals of link and decode events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Diagnostics {
    /// Triggers handed to the transport
    pub requests_sent: u32,
    /// Triggers the companion acknowledged
    pub requests_delivered: u32,
    /// Triggers refused by the transport or not delivered
    pub send_failures: u32,
    /// Outcomes that matched no in-flight request
    pub stale_outcomes: u32,
    /// Requests abandoned because no outcome arrived before the next refresh
    pub timed_out_requests: u32,
    /// Attempts to open the companion link that failed
    pub open_failures: u32,
    /// Inbound messages dropped by the platform
    pub inbound_dropped: u32,
    /// Inbound batches decoded
    pub batches_received: u32,
    /// Fields skipped because their value was unusable
    pub field_errors: u32,
    /// Entries skipped because their key is not part of the protocol
    pub unknown_keys: u32,
    /// Batches cut short by a structural error
    pub malformed_batches: u32,
}

impl Diagnostics {
    /// Total failures of any kind
    pub fn total_failures(&self) -> u32 {
        self.send_failures
            .saturating_add(self.stale_outcomes)
            .saturating_add(self.timed_out_requests)
            .saturating_add(self.open_failures)
            .saturating_add(self.inbound_dropped)
            .saturating_add(self.field_errors)
            .saturating_add(self.unknown_keys)
            .saturating_add(self.malformed_batches)
    }
}

/// Saturating increment
pub(crate) fn bump(counter: &mut u32) {
    *counter = counter.saturating_add(1);
}
