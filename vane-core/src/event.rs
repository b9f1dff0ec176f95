//! Events delivered to the coordinator by the host run loop

use vane_protocol::RequestId;

use crate::clock::Timestamp;
use crate::traits::{DropReason, SendFailure};

/// One unit of work for [`Coordinator::handle`](crate::Coordinator::handle)
///
/// The host delivers events strictly one at a time, in the order its
/// dispatcher produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event<'a> {
    /// A minute boundary passed
    Tick {
        /// Wall-clock time at the boundary
        now: Timestamp,
        /// System 24-hour style flag
        use_24h: bool,
    },
    /// Encoded dictionary received from the companion
    Inbound(&'a [u8]),
    /// Inbound message discarded by the platform
    InboundDropped(DropReason),
    /// Trigger delivered to the companion
    OutboxSent(RequestId),
    /// Trigger could not be delivered
    OutboxFailed(RequestId, SendFailure),
}
