// SPDX-License-Identifier: MIT OR Apache-2.0
//! Host event notifications.
//!
//! The host dispatches a time-change notification whenever the playhead
//! moves, including moves triggered by the sequencer's own mutations.
//! Rather than calling back into the model synchronously, hosts push
//! events into a channel and the session drains them at its own pace,
//! which keeps re-entrant notification chains bounded.

use crossbeam_channel::Sender;

/// Notifications emitted by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// The playhead moved
    TimeChanged {
        /// Previous playhead position
        old_time: i64,
        /// New playhead position
        new_time: i64,
    },
}

/// Event sender handle given to a host implementation.
///
/// Hosts hold this sender and emit events when their state changes.
#[derive(Debug, Clone)]
pub struct HostEventSender {
    sender: Option<Sender<HostEvent>>,
}

impl HostEventSender {
    /// Create an event sender connected to a channel
    pub fn new(sender: Sender<HostEvent>) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    /// Create a disconnected sender (for tests or when events are not needed)
    pub fn dummy() -> Self {
        Self { sender: None }
    }

    /// Emit an event (silent if no receiver is attached)
    pub fn emit(&self, event: HostEvent) {
        if let Some(ref tx) = self.sender {
            // Ignore send errors, the receiver might be dropped
            let _ = tx.send(event);
        }
    }
}

impl Default for HostEventSender {
    fn default() -> Self {
        Self::dummy()
    }
}
