// SPDX-License-Identifier: MIT OR Apache-2.0
//! Playback window boundary: visible range and playhead.

/// Boundary to the host's playback range and current time.
///
/// Implementations emit [`crate::HostEvent::TimeChanged`] whenever the
/// playhead moves, including moves caused by the sequencer itself; see
/// the event module for how consumers drain those notifications.
pub trait PlaybackWindow {
    /// Get the visible `(min, max)` time range
    fn range(&self) -> (i64, i64);

    /// Set the visible `(min, max)` time range
    fn set_range(&mut self, min: i64, max: i64);

    /// Get the current playhead position
    fn current_time(&self) -> i64;

    /// Move the playhead
    fn set_current_time(&mut self, time: i64);
}
