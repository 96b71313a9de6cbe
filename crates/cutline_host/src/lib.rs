// SPDX-License-Identifier: MIT OR Apache-2.0
//! Host-application boundary for Cutline.
//!
//! The sequencer never talks to a DCC directly; everything it needs from
//! the host goes through three narrow traits:
//! - [`ShotStore`] - timed bookmark entities backing shots
//! - [`PlaybackWindow`] - visible time range and playhead
//! - [`CameraBinding`] - camera lifecycle, keyframe shifting, snapping
//!
//! [`MemoryHost`] implements all three in process for tests and headless
//! embeddings, and doubles as the reference semantics for real host
//! adapters.

pub mod camera;
pub mod error;
pub mod event;
pub mod memory;
pub mod playback;
pub mod store;

pub use camera::{CameraBinding, CameraId, ViewportId};
pub use error::{HostError, Result};
pub use event::{HostEvent, HostEventSender};
pub use memory::MemoryHost;
pub use playback::PlaybackWindow;
pub use store::{BookmarkData, BookmarkId, ShotStore};
