// SPDX-License-Identifier: MIT OR Apache-2.0
//! Session layer for Cutline.
//!
//! Everything an embedding drives lives here:
//! - [`SequencerSession`] - the explicit context object owning the host
//!   connection, the loaded sequence and the user settings
//! - [`PreviewController`] - swaps the preview camera as the playhead
//!   crosses shot boundaries
//! - Export record building and writers
//! - Persisted settings
//!
//! ## Architecture
//!
//! The session is the single owner of mutable state. Host notifications
//! arrive through a channel and are drained by [`SequencerSession::pump`],
//! which keeps re-entrant notification chains (the session moves the
//! playhead, the host notifies, the handler moves it again) bounded and
//! single-threaded.

pub mod export;
pub mod preview;
pub mod session;
pub mod settings;

pub use export::{ShotRecord, CSV_HEADER};
pub use preview::{PreviewController, PREVIEW_CAMERA_NAME};
pub use session::{Host, SequencerSession, MAX_PUMP_EVENTS};
pub use settings::{ExportSettings, SequencerSettings, SETTINGS_FILE_NAME, SETTINGS_FORMAT_VERSION};
