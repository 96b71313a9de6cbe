// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline model for Cutline.
//!
//! This crate owns the chronological shot sequence:
//! - Validated shot and sequence names
//! - Closed integer intervals with containment queries
//! - Move/resize mutations that write through to the host boundary
//! - Overlap and gap auto-layout passes
//! - Focus/defocus classification of the playback window
//!
//! ## Architecture
//!
//! Every mutation goes through the traits in `cutline_host`; the model
//! itself holds no host handles, so a call site decides which host it
//! mutates. After any mutation that can change chronological order the
//! sequence re-sorts itself, and positional queries are only meaningful
//! on that sorted state.

pub mod error;
pub mod focus;
pub mod naming;
pub mod sequence;
pub mod shot;

pub use error::{Result, SequencerError};
pub use focus::{DefocusAction, FocusState, NextFocusPolicy, DEFAULT_DEFOCUS_PAD};
pub use naming::{SequenceCode, ShotName, FIRST_SHOT_NUMBER, SHOT_NUMBER_STEP};
pub use sequence::Sequence;
pub use shot::{MoveParts, Shot};
