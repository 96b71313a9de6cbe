// SPDX-License-Identifier: MIT OR Apache-2.0
//! A shot: a named, timed unit of the sequence bound to one camera.

use crate::error::Result;
use crate::naming::ShotName;
use cutline_host::{BookmarkId, CameraBinding, CameraId, PlaybackWindow, ShotStore};
use serde::{Deserialize, Serialize};

/// Which parts of a shot a move applies to.
///
/// Overlap corrections sometimes need to reschedule the bookmark without
/// dragging the camera animation along, or the other way round; the
/// default moves both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveParts {
    /// Shift the bookmark interval
    pub bookmark: bool,
    /// Shift the camera keyframes
    pub camera: bool,
}

impl MoveParts {
    /// Move bookmark and camera together
    pub const BOTH: Self = Self {
        bookmark: true,
        camera: true,
    };
    /// Reschedule only the bookmark
    pub const BOOKMARK_ONLY: Self = Self {
        bookmark: true,
        camera: false,
    };
    /// Retime only the camera animation
    pub const CAMERA_ONLY: Self = Self {
        bookmark: false,
        camera: true,
    };
}

impl Default for MoveParts {
    fn default() -> Self {
        Self::BOTH
    }
}

/// A shot on the sequence timeline.
///
/// The interval is closed on both ends: a shot `[start, stop]` is active
/// for every frame `t` with `start <= t <= stop`, and `start <= stop`
/// holds for every shot the model creates. The camera is referenced by
/// identity only; its lifecycle belongs to the host store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shot {
    /// Validated shot name, unique within a sequence
    pub name: ShotName,
    /// Backing bookmark entity
    pub bookmark: BookmarkId,
    /// The camera this shot films through
    pub camera: CameraId,
    /// First frame (inclusive)
    pub start: i64,
    /// Last frame (inclusive)
    pub stop: i64,
    /// Display color (RGB floats)
    pub color: [f32; 3],
}

impl Shot {
    /// Whether `time` falls inside this shot, inclusive on both ends
    pub fn contains(&self, time: i64) -> bool {
        self.start <= time && time <= self.stop
    }

    /// Frame length of the shot (`stop - start`)
    pub fn length(&self) -> i64 {
        self.stop - self.start
    }

    /// Move the shot in time by `offset` frames, writing the new
    /// interval through to the store and shifting the camera keyframes
    /// by the same amount unless suppressed via `parts`.
    pub fn shift<H>(&mut self, host: &mut H, offset: i64, parts: MoveParts) -> Result<()>
    where
        H: ShotStore + CameraBinding + ?Sized,
    {
        if parts.bookmark {
            let start = self.start + offset;
            let stop = self.stop + offset;
            host.set_bookmark_interval(self.bookmark, start, stop)?;
            self.start = start;
            self.stop = stop;
        }
        if parts.camera {
            host.shift_keyframes(self.camera, offset)?;
        }
        Ok(())
    }

    /// Lengthen or shorten the shot by moving only its `stop` frame
    pub fn offset_end_frame(&mut self, store: &mut dyn ShotStore, delta: i64) -> Result<()> {
        let stop = self.stop + delta;
        store.set_bookmark_interval(self.bookmark, self.start, stop)?;
        self.stop = stop;
        Ok(())
    }

    /// Set the playback range to exactly frame this shot
    pub fn focus(&self, playback: &mut dyn PlaybackWindow) {
        playback.set_range(self.start, self.stop);
    }

    /// Re-read the interval from the store. The host UI can drag
    /// bookmarks around behind the model's back.
    pub fn refresh(&mut self, store: &dyn ShotStore) -> Result<()> {
        let (start, stop) = store.bookmark_interval(self.bookmark)?;
        self.start = start;
        self.stop = stop;
        Ok(())
    }
}
