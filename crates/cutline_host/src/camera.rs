// SPDX-License-Identifier: MIT OR Apache-2.0
//! Camera binding boundary: camera lifecycle, keyframes, snapping.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a camera entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CameraId(pub Uuid);

impl CameraId {
    /// Create a new random camera ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CameraId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for a host viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewportId(pub Uuid);

impl ViewportId {
    /// Create a new random viewport ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ViewportId {
    fn default() -> Self {
        Self::new()
    }
}

/// Boundary to the host's cameras.
///
/// Transform and lens math stays on the host side; `snap_to` is the only
/// way the sequencer ever aligns one camera to another.
pub trait CameraBinding {
    /// Create a camera. Fails with [`crate::HostError::Duplicate`] if a
    /// camera with this name already exists.
    fn create_camera(&mut self, name: &str) -> Result<CameraId>;

    /// Look up a camera by name
    fn find_camera(&self, name: &str) -> Option<CameraId>;

    /// Delete a camera
    fn delete_camera(&mut self, id: CameraId) -> Result<()>;

    /// The camera of the host's active working view, if any
    fn active_camera(&self) -> Option<CameraId>;

    /// Move every keyframe on `camera` by `offset` frames
    fn shift_keyframes(&mut self, camera: CameraId, offset: i64) -> Result<()>;

    /// Copy transform and lens attributes from `reference` onto `camera`
    fn snap_to(&mut self, camera: CameraId, reference: CameraId) -> Result<()>;

    /// Make `viewport` look through `camera`
    fn set_viewport_camera(&mut self, viewport: ViewportId, camera: CameraId) -> Result<()>;
}
