// SPDX-License-Identifier: MIT OR Apache-2.0
//! Preview camera controller.
//!
//! A dedicated, host-owned preview camera follows the sequence: whenever
//! the playhead enters a shot bound to a different camera, the preview
//! camera snaps to that shot camera and the preview viewport keeps
//! looking through the preview camera. Frames without an active shot
//! leave the last binding in place.

use cutline_host::{CameraBinding, CameraId, ViewportId};
use cutline_sequencer::{Result, Sequence};

/// Name of the host camera backing the preview viewport
pub const PREVIEW_CAMERA_NAME: &str = "CAM_cutline_preview";

/// Follows the active shot's camera with the preview camera
#[derive(Debug, Clone)]
pub struct PreviewController {
    viewport: ViewportId,
    camera: CameraId,
    bound: Option<CameraId>,
}

impl PreviewController {
    /// Create a controller for a preview viewport and camera
    pub fn new(viewport: ViewportId, camera: CameraId) -> Self {
        Self {
            viewport,
            camera,
            bound: None,
        }
    }

    /// The preview camera
    pub fn camera(&self) -> CameraId {
        self.camera
    }

    /// The preview viewport
    pub fn viewport(&self) -> ViewportId {
        self.viewport
    }

    /// The shot camera the preview is currently following, if any
    pub fn bound_camera(&self) -> Option<CameraId> {
        self.bound
    }

    /// Forget the current binding. Called on sequence reset, when the
    /// followed camera may no longer exist.
    pub fn clear_binding(&mut self) {
        self.bound = None;
    }

    /// React to a playhead move: re-snap the preview camera when the
    /// active shot films through a different camera.
    pub fn on_time_changed(
        &mut self,
        host: &mut dyn CameraBinding,
        sequence: &Sequence,
        time: i64,
    ) -> Result<()> {
        let Some(shot) = sequence.active_shot_at_time(time) else {
            return Ok(());
        };
        if self.bound != Some(shot.camera) {
            host.snap_to(self.camera, shot.camera)?;
            host.set_viewport_camera(self.viewport, self.camera)?;
            self.bound = Some(shot.camera);
            tracing::debug!(shot = %shot.name, "preview camera re-bound");
        }
        Ok(())
    }
}
