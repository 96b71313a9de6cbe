// SPDX-License-Identifier: MIT OR Apache-2.0
//! In-memory host implementation.
//!
//! Implements every boundary trait against plain tables so the sequencer
//! can run headless and tests can observe exactly what a real host
//! adapter would be asked to do (intervals written, keyframes shifted,
//! snap targets, viewport bindings).

use crate::camera::{CameraBinding, CameraId, ViewportId};
use crate::error::{HostError, Result};
use crate::event::{HostEvent, HostEventSender};
use crate::playback::PlaybackWindow;
use crate::store::{BookmarkData, BookmarkId, ShotStore};
use indexmap::IndexMap;

/// A stored bookmark entity
#[derive(Debug, Clone)]
struct BookmarkRecord {
    name: Option<String>,
    camera: Option<CameraId>,
    start: i64,
    stop: i64,
    color: [f32; 3],
}

/// A stored camera entity
#[derive(Debug, Clone)]
struct CameraRecord {
    name: String,
    /// Keyframe times, kept sorted
    keyframes: Vec<i64>,
    /// Last camera this one was snapped to
    snapped_to: Option<CameraId>,
}

/// A stored viewport
#[derive(Debug, Clone)]
struct ViewportRecord {
    label: String,
    camera: Option<CameraId>,
}

/// In-memory host document.
///
/// Playback range defaults to `[1, 100]` with the playhead at frame 1.
#[derive(Debug)]
pub struct MemoryHost {
    bookmarks: IndexMap<BookmarkId, BookmarkRecord>,
    cameras: IndexMap<CameraId, CameraRecord>,
    viewports: IndexMap<ViewportId, ViewportRecord>,
    active_camera: Option<CameraId>,
    range: (i64, i64),
    time: i64,
    events: HostEventSender,
}

impl MemoryHost {
    /// Create an empty host document
    pub fn new() -> Self {
        Self {
            bookmarks: IndexMap::new(),
            cameras: IndexMap::new(),
            viewports: IndexMap::new(),
            active_camera: None,
            range: (1, 100),
            time: 1,
            events: HostEventSender::dummy(),
        }
    }

    /// Attach the event sender used for change notifications
    pub fn set_event_sender(&mut self, sender: HostEventSender) {
        self.events = sender;
    }

    /// Create a viewport
    pub fn create_viewport(&mut self, label: impl Into<String>) -> ViewportId {
        let id = ViewportId::new();
        self.viewports.insert(
            id,
            ViewportRecord {
                label: label.into(),
                camera: None,
            },
        );
        id
    }

    /// Mark a camera as the active working view
    pub fn set_active_camera(&mut self, camera: Option<CameraId>) {
        self.active_camera = camera;
    }

    /// Seed a camera with a keyframe at `time`
    pub fn add_camera_keyframe(&mut self, camera: CameraId, time: i64) -> Result<()> {
        let record = self
            .cameras
            .get_mut(&camera)
            .ok_or(HostError::UnknownCamera(camera))?;
        record.keyframes.push(time);
        record.keyframes.sort_unstable();
        Ok(())
    }

    /// Keyframe times of a camera
    pub fn camera_keyframes(&self, camera: CameraId) -> Option<&[i64]> {
        self.cameras.get(&camera).map(|c| c.keyframes.as_slice())
    }

    /// Name of a camera
    pub fn camera_name(&self, camera: CameraId) -> Option<&str> {
        self.cameras.get(&camera).map(|c| c.name.as_str())
    }

    /// Last camera `camera` was snapped to
    pub fn camera_snap_reference(&self, camera: CameraId) -> Option<CameraId> {
        self.cameras.get(&camera).and_then(|c| c.snapped_to)
    }

    /// Camera a viewport currently looks through
    pub fn viewport_camera(&self, viewport: ViewportId) -> Option<CameraId> {
        self.viewports.get(&viewport).and_then(|v| v.camera)
    }

    /// Label of a viewport
    pub fn viewport_label(&self, viewport: ViewportId) -> Option<&str> {
        self.viewports.get(&viewport).map(|v| v.label.as_str())
    }

    /// Number of bookmark entities
    pub fn bookmark_count(&self) -> usize {
        self.bookmarks.len()
    }

    /// Number of camera entities
    pub fn camera_count(&self) -> usize {
        self.cameras.len()
    }

    /// Insert a bookmark entity that was not created by the sequencer.
    ///
    /// Such entries can miss the name or camera attribute; loads must
    /// tolerate and skip them.
    pub fn insert_raw_bookmark(
        &mut self,
        name: Option<&str>,
        camera: Option<CameraId>,
        start: i64,
        stop: i64,
    ) -> BookmarkId {
        let id = BookmarkId::new();
        self.bookmarks.insert(
            id,
            BookmarkRecord {
                name: name.map(str::to_owned),
                camera,
                start,
                stop,
                color: [0.5, 0.5, 0.5],
            },
        );
        id
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ShotStore for MemoryHost {
    fn create_bookmark(
        &mut self,
        name: &str,
        start: i64,
        stop: i64,
        color: [f32; 3],
        camera: CameraId,
    ) -> Result<BookmarkId> {
        if self.find_bookmark(name).is_some() {
            return Err(HostError::Duplicate {
                name: name.to_owned(),
            });
        }
        let id = BookmarkId::new();
        self.bookmarks.insert(
            id,
            BookmarkRecord {
                name: Some(name.to_owned()),
                camera: Some(camera),
                start,
                stop,
                color,
            },
        );
        tracing::debug!(name, start, stop, "created bookmark");
        Ok(id)
    }

    fn find_bookmark(&self, name: &str) -> Option<BookmarkId> {
        self.bookmarks
            .iter()
            .find(|(_, record)| record.name.as_deref() == Some(name))
            .map(|(id, _)| *id)
    }

    fn delete_bookmark(&mut self, id: BookmarkId) -> Result<()> {
        self.bookmarks
            .shift_remove(&id)
            .map(|_| ())
            .ok_or(HostError::UnknownBookmark(id))
    }

    fn bookmark_interval(&self, id: BookmarkId) -> Result<(i64, i64)> {
        self.bookmarks
            .get(&id)
            .map(|record| (record.start, record.stop))
            .ok_or(HostError::UnknownBookmark(id))
    }

    fn set_bookmark_interval(&mut self, id: BookmarkId, start: i64, stop: i64) -> Result<()> {
        let record = self
            .bookmarks
            .get_mut(&id)
            .ok_or(HostError::UnknownBookmark(id))?;
        record.start = start;
        record.stop = stop;
        Ok(())
    }

    fn scan_bookmarks(&self) -> Vec<BookmarkData> {
        self.bookmarks
            .iter()
            .map(|(id, record)| BookmarkData {
                id: *id,
                name: record.name.clone(),
                camera: record.camera,
                start: record.start,
                stop: record.stop,
                color: record.color,
            })
            .collect()
    }
}

impl PlaybackWindow for MemoryHost {
    fn range(&self) -> (i64, i64) {
        self.range
    }

    fn set_range(&mut self, min: i64, max: i64) {
        self.range = (min, max);
    }

    fn current_time(&self) -> i64 {
        self.time
    }

    fn set_current_time(&mut self, time: i64) {
        let old_time = self.time;
        if old_time != time {
            self.time = time;
            self.events.emit(HostEvent::TimeChanged { old_time, new_time: time });
        }
    }
}

impl CameraBinding for MemoryHost {
    fn create_camera(&mut self, name: &str) -> Result<CameraId> {
        if self.find_camera(name).is_some() {
            return Err(HostError::Duplicate {
                name: name.to_owned(),
            });
        }
        let id = CameraId::new();
        self.cameras.insert(
            id,
            CameraRecord {
                name: name.to_owned(),
                keyframes: Vec::new(),
                snapped_to: None,
            },
        );
        tracing::debug!(name, "created camera");
        Ok(id)
    }

    fn find_camera(&self, name: &str) -> Option<CameraId> {
        self.cameras
            .iter()
            .find(|(_, record)| record.name == name)
            .map(|(id, _)| *id)
    }

    fn delete_camera(&mut self, id: CameraId) -> Result<()> {
        self.cameras
            .shift_remove(&id)
            .map(|_| ())
            .ok_or(HostError::UnknownCamera(id))
    }

    fn active_camera(&self) -> Option<CameraId> {
        self.active_camera
    }

    fn shift_keyframes(&mut self, camera: CameraId, offset: i64) -> Result<()> {
        let record = self
            .cameras
            .get_mut(&camera)
            .ok_or(HostError::UnknownCamera(camera))?;
        for key in &mut record.keyframes {
            *key += offset;
        }
        Ok(())
    }

    fn snap_to(&mut self, camera: CameraId, reference: CameraId) -> Result<()> {
        if !self.cameras.contains_key(&reference) {
            return Err(HostError::UnknownCamera(reference));
        }
        let record = self
            .cameras
            .get_mut(&camera)
            .ok_or(HostError::UnknownCamera(camera))?;
        record.snapped_to = Some(reference);
        Ok(())
    }

    fn set_viewport_camera(&mut self, viewport: ViewportId, camera: CameraId) -> Result<()> {
        if !self.cameras.contains_key(&camera) {
            return Err(HostError::UnknownCamera(camera));
        }
        let record = self
            .viewports
            .get_mut(&viewport)
            .ok_or(HostError::UnknownViewport(viewport))?;
        record.camera = Some(camera);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bookmark_lifecycle() {
        let mut host = MemoryHost::new();
        let cam = host.create_camera("SQ0010_SH0010").unwrap();
        let id = host
            .create_bookmark("SQ0010_SH0010", 1, 24, [1.0, 0.5, 0.0], cam)
            .unwrap();

        assert_eq!(host.find_bookmark("SQ0010_SH0010"), Some(id));
        assert_eq!(host.bookmark_interval(id).unwrap(), (1, 24));

        host.set_bookmark_interval(id, 10, 33).unwrap();
        assert_eq!(host.bookmark_interval(id).unwrap(), (10, 33));

        host.delete_bookmark(id).unwrap();
        assert_eq!(host.find_bookmark("SQ0010_SH0010"), None);
        assert!(matches!(
            host.bookmark_interval(id),
            Err(HostError::UnknownBookmark(_))
        ));
    }

    #[test]
    fn test_duplicate_bookmark_rejected() {
        let mut host = MemoryHost::new();
        let cam = host.create_camera("cam").unwrap();
        host.create_bookmark("SQ0010_SH0010", 1, 24, [0.0; 3], cam)
            .unwrap();
        let err = host
            .create_bookmark("SQ0010_SH0010", 30, 50, [0.0; 3], cam)
            .unwrap_err();
        assert!(matches!(err, HostError::Duplicate { .. }));
    }

    #[test]
    fn test_shift_keyframes() {
        let mut host = MemoryHost::new();
        let cam = host.create_camera("cam").unwrap();
        host.add_camera_keyframe(cam, 1).unwrap();
        host.add_camera_keyframe(cam, 12).unwrap();
        host.add_camera_keyframe(cam, 24).unwrap();

        host.shift_keyframes(cam, 5).unwrap();
        assert_eq!(host.camera_keyframes(cam).unwrap(), &[6, 17, 29]);

        host.shift_keyframes(cam, -5).unwrap();
        assert_eq!(host.camera_keyframes(cam).unwrap(), &[1, 12, 24]);
    }

    #[test]
    fn test_snap_and_viewport() {
        let mut host = MemoryHost::new();
        let preview = host.create_camera("preview").unwrap();
        let shot_cam = host.create_camera("SQ0010_SH0010").unwrap();
        let viewport = host.create_viewport("Preview Viewport");

        host.snap_to(preview, shot_cam).unwrap();
        assert_eq!(host.camera_snap_reference(preview), Some(shot_cam));

        host.set_viewport_camera(viewport, preview).unwrap();
        assert_eq!(host.viewport_camera(viewport), Some(preview));
    }

    #[test]
    fn test_time_change_emits_event() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut host = MemoryHost::new();
        host.set_event_sender(HostEventSender::new(tx));

        host.set_current_time(42);
        assert_eq!(
            rx.try_recv().unwrap(),
            HostEvent::TimeChanged {
                old_time: 1,
                new_time: 42
            }
        );

        // Setting the same time again is not a change
        host.set_current_time(42);
        assert!(rx.try_recv().is_err());
    }
}
