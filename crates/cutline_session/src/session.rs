// SPDX-License-Identifier: MIT OR Apache-2.0
//! The sequencer session: one context object per host document.
//!
//! `SequencerSession` owns the host connection, the loaded sequence and
//! the settings, and exposes the full command surface an embedding
//! wires to its UI: create/delete, focus navigation, length nudging,
//! the two auto-layout passes, preview control and export. There is no
//! global instance; `reset` rebuilds the sequence from a fresh store
//! scan and swaps it wholesale.

use crate::export::{self, ShotRecord};
use crate::preview::{PreviewController, PREVIEW_CAMERA_NAME};
use crate::settings::SequencerSettings;
use crossbeam_channel::Receiver;
use cutline_host::{
    CameraBinding, CameraId, HostEvent, PlaybackWindow, ShotStore, ViewportId,
};
use cutline_sequencer::{focus, naming, Result, Sequence, SequencerError, Shot, ShotName};
use std::path::Path;

/// Upper bound on host events handled per pump. A handler can enqueue
/// further events by moving the playhead itself; the cap keeps a
/// misbehaving host from spinning the session forever.
pub const MAX_PUMP_EVENTS: usize = 256;

/// Everything the session needs from the host, as one bound
pub trait Host: ShotStore + PlaybackWindow + CameraBinding {}

impl<T: ShotStore + PlaybackWindow + CameraBinding> Host for T {}

/// Per-document sequencer state and command surface
pub struct SequencerSession<H: Host> {
    host: H,
    events: Receiver<HostEvent>,
    sequence: Sequence,
    settings: SequencerSettings,
    preview: Option<PreviewController>,
}

impl<H: Host> SequencerSession<H> {
    /// Load a session by scanning the host document for existing shots
    pub fn load(host: H, events: Receiver<HostEvent>, settings: SequencerSettings) -> Self {
        let mut sequence = Sequence::load(&host);
        sequence.auto_solo_camera = settings.auto_solo_camera;
        tracing::info!(sequence = %sequence.name(), shots = sequence.len(), "session started");
        Self {
            host,
            events,
            sequence,
            settings,
            preview: None,
        }
    }

    /// Rebuild the sequence from a fresh store scan, replacing the old
    /// instance wholesale (host document reload).
    pub fn reset(&mut self) {
        let mut sequence = Sequence::load(&self.host);
        sequence.auto_solo_camera = self.settings.auto_solo_camera;
        self.sequence = sequence;
        if let Some(preview) = &mut self.preview {
            preview.clear_binding();
        }
        tracing::info!(sequence = %self.sequence.name(), "session reset");
    }

    /// The loaded sequence
    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    /// The session settings
    pub fn settings(&self) -> &SequencerSettings {
        &self.settings
    }

    /// The host connection
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host connection, for embedder-side wiring
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The preview controller, when preview is enabled
    pub fn preview(&self) -> Option<&PreviewController> {
        self.preview.as_ref()
    }

    /// The next free shot name
    pub fn generate_shot_name(&self) -> Result<ShotName> {
        self.sequence.generate_shot_name()
    }

    /// Create a shot at the current playhead position.
    ///
    /// The name defaults to the generated one; the shot runs from the
    /// playhead for the configured default length. A dedicated camera
    /// is created and snapped to the active working camera. Name
    /// collisions fail before any host entity is created.
    pub fn create_shot(&mut self, name: Option<ShotName>, color: [f32; 3]) -> Result<ShotName> {
        let name = match name {
            Some(name) => name,
            None => self.sequence.generate_shot_name()?,
        };
        if self.sequence.shot_named(&name).is_some()
            || self.host.find_bookmark(name.as_str()).is_some()
        {
            return Err(SequencerError::Duplicate {
                name: name.to_string(),
            });
        }

        let start = self.host.current_time();
        let stop = start + self.settings.default_shot_length;

        let camera = self.host.create_camera(&naming::camera_name_for(&name))?;
        if let Some(reference) = self.host.active_camera() {
            if let Err(err) = self.host.snap_to(camera, reference) {
                let _ = self.host.delete_camera(camera);
                return Err(err.into());
            }
        }
        let bookmark = match self
            .host
            .create_bookmark(name.as_str(), start, stop, color, camera)
        {
            Ok(bookmark) => bookmark,
            Err(err) => {
                let _ = self.host.delete_camera(camera);
                return Err(err.into());
            }
        };

        self.sequence.insert(Shot {
            name: name.clone(),
            bookmark,
            camera,
            start,
            stop,
            color,
        })?;
        tracing::info!(shot = %name, start, stop, "created shot");
        Ok(name)
    }

    /// Delete the shot at `time`, destroying its bookmark and camera
    pub fn delete_shot_at_time(&mut self, time: i64) -> Result<ShotName> {
        let shot = match self.sequence.remove_at_time(time) {
            Ok(shot) => shot,
            Err(err) => {
                tracing::warn!(time, "no active shot to delete");
                return Err(err);
            }
        };
        self.host.delete_bookmark(shot.bookmark)?;
        self.host.delete_camera(shot.camera)?;
        tracing::info!(shot = %shot.name, "deleted shot");
        Ok(shot.name)
    }

    /// Delete the shot at the current playhead position
    pub fn delete_active_shot(&mut self) -> Result<ShotName> {
        let time = self.host.current_time();
        self.delete_shot_at_time(time)
    }

    /// Frame the active shot in the playback window
    pub fn focus_active_shot(&mut self) -> Result<()> {
        let time = self.host.current_time();
        focus::focus_shot_at_time(&self.sequence, &mut self.host, time)
    }

    /// Widen the playback window, or reset it to frame the whole
    /// sequence when the current view is partial
    pub fn defocus_active_shot(&mut self) -> Result<()> {
        let time = self.host.current_time();
        focus::defocus_active_shot(
            &self.sequence,
            &mut self.host,
            time,
            self.settings.defocus_pad,
        )
    }

    /// Frame the previous shot and jump the playhead to its start
    pub fn focus_previous_shot(&mut self) -> Result<()> {
        let time = self.host.current_time();
        focus::focus_previous_at_time(&self.sequence, &mut self.host, time)?;
        self.pump()
    }

    /// Frame an upcoming shot and jump the playhead to its start
    pub fn focus_next_shot(&mut self) -> Result<()> {
        let time = self.host.current_time();
        focus::focus_next_at_time(
            &self.sequence,
            &mut self.host,
            time,
            self.settings.next_focus,
        )?;
        self.pump()
    }

    /// Lengthen the active shot by one frame, pushing later shots out
    pub fn increase_active_shot_length(&mut self) -> Result<()> {
        let time = self.host.current_time();
        self.sequence
            .offset_frame_of_shot_at_time(&mut self.host, time, 1)
    }

    /// Shorten the active shot by one frame, pulling later shots in
    pub fn reduce_active_shot_length(&mut self) -> Result<()> {
        let time = self.host.current_time();
        self.sequence
            .offset_frame_of_shot_at_time(&mut self.host, time, -1)
    }

    /// Close gaps so consecutive shots abut
    pub fn link_shots(&mut self) -> Result<()> {
        self.sequence.resolve_gaps_between_shots(&mut self.host)
    }

    /// Push overlapping shots apart
    pub fn unstack_shots(&mut self) -> Result<()> {
        self.sequence.resolve_overlapping_shots(&mut self.host)
    }

    /// Re-read every shot's interval from the store
    pub fn refresh_shot_ranges(&mut self) -> Result<()> {
        self.sequence.update_ranges_from(&self.host)
    }

    /// Enable the preview viewport: find or create the preview camera,
    /// point the viewport at it and start following the playhead.
    pub fn enable_preview(&mut self, viewport: ViewportId) -> Result<CameraId> {
        let camera = match self.host.find_camera(PREVIEW_CAMERA_NAME) {
            Some(camera) => camera,
            None => self.host.create_camera(PREVIEW_CAMERA_NAME)?,
        };
        self.host.set_viewport_camera(viewport, camera)?;

        let mut controller = PreviewController::new(viewport, camera);
        let time = self.host.current_time();
        controller.on_time_changed(&mut self.host, &self.sequence, time)?;
        self.preview = Some(controller);
        tracing::info!("preview enabled");
        Ok(camera)
    }

    /// Drain pending host events.
    ///
    /// Handlers may move the playhead and thereby enqueue further
    /// events; draining continues until the queue is quiet or the
    /// [`MAX_PUMP_EVENTS`] cap is hit.
    pub fn pump(&mut self) -> Result<()> {
        let mut handled = 0usize;
        while let Ok(event) = self.events.try_recv() {
            handled += 1;
            if handled > MAX_PUMP_EVENTS {
                tracing::warn!("host event flood, pump stopped");
                break;
            }
            match event {
                HostEvent::TimeChanged { new_time, .. } => {
                    if let Some(preview) = &mut self.preview {
                        preview.on_time_changed(&mut self.host, &self.sequence, new_time)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Build one export record per shot, in sequence order
    pub fn export_records(&self) -> Vec<ShotRecord> {
        self.sequence
            .shots()
            .iter()
            .map(ShotRecord::from_shot)
            .collect()
    }

    /// Write the JSON manifest and delimited table into `dir`
    pub fn export_to_dir(&self, dir: &Path) -> std::io::Result<()> {
        export::write_to_dir(dir, &self.export_records(), &self.settings.export)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cutline_host::{HostEventSender, MemoryHost};

    fn session() -> SequencerSession<MemoryHost> {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut host = MemoryHost::new();
        host.set_event_sender(HostEventSender::new(tx));
        SequencerSession::load(host, rx, SequencerSettings::default())
    }

    #[test]
    fn test_create_shot_at_playhead() {
        let mut session = session();
        session.host_mut().set_current_time(101);
        let name = session.create_shot(None, [0.9, 0.5, 0.0]).unwrap();

        assert_eq!(name.as_str(), "SQ0010_SH0010");
        let shot = session.sequence().shots()[0].clone();
        assert_eq!((shot.start, shot.stop), (101, 125));
        assert_eq!(
            session.host().find_bookmark("SQ0010_SH0010"),
            Some(shot.bookmark)
        );
        assert_eq!(session.host().camera_name(shot.camera), Some("SQ0010_SH0010"));
    }

    #[test]
    fn test_create_shot_generates_successive_names() {
        let mut session = session();
        session.create_shot(None, [0.0; 3]).unwrap();
        session.host_mut().set_current_time(30);
        let second = session.create_shot(None, [0.0; 3]).unwrap();
        assert_eq!(second.as_str(), "SQ0010_SH0020");
    }

    #[test]
    fn test_create_shot_rejects_duplicates_without_side_effects() {
        let mut session = session();
        let name = session.create_shot(None, [0.0; 3]).unwrap();
        let cameras_before = session.host().camera_count();

        let err = session.create_shot(Some(name), [0.0; 3]).unwrap_err();
        assert!(matches!(err, SequencerError::Duplicate { .. }));
        assert_eq!(session.host().camera_count(), cameras_before);
        assert_eq!(session.sequence().len(), 1);
    }

    #[test]
    fn test_create_shot_snaps_camera_to_working_view() {
        let mut session = session();
        let working = session.host_mut().create_camera("persp").unwrap();
        session.host_mut().set_active_camera(Some(working));

        session.create_shot(None, [0.0; 3]).unwrap();
        let shot_camera = session.sequence().shots()[0].camera;
        assert_eq!(session.host().camera_snap_reference(shot_camera), Some(working));
    }

    #[test]
    fn test_delete_active_shot_destroys_host_entities() {
        let mut session = session();
        session.create_shot(None, [0.0; 3]).unwrap();
        let shot = session.sequence().shots()[0].clone();

        session.host_mut().set_current_time(shot.start + 2);
        let name = session.delete_active_shot().unwrap();
        assert_eq!(name, shot.name);
        assert!(session.sequence().is_empty());
        assert_eq!(session.host().find_bookmark(name.as_str()), None);
        assert_eq!(session.host().camera_name(shot.camera), None);
    }

    #[test]
    fn test_delete_without_active_shot_is_not_found() {
        let mut session = session();
        let err = session.delete_active_shot().unwrap_err();
        assert!(matches!(err, SequencerError::NotFound { .. }));
    }

    #[test]
    fn test_length_nudges_keep_sequence_packed() {
        let mut session = session();
        session.create_shot(None, [0.0; 3]).unwrap();
        session.host_mut().set_current_time(26);
        session.create_shot(None, [0.0; 3]).unwrap();
        session.host_mut().set_current_time(10);

        session.increase_active_shot_length().unwrap();
        let shots: Vec<(i64, i64)> = session
            .sequence()
            .shots()
            .iter()
            .map(|s| (s.start, s.stop))
            .collect();
        assert_eq!(shots, vec![(1, 26), (27, 51)]);

        session.reduce_active_shot_length().unwrap();
        let shots: Vec<(i64, i64)> = session
            .sequence()
            .shots()
            .iter()
            .map(|s| (s.start, s.stop))
            .collect();
        assert_eq!(shots, vec![(1, 25), (26, 50)]);
    }

    #[test]
    fn test_reset_reloads_from_store() {
        let mut session = session();
        session.create_shot(None, [0.0; 3]).unwrap();
        let bookmark = session.sequence().shots()[0].bookmark;

        // Host-side edit, then a document-style reset
        session
            .host_mut()
            .set_bookmark_interval(bookmark, 200, 224)
            .unwrap();
        session.reset();
        assert_eq!(session.sequence().shots()[0].start, 200);
    }
}
