// SPDX-License-Identifier: MIT OR Apache-2.0
//! The shot sequence: ordering, queries, auto-layout passes.

use crate::error::{Result, SequencerError};
use crate::naming::{self, SequenceCode, ShotName, FIRST_SHOT_NUMBER};
use crate::shot::{MoveParts, Shot};
use cutline_host::{CameraBinding, ShotStore};
use serde::{Deserialize, Serialize};

/// An ordered collection of shots sharing a sequence code.
///
/// Shots are kept sorted ascending by `start`; every mutation that can
/// change chronological order re-sorts before returning, so positional
/// queries (first, last, previous, next) are always answered against
/// sorted state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sequence {
    name: SequenceCode,
    shots: Vec<Shot>,
    /// When true, the embedder shows only the in-focus shot's camera
    pub auto_solo_camera: bool,
}

impl Sequence {
    /// Create an empty sequence
    pub fn new(name: SequenceCode) -> Self {
        Self {
            name,
            shots: Vec::new(),
            auto_solo_camera: false,
        }
    }

    /// Load the sequence from the host document.
    ///
    /// Bookmark entities missing the shot name or camera attribute, or
    /// carrying a name outside the `SQ####_SH####` grammar, were not
    /// created by the sequencer; they are skipped, never fatal. The
    /// sequence code is derived from the earliest shot's name prefix
    /// when there is one.
    pub fn load(store: &dyn ShotStore) -> Self {
        let mut shots = Vec::new();
        let mut skipped = 0usize;

        for entry in store.scan_bookmarks() {
            let (Some(raw_name), Some(camera)) = (entry.name, entry.camera) else {
                skipped += 1;
                continue;
            };
            let Ok(name) = ShotName::parse(&raw_name) else {
                tracing::debug!(name = %raw_name, "skipping foreign bookmark");
                skipped += 1;
                continue;
            };
            shots.push(Shot {
                name,
                bookmark: entry.id,
                camera,
                start: entry.start,
                stop: entry.stop,
                color: entry.color,
            });
        }

        shots.sort_by_key(|shot| shot.start);
        let name = shots
            .first()
            .map(|shot| shot.name.sequence_code())
            .unwrap_or_default();

        tracing::info!(
            sequence = %name,
            shots = shots.len(),
            skipped,
            "loaded sequence from host document"
        );

        Self {
            name,
            shots,
            auto_solo_camera: false,
        }
    }

    /// The sequence code
    pub fn name(&self) -> &SequenceCode {
        &self.name
    }

    /// All shots, sorted ascending by `start`
    pub fn shots(&self) -> &[Shot] {
        &self.shots
    }

    /// Number of shots
    pub fn len(&self) -> usize {
        self.shots.len()
    }

    /// Whether the sequence has no shots
    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }

    /// The chronologically first shot
    pub fn first(&self) -> Option<&Shot> {
        self.shots.first()
    }

    /// The chronologically last shot
    pub fn last(&self) -> Option<&Shot> {
        self.shots.last()
    }

    /// `[first.start, last.stop]`, the interval covering every shot
    pub fn span(&self) -> Option<(i64, i64)> {
        match (self.shots.first(), self.shots.last()) {
            (Some(first), Some(last)) => Some((first.start, last.stop)),
            _ => None,
        }
    }

    /// Re-sort the shots ascending by `start`
    pub fn sort_shots(&mut self) {
        self.shots.sort_by_key(|shot| shot.start);
    }

    /// Look a shot up by name
    pub fn shot_named(&self, name: &ShotName) -> Option<&Shot> {
        self.shots.iter().find(|shot| &shot.name == name)
    }

    /// Every shot whose interval contains `time`, in sequence order.
    /// More than one entry means shots currently overlap.
    pub fn shots_at_time(&self, time: i64) -> Vec<&Shot> {
        self.shots.iter().filter(|shot| shot.contains(time)).collect()
    }

    /// The active shot at `time`: first match in sequence order
    pub fn active_shot_at_time(&self, time: i64) -> Option<&Shot> {
        self.shots.iter().find(|shot| shot.contains(time))
    }

    /// Shots that end before `time`, in sequence order
    pub fn previous_shots_at_time(&self, time: i64) -> Vec<&Shot> {
        self.shots.iter().filter(|shot| shot.stop < time).collect()
    }

    /// Shots that begin after `time`, in sequence order
    pub fn next_shots_at_time(&self, time: i64) -> Vec<&Shot> {
        self.shots.iter().filter(|shot| shot.start > time).collect()
    }

    /// Insert a shot, keeping the collection sorted.
    ///
    /// Fails with [`SequencerError::Duplicate`] before touching the
    /// collection if the name is already taken.
    pub fn insert(&mut self, shot: Shot) -> Result<()> {
        if self.shot_named(&shot.name).is_some() {
            return Err(SequencerError::Duplicate {
                name: shot.name.to_string(),
            });
        }
        self.shots.push(shot);
        self.sort_shots();
        Ok(())
    }

    /// Remove the active shot at `time` and return it.
    ///
    /// Destroying the backing bookmark and camera is the caller's job,
    /// so a host failure can never leave the model half-applied.
    pub fn remove_at_time(&mut self, time: i64) -> Result<Shot> {
        let index = self
            .shots
            .iter()
            .position(|shot| shot.contains(time))
            .ok_or(SequencerError::NotFound { time })?;
        Ok(self.shots.remove(index))
    }

    /// Generate the next shot name.
    ///
    /// The sequence code comes from the earliest shot when there is
    /// one; the shot number is the maximum existing number stepped to
    /// the next multiple of ten, or [`FIRST_SHOT_NUMBER`] for an empty
    /// sequence.
    pub fn generate_shot_name(&self) -> Result<ShotName> {
        let code = self
            .shots
            .first()
            .map(|shot| shot.name.sequence_code())
            .unwrap_or_else(|| self.name.clone());

        let Some(highest) = self.shots.iter().max_by_key(|shot| shot.name.shot_number()) else {
            return code.shot_name(FIRST_SHOT_NUMBER);
        };

        let next = naming::next_shot_number(highest.name.shot_number()).ok_or_else(|| {
            SequencerError::NameFormat {
                name: highest.name.to_string(),
            }
        })?;
        code.shot_name(next)
    }

    /// Re-read every shot's interval from the store, then re-sort.
    /// Picks up bookmarks the host UI moved behind the model's back.
    pub fn update_ranges_from(&mut self, store: &dyn ShotStore) -> Result<()> {
        for shot in &mut self.shots {
            shot.refresh(store)?;
        }
        self.sort_shots();
        Ok(())
    }

    /// Lengthen or shorten the active shot at `time` by `delta` frames
    /// and move every later shot by the same amount, so the sequence
    /// stays packed.
    pub fn offset_frame_of_shot_at_time<H>(
        &mut self,
        host: &mut H,
        time: i64,
        delta: i64,
    ) -> Result<()>
    where
        H: ShotStore + CameraBinding,
    {
        let active = self
            .shots
            .iter()
            .position(|shot| shot.contains(time))
            .ok_or(SequencerError::NotFound { time })?;

        self.shots[active].offset_end_frame(host, delta)?;
        for shot in &mut self.shots {
            if shot.start > time {
                shot.shift(host, delta, MoveParts::BOTH)?;
            }
        }
        self.sort_shots();
        Ok(())
    }

    /// Move overlapping shots forward until no shot starts before its
    /// predecessor ends.
    ///
    /// A single forward pass suffices: each correction re-bases the
    /// current shot to `prev.stop + 1`, which strictly increases its
    /// start and keeps the collection sorted mid-pass, so already
    /// resolved pairs stay resolved. The pass is idempotent.
    pub fn resolve_overlapping_shots<H>(&mut self, host: &mut H) -> Result<()>
    where
        H: ShotStore + CameraBinding,
    {
        for i in 1..self.shots.len() {
            let prev_stop = self.shots[i - 1].stop;
            let curr = &mut self.shots[i];
            if curr.start < prev_stop {
                let offset = (prev_stop - curr.start) + 1;
                tracing::debug!(shot = %curr.name, offset, "resolving overlap");
                curr.shift(host, offset, MoveParts::BOTH)?;
            }
        }
        self.sort_shots();
        Ok(())
    }

    /// Move shots backward until consecutive shots abut with exactly
    /// one frame of separation. Idempotent, like the overlap pass.
    pub fn resolve_gaps_between_shots<H>(&mut self, host: &mut H) -> Result<()>
    where
        H: ShotStore + CameraBinding,
    {
        for i in 0..self.shots.len().saturating_sub(1) {
            let curr_stop = self.shots[i].stop;
            let next = &mut self.shots[i + 1];
            if curr_stop < next.start - 1 {
                let offset = (next.start - curr_stop) - 1;
                tracing::debug!(shot = %next.name, offset = -offset, "closing gap");
                next.shift(host, -offset, MoveParts::BOTH)?;
            }
        }
        self.sort_shots();
        Ok(())
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new(SequenceCode::default())
    }
}
