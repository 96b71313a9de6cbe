// SPDX-License-Identifier: MIT OR Apache-2.0
//! Focus and defocus of the playback window.
//!
//! There is no stored focus state. Each call classifies the current
//! playback range against the shot intervals, then maps the
//! classification to an action. "Focus" means the range exactly frames
//! a shot or the whole sequence; "defocus" widens the range past the
//! currently framed bounds.

use crate::error::{Result, SequencerError};
use crate::sequence::Sequence;
use cutline_host::PlaybackWindow;
use serde::{Deserialize, Serialize};

/// Frames added to each end of the playback range when widening
pub const DEFAULT_DEFOCUS_PAD: i64 = 24;

/// How the playback range relates to the shot intervals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusState {
    /// The range equals `[first.start, last.stop]`
    SequenceFocused,
    /// The range equals the interval of a shot at the playhead
    ShotFocused,
    /// The range is strictly wider than all shots on both ends
    FullyDefocused,
    /// Anything else
    Partial,
}

/// What a defocus request should do to the playback range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefocusAction {
    /// Widen the range by a pad amount on both ends
    Widen,
    /// Reset the range to exactly bound all shots
    FrameAll,
}

/// Which of the upcoming shots "focus next" jumps to.
///
/// `Farthest` reproduces the legacy behavior of picking the last entry
/// of the next-shots list; `Nearest` is the natural reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NextFocusPolicy {
    /// Jump to the closest upcoming shot
    #[default]
    Nearest,
    /// Jump to the last upcoming shot (legacy compatible)
    Farthest,
}

/// Classify the playback range against the sequence at `time`.
/// An empty sequence is always `Partial`.
pub fn classify(range: (i64, i64), sequence: &Sequence, time: i64) -> FocusState {
    let Some((first_start, last_stop)) = sequence.span() else {
        return FocusState::Partial;
    };
    let (min, max) = range;

    if (min, max) == (first_start, last_stop) {
        return FocusState::SequenceFocused;
    }
    if sequence
        .shots_at_time(time)
        .iter()
        .any(|shot| (shot.start, shot.stop) == (min, max))
    {
        return FocusState::ShotFocused;
    }
    if min < first_start && max > last_stop {
        return FocusState::FullyDefocused;
    }
    FocusState::Partial
}

/// Map a classification to the defocus action: anything already framed
/// (or already past all shots) widens further, a partial view resets to
/// sequence-wide framing.
pub fn defocus_action(state: FocusState) -> DefocusAction {
    match state {
        FocusState::Partial => DefocusAction::FrameAll,
        _ => DefocusAction::Widen,
    }
}

/// Set the playback range to exactly frame the active shot at `time`
pub fn focus_shot_at_time(
    sequence: &Sequence,
    playback: &mut dyn PlaybackWindow,
    time: i64,
) -> Result<()> {
    let shot = sequence
        .active_shot_at_time(time)
        .ok_or(SequencerError::NotFound { time })?;
    shot.focus(playback);
    Ok(())
}

/// Defocus: widen the playback range by `pad` on both ends, or reset it
/// to bound all shots when the current view is partial.
pub fn defocus_active_shot(
    sequence: &Sequence,
    playback: &mut dyn PlaybackWindow,
    time: i64,
    pad: i64,
) -> Result<()> {
    let (first_start, last_stop) = sequence.span().ok_or(SequencerError::EmptySequence)?;

    match defocus_action(classify(playback.range(), sequence, time)) {
        DefocusAction::Widen => {
            let (min, max) = playback.range();
            playback.set_range(min - pad, max + pad);
        }
        DefocusAction::FrameAll => playback.set_range(first_start, last_stop),
    }
    Ok(())
}

/// Focus the chronologically last shot that ends before `time`, moving
/// the playhead to its start.
pub fn focus_previous_at_time(
    sequence: &Sequence,
    playback: &mut dyn PlaybackWindow,
    time: i64,
) -> Result<()> {
    let previous = sequence.previous_shots_at_time(time);
    let target = previous.last().ok_or(SequencerError::NotFound { time })?;
    playback.set_range(target.start, target.stop);
    playback.set_current_time(target.start);
    Ok(())
}

/// Focus an upcoming shot picked by `policy`, moving the playhead to
/// its start.
pub fn focus_next_at_time(
    sequence: &Sequence,
    playback: &mut dyn PlaybackWindow,
    time: i64,
    policy: NextFocusPolicy,
) -> Result<()> {
    let next = sequence.next_shots_at_time(time);
    let target = match policy {
        NextFocusPolicy::Nearest => next.first(),
        NextFocusPolicy::Farthest => next.last(),
    }
    .ok_or(SequencerError::NotFound { time })?;
    playback.set_range(target.start, target.stop);
    playback.set_current_time(target.start);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cutline_host::{CameraBinding, MemoryHost, ShotStore};

    fn three_shot_sequence(host: &mut MemoryHost) -> Sequence {
        for (name, start, stop) in [
            ("SQ0010_SH0010", 1, 10),
            ("SQ0010_SH0020", 11, 20),
            ("SQ0010_SH0030", 21, 30),
        ] {
            let camera = host.create_camera(name).unwrap();
            host.create_bookmark(name, start, stop, [0.0; 3], camera)
                .unwrap();
        }
        Sequence::load(host)
    }

    #[test]
    fn test_classify() {
        let mut host = MemoryHost::new();
        let seq = three_shot_sequence(&mut host);

        assert_eq!(classify((1, 30), &seq, 5), FocusState::SequenceFocused);
        assert_eq!(classify((11, 20), &seq, 15), FocusState::ShotFocused);
        assert_eq!(classify((0, 31), &seq, 15), FocusState::FullyDefocused);
        assert_eq!(classify((5, 25), &seq, 15), FocusState::Partial);
        // A shot interval only counts as focused at a time inside it
        assert_eq!(classify((11, 20), &seq, 25), FocusState::Partial);
    }

    #[test]
    fn test_classify_empty_sequence() {
        let host = MemoryHost::new();
        let seq = Sequence::load(&host);
        assert_eq!(classify((1, 100), &seq, 1), FocusState::Partial);
    }

    #[test]
    fn test_focus_shot_at_time() {
        let mut host = MemoryHost::new();
        let seq = three_shot_sequence(&mut host);

        focus_shot_at_time(&seq, &mut host, 15).unwrap();
        assert_eq!(host.range(), (11, 20));

        let err = focus_shot_at_time(&seq, &mut host, 99).unwrap_err();
        assert!(matches!(err, SequencerError::NotFound { .. }));
    }

    #[test]
    fn test_defocus_widens_when_focused() {
        let mut host = MemoryHost::new();
        let seq = three_shot_sequence(&mut host);

        host.set_range(11, 20);
        defocus_active_shot(&seq, &mut host, 15, DEFAULT_DEFOCUS_PAD).unwrap();
        assert_eq!(host.range(), (-13, 44));

        // Already fully defocused keeps widening
        defocus_active_shot(&seq, &mut host, 15, DEFAULT_DEFOCUS_PAD).unwrap();
        assert_eq!(host.range(), (-37, 68));
    }

    #[test]
    fn test_defocus_frames_all_when_partial() {
        let mut host = MemoryHost::new();
        let seq = three_shot_sequence(&mut host);

        host.set_range(5, 18);
        defocus_active_shot(&seq, &mut host, 15, DEFAULT_DEFOCUS_PAD).unwrap();
        assert_eq!(host.range(), (1, 30));
    }

    #[test]
    fn test_defocus_empty_sequence() {
        let mut host = MemoryHost::new();
        let seq = Sequence::load(&host);
        let err = defocus_active_shot(&seq, &mut host, 1, DEFAULT_DEFOCUS_PAD).unwrap_err();
        assert!(matches!(err, SequencerError::EmptySequence));
    }

    #[test]
    fn test_focus_previous() {
        let mut host = MemoryHost::new();
        let seq = three_shot_sequence(&mut host);

        host.set_current_time(25);
        focus_previous_at_time(&seq, &mut host, 25).unwrap();
        assert_eq!(host.range(), (11, 20));
        assert_eq!(host.current_time(), 11);

        // Nothing before the first shot
        let err = focus_previous_at_time(&seq, &mut host, 5).unwrap_err();
        assert!(matches!(err, SequencerError::NotFound { .. }));
    }

    #[test]
    fn test_focus_next_policies() {
        let mut host = MemoryHost::new();
        let seq = three_shot_sequence(&mut host);

        focus_next_at_time(&seq, &mut host, 5, NextFocusPolicy::Nearest).unwrap();
        assert_eq!(host.range(), (11, 20));
        assert_eq!(host.current_time(), 11);

        focus_next_at_time(&seq, &mut host, 5, NextFocusPolicy::Farthest).unwrap();
        assert_eq!(host.range(), (21, 30));
        assert_eq!(host.current_time(), 21);

        let err = focus_next_at_time(&seq, &mut host, 25, NextFocusPolicy::Nearest).unwrap_err();
        assert!(matches!(err, SequencerError::NotFound { .. }));
    }
}
