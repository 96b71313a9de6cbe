// SPDX-License-Identifier: MIT OR Apache-2.0
//! Persisted sequencer settings.

use cutline_sequencer::{NextFocusPolicy, SequenceCode, DEFAULT_DEFOCUS_PAD};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Current settings format version
pub const SETTINGS_FORMAT_VERSION: u32 = 1;

/// Settings file name
pub const SETTINGS_FILE_NAME: &str = "cutline.ron";

/// Settings for the export writers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Frame every exported shot's cut-in is renumbered to
    pub cut_in_base: i64,
    /// Production status stamped on every exported row
    pub status: String,
    /// Task template stamped on every exported row
    pub task_template: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            cut_in_base: 1001,
            status: "wtg".to_owned(),
            task_template: "Animation".to_owned(),
        }
    }
}

/// User-facing sequencer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequencerSettings {
    /// Settings format version
    pub version: u32,
    /// Frame length given to newly created shots
    pub default_shot_length: i64,
    /// Frames added to each end of the playback range on defocus
    pub defocus_pad: i64,
    /// Which upcoming shot "focus next" jumps to
    #[serde(default)]
    pub next_focus: NextFocusPolicy,
    /// Show only the in-focus shot's camera
    #[serde(default)]
    pub auto_solo_camera: bool,
    /// Sequence code used before any shot exists
    #[serde(default)]
    pub default_sequence: SequenceCode,
    /// Export writer settings
    #[serde(default)]
    pub export: ExportSettings,
}

impl Default for SequencerSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_FORMAT_VERSION,
            default_shot_length: 24,
            defocus_pad: DEFAULT_DEFOCUS_PAD,
            next_focus: NextFocusPolicy::default(),
            auto_solo_camera: false,
            default_sequence: SequenceCode::default(),
            export: ExportSettings::default(),
        }
    }
}

impl SequencerSettings {
    /// Load settings from a file
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: SequencerSettings = ron::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;

        if settings.version > SETTINGS_FORMAT_VERSION {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!(
                    "Settings version {} is newer than supported version {}",
                    settings.version, SETTINGS_FORMAT_VERSION
                ),
            ));
        }

        Ok(settings)
    }

    /// Save settings to a file
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let config = ron::ser::PrettyConfig::default().struct_names(true);
        let content = ron::ser::to_string_pretty(self, config)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }

    /// The settings file path inside a preferences directory
    pub fn settings_file_path(prefs_dir: &Path) -> PathBuf {
        prefs_dir.join(SETTINGS_FILE_NAME)
    }
}
