// SPDX-License-Identifier: MIT OR Apache-2.0
//! Export of shot data for production tracking.
//!
//! Two sibling outputs, one record per shot:
//! - a JSON manifest keyed by shot name
//! - a semicolon-delimited table for spreadsheet imports
//!
//! Both writers renumber every shot to a common cut-in base (1001 by
//! convention) while preserving its length; the true timeline position
//! stays in the in-memory record.

use crate::settings::ExportSettings;
use cutline_sequencer::Shot;
use serde::Serialize;
use serde_json::json;
use std::fmt::Write as _;
use std::path::Path;

/// Header row of the delimited export
pub const CSV_HEADER: &str = "Sequence;Shot Code;Status;Cut In;Cut Out;Cut Duration;Task Template";

/// JSON manifest file name
pub const MANIFEST_FILE_NAME: &str = "shots.json";

/// Delimited table file name
pub const TABLE_FILE_NAME: &str = "shots.csv";

/// One shot's export data, at its true timeline position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShotRecord {
    /// Full shot name
    pub name: String,
    /// Sequence code part
    pub sequence: String,
    /// Shot code part
    pub shot: String,
    /// Frame length (`stop - start`)
    pub length: i64,
    /// First frame on the timeline
    pub start: i64,
    /// Last frame on the timeline
    pub stop: i64,
    /// Display color (RGB floats)
    pub color: [f32; 3],
}

impl ShotRecord {
    /// Build a record from a shot
    pub fn from_shot(shot: &Shot) -> Self {
        Self {
            name: shot.name.to_string(),
            sequence: shot.name.sequence_code().to_string(),
            shot: shot.name.shot_code().to_owned(),
            length: shot.length(),
            start: shot.start,
            stop: shot.stop,
            color: shot.color,
        }
    }
}

/// Build the JSON manifest: an object keyed by shot name, with every
/// shot renumbered to the cut-in base.
pub fn json_manifest(records: &[ShotRecord], export: &ExportSettings) -> serde_json::Value {
    let mut manifest = serde_json::Map::new();
    for record in records {
        manifest.insert(
            record.name.clone(),
            json!({
                "name": record.name,
                "sequence": record.sequence,
                "shot": record.shot,
                "length": record.length,
                "start": export.cut_in_base,
                "stop": export.cut_in_base + record.length,
                "color": record.color,
            }),
        );
    }
    serde_json::Value::Object(manifest)
}

/// Build the delimited table, header included
pub fn csv_table(records: &[ShotRecord], export: &ExportSettings) -> String {
    let mut table = String::from(CSV_HEADER);
    table.push('\n');
    for record in records {
        let cut_in = export.cut_in_base;
        let cut_out = export.cut_in_base + record.length;
        // Infallible writer on String
        let _ = writeln!(
            table,
            "{};{};{};{};{};{};{}",
            record.sequence,
            record.name,
            export.status,
            cut_in,
            cut_out,
            record.length,
            export.task_template
        );
    }
    table
}

/// Write `shots.json` and `shots.csv` into `dir`
pub fn write_to_dir(
    dir: &Path,
    records: &[ShotRecord],
    export: &ExportSettings,
) -> std::io::Result<()> {
    let manifest = serde_json::to_string_pretty(&json_manifest(records, export))
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
    std::fs::write(dir.join(MANIFEST_FILE_NAME), manifest)?;
    std::fs::write(dir.join(TABLE_FILE_NAME), csv_table(records, export))?;
    tracing::info!(?dir, shots = records.len(), "exported sequence data");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cutline_host::{CameraBinding, MemoryHost, ShotStore};
    use cutline_sequencer::Sequence;

    fn records() -> Vec<ShotRecord> {
        let mut host = MemoryHost::new();
        for (name, start, stop) in [("SQ0020_SH0010", 101, 125), ("SQ0020_SH0020", 126, 137)] {
            let camera = host.create_camera(name).unwrap();
            host.create_bookmark(name, start, stop, [0.96, 0.48, 0.0], camera)
                .unwrap();
        }
        Sequence::load(&host)
            .shots()
            .iter()
            .map(ShotRecord::from_shot)
            .collect()
    }

    #[test]
    fn test_record_fields() {
        let records = records();
        assert_eq!(records[0].name, "SQ0020_SH0010");
        assert_eq!(records[0].sequence, "SQ0020");
        assert_eq!(records[0].shot, "SH0010");
        assert_eq!(records[0].length, 24);
        assert_eq!((records[0].start, records[0].stop), (101, 125));
    }

    #[test]
    fn test_json_manifest_normalizes_cut_in() {
        let manifest = json_manifest(&records(), &ExportSettings::default());
        let entry = &manifest["SQ0020_SH0010"];
        assert_eq!(entry["start"], 1001);
        assert_eq!(entry["stop"], 1025);
        assert_eq!(entry["length"], 24);
        assert_eq!(entry["sequence"], "SQ0020");

        let second = &manifest["SQ0020_SH0020"];
        assert_eq!(second["start"], 1001);
        assert_eq!(second["stop"], 1012);
    }

    #[test]
    fn test_csv_table() {
        let table = csv_table(&records(), &ExportSettings::default());
        let mut lines = table.lines();
        assert_eq!(lines.next(), Some(CSV_HEADER));
        assert_eq!(
            lines.next(),
            Some("SQ0020;SQ0020_SH0010;wtg;1001;1025;24;Animation")
        );
        assert_eq!(
            lines.next(),
            Some("SQ0020;SQ0020_SH0020;wtg;1001;1012;11;Animation")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_write_to_dir() {
        let dir = std::env::temp_dir().join("cutline_export_test");
        let _ = std::fs::create_dir_all(&dir);

        write_to_dir(&dir, &records(), &ExportSettings::default()).unwrap();
        let manifest = std::fs::read_to_string(dir.join(MANIFEST_FILE_NAME)).unwrap();
        assert!(manifest.contains("SQ0020_SH0010"));
        let table = std::fs::read_to_string(dir.join(TABLE_FILE_NAME)).unwrap();
        assert!(table.starts_with(CSV_HEADER));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
