// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shot and sequence name grammar.
//!
//! Names follow the production convention `SQ####_SH####`: a sequence
//! code (`SQ` + 4 digits), an underscore, and a shot code (`SH` + 4
//! digits). Both newtypes validate the full pattern up front so that
//! everything downstream (sorting, numbering, camera naming) can slice
//! without re-checking.

use crate::error::{Result, SequencerError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sequence code prefix
pub const SEQUENCE_PREFIX: &str = "SQ";
/// Shot code prefix
pub const SHOT_PREFIX: &str = "SH";
/// Shot numbers advance in steps of ten, leaving room for insertions
pub const SHOT_NUMBER_STEP: u32 = 10;
/// Number given to the first shot of a sequence
pub const FIRST_SHOT_NUMBER: u32 = 10;
/// Largest representable shot or sequence number
pub const MAX_NUMBER: u32 = 9999;

fn all_digits(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_digit)
}

/// A validated sequence code, e.g. `SQ0010`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SequenceCode(String);

impl SequenceCode {
    /// Parse and validate a sequence code
    pub fn parse(raw: &str) -> Result<Self> {
        let bytes = raw.as_bytes();
        if bytes.len() == 6 && raw.starts_with(SEQUENCE_PREFIX) && all_digits(&bytes[2..6]) {
            Ok(Self(raw.to_owned()))
        } else {
            Err(SequencerError::InvalidName {
                name: raw.to_owned(),
            })
        }
    }

    /// Build a code from a sequence number, e.g. `10` becomes `SQ0010`
    pub fn from_number(number: u32) -> Result<Self> {
        if number > MAX_NUMBER {
            return Err(SequencerError::NameFormat {
                name: format!("{SEQUENCE_PREFIX}{number}"),
            });
        }
        Ok(Self(format!("{SEQUENCE_PREFIX}{number:04}")))
    }

    /// The numeric part of the code
    pub fn number(&self) -> u32 {
        // Digits are validated at construction
        self.0[2..6].parse().unwrap()
    }

    /// The code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Combine this code with a shot number into a full shot name
    pub fn shot_name(&self, shot_number: u32) -> Result<ShotName> {
        if shot_number > MAX_NUMBER {
            return Err(SequencerError::NameFormat {
                name: format!("{}_{SHOT_PREFIX}{shot_number}", self.0),
            });
        }
        Ok(ShotName(format!(
            "{}_{SHOT_PREFIX}{shot_number:04}",
            self.0
        )))
    }
}

impl Default for SequenceCode {
    /// The code given to a sequence with no shots yet
    fn default() -> Self {
        Self(format!("{SEQUENCE_PREFIX}0010"))
    }
}

impl fmt::Display for SequenceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SequenceCode {
    type Err = SequencerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SequenceCode {
    type Error = SequencerError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<SequenceCode> for String {
    fn from(code: SequenceCode) -> Self {
        code.0
    }
}

/// A validated shot name, e.g. `SQ0010_SH0020`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShotName(String);

impl ShotName {
    /// Parse and validate a shot name
    pub fn parse(raw: &str) -> Result<Self> {
        let bytes = raw.as_bytes();
        let well_formed = bytes.len() == 13
            && raw.starts_with(SEQUENCE_PREFIX)
            && all_digits(&bytes[2..6])
            && bytes[6] == b'_'
            && &bytes[7..9] == SHOT_PREFIX.as_bytes()
            && all_digits(&bytes[9..13]);
        if well_formed {
            Ok(Self(raw.to_owned()))
        } else {
            Err(SequencerError::InvalidName {
                name: raw.to_owned(),
            })
        }
    }

    /// The sequence code part of the name
    pub fn sequence_code(&self) -> SequenceCode {
        SequenceCode(self.0[..6].to_owned())
    }

    /// The shot code part of the name, e.g. `SH0020`
    pub fn shot_code(&self) -> &str {
        &self.0[7..]
    }

    /// The numeric shot suffix
    pub fn shot_number(&self) -> u32 {
        // Digits are validated at construction
        self.0[9..13].parse().unwrap()
    }

    /// The name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ShotName {
    type Err = SequencerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ShotName {
    type Error = SequencerError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<ShotName> for String {
    fn from(name: ShotName) -> Self {
        name.0
    }
}

/// The shot number that follows `number`, rounded down to the tens and
/// stepped, so `10` gives `20` and `15` gives `20`. `None` when the step
/// would leave the 4-digit range.
pub fn next_shot_number(number: u32) -> Option<u32> {
    let next = (number / SHOT_NUMBER_STEP) * SHOT_NUMBER_STEP + SHOT_NUMBER_STEP;
    (next <= MAX_NUMBER).then_some(next)
}

/// The camera name backing a shot. Kept as a seam even though the
/// mapping is currently the identity.
pub fn camera_name_for(name: &ShotName) -> String {
    name.as_str().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_shot_name() {
        let name = ShotName::parse("SQ0010_SH0010").unwrap();
        assert_eq!(name.sequence_code().as_str(), "SQ0010");
        assert_eq!(name.shot_number(), 10);
        assert_eq!(name.to_string(), "SQ0010_SH0010");
    }

    #[test]
    fn test_invalid_shot_names() {
        for raw in [
            "BADNAME",
            "SQ0010",
            "SQ0010_SH001",
            "SQ0010_SH00100",
            "sq0010_sh0010",
            "SQ0010-SH0010",
            "SQ00A0_SH0010",
            "SQ0010_SHXXXX",
            "",
        ] {
            assert!(
                matches!(
                    ShotName::parse(raw),
                    Err(SequencerError::InvalidName { .. })
                ),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_sequence_code() {
        let code = SequenceCode::parse("SQ0020").unwrap();
        assert_eq!(code.number(), 20);
        assert!(SequenceCode::parse("SQ12345").is_err());
        assert!(SequenceCode::parse("SH0010").is_err());
        assert_eq!(SequenceCode::default().as_str(), "SQ0010");
    }

    #[test]
    fn test_shot_name_from_code() {
        let code = SequenceCode::default();
        assert_eq!(code.shot_name(10).unwrap().as_str(), "SQ0010_SH0010");
        assert_eq!(code.shot_name(240).unwrap().as_str(), "SQ0010_SH0240");
        assert!(code.shot_name(10_000).is_err());
    }

    #[test]
    fn test_next_shot_number() {
        assert_eq!(next_shot_number(10), Some(20));
        assert_eq!(next_shot_number(15), Some(20));
        assert_eq!(next_shot_number(990), Some(1000));
        assert_eq!(next_shot_number(9990), None);
    }

    #[test]
    fn test_serde_round_trip_rejects_invalid() {
        let name: ShotName = serde_json::from_str("\"SQ0010_SH0030\"").unwrap();
        assert_eq!(name.shot_number(), 30);
        assert!(serde_json::from_str::<ShotName>("\"garbage\"").is_err());
    }
}
