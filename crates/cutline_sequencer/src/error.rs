// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error type for timeline operations.

use cutline_host::HostError;
use thiserror::Error;

/// Timeline model errors.
///
/// `NotFound` and `EmptySequence` are non-fatal outcomes: callers report
/// them as a user-facing warning and take no further action.
#[derive(Debug, Error)]
pub enum SequencerError {
    /// A shot with this name already exists
    #[error("a shot named {name:?} already exists")]
    Duplicate {
        /// The colliding shot name
        name: String,
    },

    /// No shot contains the queried time
    #[error("no active shot at frame {time}")]
    NotFound {
        /// The queried frame
        time: i64,
    },

    /// The operation needs at least one shot
    #[error("the sequence has no shots")]
    EmptySequence,

    /// The name does not match the `SQ####_SH####` / `SQ####` grammar
    #[error("invalid name {name:?}, expected SQ#### or SQ####_SH####")]
    InvalidName {
        /// The rejected name
        name: String,
    },

    /// A shot number could not be derived during name generation
    #[error("cannot derive the next shot number from {name:?}")]
    NameFormat {
        /// The name that broke generation
        name: String,
    },

    /// Failure at the host boundary
    #[error(transparent)]
    Host(#[from] HostError),
}

/// Result type for timeline operations
pub type Result<T> = std::result::Result<T, SequencerError>;
