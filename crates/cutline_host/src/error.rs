// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error type for host boundary operations.

use crate::camera::{CameraId, ViewportId};
use crate::store::BookmarkId;
use thiserror::Error;

/// Host boundary errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// An entity with this name already exists
    #[error("an entity named {name:?} already exists")]
    Duplicate {
        /// The colliding name
        name: String,
    },

    /// Bookmark handle does not resolve
    #[error("unknown bookmark {0:?}")]
    UnknownBookmark(BookmarkId),

    /// Camera handle does not resolve
    #[error("unknown camera {0:?}")]
    UnknownCamera(CameraId),

    /// Viewport handle does not resolve
    #[error("unknown viewport {0:?}")]
    UnknownViewport(ViewportId),
}

/// Result type for host operations
pub type Result<T> = std::result::Result<T, HostError>;
