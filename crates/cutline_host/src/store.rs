// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shot store boundary: timed bookmark entities.

use crate::camera::CameraId;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a bookmark entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookmarkId(pub Uuid);

impl BookmarkId {
    /// Create a new random bookmark ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BookmarkId {
    fn default() -> Self {
        Self::new()
    }
}

/// Raw bookmark entry as the host stores it.
///
/// Bookmarks not created by the sequencer can miss the `name` and
/// `camera` attributes; the model filters those out on load instead of
/// failing the whole scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmarkData {
    /// Bookmark handle
    pub id: BookmarkId,
    /// Shot name attribute, if present
    pub name: Option<String>,
    /// Linked camera attribute, if present
    pub camera: Option<CameraId>,
    /// First frame (inclusive)
    pub start: i64,
    /// Last frame (inclusive)
    pub stop: i64,
    /// Display color (RGB floats)
    pub color: [f32; 3],
}

/// Boundary to the host's timed bookmark entities.
///
/// Handles stay valid until the bookmark is deleted; names are unique
/// across the store.
pub trait ShotStore {
    /// Create a bookmark with shot name and linked camera attributes.
    ///
    /// Fails with [`crate::HostError::Duplicate`] if a bookmark with this
    /// name already exists.
    fn create_bookmark(
        &mut self,
        name: &str,
        start: i64,
        stop: i64,
        color: [f32; 3],
        camera: CameraId,
    ) -> Result<BookmarkId>;

    /// Look up a bookmark by its shot name
    fn find_bookmark(&self, name: &str) -> Option<BookmarkId>;

    /// Delete a bookmark
    fn delete_bookmark(&mut self, id: BookmarkId) -> Result<()>;

    /// Read a bookmark's `[start, stop]` interval
    fn bookmark_interval(&self, id: BookmarkId) -> Result<(i64, i64)>;

    /// Write a bookmark's `[start, stop]` interval
    fn set_bookmark_interval(&mut self, id: BookmarkId, start: i64, stop: i64) -> Result<()>;

    /// List every bookmark entity in the host document, including
    /// entries the sequencer did not create.
    fn scan_bookmarks(&self) -> Vec<BookmarkData>;
}
