//! Newtype ID for type-safe identification of videos.
//!
//! Using a newtype prevents accidentally mixing up video ids with other
//! strings (file names, split names, enum values) flowing through the
//! index builder.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// A unique identifier for a video in the dataset.
///
/// Video ids follow the `{category}_{sequence_id}` naming convention with a
/// zero-padded 3-digit sequence id (e.g. `crash_001`, `normal_042`), and
/// always match the stem of the paired annotation and video files.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(pub String);

impl VideoId {
    /// Creates a new VideoId.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the underlying string value.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derives a VideoId from a file path stem (e.g. `crash_001.json`).
    pub fn from_stem(path: &Path) -> Option<Self> {
        path.file_stem()
            .and_then(|s| s.to_str())
            .map(|s| Self(s.to_string()))
    }

    /// Returns true if the id carries the `crash_` category prefix.
    ///
    /// The on-disk layout shards annotations and videos into `crash/` and
    /// `normal/` subdirectories keyed by this prefix.
    #[inline]
    pub fn is_crash_prefixed(&self) -> bool {
        self.0.starts_with("crash_")
    }

    /// Returns true if the id matches the `{category}_{seq:03}` convention.
    pub fn follows_naming_convention(&self) -> bool {
        let suffix = self
            .0
            .strip_prefix("crash_")
            .or_else(|| self.0.strip_prefix("normal_"));

        match suffix {
            Some(seq) => seq.len() >= 3 && seq.bytes().all(|b| b.is_ascii_digit()),
            None => false,
        }
    }
}

impl fmt::Debug for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VideoId({})", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for VideoId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for VideoId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
