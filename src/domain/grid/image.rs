// SPDX-License-Identifier: MPL-2.0
//! Image handles and portable image sources.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Opaque, revocable handle to decoded image bytes.
///
/// Handles are minted by an `ImageSource` and must be handed back to it
/// exactly once through `release`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageRef(u64);

impl ImageRef {
    /// Wraps a raw handle id. Only image sources should mint handles.
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw handle id.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "image#{}", self.0)
    }
}

/// Natural pixel size of a source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    /// Creates dimensions, returning `None` for a degenerate (zero) size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self { width, height })
    }

    /// Width divided by height.
    #[must_use]
    pub fn aspect_ratio(self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Image source in a form that survives serialization.
///
/// Used by project snapshots and by cross-surface imports (the capture
/// station hands over data URLs, uploads arrive as file paths).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PortableImage {
    /// Image file on disk.
    Path(PathBuf),
    /// `data:` URL carrying the encoded bytes inline.
    DataUrl(String),
}

impl PortableImage {
    /// Short human-readable label, without embedding inline data.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            PortableImage::Path(path) => path
                .file_name()
                .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned()),
            PortableImage::DataUrl(url) => {
                let header = url.split(',').next().unwrap_or("data:");
                format!("{header},…")
            }
        }
    }
}

impl From<PathBuf> for PortableImage {
    fn from(path: PathBuf) -> Self {
        PortableImage::Path(path)
    }
}
