// SPDX-License-Identifier: MPL-2.0
//! Project snapshots.
//!
//! A snapshot is the portable form of a whole sheet: layout mode, paper,
//! one optional image per group slot and every stamp. It is parsed and
//! validated completely before anything is applied, so a bad document
//! never leaves the sheet half restored.
//!
//! # Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "mode": "quad",
//!   "paper": "letter",
//!   "images": [
//!     { "source": { "kind": "path", "value": "a.png" },
//!       "transform": { "offset_x": 0.0, "offset_y": 0.0, "scale_x": 1.5, "scale_y": 1.5 } },
//!     null
//!   ],
//!   "stamps": [
//!     { "kind": "emoji", "glyph": "⭐", "position": { "x": 10.0, "y": 20.0 },
//!       "size": 48.0, "rotation_deg": 0.0 }
//!   ]
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::geometry::Point;
use crate::domain::grid::{CropTransform, LayoutMode, LegacyBoxData, PaperSize, PortableImage};
use crate::domain::stamp::StampContent;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

/// One occupied image slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotImage {
    pub source: PortableImage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<CropTransform>,
    /// Crop boxes saved by projects that predate normalized transforms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_box: Option<LegacyBoxData>,
}

/// One stamp, without its runtime id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotStamp {
    #[serde(flatten)]
    pub content: StampContent,
    pub position: Point,
    pub size: f32,
    #[serde(default)]
    pub rotation_deg: f32,
}

/// Portable state of a whole sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    #[serde(default = "default_version")]
    pub version: u32,
    pub mode: LayoutMode,
    #[serde(default)]
    pub paper: PaperSize,
    #[serde(default)]
    pub images: Vec<Option<SnapshotImage>>,
    #[serde(default)]
    pub stamps: Vec<SnapshotStamp>,
}

/// Why a snapshot was refused.
#[derive(Debug, Clone, PartialEq)]
pub enum RestoreError {
    /// Not JSON, or JSON of the wrong shape.
    Malformed(String),
    UnsupportedVersion { found: u32, supported: u32 },
    /// More image slots than the mode has groups.
    TooManyImages {
        count: usize,
        mode: LayoutMode,
        capacity: usize,
    },
    InvalidStamp { index: usize, reason: &'static str },
}

impl fmt::Display for RestoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestoreError::Malformed(msg) => write!(f, "malformed project: {msg}"),
            RestoreError::UnsupportedVersion { found, supported } => {
                write!(f, "project version {found} is not supported (latest is {supported})")
            }
            RestoreError::TooManyImages {
                count,
                mode,
                capacity,
            } => write!(f, "{count} image slots given but {mode} mode has {capacity}"),
            RestoreError::InvalidStamp { index, reason } => {
                write!(f, "stamp {index} is invalid: {reason}")
            }
        }
    }
}

impl std::error::Error for RestoreError {}

impl ProjectSnapshot {
    /// Empty snapshot for `mode`.
    #[must_use]
    pub fn new(mode: LayoutMode, paper: PaperSize) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            mode,
            paper,
            images: Vec::new(),
            stamps: Vec::new(),
        }
    }

    /// Parses and validates a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`RestoreError::Malformed`] when the document does not have
    /// the snapshot shape, or the validation error otherwise.
    pub fn from_json(json: &str) -> Result<Self, RestoreError> {
        let snapshot: Self =
            serde_json::from_str(json).map_err(|e| RestoreError::Malformed(e.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Serializes to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if a float is not representable in JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Checks everything a restore relies on.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), RestoreError> {
        if self.version == 0 || self.version > SNAPSHOT_VERSION {
            return Err(RestoreError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }

        let capacity = self.mode.group_count();
        if self.images.len() > capacity {
            return Err(RestoreError::TooManyImages {
                count: self.images.len(),
                mode: self.mode,
                capacity,
            });
        }

        for (index, stamp) in self.stamps.iter().enumerate() {
            let reason = if !stamp.size.is_finite() || stamp.size <= 0.0 {
                Some("size must be a positive number")
            } else if !stamp.position.x.is_finite() || !stamp.position.y.is_finite() {
                Some("position must be finite")
            } else if !stamp.rotation_deg.is_finite() {
                Some("rotation must be finite")
            } else if stamp.content.as_str().is_empty() {
                Some("content is empty")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(RestoreError::InvalidStamp { index, reason });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn emoji_stamp(size: f32) -> SnapshotStamp {
        SnapshotStamp {
            content: StampContent::Emoji { glyph: "⭐".into() },
            position: Point::new(10.0, 20.0),
            size,
            rotation_deg: 15.0,
        }
    }

    #[test]
    fn json_round_trip_keeps_content() {
        let mut snapshot = ProjectSnapshot::new(LayoutMode::Quad, PaperSize::Hagaki);
        snapshot.images = vec![
            Some(SnapshotImage {
                source: PortableImage::Path(PathBuf::from("a.png")),
                transform: Some(CropTransform::new(0.1, 0.0, 1.5)),
                legacy_box: None,
            }),
            None,
        ];
        snapshot.stamps.push(emoji_stamp(48.0));
        let json = snapshot.to_json().unwrap();
        assert_eq!(ProjectSnapshot::from_json(&json).unwrap(), snapshot);
    }

    #[test]
    fn wrong_shape_is_malformed() {
        let err = ProjectSnapshot::from_json(r#"{"mode":"quad","images":"not-an-array"}"#).unwrap_err();
        assert!(matches!(err, RestoreError::Malformed(_)));
        let err = ProjectSnapshot::from_json("not json").unwrap_err();
        assert!(matches!(err, RestoreError::Malformed(_)));
    }

    #[test]
    fn minimal_document_uses_defaults() {
        let snapshot = ProjectSnapshot::from_json(r#"{"mode":"single"}"#).unwrap();
        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(snapshot.paper, PaperSize::Letter);
        assert!(snapshot.images.is_empty());
    }

    #[test]
    fn too_many_images_for_mode() {
        let json = r#"{"mode":"single","images":[null,null]}"#;
        assert_eq!(
            ProjectSnapshot::from_json(json).unwrap_err(),
            RestoreError::TooManyImages {
                count: 2,
                mode: LayoutMode::Single,
                capacity: 1
            }
        );
    }

    #[test]
    fn future_version_is_refused() {
        let json = r#"{"version":99,"mode":"quad"}"#;
        assert!(matches!(
            ProjectSnapshot::from_json(json).unwrap_err(),
            RestoreError::UnsupportedVersion { found: 99, .. }
        ));
    }

    #[test]
    fn bad_stamp_size_is_refused() {
        let mut snapshot = ProjectSnapshot::new(LayoutMode::Quad, PaperSize::Letter);
        snapshot.stamps.push(emoji_stamp(48.0));
        snapshot.stamps.push(emoji_stamp(-1.0));
        assert_eq!(
            snapshot.validate().unwrap_err(),
            RestoreError::InvalidStamp {
                index: 1,
                reason: "size must be a positive number"
            }
        );
    }

    #[test]
    fn zero_scale_transform_passes_validation() {
        let mut snapshot = ProjectSnapshot::new(LayoutMode::Quad, PaperSize::Letter);
        snapshot.images.push(Some(SnapshotImage {
            source: PortableImage::DataUrl("data:image/png;base64,AAAA".into()),
            transform: Some(CropTransform::new(0.0, 0.0, 0.0)),
            legacy_box: None,
        }));
        // The grid falls back to fit when it restores the slot.
        assert_eq!(snapshot.validate(), Ok(()));
    }
}
