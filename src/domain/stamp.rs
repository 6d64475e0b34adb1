// SPDX-License-Identifier: MPL-2.0
//! Decorative stamps placed freely on the sheet.

use super::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stamp size bounds, in pixels.
pub mod stamp_size_bounds {
    /// Smallest size a resize can reach.
    pub const MIN: f32 = 10.0;
    /// Default size for emoji stamps (3rem).
    pub const DEFAULT_EMOJI: f32 = 48.0;
    /// Default size for text stamps (2rem).
    pub const DEFAULT_TEXT: f32 = 32.0;
}

/// Rough glyph advance of a text stamp, as a fraction of its font size.
const TEXT_ADVANCE: f32 = 0.6;

/// Identifier of a stamp, unique within a stamp layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StampId(u64);

impl StampId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for StampId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stamp#{}", self.0)
    }
}

/// What a stamp shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StampContent {
    /// A single emoji (or short glyph sequence) at emoji scale.
    Emoji { glyph: String },
    /// Styled free text.
    Text {
        text: String,
        font: String,
        color: String,
    },
}

impl StampContent {
    /// Size a new stamp of this kind starts with.
    #[must_use]
    pub fn default_size(&self) -> f32 {
        match self {
            StampContent::Emoji { .. } => stamp_size_bounds::DEFAULT_EMOJI,
            StampContent::Text { .. } => stamp_size_bounds::DEFAULT_TEXT,
        }
    }

    /// Visible characters of the stamp.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            StampContent::Emoji { glyph } => glyph,
            StampContent::Text { text, .. } => text,
        }
    }
}

/// A placed stamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stamp {
    pub id: StampId,
    pub content: StampContent,
    /// Centre of the stamp on the sheet.
    pub position: Point,
    /// Font size in pixels.
    pub size: f32,
    /// Clockwise rotation in degrees.
    pub rotation_deg: f32,
}

impl Stamp {
    /// Approximate unrotated layout box, used for navigation geometry.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        let width = match &self.content {
            StampContent::Emoji { .. } => self.size,
            StampContent::Text { text, .. } => {
                self.size * TEXT_ADVANCE * text.chars().count().max(1) as f32
            }
        };
        Rect::centered_at(self.position, width, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_stamp_bounds_grow_with_length() {
        let stamp = Stamp {
            id: StampId::new(1),
            content: StampContent::Text {
                text: "hello".into(),
                font: "serif".into(),
                color: "#fff".into(),
            },
            position: Point::new(100.0, 100.0),
            size: 20.0,
            rotation_deg: 0.0,
        };
        let bounds = stamp.bounds();
        assert!((bounds.width - 60.0).abs() < 1e-4);
        assert_eq!(bounds.center(), Point::new(100.0, 100.0));
    }

    #[test]
    fn default_sizes_depend_on_kind() {
        let emoji = StampContent::Emoji { glyph: "⭐".into() };
        assert_eq!(emoji.default_size(), stamp_size_bounds::DEFAULT_EMOJI);
    }
}
