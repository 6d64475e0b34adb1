// SPDX-License-Identifier: MPL-2.0
//! Printable paper formats and their sticker cell geometry.

use serde::{Deserialize, Serialize};

use super::cell::GRID_SIDE;
use crate::domain::geometry::Point;
use std::fmt;
use std::str::FromStr;

const PX_PER_MM: f32 = 96.0 / 25.4;

/// Paper format the sheet is laid out for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PaperSize {
    /// US Letter, landscape.
    #[default]
    Letter,
    /// 4×6 inch photo paper.
    #[serde(rename = "4x6")]
    FourBySix,
    /// Japanese hagaki postcard.
    Hagaki,
}

/// Physical dimensions of a single sticker cell, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSize {
    pub width_mm: f32,
    pub height_mm: f32,
}

impl PaperSize {
    /// Size of one cell on this paper.
    #[must_use]
    pub fn cell_size(self) -> CellSize {
        match self {
            PaperSize::Letter => CellSize {
                width_mm: 58.52,
                height_mm: 44.0,
            },
            PaperSize::FourBySix | PaperSize::Hagaki => CellSize {
                width_mm: 26.6,
                height_mm: 20.0,
            },
        }
    }

    /// Centre of the printed grid in CSS pixels (96 dpi), where new stamps
    /// land by default.
    #[must_use]
    pub fn sheet_center_px(self) -> Point {
        let size = self.cell_size();
        let half_cells = (GRID_SIDE as f32) / 2.0;
        Point::new(
            size.width_mm * half_cells * PX_PER_MM,
            size.height_mm * half_cells * PX_PER_MM,
        )
    }

    /// Width over height of a cell; crop widgets are locked to this ratio.
    #[must_use]
    pub fn cell_aspect_ratio(self) -> f32 {
        let size = self.cell_size();
        size.width_mm / size.height_mm
    }

    /// Name used in settings and snapshots.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PaperSize::Letter => "letter",
            PaperSize::FourBySix => "4x6",
            PaperSize::Hagaki => "hagaki",
        }
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaperSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "letter" => Ok(PaperSize::Letter),
            "4x6" => Ok(PaperSize::FourBySix),
            "hagaki" => Ok(PaperSize::Hagaki),
            other => Err(format!("unknown paper size: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_aspect_is_landscape_for_all_papers() {
        for paper in [PaperSize::Letter, PaperSize::FourBySix, PaperSize::Hagaki] {
            assert!(paper.cell_aspect_ratio() > 1.0);
        }
    }

    #[test]
    fn four_by_six_round_trips_through_serde_name() {
        let json = serde_json::to_string(&PaperSize::FourBySix).unwrap();
        assert_eq!(json, "\"4x6\"");
        assert_eq!("4x6".parse::<PaperSize>(), Ok(PaperSize::FourBySix));
    }
}
