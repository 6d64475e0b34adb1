// SPDX-License-Identifier: MPL-2.0
//! Grid domain types.
//!
//! - [`CellIndex`] / [`GroupIndex`]: the two index spaces of the sheet
//! - [`LayoutMode`]: partition of the 16 cells into image groups
//! - [`CropTransform`]: normalized pan/zoom of an image inside a cell
//! - [`PaperSize`]: paper format, which fixes the cell aspect ratio

mod cell;
mod image;
mod mode;
mod paper;
mod transform;

pub use cell::{CellIndex, GroupIndex, CELL_COUNT, GRID_SIDE};
pub use image::{ImageDimensions, ImageRef, PortableImage};
pub use mode::{LayoutMode, UnknownLayoutMode, QUAD_PARTITION};
pub use paper::{CellSize, PaperSize};
pub use transform::{
    crop_scale_bounds, fit_extent, CanvasBox, CropBox, CropTransform, LegacyBoxData,
    NormalizedRect,
};

use std::fmt;

/// Errors raised by grid state operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A group slot index does not exist under the active mode.
    GroupOutOfRange {
        /// Requested slot.
        index: usize,
        /// Number of slots under the active mode.
        count: usize,
    },
    /// A cell index is off the 4×4 grid.
    CellOutOfRange(usize),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::GroupOutOfRange { index, count } => {
                write!(f, "group {index} out of range (mode has {count} groups)")
            }
            GridError::CellOutOfRange(index) => write!(f, "cell {index} is off the grid"),
        }
    }
}

impl std::error::Error for GridError {}
