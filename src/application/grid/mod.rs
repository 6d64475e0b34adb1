// SPDX-License-Identifier: MPL-2.0
//! Grid engine.
//!
//! - [`GroupImageStore`]: one image slot per group
//! - [`sync`]: fan-out of crop edits to sibling cells
//! - [`FullscreenEditor`]: large-view editing of one group
//! - [`GridController`]: owns all of the above plus the live widgets

mod controller;
mod fullscreen;
mod store;
pub mod sync;

pub use controller::GridController;
pub use fullscreen::{FullscreenEditor, FULLSCREEN_ZOOM_STEP};
pub use store::{GroupImage, GroupImageStore};
pub use sync::{CellBinding, InitialCrop};

use crate::application::port::ImageSourceError;
use crate::domain::grid::{
    crop_scale_bounds, CellIndex, CropTransform, GroupIndex, ImageRef, LayoutMode, PaperSize,
};
use crate::domain::tuning::{frame_count_bounds, FrameCount};

/// Tuning of the grid engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSettings {
    /// Mode a fresh sheet starts in.
    pub initial_mode: LayoutMode,
    pub paper: PaperSize,
    /// Frames between a mode switch and deferred image assignment.
    pub settle_frames: FrameCount,
    /// Upper bound of crop magnification relative to fit.
    pub max_crop_scale: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            initial_mode: LayoutMode::default(),
            paper: PaperSize::default(),
            settle_frames: FrameCount::new(frame_count_bounds::DEFAULT_SETTLE),
            max_crop_scale: crop_scale_bounds::DEFAULT_MAX,
        }
    }
}

/// Result of assigning a batch of images to consecutive slots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignReport {
    /// Slots that received a new image.
    pub assigned: Vec<GroupIndex>,
    /// Slots whose image failed to load; they keep their previous content.
    pub failed: Vec<(GroupIndex, ImageSourceError)>,
    /// Sources dropped because the mode has no slot for them.
    pub skipped: usize,
}

/// What the user's crop edit turned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The cell has no widget.
    Ignored,
    /// The widget was repeating a transform the engine gave it.
    Echo,
    /// Queued for propagation on the next frame.
    Queued,
}

/// One cell as the export pipeline sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedCell {
    pub cell: CellIndex,
    pub group: GroupIndex,
    pub image: Option<ImageRef>,
    pub transform: CropTransform,
}
