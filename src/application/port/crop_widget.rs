// SPDX-License-Identifier: MPL-2.0
//! Crop widget port.
//!
//! A crop widget shows one image inside one cell and lets the user pan and
//! zoom it. The engine only talks to it through normalized
//! [`CropTransform`]s; it never touches pixels. Dropping a widget tears it
//! down.

use crate::domain::grid::{CropTransform, ImageDimensions, ImageRef};
use std::fmt;

// =============================================================================
// CropWidgetError
// =============================================================================

/// Errors reported by crop widgets.
#[derive(Debug, Clone, PartialEq)]
pub enum CropWidgetError {
    /// The widget has not finished initializing.
    NotReady,

    /// The transform cannot be applied (non-finite values and the like).
    InvalidTransform(CropTransform),

    /// The widget could not be bound to the image.
    BindFailed(String),
}

impl fmt::Display for CropWidgetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CropWidgetError::NotReady => write!(f, "Crop widget is not ready"),
            CropWidgetError::InvalidTransform(t) => write!(
                f,
                "Invalid crop transform (offset {}, {} scale {}, {})",
                t.offset_x, t.offset_y, t.scale_x, t.scale_y
            ),
            CropWidgetError::BindFailed(msg) => write!(f, "Failed to bind crop widget: {msg}"),
        }
    }
}

impl std::error::Error for CropWidgetError {}

// =============================================================================
// Traits
// =============================================================================

/// A live crop widget bound to one cell.
pub trait CropWidget {
    /// Whether the widget accepts transforms yet.
    fn is_ready(&self) -> bool;

    /// Current transform.
    fn transform(&self) -> CropTransform;

    /// Applies `transform`. The widget may clamp it to its own limits.
    ///
    /// # Errors
    ///
    /// Returns an error if the widget is not ready or rejects the value.
    fn set_transform(&mut self, transform: CropTransform) -> Result<(), CropWidgetError>;

    /// Returns to fit-to-cell.
    fn reset(&mut self);

    /// Zooms by an additive `delta` relative to fit.
    fn zoom_by(&mut self, delta: f32);
}

/// Creates crop widgets for cells.
pub trait CropWidgetFactory {
    type Widget: CropWidget;

    /// Creates a widget showing `image` in a viewport of `cell_aspect`.
    ///
    /// # Errors
    ///
    /// Returns an error if the widget cannot be bound.
    fn create(
        &mut self,
        image: ImageRef,
        dimensions: ImageDimensions,
        cell_aspect: f32,
    ) -> Result<Self::Widget, CropWidgetError>;
}
