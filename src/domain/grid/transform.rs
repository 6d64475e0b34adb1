// SPDX-License-Identifier: MPL-2.0
//! Normalized crop transforms.
//!
//! A [`CropTransform`] says which part of a source image is visible inside
//! a cell's fixed-aspect viewport. It is expressed relative to the image
//! and to the *fit* region (the largest region of cell aspect that covers
//! the viewport), so the same value can be applied to cells of different
//! pixel sizes, including the fullscreen editor.
//!
//! ```text
//!  source image (normalized 0..1)
//! +-------------------------------+
//! |      +-----------+            |
//! |      |  visible  |  <- centre = (0.5 + offset_x, 0.5 + offset_y)
//! |      +-----------+            |   size   = fit / scale
//! +-------------------------------+
//! ```

use super::image::ImageDimensions;
use serde::{Deserialize, Serialize};

/// Crop magnification bounds, relative to fit-to-cell.
pub mod crop_scale_bounds {
    /// Fit-to-cell; zooming out further would show empty borders.
    pub const MIN: f32 = 1.0;
    /// Hard upper bound accepted from configuration.
    pub const MAX: f32 = 10.0;
    /// Default upper bound.
    pub const DEFAULT_MAX: f32 = 3.0;
}

// =============================================================================
// NormalizedRect
// =============================================================================

/// Rectangle in normalized source-image coordinates (`0..1` on both axes).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl NormalizedRect {
    /// Returns true when the rectangle lies inside the unit square.
    #[must_use]
    pub fn is_within_unit(&self) -> bool {
        const EPS: f32 = 1e-4;
        self.x >= -EPS
            && self.y >= -EPS
            && self.x + self.width <= 1.0 + EPS
            && self.y + self.height <= 1.0 + EPS
    }
}

/// Size of the fit-to-cell region for an image, in normalized coordinates.
///
/// The fit region covers the cell: one axis spans the whole image and the
/// other is cropped to the cell's aspect ratio.
#[must_use]
pub fn fit_extent(image: ImageDimensions, cell_aspect: f32) -> (f32, f32) {
    let image_aspect = image.aspect_ratio();
    if image_aspect > cell_aspect {
        (cell_aspect / image_aspect, 1.0)
    } else {
        (1.0, image_aspect / cell_aspect)
    }
}

// =============================================================================
// CropTransform
// =============================================================================

/// Pan/zoom of an image inside a cell. Rotation-free.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropTransform {
    /// Horizontal displacement of the visible centre from the image centre,
    /// as a fraction of the image width.
    pub offset_x: f32,
    /// Vertical displacement of the visible centre from the image centre,
    /// as a fraction of the image height.
    pub offset_y: f32,
    /// Horizontal magnification relative to fit-to-cell (`1.0` = fit).
    pub scale_x: f32,
    /// Vertical magnification relative to fit-to-cell (`1.0` = fit).
    pub scale_y: f32,
}

impl Default for CropTransform {
    fn default() -> Self {
        Self::FIT
    }
}

impl CropTransform {
    /// Centred, fit-to-cell transform.
    pub const FIT: CropTransform = CropTransform {
        offset_x: 0.0,
        offset_y: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
    };

    /// Creates a transform with a uniform scale.
    #[must_use]
    pub fn new(offset_x: f32, offset_y: f32, scale: f32) -> Self {
        Self {
            offset_x,
            offset_y,
            scale_x: scale,
            scale_y: scale,
        }
    }

    /// Returns true when every component is a finite number.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.offset_x.is_finite()
            && self.offset_y.is_finite()
            && self.scale_x.is_finite()
            && self.scale_y.is_finite()
    }

    /// Returns true when the transform can be shown: finite, with a
    /// positive scale on both axes.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.is_finite() && self.scale_x > 0.0 && self.scale_y > 0.0
    }

    /// Returns true if this is the default fit-to-cell transform.
    #[must_use]
    pub fn is_fit(&self) -> bool {
        *self == Self::FIT
    }

    /// Visible region for `image` shown in a viewport of `cell_aspect`.
    #[must_use]
    pub fn visible_region(&self, image: ImageDimensions, cell_aspect: f32) -> NormalizedRect {
        let (fit_w, fit_h) = fit_extent(image, cell_aspect);
        let width = fit_w / self.scale_x;
        let height = fit_h / self.scale_y;
        NormalizedRect {
            x: 0.5 + self.offset_x - width / 2.0,
            y: 0.5 + self.offset_y - height / 2.0,
            width,
            height,
        }
    }

    /// Returns a copy that satisfies the transform invariants for `image`.
    ///
    /// Scale is clamped to `[1, max_scale]` and the offsets are clamped so
    /// the visible region stays inside the image. Non-finite input collapses
    /// to [`CropTransform::FIT`].
    #[must_use]
    pub fn clamped(&self, image: ImageDimensions, cell_aspect: f32, max_scale: f32) -> Self {
        if !self.is_finite() || !cell_aspect.is_finite() || cell_aspect <= 0.0 {
            return Self::FIT;
        }
        let max_scale = max_scale.clamp(crop_scale_bounds::MIN, crop_scale_bounds::MAX);
        let scale_x = self.scale_x.clamp(crop_scale_bounds::MIN, max_scale);
        let scale_y = self.scale_y.clamp(crop_scale_bounds::MIN, max_scale);

        let (fit_w, fit_h) = fit_extent(image, cell_aspect);
        let slack_x = ((1.0 - fit_w / scale_x) / 2.0).max(0.0);
        let slack_y = ((1.0 - fit_h / scale_y) / 2.0).max(0.0);

        Self {
            offset_x: self.offset_x.clamp(-slack_x, slack_x),
            offset_y: self.offset_y.clamp(-slack_y, slack_y),
            scale_x,
            scale_y,
        }
    }

    /// Builds the transform whose visible region is `region`.
    ///
    /// Returns `None` for an empty or non-finite region.
    #[must_use]
    pub fn from_region(region: NormalizedRect, image: ImageDimensions, cell_aspect: f32) -> Option<Self> {
        let valid = [region.x, region.y, region.width, region.height]
            .iter()
            .all(|v| v.is_finite());
        if !valid || region.width <= 0.0 || region.height <= 0.0 {
            return None;
        }
        let (fit_w, fit_h) = fit_extent(image, cell_aspect);
        Some(Self {
            offset_x: region.x + region.width / 2.0 - 0.5,
            offset_y: region.y + region.height / 2.0 - 0.5,
            scale_x: fit_w / region.width,
            scale_y: fit_h / region.height,
        })
    }

    /// Adds `delta` to both scales. The caller clamps.
    #[must_use]
    pub fn zoomed_by(&self, delta: f32) -> Self {
        Self {
            scale_x: self.scale_x + delta,
            scale_y: self.scale_y + delta,
            ..*self
        }
    }

    /// Zoom level as a rounded percentage of fit-to-cell.
    #[must_use]
    pub fn zoom_percent(&self) -> u32 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percent = (self.scale_x.max(0.0) * 100.0).round() as u32;
        percent
    }
}

// =============================================================================
// LegacyBoxData
// =============================================================================

/// Absolute canvas geometry as laid out by the crop widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasBox {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub natural_width: f32,
    pub natural_height: f32,
}

/// Absolute crop box geometry inside the widget container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropBox {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// Container-specific crop state stored by older projects.
///
/// These values only make sense for the container size they were captured
/// in; they are kept to restore projects that predate normalized
/// transforms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegacyBoxData {
    pub canvas: CanvasBox,
    pub crop_box: CropBox,
}

impl LegacyBoxData {
    /// Converts the absolute boxes into a normalized transform.
    ///
    /// Returns `None` when the boxes are degenerate.
    #[must_use]
    pub fn to_transform(&self, cell_aspect: f32) -> Option<CropTransform> {
        let canvas = &self.canvas;
        let crop = &self.crop_box;
        if canvas.natural_width <= 0.0
            || canvas.natural_height <= 0.0
            || canvas.width <= 0.0
            || canvas.height <= 0.0
        {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let image = ImageDimensions::new(
            canvas.natural_width.round() as u32,
            canvas.natural_height.round() as u32,
        )?;

        // Rendered pixels per natural pixel on each axis.
        let ratio_x = canvas.width / canvas.natural_width;
        let ratio_y = canvas.height / canvas.natural_height;

        let region = NormalizedRect {
            x: (crop.left - canvas.left) / ratio_x / canvas.natural_width,
            y: (crop.top - canvas.top) / ratio_y / canvas.natural_height,
            width: crop.width / ratio_x / canvas.natural_width,
            height: crop.height / ratio_y / canvas.natural_height,
        };
        CropTransform::from_region(region, image, cell_aspect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const CELL_ASPECT: f32 = 4.0 / 3.0;

    fn dims(w: u32, h: u32) -> ImageDimensions {
        ImageDimensions::new(w, h).unwrap()
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn usable_needs_finite_positive_scale() {
        assert!(CropTransform::FIT.is_usable());
        assert!(!CropTransform::new(0.0, 0.0, 0.0).is_usable());
        assert!(!CropTransform::new(0.0, 0.0, -1.0).is_usable());
        assert!(!CropTransform::new(f32::NAN, 0.0, 1.0).is_usable());
    }

    #[test]
    fn fit_extent_crops_the_wider_axis() {
        // 2:1 image in a 4:3 cell: full height, partial width.
        let (w, h) = fit_extent(dims(200, 100), CELL_ASPECT);
        assert!(close(w, CELL_ASPECT / 2.0));
        assert!(close(h, 1.0));

        // 1:1 image in a 4:3 cell: full width, partial height.
        let (w, h) = fit_extent(dims(100, 100), CELL_ASPECT);
        assert!(close(w, 1.0));
        assert!(close(h, 0.75));
    }

    #[test]
    fn fit_transform_region_is_centred_and_inside() {
        let region = CropTransform::FIT.visible_region(dims(100, 100), CELL_ASPECT);
        assert!(region.is_within_unit());
        assert!(close(region.x, 0.0));
        assert!(close(region.y, 0.125));
    }

    #[test]
    fn clamped_raises_scale_to_fit() {
        let t = CropTransform::new(0.0, 0.0, 0.5).clamped(dims(100, 100), CELL_ASPECT, 3.0);
        assert_eq!(t.scale_x, 1.0);
        assert_eq!(t.scale_y, 1.0);
    }

    #[test]
    fn clamped_limits_offset_to_image_bounds() {
        let t = CropTransform::new(0.9, -0.9, 2.0).clamped(dims(100, 100), CELL_ASPECT, 3.0);
        let region = t.visible_region(dims(100, 100), CELL_ASPECT);
        assert!(region.is_within_unit());
        assert!(close(t.offset_x, 0.25));
    }

    #[test]
    fn clamped_replaces_non_finite_values_with_fit() {
        let t = CropTransform::new(f32::NAN, 0.0, 2.0).clamped(dims(10, 10), CELL_ASPECT, 3.0);
        assert!(t.is_fit());
    }

    #[test]
    fn from_region_inverts_visible_region() {
        let original = CropTransform::new(0.1, -0.05, 1.5);
        let image = dims(300, 200);
        let region = original.visible_region(image, CELL_ASPECT);
        let back = CropTransform::from_region(region, image, CELL_ASPECT).unwrap();
        assert!(close(back.offset_x, original.offset_x));
        assert!(close(back.offset_y, original.offset_y));
        assert!(close(back.scale_x, original.scale_x));
    }

    #[test]
    fn legacy_box_converts_to_normalized_transform() {
        // 400x300 image rendered at half size, crop box covering its
        // centred half.
        let legacy = LegacyBoxData {
            canvas: CanvasBox {
                left: 10.0,
                top: 20.0,
                width: 200.0,
                height: 150.0,
                natural_width: 400.0,
                natural_height: 300.0,
            },
            crop_box: CropBox {
                left: 60.0,
                top: 57.5,
                width: 100.0,
                height: 75.0,
            },
        };
        let t = legacy.to_transform(CELL_ASPECT).unwrap();
        assert!(close(t.offset_x, 0.0));
        assert!(close(t.offset_y, 0.0));
        assert!(close(t.scale_x, 2.0));
        assert!(close(t.scale_y, 2.0));
    }

    #[test]
    fn degenerate_legacy_box_is_rejected() {
        let legacy = LegacyBoxData {
            canvas: CanvasBox {
                left: 0.0,
                top: 0.0,
                width: 0.0,
                height: 0.0,
                natural_width: 0.0,
                natural_height: 0.0,
            },
            crop_box: CropBox {
                left: 0.0,
                top: 0.0,
                width: 10.0,
                height: 10.0,
            },
        };
        assert!(legacy.to_transform(CELL_ASPECT).is_none());
    }

    #[test]
    fn zoom_percent_rounds() {
        assert_eq!(CropTransform::new(0.0, 0.0, 1.234).zoom_percent(), 123);
    }

    proptest! {
        #[test]
        fn clamped_region_always_stays_inside_image(
            ox in -2.0f32..2.0,
            oy in -2.0f32..2.0,
            scale in 0.1f32..12.0,
            w in 1u32..4000,
            h in 1u32..4000,
        ) {
            let image = dims(w, h);
            let t = CropTransform::new(ox, oy, scale).clamped(image, CELL_ASPECT, 3.0);
            prop_assert!(t.scale_x >= 1.0 && t.scale_x <= 3.0);
            prop_assert!(t.visible_region(image, CELL_ASPECT).is_within_unit());
        }
    }
}
