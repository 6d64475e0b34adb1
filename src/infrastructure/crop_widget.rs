// SPDX-License-Identifier: MPL-2.0
//! Headless crop widget.
//!
//! Holds the transform and enforces the same limits an on-screen widget
//! would (scale range, image edges), without rendering anything. Used by
//! the command-line front end and by tests.

use crate::application::port::{CropWidget, CropWidgetError, CropWidgetFactory};
use crate::domain::grid::{crop_scale_bounds, CropTransform, ImageDimensions, ImageRef};

/// A crop widget with no view.
#[derive(Debug, Clone)]
pub struct HeadlessCropWidget {
    image: ImageRef,
    dimensions: ImageDimensions,
    cell_aspect: f32,
    max_scale: f32,
    transform: CropTransform,
}

impl HeadlessCropWidget {
    #[must_use]
    pub fn image(&self) -> ImageRef {
        self.image
    }

    fn clamp(&self, transform: CropTransform) -> CropTransform {
        transform.clamped(self.dimensions, self.cell_aspect, self.max_scale)
    }
}

impl CropWidget for HeadlessCropWidget {
    fn is_ready(&self) -> bool {
        true
    }

    fn transform(&self) -> CropTransform {
        self.transform
    }

    fn set_transform(&mut self, transform: CropTransform) -> Result<(), CropWidgetError> {
        if !transform.is_finite() {
            return Err(CropWidgetError::InvalidTransform(transform));
        }
        self.transform = self.clamp(transform);
        Ok(())
    }

    fn reset(&mut self) {
        self.transform = CropTransform::FIT;
    }

    fn zoom_by(&mut self, delta: f32) {
        self.transform = self.clamp(self.transform.zoomed_by(delta));
    }
}

/// Creates [`HeadlessCropWidget`]s.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessCropFactory {
    max_scale: f32,
}

impl HeadlessCropFactory {
    #[must_use]
    pub fn new(max_scale: f32) -> Self {
        Self { max_scale }
    }
}

impl Default for HeadlessCropFactory {
    fn default() -> Self {
        Self::new(crop_scale_bounds::DEFAULT_MAX)
    }
}

impl CropWidgetFactory for HeadlessCropFactory {
    type Widget = HeadlessCropWidget;

    fn create(
        &mut self,
        image: ImageRef,
        dimensions: ImageDimensions,
        cell_aspect: f32,
    ) -> Result<HeadlessCropWidget, CropWidgetError> {
        if !cell_aspect.is_finite() || cell_aspect <= 0.0 {
            return Err(CropWidgetError::BindFailed(format!(
                "invalid cell aspect ratio {cell_aspect}"
            )));
        }
        Ok(HeadlessCropWidget {
            image,
            dimensions,
            cell_aspect,
            max_scale: self.max_scale,
            transform: CropTransform::FIT,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> HeadlessCropWidget {
        HeadlessCropFactory::default()
            .create(
                ImageRef::from_raw(1),
                ImageDimensions::new(400, 300).unwrap(),
                4.0 / 3.0,
            )
            .unwrap()
    }

    #[test]
    fn starts_at_fit_and_clamps_scale() {
        let mut w = widget();
        assert!(w.transform().is_fit());
        w.set_transform(CropTransform::new(0.0, 0.0, 20.0)).unwrap();
        assert_eq!(w.transform().scale_x, crop_scale_bounds::DEFAULT_MAX);
        w.zoom_by(-10.0);
        assert_eq!(w.transform().scale_x, 1.0);
    }

    #[test]
    fn offsets_stay_inside_image() {
        let mut w = widget();
        w.set_transform(CropTransform::new(0.9, -0.9, 2.0)).unwrap();
        // At 2x only a quarter of each side is slack.
        assert!((w.transform().offset_x - 0.25).abs() < 1e-4);
        assert!((w.transform().offset_y + 0.25).abs() < 1e-4);
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let mut w = widget();
        assert!(w.set_transform(CropTransform::new(f32::NAN, 0.0, 1.0)).is_err());
        assert!(w.transform().is_fit());
    }

    #[test]
    fn bad_aspect_fails_to_bind() {
        let result = HeadlessCropFactory::default().create(
            ImageRef::from_raw(1),
            ImageDimensions::new(10, 10).unwrap(),
            0.0,
        );
        assert!(matches!(result, Err(CropWidgetError::BindFailed(_))));
    }
}
