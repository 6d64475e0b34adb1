// SPDX-License-Identifier: MPL-2.0
//! Fullscreen crop editing of one group.
//!
//! The editor gets its own widget on the group's image. Nothing is
//! written back while it is open; closing with commit hands the final
//! transform to the controller, which applies it to every cell of the
//! group, the one the editor was opened from included.

use super::sync::{CellBinding, InitialCrop};
use crate::application::port::CropWidget;
use crate::domain::grid::{CellIndex, CropTransform, GroupIndex, ImageDimensions, ImageRef};

/// Zoom step of the fullscreen zoom buttons.
pub const FULLSCREEN_ZOOM_STEP: f32 = 0.1;

/// An open fullscreen editing session.
#[derive(Debug)]
pub struct FullscreenEditor<W> {
    origin: CellIndex,
    binding: CellBinding<W>,
    dimensions: ImageDimensions,
    cell_aspect: f32,
    max_scale: f32,
}

impl<W: CropWidget> FullscreenEditor<W> {
    /// Wraps `widget`, loading the first acceptable of `candidates` once
    /// the widget is ready.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        origin: CellIndex,
        group: GroupIndex,
        image: ImageRef,
        widget: W,
        candidates: Vec<CropTransform>,
        dimensions: ImageDimensions,
        cell_aspect: f32,
        max_scale: f32,
    ) -> Self {
        Self {
            origin,
            binding: CellBinding::new(group, image, widget).with_initial(candidates),
            dimensions,
            cell_aspect,
            max_scale,
        }
    }

    #[must_use]
    pub fn origin(&self) -> CellIndex {
        self.origin
    }

    #[must_use]
    pub fn group(&self) -> GroupIndex {
        self.binding.group
    }

    #[must_use]
    pub fn image(&self) -> ImageRef {
        self.binding.image
    }

    /// Loads the stored transform if the widget became ready.
    pub fn settle(&mut self) -> Option<InitialCrop> {
        self.binding.apply_initial()
    }

    #[must_use]
    pub fn transform(&self) -> CropTransform {
        self.binding.widget.transform()
    }

    /// Zooms by `delta`, keeping the scale within `[1, max]`.
    pub fn zoom(&mut self, delta: f32) {
        self.settle();
        let target = self
            .transform()
            .zoomed_by(delta)
            .clamped(self.dimensions, self.cell_aspect, self.max_scale);
        if self.binding.apply(target).is_err() {
            self.binding.reset();
        }
    }

    pub fn zoom_in(&mut self) {
        self.zoom(FULLSCREEN_ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.zoom(-FULLSCREEN_ZOOM_STEP);
    }

    /// Back to fit-to-cell.
    pub fn reset(&mut self) {
        self.binding.reset();
    }

    /// Current zoom as a percentage of fit, for the readout.
    #[must_use]
    pub fn zoom_percent(&self) -> u32 {
        self.transform().zoom_percent()
    }

    /// Tears the widget down and returns the transform to commit.
    #[must_use]
    pub fn finish(mut self) -> CropTransform {
        self.settle();
        self.transform()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::CropWidgetError;

    #[derive(Debug, Default)]
    struct Widget(CropTransform);

    impl CropWidget for Widget {
        fn is_ready(&self) -> bool {
            true
        }
        fn transform(&self) -> CropTransform {
            self.0
        }
        fn set_transform(&mut self, t: CropTransform) -> Result<(), CropWidgetError> {
            self.0 = t;
            Ok(())
        }
        fn reset(&mut self) {
            self.0 = CropTransform::FIT;
        }
        fn zoom_by(&mut self, delta: f32) {
            self.0 = self.0.zoomed_by(delta);
        }
    }

    fn editor(candidates: Vec<CropTransform>) -> FullscreenEditor<Widget> {
        FullscreenEditor::new(
            CellIndex::new(0).unwrap(),
            GroupIndex::new(0),
            ImageRef::from_raw(1),
            Widget::default(),
            candidates,
            ImageDimensions::new(400, 300).unwrap(),
            4.0 / 3.0,
            3.0,
        )
    }

    #[test]
    fn loads_stored_transform() {
        let stored = CropTransform::new(0.0, 0.0, 2.0);
        let mut editor = editor(vec![stored]);
        assert_eq!(editor.settle(), Some(InitialCrop::Applied { fallback: false }));
        assert_eq!(editor.zoom_percent(), 200);
    }

    #[test]
    fn zoom_is_clamped_to_fit_and_max() {
        let mut editor = editor(Vec::new());
        editor.zoom_out();
        assert_eq!(editor.zoom_percent(), 100);
        for _ in 0..40 {
            editor.zoom_in();
        }
        assert_eq!(editor.zoom_percent(), 300);
        editor.reset();
        assert!(editor.finish().is_fit());
    }
}
