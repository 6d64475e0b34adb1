// SPDX-License-Identifier: MPL-2.0
//! Directional navigation domain: focusable elements, the geometric
//! selector and input sequence detection.

mod element;
mod scoring;
mod sequence;

pub use element::{ElementId, ElementKind, FocusableElement};
pub use scoring::{
    direction_score, select_next, select_next_axis, DEFAULT_PERPENDICULAR_WEIGHT,
};
pub use sequence::{SequenceDetector, KONAMI_GAMEPAD};
