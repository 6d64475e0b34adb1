// SPDX-License-Identifier: MPL-2.0
//! Domain layer - pure types and rules of the sticker sheet.
//!
//! Nothing here knows about image decoding, widgets or input devices.
//!
//! # Modules
//!
//! - [`grid`]: cells, groups, layout modes, crop transforms, paper sizes
//! - [`geometry`]: points, rectangles and direction vectors
//! - [`stamp`]: decorative stamps
//! - [`navigation`]: focusable elements, the directional selector and
//!   sequence detection
//! - [`tuning`]: clamped tuning values ([`FrameCount`](tuning::FrameCount),
//!   [`Deadzone`](tuning::Deadzone), [`PerpendicularWeight`](tuning::PerpendicularWeight))

pub mod geometry;
pub mod grid;
pub mod navigation;
pub mod stamp;
pub mod tuning;
