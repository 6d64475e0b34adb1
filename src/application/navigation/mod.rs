// SPDX-License-Identifier: MPL-2.0
//! Directional navigation engines.
//!
//! - [`NavigationController`]: sheet navigation with MENU and GRAB modes
//! - [`ViewerController`]: throttled axis navigation and live-view control
//! - [`FocusRegistry`]: the live element set both run over

mod controller;
pub mod input;
mod registry;
mod viewer;

pub use controller::{NavigationController, NavigationMode, SHEET_ELEMENT_KINDS};
pub use input::{GamepadState, GamepadTracker, InputFrame, InputSource, Key, KONAMI_KEYBOARD};
pub use registry::FocusRegistry;
pub use viewer::{ViewTransform, ViewerController, ViewerEvent, VIDEO_MODE_CHORD, VIEWER_ELEMENT_KINDS};

use crate::domain::tuning::{
    frame_count_bounds, BoostMultiplier, Deadzone, FrameCount, MoveSpeed, PerpendicularWeight,
};

/// Tuning of the navigation engines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationSettings {
    pub perpendicular_weight: PerpendicularWeight,
    pub menu_deadzone: Deadzone,
    pub grab_deadzone: Deadzone,
    /// Frames between focus steps while a direction is held.
    pub cooldown: FrameCount,
    pub move_speed: MoveSpeed,
    pub boost: BoostMultiplier,
    /// Frames between viewer focus steps.
    pub viewer_throttle: FrameCount,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            perpendicular_weight: PerpendicularWeight::default(),
            menu_deadzone: Deadzone::menu(),
            grab_deadzone: Deadzone::grab(),
            cooldown: FrameCount::new(frame_count_bounds::DEFAULT_COOLDOWN),
            move_speed: MoveSpeed::default(),
            boost: BoostMultiplier::default(),
            viewer_throttle: FrameCount::new(frame_count_bounds::DEFAULT_THROTTLE),
        }
    }
}
