// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! Range bounds live next to the domain newtypes that enforce them
//! (`domain::tuning`, `domain::grid::crop_scale_bounds`); this module only
//! names the values a fresh `settings.toml` would carry.
//!
//! # Categories
//!
//! - **Grid**: settle delay and crop magnification
//! - **Navigation**: scoring weight, deadzones, repeat timing, grab movement
//! - **Diagnostics**: event buffer size
//! - **Logging**: default `tracing` filter

use crate::domain::grid::crop_scale_bounds;
use crate::domain::tuning::{
    boost_bounds, deadzone_bounds, event_capacity_bounds, frame_count_bounds, move_speed_bounds,
    perpendicular_weight_bounds,
};

// ==========================================================================
// Grid Defaults
// ==========================================================================

/// Frames between a layout switch and deferred image assignment.
pub const DEFAULT_SETTLE_FRAMES: u32 = frame_count_bounds::DEFAULT_SETTLE;

/// Maximum crop magnification relative to fit-to-cell.
pub const DEFAULT_MAX_CROP_SCALE: f32 = crop_scale_bounds::DEFAULT_MAX;

// ==========================================================================
// Navigation Defaults
// ==========================================================================

/// Penalty factor applied to off-axis distance when picking a neighbour.
pub const DEFAULT_PERPENDICULAR_WEIGHT: f32 = perpendicular_weight_bounds::DEFAULT;

/// Stick magnitude ignored while moving focus.
pub const DEFAULT_MENU_DEADZONE: f32 = deadzone_bounds::DEFAULT_MENU;

/// Stick magnitude ignored while moving a grabbed object.
pub const DEFAULT_GRAB_DEADZONE: f32 = deadzone_bounds::DEFAULT_GRAB;

/// Frames between focus steps while a direction is held.
pub const DEFAULT_COOLDOWN_FRAMES: u32 = frame_count_bounds::DEFAULT_COOLDOWN;

/// Pixels per frame at full stick deflection.
pub const DEFAULT_MOVE_SPEED: f32 = move_speed_bounds::DEFAULT;

/// Speed multiplier while the boost trigger is held.
pub const DEFAULT_BOOST: f32 = boost_bounds::DEFAULT;

/// Frames between focus steps in the viewer (about 200 ms at 60 Hz).
pub const DEFAULT_VIEWER_THROTTLE_FRAMES: u32 = frame_count_bounds::DEFAULT_THROTTLE;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Number of diagnostic events retained.
pub const DEFAULT_EVENT_CAPACITY: usize = event_capacity_bounds::DEFAULT;

// ==========================================================================
// Logging Defaults
// ==========================================================================

/// Filter used when neither the config nor `STICKER_SHEET_LOG` sets one.
pub const DEFAULT_LOG_FILTER: &str = "info";

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_SETTLE_FRAMES >= frame_count_bounds::MIN);
    assert!(DEFAULT_SETTLE_FRAMES <= frame_count_bounds::MAX);
    assert!(DEFAULT_COOLDOWN_FRAMES >= frame_count_bounds::MIN);
    assert!(DEFAULT_VIEWER_THROTTLE_FRAMES <= frame_count_bounds::MAX);

    assert!(DEFAULT_MAX_CROP_SCALE >= crop_scale_bounds::MIN);
    assert!(DEFAULT_MAX_CROP_SCALE <= crop_scale_bounds::MAX);

    assert!(DEFAULT_MENU_DEADZONE > DEFAULT_GRAB_DEADZONE);
    assert!(DEFAULT_MENU_DEADZONE <= deadzone_bounds::MAX);

    assert!(DEFAULT_MOVE_SPEED >= move_speed_bounds::MIN);
    assert!(DEFAULT_BOOST >= boost_bounds::MIN);

    assert!(DEFAULT_EVENT_CAPACITY >= event_capacity_bounds::MIN);
};
