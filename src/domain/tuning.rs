// SPDX-License-Identifier: MPL-2.0
//! Tuning newtypes.
//!
//! Empirical constants of the grid and navigation engines, wrapped so they
//! are always within a usable range regardless of where they were loaded
//! from.

// =============================================================================
// Bounds
// =============================================================================

/// Perpendicular penalty weight bounds.
pub mod perpendicular_weight_bounds {
    pub const MIN: f32 = 0.0;
    pub const MAX: f32 = 50.0;
    pub const DEFAULT: f32 = 2.0;
}

/// Analog deadzone bounds (fraction of full deflection).
pub mod deadzone_bounds {
    pub const MIN: f32 = 0.0;
    pub const MAX: f32 = 0.95;
    /// Menu navigation needs a deliberate push.
    pub const DEFAULT_MENU: f32 = 0.5;
    /// Grab movement reacts to light touches.
    pub const DEFAULT_GRAB: f32 = 0.1;
}

/// Frame count bounds shared by cooldowns, throttles and settle delays.
pub mod frame_count_bounds {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 120;
    /// Focus step cooldown.
    pub const DEFAULT_COOLDOWN: u32 = 8;
    /// Delay between a mode switch and deferred image assignment.
    pub const DEFAULT_SETTLE: u32 = 8;
    /// Viewer throttle (~200 ms at 60 Hz).
    pub const DEFAULT_THROTTLE: u32 = 12;
}

/// Grab movement speed bounds, in pixels per frame.
pub mod move_speed_bounds {
    pub const MIN: f32 = 0.5;
    pub const MAX: f32 = 50.0;
    pub const DEFAULT: f32 = 5.0;
}

/// Boost multiplier bounds.
pub mod boost_bounds {
    pub const MIN: f32 = 1.0;
    pub const MAX: f32 = 10.0;
    pub const DEFAULT: f32 = 3.0;
}

/// Event buffer capacity bounds.
pub mod event_capacity_bounds {
    pub const MIN: usize = 16;
    pub const MAX: usize = 10_000;
    pub const DEFAULT: usize = 500;
}

fn clamp_or(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}

// =============================================================================
// PerpendicularWeight
// =============================================================================

/// Weight `k` of the navigator's sideways penalty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerpendicularWeight(f32);

impl PerpendicularWeight {
    /// Creates a weight, clamping to the valid range. Non-finite input
    /// yields the default.
    #[must_use]
    pub fn new(value: f32) -> Self {
        Self(clamp_or(
            value,
            perpendicular_weight_bounds::MIN,
            perpendicular_weight_bounds::MAX,
            perpendicular_weight_bounds::DEFAULT,
        ))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for PerpendicularWeight {
    fn default() -> Self {
        Self(perpendicular_weight_bounds::DEFAULT)
    }
}

// =============================================================================
// Deadzone
// =============================================================================

/// Analog stick deadzone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deadzone(f32);

impl Deadzone {
    #[must_use]
    pub fn new(value: f32) -> Self {
        Self(clamp_or(
            value,
            deadzone_bounds::MIN,
            deadzone_bounds::MAX,
            deadzone_bounds::DEFAULT_MENU,
        ))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    #[must_use]
    pub fn menu() -> Self {
        Self(deadzone_bounds::DEFAULT_MENU)
    }

    #[must_use]
    pub fn grab() -> Self {
        Self(deadzone_bounds::DEFAULT_GRAB)
    }
}

// =============================================================================
// FrameCount
// =============================================================================

/// A number of animation frames, at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FrameCount(u32);

impl FrameCount {
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value.clamp(frame_count_bounds::MIN, frame_count_bounds::MAX))
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }
}

// =============================================================================
// MoveSpeed / BoostMultiplier
// =============================================================================

/// Base speed of a grabbed object at full stick deflection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveSpeed(f32);

impl MoveSpeed {
    #[must_use]
    pub fn new(value: f32) -> Self {
        Self(clamp_or(
            value,
            move_speed_bounds::MIN,
            move_speed_bounds::MAX,
            move_speed_bounds::DEFAULT,
        ))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for MoveSpeed {
    fn default() -> Self {
        Self(move_speed_bounds::DEFAULT)
    }
}

/// Speed factor while the boost button is held.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoostMultiplier(f32);

impl BoostMultiplier {
    #[must_use]
    pub fn new(value: f32) -> Self {
        Self(clamp_or(value, boost_bounds::MIN, boost_bounds::MAX, boost_bounds::DEFAULT))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for BoostMultiplier {
    fn default() -> Self {
        Self(boost_bounds::DEFAULT)
    }
}

// =============================================================================
// EventCapacity
// =============================================================================

/// Capacity of the diagnostic event buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventCapacity(usize);

impl EventCapacity {
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(event_capacity_bounds::MIN, event_capacity_bounds::MAX))
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for EventCapacity {
    fn default() -> Self {
        Self(event_capacity_bounds::DEFAULT)
    }
}

// =============================================================================
// Tests
// =============================================================================
