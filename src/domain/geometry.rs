// SPDX-License-Identifier: MPL-2.0
//! Screen-space geometry shared by stamps and navigation.

use serde::{Deserialize, Serialize};

/// Point in screen or sheet pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Angle of the vector from `origin` to this point, in radians.
    #[must_use]
    pub fn angle_from(self, origin: Point) -> f32 {
        (self.y - origin.y).atan2(self.x - origin.x)
    }

    /// Returns this point moved by `(dx, dy)`.
    #[must_use]
    pub fn translated(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Axis-aligned layout box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a rectangle of the given size centred on `center`.
    #[must_use]
    pub fn centered_at(center: Point, width: f32, height: f32) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// A box with no area is not rendered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Direction of travel; keyboard arrows give unit axis vectors, analog
/// sticks give anything in `[-1, 1]²`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub dx: f32,
    pub dy: f32,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { dx: 0.0, dy: 0.0 };
    pub const UP: Vector2 = Vector2 { dx: 0.0, dy: -1.0 };
    pub const DOWN: Vector2 = Vector2 { dx: 0.0, dy: 1.0 };
    pub const LEFT: Vector2 = Vector2 { dx: -1.0, dy: 0.0 };
    pub const RIGHT: Vector2 = Vector2 { dx: 1.0, dy: 0.0 };

    #[must_use]
    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    #[must_use]
    pub fn length(self) -> f32 {
        self.dx.hypot(self.dy)
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }

    /// Unit vector in the same direction, or `None` for a zero vector.
    #[must_use]
    pub fn normalized(self) -> Option<Self> {
        let len = self.length();
        if len > 0.0 && len.is_finite() {
            Some(Self::new(self.dx / len, self.dy / len))
        } else {
            None
        }
    }

    /// Zeroes each component whose magnitude does not exceed `deadzone`.
    #[must_use]
    pub fn with_deadzone(self, deadzone: f32) -> Self {
        let filter = |v: f32| if v.abs() > deadzone { v } else { 0.0 };
        Self::new(filter(self.dx), filter(self.dy))
    }

    #[must_use]
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.dx * factor, self.dy * factor)
    }
}
