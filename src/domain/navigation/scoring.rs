// SPDX-License-Identifier: MPL-2.0
//! Geometric next-focus selection.
//!
//! Given the focused element, a set of candidates and a direction of
//! travel, picks the candidate that best continues the motion.
//!
//! # Algorithm
//!
//! 1. Normalize the direction to a unit vector `n`.
//! 2. For each candidate, take the displacement `d` between the centres.
//! 3. Discard candidates with `d · n ≤ 0` (behind or beside the origin).
//! 4. Score `|d| + k · (|d|² − (d · n)²)`: distance plus a penalty on the
//!    squared sideways component, so elements straight ahead win over
//!    closer ones off to the side.
//! 5. Return the minimum; the first candidate wins ties.
//!
//! # Invariants
//!
//! - The current element is never returned.
//! - A zero direction or an empty candidate set yields `None`.
//! - Deterministic: same layout and input, same result.

use super::element::FocusableElement;
use crate::domain::geometry::{Point, Vector2};

/// Reference weight of the perpendicular penalty.
pub const DEFAULT_PERPENDICULAR_WEIGHT: f32 = 2.0;

/// Scores `target` as seen from `origin` moving along unit vector `unit`.
///
/// Returns `None` when the target is not in the forward half-plane.
#[must_use]
pub fn direction_score(origin: Point, target: Point, unit: Vector2, perpendicular_weight: f32) -> Option<f32> {
    let vx = target.x - origin.x;
    let vy = target.y - origin.y;
    let dot = vx * unit.dx + vy * unit.dy;
    if dot <= 0.0 {
        return None;
    }
    let dist_sq = vx * vx + vy * vy;
    // Rounding can push this a hair below zero for targets dead ahead.
    let rejection_sq = (dist_sq - dot * dot).max(0.0);
    Some(dist_sq.sqrt() + perpendicular_weight * rejection_sq)
}

/// Selects the best element to move focus to from `current` along
/// `direction`.
#[must_use]
pub fn select_next<'a>(
    current: &FocusableElement,
    candidates: &'a [FocusableElement],
    direction: Vector2,
    perpendicular_weight: f32,
) -> Option<&'a FocusableElement> {
    let unit = direction.normalized()?;
    let origin = current.bounds.center();

    let mut best: Option<(&FocusableElement, f32)> = None;
    for candidate in candidates {
        if candidate.id == current.id {
            continue;
        }
        let Some(score) = direction_score(origin, candidate.bounds.center(), unit, perpendicular_weight)
        else {
            continue;
        };
        if best.is_none_or(|(_, best_score)| score < best_score) {
            best = Some((candidate, score));
        }
    }
    best.map(|(element, _)| element)
}

/// Axis-aligned variant used by the capture viewer.
///
/// Only the sign of each direction component matters. A candidate
/// qualifies when its centre lies strictly on the requested side along a
/// pressed axis; among qualifying candidates the nearest centre wins.
#[must_use]
pub fn select_next_axis<'a>(
    current: &FocusableElement,
    candidates: &'a [FocusableElement],
    direction: Vector2,
) -> Option<&'a FocusableElement> {
    if direction.is_zero() {
        return None;
    }
    let origin = current.bounds.center();

    let mut best: Option<(&FocusableElement, f32)> = None;
    for candidate in candidates {
        if candidate.id == current.id {
            continue;
        }
        let target = candidate.bounds.center();
        let valid = (direction.dx > 0.0 && target.x > origin.x)
            || (direction.dx < 0.0 && target.x < origin.x)
            || (direction.dy > 0.0 && target.y > origin.y)
            || (direction.dy < 0.0 && target.y < origin.y);
        if !valid {
            continue;
        }
        let distance = origin.distance_to(target);
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((candidate, distance));
        }
    }
    best.map(|(element, _)| element)
}
