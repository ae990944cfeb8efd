//! Spawn positions on the perimeter of a rectangle.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle enemies spawn on the edge of.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnBoundary {
    pub min: Vec2,
    pub max: Vec2,
}

impl SpawnBoundary {
    /// Rectangle spanned by two opposite corners, in any order.
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// The same rectangle moved to be relative to `anchor`.
    pub fn anchored(&self, anchor: Vec2) -> Self {
        Self {
            min: self.min + anchor,
            max: self.max + anchor,
        }
    }

    /// Distance from the origin to the `max` corner.
    pub fn far_corner_distance(&self) -> f32 {
        self.max.length()
    }

    /// True if `p` lies on the rectangle's perimeter (within `epsilon`).
    pub fn on_edge(&self, p: Vec2, epsilon: f32) -> bool {
        let inside = p.x >= self.min.x - epsilon
            && p.x <= self.max.x + epsilon
            && p.y >= self.min.y - epsilon
            && p.y <= self.max.y + epsilon;
        let on_vertical = (p.x - self.min.x).abs() <= epsilon || (p.x - self.max.x).abs() <= epsilon;
        let on_horizontal = (p.y - self.min.y).abs() <= epsilon || (p.y - self.max.y).abs() <= epsilon;
        inside && (on_vertical || on_horizontal)
    }
}

/// Pick a point on the boundary's perimeter.
///
/// A coin flip chooses between the vertical and horizontal edges; one
/// coordinate is pinned to `min` or `max` by a second flip and the other is
/// uniform across the rectangle. Sides are equally likely regardless of
/// their length.
pub fn select<R: Rng + ?Sized>(boundary: &SpawnBoundary, rng: &mut R) -> Vec2 {
    let SpawnBoundary { min, max } = *boundary;
    if rng.gen_bool(0.5) {
        let y = rng.gen_range(min.y..=max.y);
        let x = if rng.gen_bool(0.5) { max.x } else { min.x };
        Vec2::new(x, y)
    } else {
        let x = rng.gen_range(min.x..=max.x);
        let y = if rng.gen_bool(0.5) { max.y } else { min.y };
        Vec2::new(x, y)
    }
}
