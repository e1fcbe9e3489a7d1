//! Vector geometry for movement and collision
//!
//! Entities are axis-aligned squares anchored at their top-left corner, but
//! every proximity check is a circle test between anchor points using the
//! entity sizes as radii.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Whether two points are strictly closer than `radius`
#[inline]
pub fn within(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance_squared(b) < radius * radius
}

/// Unit vector pointing from `from` to `to`
///
/// Returns `None` when the points coincide (direction undefined).
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Option<Vec2> {
    (to - from).try_normalize()
}

/// Axis-aligned rectangle (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Point-in-rect test, edges inclusive
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }
}

/// Playfield bounds supplied by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Whether a point lies inside the bounding box `[0, w] x [0, h]`
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }

    /// Clamp a square's anchor so the whole square stays on screen
    ///
    /// Each axis is clamped independently. If the square is larger than the
    /// viewport the anchor pins to 0.
    pub fn clamp_square(&self, pos: Vec2, size: f32) -> Vec2 {
        let max = Vec2::new(
            (self.width - size).max(0.0),
            (self.height - size).max(0.0),
        );
        pos.clamp(Vec2::ZERO, max)
    }

    /// Map unit coordinates in `[0, 1)` onto the viewport
    #[inline]
    pub fn point_at(&self, u: f32, v: f32) -> Vec2 {
        Vec2::new(u * self.width, v * self.height)
    }
}
