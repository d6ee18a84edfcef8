//! Small geometry helpers shared by the simulation
//!
//! World space is y-down pixels with the origin at the grid's top-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Direction (radians) a looker must face to point at `target`.
///
/// Kept as `π + atan2(looker - target)`, which is `atan2(target - looker)`
/// modulo a full turn, so `(cos, sin)` of the result points at the target.
#[inline]
pub fn angle_to(looker: Vec2, target: Vec2) -> f32 {
    PI + (looker.y - target.y).atan2(looker.x - target.x)
}

/// Unit vector for a direction in radians
#[inline]
pub fn heading(direction: f32) -> Vec2 {
    Vec2::new(direction.cos(), direction.sin())
}

#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// -1, 0 or 1
#[inline]
pub fn sign(value: i32) -> i32 {
    value.signum()
}

/// Axis-aligned rectangle in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Square of side `size` centered on `center`
    pub fn centered(center: Vec2, size: f32) -> Self {
        Self::new(center.x - size / 2.0, center.y - size / 2.0, size, size)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Strict overlap: rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        let left = self.left.max(other.left);
        let right = self.right().min(other.right());
        let top = self.top.max(other.top);
        let bottom = self.bottom().min(other.bottom());
        left < right && top < bottom
    }

    /// Open-interval containment, matching how active turrets are picked
    pub fn contains_strict(&self, point: Vec2) -> bool {
        point.x > self.left && point.x < self.right() && point.y > self.top && point.y < self.bottom()
    }

    /// Grow on every side by `amount`
    pub fn padded(&self, amount: f32) -> Self {
        Self::new(
            self.left - amount,
            self.top - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }
}
