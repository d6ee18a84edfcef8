//! Incremental tile-collision movement
//!
//! Shared by the player and every mobile turret. Moves one axis at a time in
//! one-unit steps; the first step that leaves the world or overlaps a solid
//! tile is undone and the rest of that axis is dropped. Blocking one axis
//! never cancels the other, so entities slide along walls.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, sign};
use super::grid::TileGrid;

/// Which point of the box `pos` refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    Center,
    TopLeft,
}

/// A square axis-aligned body in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub size: f32,
    pub anchor: Anchor,
}

impl Body {
    pub const fn new(pos: Vec2, size: f32, anchor: Anchor) -> Self {
        Self { pos, size, anchor }
    }

    pub fn bounds(&self) -> Rect {
        match self.anchor {
            Anchor::Center => Rect::centered(self.pos, self.size),
            Anchor::TopLeft => Rect::new(self.pos.x, self.pos.y, self.size, self.size),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    X,
    Y,
}

/// Truncate a continuous desired delta to whole units, clamped per component
/// to `max_speed` (itself truncated).
pub fn clamp_delta(desired: Vec2, max_speed: f32) -> IVec2 {
    let limit = max_speed as i32;
    IVec2::new(
        (desired.x as i32).clamp(-limit, limit),
        (desired.y as i32).clamp(-limit, limit),
    )
}

/// Move `body` by `delta` against `grid`, X first then Y.
///
/// Returns the displacement actually applied.
pub fn step_body(body: &mut Body, delta: IVec2, grid: &TileGrid) -> IVec2 {
    let start = body.pos;
    step_axis(body, Axis::X, delta.x, grid);
    step_axis(body, Axis::Y, delta.y, grid);
    (body.pos - start).round().as_ivec2()
}

fn step_axis(body: &mut Body, axis: Axis, amount: i32, grid: &TileGrid) {
    let increment = sign(amount) as f32;
    for _ in 0..amount.abs() {
        let prev = body.pos;
        match axis {
            Axis::X => body.pos.x += increment,
            Axis::Y => body.pos.y += increment,
        }
        if blocked(body, axis, grid) {
            body.pos = prev;
            break;
        }
    }
}

fn blocked(body: &Body, axis: Axis, grid: &TileGrid) -> bool {
    let bounds = body.bounds();
    let world = grid.world_size();
    let outside = match axis {
        Axis::X => bounds.left < 0.0 || bounds.right() > world.x,
        Axis::Y => bounds.top < 0.0 || bounds.bottom() > world.y,
    };
    outside || grid.any_solid(&grid.covered_tiles(&bounds))
}
