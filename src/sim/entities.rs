//! Bullets, turrets and the player
//!
//! Per-tick behavior for each entity. Timers advance from the `dt` the session
//! hands in, never from a wall clock.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, angle_to, distance, heading};
use super::grid::{TileGrid, TileRange};
use super::mover::{Anchor, Body, clamp_delta, step_body};
use super::rng::GameRng;
use super::sight::line_of_sight;
use crate::consts::*;

/// A projectile flying in a fixed direction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    /// Radians, fixed at spawn
    pub direction: f32,
}

impl Bullet {
    pub fn new(pos: Vec2, size: f32, speed: f32, direction: f32) -> Self {
        Self {
            pos,
            size,
            speed,
            direction,
        }
    }

    /// Advance one tick along the fixed heading
    pub fn update(&mut self) {
        self.pos += heading(self.direction) * self.speed;
    }

    pub fn bounds(&self) -> Rect {
        Rect::centered(self.pos, self.size)
    }

    /// Center outside `[0, world_w) × [0, world_h)`
    pub fn left_world(&self, grid: &TileGrid) -> bool {
        let world = grid.world_size();
        self.pos.x < 0.0 || self.pos.x >= world.x || self.pos.y < 0.0 || self.pos.y >= world.y
    }

    /// Any tile under the bullet's box is solid
    pub fn hits_grid(&self, grid: &TileGrid) -> bool {
        grid.any_solid(&grid.covered_tiles(&self.bounds()))
    }
}

/// Fire-rate cooldown shared by every turret kind.
///
/// Starts cooling down. Becomes ready once `1 / fire_rate` seconds have
/// accumulated since the last shot (or since creation). A fire rate of zero
/// never becomes ready.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gun {
    pub fire_rate: f32,
    elapsed: f32,
    ready: bool,
}

impl Gun {
    pub fn new(fire_rate: f32) -> Self {
        Self {
            fire_rate,
            elapsed: 0.0,
            ready: false,
        }
    }

    pub fn tick_clock(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    fn refresh(&mut self) {
        if !self.ready && self.fire_rate > 0.0 && self.elapsed >= 1.0 / self.fire_rate {
            self.ready = true;
        }
    }

    /// Shoot at `target` if ready and `visible`. Returns true on a shot.
    pub fn try_fire(
        &mut self,
        from: Vec2,
        target: Vec2,
        visible: bool,
        bullets: &mut Vec<Bullet>,
    ) -> bool {
        self.refresh();
        if !(self.ready && visible) {
            return false;
        }
        self.ready = false;
        self.elapsed = 0.0;
        bullets.push(Bullet::new(
            from,
            BULLET_SIZE,
            BULLET_SPEED,
            angle_to(from, target),
        ));
        true
    }
}

/// Stationary turret
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turret {
    pub pos: Vec2,
    pub size: f32,
    pub gun: Gun,
}

impl Turret {
    pub fn new(pos: Vec2, fire_rate: f32) -> Self {
        Self {
            pos,
            size: TURRET_SIZE,
            gun: Gun::new(fire_rate),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::centered(self.pos, self.size)
    }

    /// Shoot at `target` when ready and in sight. `None` means nothing to aim at.
    pub fn update(
        &mut self,
        target: Option<Vec2>,
        grid: &TileGrid,
        bullets: &mut Vec<Bullet>,
    ) -> bool {
        let Some(target) = target else {
            return false;
        };
        let visible = line_of_sight(self.pos, target, grid);
        self.gun.try_fire(self.pos, target, visible, bullets)
    }
}

/// Close in on the target unless it is already near and visible
fn approach(body: &mut Body, speed: f32, target: Vec2, visible: bool, grid: &TileGrid) {
    if distance(body.pos, target) < PROXIMITY_HOLD && visible {
        return;
    }
    let delta = clamp_delta(target - body.pos, speed);
    step_body(body, delta, grid);
}

/// Turret that paces toward its target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingTurret {
    pub body: Body,
    /// Units per tick
    pub speed: f32,
    pub gun: Gun,
}

impl MovingTurret {
    pub fn new(pos: Vec2, speed: f32, fire_rate: f32) -> Self {
        Self {
            body: Body::new(pos, MOVING_TURRET_SIZE, Anchor::Center),
            speed,
            gun: Gun::new(fire_rate),
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    pub fn update(
        &mut self,
        target: Option<Vec2>,
        grid: &TileGrid,
        bullets: &mut Vec<Bullet>,
    ) -> bool {
        let Some(target) = target else {
            return false;
        };
        let visible = line_of_sight(self.body.pos, target, grid);
        let shot = self.gun.try_fire(self.body.pos, target, visible, bullets);
        approach(&mut self.body, self.speed, target, visible, grid);
        shot
    }
}

/// Outcome of one spawning-turret update
#[derive(Debug, Default)]
pub struct SpawnerUpdate {
    pub shot: bool,
    pub spawned: Option<SpawningTurret>,
}

/// Moving turret that periodically clones itself into a nearby empty tile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawningTurret {
    pub body: Body,
    pub speed: f32,
    pub gun: Gun,
    /// Seconds between clones
    pub spawn_interval: f32,
    spawn_elapsed: f32,
}

impl SpawningTurret {
    pub fn new(pos: Vec2, speed: f32, spawn_interval: f32, fire_rate: f32) -> Self {
        Self {
            body: Body::new(pos, MOVING_TURRET_SIZE, Anchor::Center),
            speed,
            gun: Gun::new(fire_rate),
            spawn_interval,
            spawn_elapsed: 0.0,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    pub fn tick_clock(&mut self, dt: f32) {
        self.gun.tick_clock(dt);
        self.spawn_elapsed += dt;
    }

    /// Tiles within `SPAWN_RADIUS` of the turret on each axis, clipped to the grid
    pub fn neighborhood(&self, grid: &TileGrid) -> TileRange {
        grid.covered_tiles(&Rect::centered(self.body.pos, SPAWN_RADIUS * 2.0))
    }

    /// Shoot, maybe clone, then move. Clones are only produced while
    /// `may_spawn` holds; the spawn timer resets either way.
    pub fn update(
        &mut self,
        target: Option<Vec2>,
        grid: &TileGrid,
        bullets: &mut Vec<Bullet>,
        rng: &mut GameRng,
        may_spawn: bool,
    ) -> SpawnerUpdate {
        let Some(target) = target else {
            return SpawnerUpdate::default();
        };
        let visible = line_of_sight(self.body.pos, target, grid);
        let shot = self.gun.try_fire(self.body.pos, target, visible, bullets);

        let mut spawned = None;
        if self.spawn_elapsed >= self.spawn_interval {
            self.spawn_elapsed = 0.0;
            if may_spawn {
                let empty = grid.empty_tiles(&self.neighborhood(grid));
                spawned = rng.pick_index(empty.len()).map(|i| {
                    SpawningTurret::new(
                        grid.tile_center(empty[i]),
                        MOVING_TURRET_SPEED,
                        SPAWN_INTERVAL,
                        TURRET_FIRE_RATE,
                    )
                });
            }
        }

        approach(&mut self.body, self.speed, target, visible, grid);
        SpawnerUpdate { shot, spawned }
    }
}

/// Directional intent for one tick. When both keys of an axis are held,
/// right and down win.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveIntent {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl MoveIntent {
    pub fn delta(&self, step: i32) -> IVec2 {
        let axis = |neg: bool, pos: bool| {
            if pos {
                step
            } else if neg {
                -step
            } else {
                0
            }
        };
        IVec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// The player: a tile-sized square anchored at its top-left corner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
}

impl Player {
    pub fn new(top_left: Vec2) -> Self {
        Self {
            body: Body::new(top_left, PLAYER_SIZE, Anchor::TopLeft),
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    pub fn bounds(&self) -> Rect {
        self.body.bounds()
    }

    /// Point turrets aim at
    pub fn center(&self) -> Vec2 {
        self.body.center()
    }

    /// Apply one tick of input; returns the displacement actually made
    pub fn update(&mut self, intent: &MoveIntent, grid: &TileGrid) -> IVec2 {
        step_body(&mut self.body, intent.delta(PLAYER_STEP), grid)
    }

    pub fn hit_by(&self, bullet: &Bullet) -> bool {
        self.bounds().intersects(&bullet.bounds())
    }
}
