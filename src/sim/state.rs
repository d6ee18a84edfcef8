//! Session state
//!
//! One running level: grid, entities, bullets, camera and the terminal latch.
//! The session owns everything; entities hold no references to each other.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::{Bullet, MovingTurret, Player, SpawningTurret, Turret};
use super::geometry::Rect;
use super::grid::{TileGrid, TileRange};
use super::level::{Level, Population, Zones, build_level};
use super::rng::GameRng;
use crate::consts::*;
use crate::error::Result;
use crate::settings::Settings;

/// Where the session stands after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Playing,
    Won,
    Died,
}

/// Viewport that follows the player and never shows outside the world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub size: Vec2,
    pub center: Vec2,
}

impl Camera {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            center: size / 2.0,
        }
    }

    /// Center on `focus`, then push back inside `world`
    pub fn follow(&mut self, focus: Vec2, world: Vec2) {
        let half = self.size / 2.0;
        let mut center = focus;
        if center.x - half.x < 0.0 {
            center.x = half.x;
        }
        if center.y - half.y < 0.0 {
            center.y = half.y;
        }
        if center.x >= world.x - half.x {
            center.x = world.x - half.x;
        }
        if center.y >= world.y - half.y {
            center.y = world.y - half.y;
        }
        self.center = center;
    }

    pub fn view(&self) -> Rect {
        let half = self.size / 2.0;
        Rect::new(
            self.center.x - half.x,
            self.center.y - half.y,
            self.size.x,
            self.size.y,
        )
    }

    /// Region whose turrets get updated: the view's top-left corner with a
    /// slightly enlarged size
    pub fn active_bounds(&self) -> Rect {
        let view = self.view();
        let size = self.size * ACTIVE_BOUNDS_SCALE;
        Rect::new(view.left, view.top, size.x, size.y)
    }
}

/// Indices of the turrets inside the padded active bounds this tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveSet {
    pub turrets: Vec<usize>,
    pub moving_turrets: Vec<usize>,
    pub spawning_turrets: Vec<usize>,
}

/// A running level
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) rng: GameRng,
    pub(crate) grid: TileGrid,
    pub(crate) zones: Zones,
    pub(crate) player: Player,
    pub(crate) turrets: Vec<Turret>,
    pub(crate) moving_turrets: Vec<MovingTurret>,
    pub(crate) spawning_turrets: Vec<SpawningTurret>,
    pub(crate) bullets: Vec<Bullet>,
    pub(crate) camera: Camera,
    pub(crate) active_bounds: Rect,
    pub(crate) active: ActiveSet,
    pub(crate) phase: Phase,
    pub(crate) player_safe: bool,
    /// Spawning turrets stop cloning once this many exist
    pub max_spawning_turrets: usize,
    /// Ticks simulated so far
    pub time_ticks: u64,
    /// Simulated seconds so far
    pub elapsed: f32,
    /// Bullets fired over the whole session
    pub shots_fired: u64,
}

impl Session {
    /// Generate a fresh level from settings
    pub fn new(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        let mut rng = match settings.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        let population = Population {
            turret_odds: settings.turret_odds,
            moving_turret_odds: settings.moving_turret_odds,
            spawning_turret_odds: settings
                .spawning_turrets
                .then_some(settings.spawning_turret_odds),
        };
        let level = build_level(
            settings.level_width,
            settings.level_height,
            &mut rng,
            &population,
            &settings.safe_zone_positions,
        )?;
        let mut session = Self::from_level(level, rng, settings.viewport());
        session.max_spawning_turrets = settings.max_spawning_turrets;
        Ok(session)
    }

    /// Start from a prepared level (hand-built levels in tests, replays)
    pub fn from_level(level: Level, rng: GameRng, viewport: Vec2) -> Self {
        let camera = Camera::new(viewport);
        let size = viewport * ACTIVE_BOUNDS_SCALE;
        Self {
            rng,
            grid: level.grid,
            zones: level.zones,
            player: level.player,
            turrets: level.turrets,
            moving_turrets: level.moving_turrets,
            spawning_turrets: level.spawning_turrets,
            bullets: Vec::new(),
            camera,
            active_bounds: Rect::new(0.0, 0.0, size.x, size.y),
            active: ActiveSet::default(),
            phase: Phase::Playing,
            player_safe: false,
            max_spawning_turrets: MAX_SPAWNING_TURRETS,
            time_ticks: 0,
            elapsed: 0.0,
            shots_fired: 0,
        }
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn zones(&self) -> &Zones {
        &self.zones
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn turrets(&self) -> &[Turret] {
        &self.turrets
    }

    pub fn moving_turrets(&self) -> &[MovingTurret] {
        &self.moving_turrets
    }

    pub fn spawning_turrets(&self) -> &[SpawningTurret] {
        &self.spawning_turrets
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn active_bounds(&self) -> Rect {
        self.active_bounds
    }

    pub fn active(&self) -> &ActiveSet {
        &self.active
    }

    /// Whether the player was inside a safe zone on the last tick
    pub fn player_safe(&self) -> bool {
        self.player_safe
    }

    pub fn active_turrets(&self) -> impl Iterator<Item = &Turret> {
        self.active.turrets.iter().map(|&i| &self.turrets[i])
    }

    pub fn active_moving_turrets(&self) -> impl Iterator<Item = &MovingTurret> {
        self.active.moving_turrets.iter().map(|&i| &self.moving_turrets[i])
    }

    pub fn active_spawning_turrets(&self) -> impl Iterator<Item = &SpawningTurret> {
        self.active
            .spawning_turrets
            .iter()
            .map(|&i| &self.spawning_turrets[i])
    }

    /// Tiles overlapping a viewport rectangle, clipped to the grid
    pub fn visible_tiles(&self, viewport: &Rect) -> TileRange {
        self.grid.covered_tiles(viewport)
    }

    /// Rebuild the active set from the current active bounds
    pub(crate) fn refresh_active(&mut self) {
        let area = self.active_bounds.padded(ACTIVE_PADDING);
        self.active.turrets = indices_inside(&area, self.turrets.iter().map(|t| t.pos));
        self.active.moving_turrets =
            indices_inside(&area, self.moving_turrets.iter().map(|t| t.pos()));
        self.active.spawning_turrets =
            indices_inside(&area, self.spawning_turrets.iter().map(|t| t.pos()));
    }
}

fn indices_inside(area: &Rect, positions: impl Iterator<Item = Vec2>) -> Vec<usize> {
    positions
        .enumerate()
        .filter(|(_, pos)| area.contains_strict(*pos))
        .map(|(i, _)| i)
        .collect()
}
