//! Level generation and population
//!
//! A level is a sparse noisy block field between an empty start corridor on
//! the left and an empty goal corridor on the right. Solvability is not
//! checked; with a 1/8 fill rate it almost always is.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::entities::{MovingTurret, Player, SpawningTurret, Turret};
use super::geometry::Rect;
use super::grid::{TileGrid, TileRange};
use super::rng::GameRng;
use crate::consts::*;
use crate::error::{Error, Result};

/// Static rectangles computed once per level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zones {
    /// Player is untargetable and bullet-proof while overlapping one of these
    pub safe: Vec<Rect>,
    /// Player wins on overlap
    pub goal: Rect,
}

impl Zones {
    /// Full-height corridors: one safe strip per x position, goal at the right edge
    pub fn for_grid(grid: &TileGrid, safe_positions: &[f32]) -> Self {
        let ts = grid.tile_size();
        let corridor = CORRIDOR_TILES as f32 * ts;
        let height = grid.world_size().y;
        let safe = safe_positions
            .iter()
            .map(|&x| Rect::new(x, 0.0, corridor, height))
            .collect();
        let goal_left = ts * (grid.width().saturating_sub(CORRIDOR_TILES)) as f32;
        Self {
            safe,
            goal: Rect::new(goal_left, 0.0, corridor, height),
        }
    }

    pub fn is_safe(&self, bounds: &Rect) -> bool {
        self.safe.iter().any(|zone| zone.intersects(bounds))
    }

    pub fn reached_goal(&self, bounds: &Rect) -> bool {
        self.goal.intersects(bounds)
    }
}

/// Entity odds used when scattering turrets over a fresh grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Population {
    pub turret_odds: u32,
    pub moving_turret_odds: u32,
    /// `None` leaves spawning turrets out entirely
    pub spawning_turret_odds: Option<u32>,
}

impl Default for Population {
    fn default() -> Self {
        Self {
            turret_odds: TURRET_ODDS,
            moving_turret_odds: MOVING_TURRET_ODDS,
            spawning_turret_odds: None,
        }
    }
}

/// Everything a session starts from
#[derive(Debug, Clone)]
pub struct Level {
    pub grid: TileGrid,
    pub zones: Zones,
    pub player: Player,
    pub turrets: Vec<Turret>,
    pub moving_turrets: Vec<MovingTurret>,
    pub spawning_turrets: Vec<SpawningTurret>,
}

/// Columns the generator and spawners may use: `[3, width - 4)`
pub fn fill_columns(grid: &TileGrid) -> TileRange {
    let max_x = grid.width().saturating_sub(RIGHT_RESERVED_COLUMNS) as i32;
    let min_x = (FIRST_FILL_COLUMN as i32).min(max_x);
    TileRange {
        min: IVec2::new(min_x, 0),
        max: IVec2::new(max_x, grid.height() as i32),
    }
}

/// Mark each tile in the fill columns solid with probability 1/8
/// (three fair coin flips, all heads).
pub fn generate(grid: &mut TileGrid, rng: &mut GameRng) {
    for tile in fill_columns(grid).iter() {
        if rng.next_bool() && rng.next_bool() && rng.next_bool() {
            // Fill columns are always inside the grid
            let _ = grid.set_solid(tile.x, tile.y, true);
        }
    }
}

/// Empty tile centers in the fill columns, each kept with probability 1/odds
fn scatter(grid: &TileGrid, rng: &mut GameRng, odds: u32) -> Vec<Vec2> {
    grid.empty_tiles(&fill_columns(grid))
        .into_iter()
        .filter(|_| rng.one_in(odds))
        .map(|tile| grid.tile_center(tile))
        .collect()
}

pub fn populate_turrets(grid: &TileGrid, rng: &mut GameRng, odds: u32) -> Vec<Turret> {
    scatter(grid, rng, odds)
        .into_iter()
        .map(|pos| Turret::new(pos, TURRET_FIRE_RATE))
        .collect()
}

pub fn populate_moving_turrets(grid: &TileGrid, rng: &mut GameRng, odds: u32) -> Vec<MovingTurret> {
    scatter(grid, rng, odds)
        .into_iter()
        .map(|pos| MovingTurret::new(pos, MOVING_TURRET_SPEED, TURRET_FIRE_RATE))
        .collect()
}

pub fn populate_spawning_turrets(
    grid: &TileGrid,
    rng: &mut GameRng,
    odds: u32,
) -> Vec<SpawningTurret> {
    scatter(grid, rng, odds)
        .into_iter()
        .map(|pos| {
            SpawningTurret::new(pos, MOVING_TURRET_SPEED, SPAWN_INTERVAL, TURRET_FIRE_RATE)
        })
        .collect()
}

/// Generate and populate a level of `width` x `height` tiles
pub fn build_level(
    width: u32,
    height: u32,
    rng: &mut GameRng,
    population: &Population,
    safe_positions: &[f32],
) -> Result<Level> {
    if width < MIN_LEVEL_WIDTH {
        return Err(Error::LevelTooNarrow { width });
    }
    let mut grid = TileGrid::new(width, height)?;
    generate(&mut grid, rng);

    let turrets = populate_turrets(&grid, rng, population.turret_odds);
    let moving_turrets = populate_moving_turrets(&grid, rng, population.moving_turret_odds);
    let spawning_turrets = match population.spawning_turret_odds {
        Some(odds) => populate_spawning_turrets(&grid, rng, odds),
        None => Vec::new(),
    };
    let zones = Zones::for_grid(&grid, safe_positions);

    log::info!(
        "Level {}x{} seed={}: {} solid tiles, {} turrets, {} moving, {} spawning",
        width,
        height,
        rng.seed(),
        grid.solid_count(),
        turrets.len(),
        moving_turrets.len(),
        spawning_turrets.len()
    );

    Ok(Level {
        grid,
        zones,
        player: Player::new(Vec2::ZERO),
        turrets,
        moving_turrets,
        spawning_turrets,
    })
}
