//! Death By Dots - a scrolling top-down dodge game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tile grid, level generation, movement, turrets)
//! - `render`: Draw descriptors and quad vertices for whatever host draws the game
//! - `settings`: Runtime configuration loaded from JSON
//! - `error`: Crate error type

pub mod error;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Side length of one grid tile in world units
    pub const TILE_SIZE: f32 = 25.0;

    /// Default level dimensions (tiles). Height follows a 700px window at 20px per row.
    pub const LEVEL_WIDTH: u32 = 100;
    pub const LEVEL_HEIGHT: u32 = 35;

    /// Width of the start and goal corridors (tiles)
    pub const CORRIDOR_TILES: u32 = 3;
    /// First column the generator may fill
    pub const FIRST_FILL_COLUMN: u32 = 3;
    /// Columns at the right edge the generator leaves empty
    pub const RIGHT_RESERVED_COLUMNS: u32 = 4;
    /// Narrowest level that still has a fillable column
    pub const MIN_LEVEL_WIDTH: u32 = FIRST_FILL_COLUMN + RIGHT_RESERVED_COLUMNS;

    /// Bullet defaults
    pub const BULLET_SIZE: f32 = 10.0;
    pub const BULLET_SPEED: f32 = 5.0;

    /// Stationary turret size
    pub const TURRET_SIZE: f32 = 15.0;
    /// Moving and spawning turret size
    pub const MOVING_TURRET_SIZE: f32 = 10.0;
    /// Default shots per second for every turret kind
    pub const TURRET_FIRE_RATE: f32 = 1.0;
    /// Default movement speed for mobile turrets (units per tick)
    pub const MOVING_TURRET_SPEED: f32 = 1.0;
    /// Seconds between clones for spawning turrets
    pub const SPAWN_INTERVAL: f32 = 1.0;
    /// Mobile turrets hold position when this close to a visible target
    pub const PROXIMITY_HOLD: f32 = 100.0;
    /// Half side of the square searched for clone spawn tiles
    pub const SPAWN_RADIUS: f32 = 100.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 25.0;
    pub const PLAYER_STEP: i32 = 3;

    /// Line-of-sight ray march step (world units)
    pub const SIGHT_STEP: f32 = 0.9;

    /// Viewport defaults (world units)
    pub const VIEWPORT_WIDTH: f32 = 700.0;
    pub const VIEWPORT_HEIGHT: f32 = 700.0;
    /// Active bounds are the viewport scaled by this factor
    pub const ACTIVE_BOUNDS_SCALE: f32 = 1.1;
    /// Extra margin around the active bounds when picking active turrets
    pub const ACTIVE_PADDING: f32 = 10.0;

    /// Population odds: one in N empty tiles gets an entity
    pub const TURRET_ODDS: u32 = 65;
    pub const MOVING_TURRET_ODDS: u32 = 501;
    pub const SPAWNING_TURRET_ODDS: u32 = 501;
    /// Upper bound on spawning turrets alive at once
    pub const MAX_SPAWNING_TURRETS: usize = 32;
}
