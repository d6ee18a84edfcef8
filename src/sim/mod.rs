//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time comes in from the caller, never from a clock
//! - Seeded RNG only, owned by the session
//! - Stable iteration order (entity vectors in insertion order)
//! - No rendering or platform dependencies

pub mod entities;
pub mod geometry;
pub mod grid;
pub mod level;
pub mod mover;
pub mod rng;
pub mod sight;
pub mod state;
pub mod tick;

pub use entities::{Bullet, Gun, MoveIntent, MovingTurret, Player, SpawningTurret, Turret};
pub use geometry::{Rect, angle_to, distance, heading, sign};
pub use grid::{TileGrid, TileRange};
pub use level::{Level, Population, Zones, build_level, generate};
pub use mover::{Anchor, Body, clamp_delta, step_body};
pub use rng::GameRng;
pub use sight::line_of_sight;
pub use state::{Camera, Phase, Session};
pub use tick::{TickInput, TickReport, TickResult, tick};
