//! Line-of-sight ray march
//!
//! Samples the segment at a fixed world-unit spacing and checks the tile under
//! each sample. Cheap and approximate: a thin diagonal wall can slip between
//! two samples.

use glam::Vec2;

use super::geometry::{angle_to, distance, heading};
use super::grid::TileGrid;
use crate::consts::SIGHT_STEP;

/// True when no solid tile lies under any sample from `from` toward `to`.
///
/// Samples that fall outside the grid count as blocked.
pub fn line_of_sight(from: Vec2, to: Vec2, grid: &TileGrid) -> bool {
    let dir = heading(angle_to(from, to));
    let length = distance(from, to);

    let mut walked = 0.0;
    while walked < length {
        let sample = from + dir * walked;
        match grid.solid_at(grid.tile_of(sample)) {
            Some(false) => {}
            Some(true) | None => return false,
        }
        walked += SIGHT_STEP;
    }
    true
}
