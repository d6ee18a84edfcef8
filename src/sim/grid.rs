//! Tile occupancy grid
//!
//! A fixed-size boolean map of solid/empty tiles. Tile `(x, y)` covers the
//! world square `[x * tile, (x + 1) * tile) × [y * tile, (y + 1) * tile)`.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::consts::TILE_SIZE;
use crate::error::{Error, Result};

/// Half-open rectangle of tile coordinates `[min, max)`, already clipped to a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRange {
    pub min: IVec2,
    pub max: IVec2,
}

impl TileRange {
    pub const EMPTY: TileRange = TileRange {
        min: IVec2::ZERO,
        max: IVec2::ZERO,
    };

    pub fn width(&self) -> u32 {
        (self.max.x - self.min.x).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.max.y - self.min.y).max(0) as u32
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Column-major walk, matching generation order
    pub fn iter(&self) -> impl Iterator<Item = IVec2> + use<> {
        let TileRange { min, max } = *self;
        (min.x..max.x).flat_map(move |x| (min.y..max.y).map(move |y| IVec2::new(x, y)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tile_size: f32,
    /// Column-major: index = x * height + y
    solid: Vec<bool>,
}

impl TileGrid {
    /// Empty grid with the standard tile size
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(Self::empty_unchecked(width, height))
    }

    fn empty_unchecked(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tile_size: TILE_SIZE,
            solid: vec![false; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// World extent covered by the grid
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(
            self.width as f32 * self.tile_size,
            self.height as f32 * self.tile_size,
        )
    }

    pub fn world_bounds(&self) -> Rect {
        let size = self.world_size();
        Rect::new(0.0, 0.0, size.x, size.y)
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        x as usize * self.height as usize + y as usize
    }

    /// Unchecked solidity query. Callers guard coordinates; debug builds assert.
    #[inline]
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        debug_assert!(self.in_bounds(x, y), "tile ({x}, {y}) out of bounds");
        self.solid[self.index(x, y)]
    }

    pub fn try_is_solid(&self, x: i32, y: i32) -> Result<bool> {
        self.check(x, y)?;
        Ok(self.solid[self.index(x, y)])
    }

    /// `None` outside the grid
    #[inline]
    pub fn solid_at(&self, tile: IVec2) -> Option<bool> {
        self.in_bounds(tile.x, tile.y)
            .then(|| self.solid[self.index(tile.x, tile.y)])
    }

    pub fn set_solid(&mut self, x: i32, y: i32, solid: bool) -> Result<()> {
        self.check(x, y)?;
        let index = self.index(x, y);
        self.solid[index] = solid;
        Ok(())
    }

    fn check(&self, x: i32, y: i32) -> Result<()> {
        if self.in_bounds(x, y) {
            Ok(())
        } else {
            Err(Error::TileOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Tile containing a world point (may lie outside the grid)
    #[inline]
    pub fn tile_of(&self, point: Vec2) -> IVec2 {
        IVec2::new(
            (point.x / self.tile_size).floor() as i32,
            (point.y / self.tile_size).floor() as i32,
        )
    }

    /// World position of a tile's center
    pub fn tile_center(&self, tile: IVec2) -> Vec2 {
        (tile.as_vec2() + Vec2::splat(0.5)) * self.tile_size
    }

    fn clip(&self, min: IVec2, max: IVec2) -> TileRange {
        let limit = IVec2::new(self.width as i32, self.height as i32);
        let min = min.clamp(IVec2::ZERO, limit);
        let max = max.clamp(IVec2::ZERO, limit).max(min);
        TileRange { min, max }
    }

    /// Every tile the rectangle overlaps: `floor(near / tile)` through
    /// `ceil(far / tile) - 1` on each axis, clipped to the grid.
    pub fn covered_tiles(&self, rect: &Rect) -> TileRange {
        let ts = self.tile_size;
        let min = IVec2::new(
            (rect.left / ts).floor() as i32,
            (rect.top / ts).floor() as i32,
        );
        let max = IVec2::new(
            (rect.right() / ts).ceil() as i32,
            (rect.bottom() / ts).ceil() as i32,
        );
        self.clip(min, max)
    }

    /// Tiles whose centers lie inside the half-open rectangle, clipped to the grid
    pub fn tiles_centered_in(&self, rect: &Rect) -> TileRange {
        let ts = self.tile_size;
        let first = |edge: f32| (edge / ts - 0.5).ceil() as i32;
        let min = IVec2::new(first(rect.left), first(rect.top));
        let max = IVec2::new(first(rect.right()), first(rect.bottom()));
        self.clip(min, max)
    }

    pub fn any_solid(&self, range: &TileRange) -> bool {
        range.iter().any(|t| self.is_solid(t.x, t.y))
    }

    pub fn empty_tiles(&self, range: &TileRange) -> Vec<IVec2> {
        range.iter().filter(|t| !self.is_solid(t.x, t.y)).collect()
    }

    pub fn solid_count(&self) -> usize {
        self.solid.iter().filter(|&&s| s).count()
    }

    /// Crop to the tiles centered in `bounds`, re-indexed from (0, 0).
    ///
    /// The result may have zero width or height when `bounds` misses the grid.
    pub fn subset(&self, bounds: &Rect) -> TileGrid {
        let range = self.tiles_centered_in(bounds);
        let mut cropped = TileGrid::empty_unchecked(range.width(), range.height());
        cropped.tile_size = self.tile_size;
        for tile in range.iter() {
            let local = tile - range.min;
            let index = cropped.index(local.x, local.y);
            cropped.solid[index] = self.is_solid(tile.x, tile.y);
        }
        cropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            TileGrid::new(0, 5),
            Err(Error::InvalidDimensions { width: 0, height: 5 })
        ));
        assert!(TileGrid::new(5, 0).is_err());
    }

    #[test]
    fn test_checked_access_out_of_bounds() {
        let mut grid = TileGrid::new(4, 3).unwrap();
        assert!(grid.try_is_solid(4, 0).is_err());
        assert!(grid.try_is_solid(-1, 0).is_err());
        assert!(grid.set_solid(0, 3, true).is_err());
        assert_eq!(grid.solid_at(IVec2::new(9, 9)), None);
    }

    #[test]
    fn test_covered_tiles_half_open() {
        let grid = TileGrid::new(10, 10).unwrap();
        // 25x25 box sitting exactly on tile (1, 1)
        let r = grid.covered_tiles(&Rect::new(25.0, 25.0, 25.0, 25.0));
        assert_eq!(r.min, IVec2::new(1, 1));
        assert_eq!(r.max, IVec2::new(2, 2));
        // Nudged by one unit spans four tiles
        let r = grid.covered_tiles(&Rect::new(26.0, 26.0, 25.0, 25.0));
        assert_eq!((r.width(), r.height()), (2, 2));
        // Clipped at the edges
        let r = grid.covered_tiles(&Rect::new(-40.0, 240.0, 30.0, 30.0));
        assert_eq!(r.min, IVec2::new(0, 9));
        assert_eq!(r.max, IVec2::new(0, 10));
        assert!(r.is_empty());
    }

    #[test]
    fn test_subset_outside_grid_is_empty() {
        let grid = TileGrid::new(5, 5).unwrap();
        let sub = grid.subset(&Rect::new(500.0, 500.0, 100.0, 100.0));
        assert_eq!((sub.width(), sub.height()), (0, 0));
    }

    #[test]
    fn test_subset_uses_tile_centers() {
        let mut grid = TileGrid::new(6, 6).unwrap();
        grid.set_solid(2, 3, true).unwrap();
        // Centers at 62.5 and 87.5 fall inside [50, 100)
        let sub = grid.subset(&Rect::new(50.0, 60.0, 50.0, 40.0));
        assert_eq!((sub.width(), sub.height()), (2, 2));
        assert!(sub.is_solid(0, 1));
        assert_eq!(sub.solid_count(), 1);
    }

    proptest! {
        #[test]
        fn prop_set_solid_is_local(
            w in 1u32..24, h in 1u32..24,
            x in 0i32..24, y in 0i32..24,
            ox in 0i32..24, oy in 0i32..24,
        ) {
            let x = x % w as i32;
            let y = y % h as i32;
            let ox = ox % w as i32;
            let oy = oy % h as i32;
            let mut grid = TileGrid::new(w, h).unwrap();
            grid.set_solid(x, y, true).unwrap();
            prop_assert!(grid.is_solid(x, y));
            prop_assert_eq!(grid.is_solid(ox, oy), ox == x && oy == y);
            prop_assert_eq!(grid.solid_count(), 1);
        }

        #[test]
        fn prop_subset_matches_source(
            seed_bits in proptest::collection::vec(any::<bool>(), 144),
            left in -60.0f32..320.0, top in -60.0f32..320.0,
            width in 0.0f32..320.0, height in 0.0f32..320.0,
        ) {
            let mut grid = TileGrid::new(12, 12).unwrap();
            for (i, solid) in seed_bits.iter().enumerate() {
                grid.set_solid(i as i32 / 12, i as i32 % 12, *solid).unwrap();
            }
            let bounds = Rect::new(left, top, width, height);
            let range = grid.tiles_centered_in(&bounds);
            let sub = grid.subset(&bounds);
            prop_assert_eq!(sub.width(), range.width());
            prop_assert_eq!(sub.height(), range.height());
            prop_assert!(sub.width() as f32 <= (width / 25.0).ceil() + 1.0);
            for x in 0..sub.width() as i32 {
                for y in 0..sub.height() as i32 {
                    let global = range.min + IVec2::new(x, y);
                    prop_assert_eq!(sub.is_solid(x, y), grid.is_solid(global.x, global.y));
                }
            }
        }
    }
}
