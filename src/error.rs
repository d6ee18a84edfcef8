//! Crate error type
//!
//! Configuration problems only. Winning and dying are tick results, not errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("tile ({x}, {y}) outside {width}x{height} grid")]
    TileOutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },

    #[error("level width {width} leaves no room between start and goal corridors")]
    LevelTooNarrow { width: u32 },

    #[error("settings: {0}")]
    Settings(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
