//! Mock tile synthesis
//!
//! This module provides:
//! - `TileParams` for parsing tile coordinates from a query string
//! - `TileRenderer` for drawing and JPEG-encoding placeholder tiles
//! - `LabelFont` for the coordinate label, with a built-in bitmap fallback

mod font;
mod glyphs;
mod render;
mod types;

pub use font::LabelFont;
pub use render::{
    DEFAULT_JPEG_QUALITY, DEFAULT_TILE_SIZE, MAX_TILE_SIZE, MIN_TILE_SIZE, TileRenderer, encode_jpeg,
};
pub use types::{TileCoord, TileError, TileParams};
