//! Procedural mock tile rendering
//!
//! A tile is a dark canvas with a 64px grid, twenty randomly placed
//! "cells" and a coordinate label. The cell layout is seeded from the tile
//! coordinates so a given tile always encodes to the same bytes.

use image::codecs::jpeg::JpegEncoder;
use image::{ImageEncoder, Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_circle_mut, draw_line_segment_mut,
};
use imageproc::rect::Rect;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::font::LabelFont;
use super::types::{TileError, TileParams};

/// Default tile edge length in pixels
pub const DEFAULT_TILE_SIZE: u32 = 512;
/// Default JPEG quality
pub const DEFAULT_JPEG_QUALITY: u8 = 85;
/// Smallest tile that still leaves room for cell placement
pub const MIN_TILE_SIZE: u32 = 128;
/// Largest tile rendered; each request allocates a full RGB frame
pub const MAX_TILE_SIZE: u32 = 4096;

const BACKGROUND: Rgb<u8> = Rgb([30, 35, 50]);
const GRID_COLOR: Rgb<u8> = Rgb([50, 60, 80]);
const CELL_OUTLINE: Rgb<u8> = Rgb([255, 255, 255]);
const LABEL_BACKGROUND: Rgb<u8> = Rgb([0, 0, 0]);
const LABEL_COLOR: Rgb<u8> = Rgb([0, 200, 100]);

const GRID_SPACING: usize = 64;
const CELL_COUNT: usize = 20;
/// Distance kept between cell centres and the tile border
const CELL_MARGIN: u32 = 50;
const CELL_RADIUS_MIN: i32 = 10;
const CELL_RADIUS_MAX: i32 = 30;

const LABEL_BOX_ORIGIN: i32 = 10;
const LABEL_PADDING: u32 = 10;
const LABEL_TEXT_ORIGIN: i32 = 15;

/// Renders and encodes mock tiles
#[derive(Debug, Clone)]
pub struct TileRenderer {
    tile_size: u32,
    jpeg_quality: u8,
    font: LabelFont,
}

impl Default for TileRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_TILE_SIZE, DEFAULT_JPEG_QUALITY, LabelFont::Builtin)
    }
}

impl TileRenderer {
    /// `tile_size` is clamped to [`MIN_TILE_SIZE`]..=[`MAX_TILE_SIZE`].
    pub fn new(tile_size: u32, jpeg_quality: u8, font: LabelFont) -> Self {
        Self {
            tile_size: tile_size.clamp(MIN_TILE_SIZE, MAX_TILE_SIZE),
            jpeg_quality: jpeg_quality.clamp(1, 100),
            font,
        }
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }

    /// Draw the tile for `params`
    pub fn render(&self, params: &TileParams) -> RgbImage {
        let mut img = RgbImage::from_pixel(self.tile_size, self.tile_size, BACKGROUND);

        self.draw_grid(&mut img);
        self.draw_cells(&mut img, params.seed());
        self.draw_label(&mut img, &params.label());

        img
    }

    /// Draw the tile for `params` and encode it as JPEG
    pub fn render_jpeg(&self, params: &TileParams) -> Result<Vec<u8>, TileError> {
        let img = self.render(params);
        encode_jpeg(&img, self.jpeg_quality)
    }

    fn draw_grid(&self, img: &mut RgbImage) {
        let end = (self.tile_size - 1) as f32;
        for i in (0..self.tile_size as usize).step_by(GRID_SPACING) {
            let p = i as f32;
            draw_line_segment_mut(img, (p, 0.0), (p, end), GRID_COLOR);
            draw_line_segment_mut(img, (0.0, p), (end, p), GRID_COLOR);
        }
    }

    fn draw_cells(&self, img: &mut RgbImage, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let lo = CELL_MARGIN as i32;
        let hi = (self.tile_size - CELL_MARGIN) as i32;

        for _ in 0..CELL_COUNT {
            let cx = rng.random_range(lo..=hi);
            let cy = rng.random_range(lo..=hi);
            let radius = rng.random_range(CELL_RADIUS_MIN..=CELL_RADIUS_MAX);
            let color: Rgb<u8> = Rgb([
                rng.random_range(100..=200),
                rng.random_range(80..=160),
                rng.random_range(120..=200),
            ]);

            draw_filled_circle_mut(img, (cx, cy), radius, color);
            draw_hollow_circle_mut(img, (cx, cy), radius, CELL_OUTLINE);
        }
    }

    fn draw_label(&self, img: &mut RgbImage, text: &str) {
        let (width, height) = self.font.text_size(text);

        // box spans (10,10)..=(20+w, 20+h)
        let backdrop = Rect::at(LABEL_BOX_ORIGIN, LABEL_BOX_ORIGIN)
            .of_size(width + LABEL_PADDING + 1, height + LABEL_PADDING + 1);
        draw_filled_rect_mut(img, backdrop, LABEL_BACKGROUND);

        self.font
            .draw(img, LABEL_COLOR, LABEL_TEXT_ORIGIN, LABEL_TEXT_ORIGIN, text);
    }
}

/// Encode an RGB image as baseline JPEG
pub fn encode_jpeg(rgb: &RgbImage, quality: u8) -> Result<Vec<u8>, TileError> {
    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    encoder.write_image(
        rgb.as_raw(),
        rgb.width(),
        rgb.height(),
        image::ExtendedColorType::Rgb8,
    )?;
    Ok(buffer)
}
