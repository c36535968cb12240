//! Tile request parameters and error definitions

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while synthesizing a mock tile
#[derive(Debug, Error)]
pub enum TileError {
    #[error("invalid literal for {name}: {value:?}")]
    InvalidParameter { name: &'static str, value: String },

    #[error("JPEG encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to load font {path:?}: {reason}")]
    Font { path: PathBuf, reason: String },

    #[error("render task failed: {0}")]
    Task(String),
}

/// Query defaults, applied when a parameter is absent or empty
const DEFAULT_LAYER: &str = "0";
const DEFAULT_X: &str = "0";
const DEFAULT_Y: &str = "0";
const DEFAULT_Z: &str = "1";

/// An integer tile coordinate of any magnitude.
///
/// Keeps the canonical decimal form for labels and cache keys, and the
/// value reduced modulo 2^64 for seeding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileCoord {
    digits: String,
    wrapped: i64,
}

impl TileCoord {
    /// Parse an optionally signed decimal integer, allowing surrounding
    /// whitespace and single underscores between digits
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        let (negative, body) = match trimmed.as_bytes().first()? {
            b'-' => (true, &trimmed[1..]),
            b'+' => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        if body.is_empty() || body.starts_with('_') || body.ends_with('_') || body.contains("__")
        {
            return None;
        }

        let mut digits = String::with_capacity(body.len());
        let mut wrapped: u64 = 0;
        for c in body.chars().filter(|&c| c != '_') {
            let d = c.to_digit(10)?;
            wrapped = wrapped.wrapping_mul(10).wrapping_add(u64::from(d));
            if !(digits.is_empty() && d == 0) {
                digits.push(c);
            }
        }

        if digits.is_empty() {
            return Some(Self::from(0));
        }
        if negative {
            digits.insert(0, '-');
            wrapped = wrapped.wrapping_neg();
        }

        Some(Self {
            digits,
            wrapped: wrapped as i64,
        })
    }

    /// Value modulo 2^64, as a two's complement integer
    pub fn wrapped(&self) -> i64 {
        self.wrapped
    }
}

impl From<i64> for TileCoord {
    fn from(value: i64) -> Self {
        Self {
            digits: value.to_string(),
            wrapped: value,
        }
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

/// Coordinates of a requested mock tile
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileParams {
    /// Pyramid layer
    pub layer: TileCoord,
    /// Tile X coordinate
    pub x: TileCoord,
    /// Tile Y coordinate
    pub y: TileCoord,
    /// Zoom factor, only shown in the label
    pub z: TileCoord,
}

impl Default for TileParams {
    fn default() -> Self {
        Self::new(0, 0, 0, 1)
    }
}

impl TileParams {
    pub fn new(layer: i64, x: i64, y: i64, z: i64) -> Self {
        Self {
            layer: layer.into(),
            x: x.into(),
            y: y.into(),
            z: z.into(),
        }
    }

    /// Parse tile parameters from decoded query pairs.
    ///
    /// The first occurrence of a key wins and empty values count as missing.
    /// Values are not range checked, but they must be integers.
    pub fn from_query(pairs: &[(String, String)]) -> Result<Self, TileError> {
        let lookup = |name: &str, default: &'static str| -> String {
            pairs
                .iter()
                .find(|(k, v)| k == name && !v.is_empty())
                .map(|(_, v)| v.clone())
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Self {
            layer: parse_coord("layer", &lookup("layer", DEFAULT_LAYER))?,
            x: parse_coord("x", &lookup("x", DEFAULT_X))?,
            y: parse_coord("y", &lookup("y", DEFAULT_Y))?,
            z: parse_coord("z", &lookup("z", DEFAULT_Z))?,
        })
    }

    /// Seed for the cell generator: `layer * 1000 + x * 100 + y`, modulo 2^64
    pub fn seed(&self) -> u64 {
        self.layer
            .wrapped()
            .wrapping_mul(1000)
            .wrapping_add(self.x.wrapped().wrapping_mul(100))
            .wrapping_add(self.y.wrapped()) as u64
    }

    /// Text drawn in the top-left corner of the tile
    pub fn label(&self) -> String {
        format!(
            "Layer:{} X:{} Y:{} Z:{}",
            self.layer, self.x, self.y, self.z
        )
    }

    /// Stable key identifying the rendered bytes, used as the ETag
    pub fn cache_key(&self, tile_size: u32, quality: u8) -> String {
        format!(
            "tile-{}-{}-{}-{}-s{}-q{}",
            self.layer, self.x, self.y, self.z, tile_size, quality
        )
    }
}

fn parse_coord(name: &'static str, value: &str) -> Result<TileCoord, TileError> {
    TileCoord::parse(value).ok_or_else(|| TileError::InvalidParameter {
        name,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_missing_params_use_defaults() {
        let params = TileParams::from_query(&[]).unwrap();
        assert_eq!(params, TileParams::default());
        assert_eq!(params.z, TileCoord::from(1));
    }

    #[test]
    fn test_empty_values_count_as_missing() {
        let params = TileParams::from_query(&pairs(&[("layer", ""), ("z", "")])).unwrap();
        assert_eq!(params.layer, TileCoord::from(0));
        assert_eq!(params.z, TileCoord::from(1));
    }

    #[test]
    fn test_first_value_wins() {
        let params = TileParams::from_query(&pairs(&[("x", "7"), ("x", "9")])).unwrap();
        assert_eq!(params.x, TileCoord::from(7));
    }

    #[test]
    fn test_parse_all_params() {
        let params = TileParams::from_query(&pairs(&[
            ("layer", "2"),
            ("x", "5"),
            ("y", "5"),
            ("z", "3"),
            ("format", "webp"),
        ]))
        .unwrap();
        assert_eq!(params, TileParams::new(2, 5, 5, 3));
    }

    #[test]
    fn test_negative_values_accepted() {
        let params = TileParams::from_query(&pairs(&[("x", "-4")])).unwrap();
        assert_eq!(params.x, TileCoord::from(-4));
    }

    #[test]
    fn test_non_numeric_is_rejected() {
        let err = TileParams::from_query(&pairs(&[("layer", "abc")])).unwrap_err();
        match err {
            TileError::InvalidParameter { name, value } => {
                assert_eq!(name, "layer");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_seed_formula() {
        let params = TileParams::new(2, 5, 7, 1);
        assert_eq!(params.seed(), 2507);

        // z does not contribute
        let zoomed = TileParams {
            z: TileCoord::from(9),
            ..params.clone()
        };
        assert_eq!(zoomed.seed(), params.seed());
    }

    #[test]
    fn test_seed_does_not_overflow() {
        let params = TileParams::new(i64::MAX, i64::MAX, i64::MAX, 1);
        let _ = params.seed();
    }

    #[test]
    fn test_label_format() {
        let params = TileParams::new(2, 5, 5, 3);
        assert_eq!(params.label(), "Layer:2 X:5 Y:5 Z:3");
    }

    #[test]
    fn test_cache_key_includes_render_settings() {
        let params = TileParams::default();
        assert_eq!(params.cache_key(512, 85), "tile-0-0-0-1-s512-q85");
        assert_ne!(params.cache_key(512, 85), params.cache_key(512, 90));
    }

    #[test]
    fn test_coordinates_beyond_i64_are_accepted() {
        let params =
            TileParams::from_query(&pairs(&[("layer", "1"), ("x", "99999999999999999999")]))
                .unwrap();
        assert_eq!(params.x.to_string(), "99999999999999999999");
        assert_eq!(params.label(), "Layer:1 X:99999999999999999999 Y:0 Z:1");
        // 10^20 - 1 reduced modulo 2^64
        assert_eq!(params.x.wrapped() as u64, 7766279631452241919);
    }

    #[test]
    fn test_large_coordinates_keep_distinct_keys() {
        let a = TileParams::from_query(&pairs(&[("x", "18446744073709551616")])).unwrap();
        let b = TileParams::from_query(&pairs(&[("x", "0")])).unwrap();
        // same seed, different tile
        assert_eq!(a.seed(), b.seed());
        assert_ne!(a.cache_key(512, 85), b.cache_key(512, 85));
    }

    #[test]
    fn test_integer_forms_are_normalized() {
        let cases = [
            ("007", "7"),
            ("+12", "12"),
            (" 3 ", "3"),
            ("-0", "0"),
            ("-000", "0"),
            ("1_000", "1000"),
            ("-042", "-42"),
        ];
        for (input, expected) in cases {
            let coord = TileCoord::parse(input).unwrap();
            assert_eq!(coord.to_string(), expected, "input {:?}", input);
        }
        assert_eq!(TileCoord::parse("-42").unwrap().wrapped(), -42);
    }

    #[test]
    fn test_malformed_integers_are_rejected() {
        for input in ["", "+", "-", "1.5", "1e3", "0x10", "_1", "1_", "1__0", "--1", "4 2"] {
            assert!(TileCoord::parse(input).is_none(), "input {:?}", input);
        }
    }
}
