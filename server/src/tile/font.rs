//! Label font selection

use std::path::Path;

use ab_glyph::{FontArc, PxScale};
use image::{Rgb, RgbImage};
use tracing::{info, warn};

use super::glyphs;
use super::types::TileError;

/// Pixel height used for TrueType labels
const TRUETYPE_PX: f32 = 16.0;
/// Integer upscale applied to the built-in bitmap glyphs
const BUILTIN_SCALE: u32 = 2;

/// Font used to draw tile labels
#[derive(Clone)]
pub enum LabelFont {
    /// TrueType font loaded from disk
    TrueType(FontArc),
    /// Built-in bitmap glyphs, always available
    Builtin,
}

impl std::fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TrueType(_) => f.write_str("LabelFont::TrueType"),
            Self::Builtin => f.write_str("LabelFont::Builtin"),
        }
    }
}

impl LabelFont {
    /// Read a TrueType/OpenType font file
    pub fn from_file(path: &Path) -> Result<Self, TileError> {
        let bytes = std::fs::read(path).map_err(|e| TileError::Font {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let font = FontArc::try_from_vec(bytes).map_err(|e| TileError::Font {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self::TrueType(font))
    }

    /// Load the font at `path`, falling back to the built-in glyphs
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            info!("No label font configured, using built-in glyphs");
            return Self::Builtin;
        };

        match Self::from_file(path) {
            Ok(font) => {
                info!("Loaded label font from {:?}", path);
                font
            }
            Err(e) => {
                warn!("{} - falling back to built-in glyphs", e);
                Self::Builtin
            }
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin)
    }

    /// Width and height of `text` in pixels
    pub fn text_size(&self, text: &str) -> (u32, u32) {
        match self {
            Self::TrueType(font) => {
                imageproc::drawing::text_size(PxScale::from(TRUETYPE_PX), font, text)
            }
            Self::Builtin => glyphs::text_size(text, BUILTIN_SCALE),
        }
    }

    /// Draw `text` with its top-left corner at (`x`, `y`)
    pub fn draw(&self, img: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, text: &str) {
        match self {
            Self::TrueType(font) => imageproc::drawing::draw_text_mut(
                img,
                color,
                x,
                y,
                PxScale::from(TRUETYPE_PX),
                font,
                text,
            ),
            Self::Builtin => glyphs::draw_text(img, color, x, y, BUILTIN_SCALE, text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_font_falls_back() {
        let font = LabelFont::load(Some(Path::new("/nonexistent/font.ttf")));
        assert!(font.is_builtin());
    }

    #[test]
    fn test_no_path_uses_builtin() {
        assert!(LabelFont::load(None).is_builtin());
    }

    #[test]
    fn test_invalid_font_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"not a font").unwrap();

        let err = LabelFont::from_file(&path).unwrap_err();
        assert!(matches!(err, TileError::Font { .. }));
    }

    #[test]
    fn test_builtin_measures_at_double_scale() {
        let font = LabelFont::Builtin;
        assert_eq!(font.text_size("Z:1"), (34, 14));
    }
}
