//! Server configuration
//!
//! Configuration comes from the command line. The only required input is
//! the optional positional port; every flag defaults to the behaviour the
//! frontend team expects out of the box.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::tile::{DEFAULT_JPEG_QUALITY, DEFAULT_TILE_SIZE, MAX_TILE_SIZE, MIN_TILE_SIZE};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_WEB_DIR: &str = "web";
pub const DEFAULT_STATIC_ROOT: &str = ".";
pub const DEFAULT_FONT_PATH: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

/// Errors for invalid command-line settings
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JPEG quality must be between 1 and 100, got {0}")]
    InvalidQuality(u8),

    #[error(
        "Tile size must be between {min} and {max}, got {0}",
        min = MIN_TILE_SIZE,
        max = MAX_TILE_SIZE
    )]
    InvalidTileSize(u32),
}

/// Command-line arguments
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cyto-dev-server",
    version,
    about = "Development server for the cytology viewer with mock API responses"
)]
pub struct Cli {
    /// Port to listen on
    #[arg(default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address to bind
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Directory containing index.html, slides.html and viewer.html
    #[arg(long, default_value = DEFAULT_WEB_DIR)]
    pub web_dir: PathBuf,

    /// Directory served for any path not handled by the mock API
    #[arg(long, default_value = DEFAULT_STATIC_ROOT)]
    pub static_root: PathBuf,

    /// TrueType font for tile labels
    #[arg(long, default_value = DEFAULT_FONT_PATH)]
    pub font: PathBuf,

    /// Always use the built-in bitmap font for tile labels
    #[arg(long)]
    pub no_font: bool,

    /// JPEG quality for mock tiles (1-100)
    #[arg(long, default_value_t = DEFAULT_JPEG_QUALITY)]
    pub jpeg_quality: u8,

    /// Edge length of mock tiles in pixels (128-4096)
    #[arg(long, default_value_t = DEFAULT_TILE_SIZE)]
    pub tile_size: u32,
}

/// Main server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address
    pub host: String,
    /// Server port
    pub port: u16,
    /// HTML page directory
    pub web_dir: PathBuf,
    /// Static file root
    pub static_root: PathBuf,
    /// Tile configuration
    pub tile: TileConfig,
}

/// Tile rendering configuration
#[derive(Debug, Clone)]
pub struct TileConfig {
    /// Tile edge length in pixels
    pub size: u32,
    /// JPEG quality
    pub jpeg_quality: u8,
    /// Label font; `None` selects the built-in glyphs
    pub font_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            web_dir: PathBuf::from(DEFAULT_WEB_DIR),
            static_root: PathBuf::from(DEFAULT_STATIC_ROOT),
            tile: TileConfig::default(),
        }
    }
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_TILE_SIZE,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            font_path: Some(PathBuf::from(DEFAULT_FONT_PATH)),
        }
    }
}

impl Config {
    /// Build and validate configuration from parsed arguments
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        if !(1..=100).contains(&cli.jpeg_quality) {
            return Err(ConfigError::InvalidQuality(cli.jpeg_quality));
        }
        if !(MIN_TILE_SIZE..=MAX_TILE_SIZE).contains(&cli.tile_size) {
            return Err(ConfigError::InvalidTileSize(cli.tile_size));
        }

        Ok(Self {
            host: cli.host,
            port: cli.port,
            web_dir: cli.web_dir,
            static_root: cli.static_root,
            tile: TileConfig {
                size: cli.tile_size,
                jpeg_quality: cli.jpeg_quality,
                font_path: (!cli.no_font).then_some(cli.font),
            },
        })
    }

    /// Parse the process arguments
    pub fn from_args() -> Result<Self, ConfigError> {
        Self::from_cli(Cli::parse())
    }
}
