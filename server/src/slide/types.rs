//! Slide-related types and error definitions

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tile::TileError;

/// Errors that can occur when working with slides
#[derive(Debug, Error)]
pub enum SlideError {
    #[error("Slide not found: {0}")]
    NotFound(String),

    #[error("Error generating tile: {0}")]
    Tile(#[from] TileError),
}

/// Summary of a slide as shown in the slide list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideRecord {
    pub id: String,
    pub name: String,
    /// Creation timestamp (RFC 3339)
    pub created: String,
    /// Number of pyramid layers
    pub layers: u32,
    /// Full resolution width in pixels
    pub width: u64,
    /// Full resolution height in pixels
    pub height: u64,
    /// Processing status, always "ready" for mocks
    pub status: String,
}

/// Full metadata for a single slide
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideDetail {
    #[serde(flatten)]
    pub record: SlideRecord,
    /// Edge length of served tiles
    pub tile_size: u32,
    /// Tile image format
    pub format: String,
}

/// Server statistics reported to the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStats {
    /// Seconds since start
    pub uptime: u64,
    pub version: String,
    pub gpu: GpuStats,
    pub cache: CacheStats,
    pub tiles: TileStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuStats {
    pub available: bool,
    pub device: String,
    /// Megabytes
    pub memory_used: u64,
    /// Megabytes
    pub memory_total: u64,
    /// Percent
    pub utilization: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub size: u64,
    pub hit_rate: f64,
    pub evictions: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileStats {
    pub served: u64,
    pub errors: u64,
    pub avg_time_ms: u64,
}
