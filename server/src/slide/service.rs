//! SlideService trait definition

use async_trait::async_trait;
use bytes::Bytes;

use super::types::{SlideDetail, SlideError, SlideRecord, SystemStats};
use crate::tile::TileParams;

/// Trait for the data source behind the viewer API
#[async_trait]
pub trait SlideService: Send + Sync {
    /// List all available slides
    async fn list_slides(&self) -> Result<Vec<SlideRecord>, SlideError>;

    /// Get metadata for a specific slide
    async fn get_slide(&self, id: &str) -> Result<SlideDetail, SlideError>;

    /// Current server statistics
    async fn system_stats(&self) -> Result<SystemStats, SlideError>;

    /// Get a tile as JPEG bytes
    async fn get_tile(&self, params: &TileParams) -> Result<Bytes, SlideError>;

    /// Key identifying the bytes `get_tile` returns for `params`
    fn tile_cache_key(&self, params: &TileParams) -> String;
}
