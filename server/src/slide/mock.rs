//! Mock slide service backed by literals and procedurally drawn tiles

use std::time::Instant;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, error};

use super::service::SlideService;
use super::types::{
    CacheStats, GpuStats, SlideDetail, SlideError, SlideRecord, SystemStats, TileStats,
};
use crate::tile::{TileError, TileParams, TileRenderer};

/// Format reported for every tile
const TILE_FORMAT: &str = "jpeg";

/// Slide service that never touches a scanner or disk
pub struct MockSlideService {
    renderer: TileRenderer,
}

impl MockSlideService {
    pub fn new(renderer: TileRenderer) -> Self {
        Self { renderer }
    }

    fn slides() -> Vec<SlideRecord> {
        vec![
            SlideRecord {
                id: "sample-001".to_string(),
                name: "Sample-001".to_string(),
                created: "2025-11-08T10:30:00Z".to_string(),
                layers: 40,
                width: 10000,
                height: 10000,
                status: "ready".to_string(),
            },
            SlideRecord {
                id: "sample-002".to_string(),
                name: "Sample-002".to_string(),
                created: "2025-11-07T14:20:00Z".to_string(),
                layers: 40,
                width: 12000,
                height: 12000,
                status: "ready".to_string(),
            },
        ]
    }

    fn stats() -> SystemStats {
        SystemStats {
            uptime: 12345,
            version: "1.0.0-dev".to_string(),
            gpu: GpuStats {
                available: true,
                device: "Mock GPU".to_string(),
                memory_used: 2048,
                memory_total: 16384,
                utilization: 45,
            },
            cache: CacheStats {
                size: 150,
                hit_rate: 0.95,
                evictions: 42,
            },
            tiles: TileStats {
                served: 15234,
                errors: 12,
                avg_time_ms: 8,
            },
        }
    }
}

impl Default for MockSlideService {
    fn default() -> Self {
        Self::new(TileRenderer::default())
    }
}

#[async_trait]
impl SlideService for MockSlideService {
    async fn list_slides(&self) -> Result<Vec<SlideRecord>, SlideError> {
        Ok(Self::slides())
    }

    async fn get_slide(&self, id: &str) -> Result<SlideDetail, SlideError> {
        let record = Self::slides()
            .into_iter()
            .find(|s| s.id == id)
            .ok_or_else(|| SlideError::NotFound(id.to_string()))?;

        Ok(SlideDetail {
            record,
            tile_size: self.renderer.tile_size(),
            format: TILE_FORMAT.to_string(),
        })
    }

    async fn system_stats(&self) -> Result<SystemStats, SlideError> {
        Ok(Self::stats())
    }

    async fn get_tile(&self, params: &TileParams) -> Result<Bytes, SlideError> {
        let start = Instant::now();
        let renderer = self.renderer.clone();
        let request = params.clone();

        // Drawing and encoding are CPU-bound
        let jpeg = tokio::task::spawn_blocking(move || renderer.render_jpeg(&request))
            .await
            .map_err(|e| {
                error!("Tile render task failed: {}", e);
                TileError::Task(e.to_string())
            })??;

        debug!(
            "Rendered tile {} ({} bytes) in {:?}",
            params.label(),
            jpeg.len(),
            start.elapsed()
        );

        Ok(Bytes::from(jpeg))
    }

    fn tile_cache_key(&self, params: &TileParams) -> String {
        params.cache_key(self.renderer.tile_size(), self.renderer.jpeg_quality())
    }
}
