//! Slide service module for the mock viewer API
//!
//! This module provides:
//! - `SlideService` trait for abstracting the data source
//! - `MockSlideService` serving literal slide/stats data and synthetic tiles
//! - HTTP handlers for slide metadata, statistics and tiles

mod mock;
pub mod routes;
mod service;
mod types;

pub use mock::MockSlideService;
pub use routes::{SlideAppState, SlideErrorResponse, TILE_CACHE_CONTROL};
pub use service::SlideService;
pub use types::{
    CacheStats, GpuStats, SlideDetail, SlideError, SlideRecord, SystemStats, TileStats,
};
