//! Cytology Viewer Dev Server Library
//!
//! Mock backend for frontend development: serves the viewer pages, a
//! static slide list and statistics, and procedurally drawn tiles. This
//! module exports the server components for use in integration tests and
//! benches.

pub mod config;
pub mod server;
pub mod slide;
pub mod tile;

// Re-export commonly used types
pub use server::{AppState, build_router};
pub use slide::{MockSlideService, SlideAppState, SlideError, SlideService};
pub use tile::{LabelFont, TileParams, TileRenderer};
