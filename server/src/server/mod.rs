//! HTTP front end: shared state, router and request dispatch

mod access_log;
pub mod dispatch;
pub mod pages;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{Router, middleware};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::slide::{SlideAppState, SlideService};

pub use access_log::{access_line, access_log};
pub use dispatch::{Matcher, ROUTES, Route, dispatch};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Mock API backend
    pub slides: SlideAppState,
    /// Directory holding index.html, slides.html and viewer.html
    pub web_dir: PathBuf,
    /// Root for the static file fallback
    pub static_root: PathBuf,
}

impl AppState {
    pub fn new(slide_service: Arc<dyn SlideService>) -> Self {
        let defaults = Config::default();
        Self {
            slides: SlideAppState { slide_service },
            web_dir: defaults.web_dir,
            static_root: defaults.static_root,
        }
    }

    pub fn with_web_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.web_dir = dir.into();
        self
    }

    pub fn with_static_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_root = dir.into();
        self
    }
}

/// Build the application router
///
/// Every request goes through [`dispatch`]; there are no axum path routes,
/// and no CORS layer, so preflight requests get the same 501 as any other
/// unsupported method.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .fallback(dispatch)
        .with_state(state)
        .layer(middleware::from_fn(access_log))
        .layer(TraceLayer::new_for_http())
}
