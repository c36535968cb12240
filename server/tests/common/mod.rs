//! Common Test Utilities for Integration Tests
//!
//! Shared helpers used across integration test modules.

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
    response::Response,
};
use bytes::Bytes;
use cyto_dev_server::slide::{SlideDetail, SlideRecord, SystemStats};
use cyto_dev_server::tile::TileError;
use cyto_dev_server::{
    AppState, MockSlideService, SlideError, SlideService, TileParams, build_router,
};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const LOGIN_PAGE: &str = "<html><body>login</body></html>";
pub const SLIDES_PAGE: &str = "<html><body>slides</body></html>";
pub const VIEWER_PAGE: &str = "<html><body>viewer</body></html>";

/// Test fixture: a router over temporary page and static directories
pub struct TestApp {
    pub router: Router,
    /// Holds the web directory and the static root
    pub dir: TempDir,
}

impl TestApp {
    /// Router with the mock service, all three pages and an empty static root
    pub fn new() -> Self {
        Self::with_service(Arc::new(MockSlideService::default()))
    }

    pub fn with_service(service: Arc<dyn SlideService>) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let web_dir = dir.path().join("web");
        let static_root = dir.path().join("public");
        std::fs::create_dir_all(&web_dir).unwrap();
        std::fs::create_dir_all(&static_root).unwrap();

        write_file(&web_dir.join("index.html"), LOGIN_PAGE);
        write_file(&web_dir.join("slides.html"), SLIDES_PAGE);
        write_file(&web_dir.join("viewer.html"), VIEWER_PAGE);

        let state = AppState::new(service)
            .with_web_dir(web_dir)
            .with_static_root(static_root);

        Self {
            router: build_router(state),
            dir,
        }
    }

    pub fn web_dir(&self) -> std::path::PathBuf {
        self.dir.path().join("web")
    }

    pub fn static_root(&self) -> std::path::PathBuf {
        self.dir.path().join("public")
    }

    /// Make an HTTP request to the test router
    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible")
    }

    /// GET `uri`
    pub async fn get(&self, uri: &str) -> Response {
        self.request(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }
}

pub fn write_file(path: &Path, content: &str) {
    std::fs::write(path, content).expect("Failed to write fixture");
}

/// Collect a response body
pub async fn body_bytes(response: Response) -> Bytes {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body")
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await.to_vec()).expect("Body is not UTF-8")
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("Body is not JSON")
}

pub fn header<'a>(response: &'a Response, name: &str) -> Option<&'a str> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
}

pub fn assert_status(response: &Response, status: StatusCode) {
    assert_eq!(response.status(), status, "unexpected status");
}

/// Slide service whose every call fails, for exercising error paths
pub struct FailingSlideService;

fn offline() -> SlideError {
    SlideError::Tile(TileError::Task("scanner offline".to_string()))
}

#[async_trait]
impl SlideService for FailingSlideService {
    async fn list_slides(&self) -> Result<Vec<SlideRecord>, SlideError> {
        Err(offline())
    }

    async fn get_slide(&self, id: &str) -> Result<SlideDetail, SlideError> {
        Err(SlideError::NotFound(id.to_string()))
    }

    async fn system_stats(&self) -> Result<SystemStats, SlideError> {
        Err(offline())
    }

    async fn get_tile(&self, _params: &TileParams) -> Result<Bytes, SlideError> {
        Err(SlideError::Tile(TileError::Task("renderer crashed".to_string())))
    }

    fn tile_cache_key(&self, params: &TileParams) -> String {
        params.cache_key(0, 0)
    }
}

/// Initialize test logging for detailed output
#[allow(dead_code)]
pub fn init_test_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cyto_dev_server=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}
