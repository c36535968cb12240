//! Ordered prefix dispatch for incoming requests
//!
//! The viewer's routes are matched by exact path or path prefix, first
//! match wins. Anything unmatched falls through to static file serving.

use axum::{
    extract::{Request, State},
    http::{Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use tower::{ServiceBuilder, ServiceExt};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;

use super::AppState;
use super::pages::serve_page;
use crate::slide::routes as slide_routes;

/// How a path is compared against a table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    Exact(&'static str),
    Prefix(&'static str),
}

impl Matcher {
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Exact(p) => path == *p,
            Self::Prefix(p) => path.starts_with(p),
        }
    }
}

/// Behaviours a request can be dispatched to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    LoginPage,
    SlidesPage,
    ViewerPage,
    Tile,
    SlideList,
    SlideDetail,
    SystemStats,
    Static,
}

const SLIDE_DETAIL_PREFIX: &str = "/api/slides/";

/// Dispatch table, evaluated top to bottom
pub const ROUTES: &[(Matcher, Route)] = &[
    (Matcher::Exact("/"), Route::LoginPage),
    (Matcher::Prefix("/slides.html"), Route::SlidesPage),
    (Matcher::Prefix("/viewer.html"), Route::ViewerPage),
    (Matcher::Prefix("/api/tiles/"), Route::Tile),
    (Matcher::Exact("/api/slides"), Route::SlideList),
    (Matcher::Prefix(SLIDE_DETAIL_PREFIX), Route::SlideDetail),
    (Matcher::Exact("/api/system/stats"), Route::SystemStats),
];

impl Route {
    /// Classify a request path (without query string)
    pub fn classify(path: &str) -> Self {
        ROUTES
            .iter()
            .find(|(matcher, _)| matcher.matches(path))
            .map(|(_, route)| *route)
            .unwrap_or(Self::Static)
    }

    /// Page file served for page routes, relative to the web directory
    pub fn page_file(&self) -> Option<&'static str> {
        match self {
            Self::LoginPage => Some("index.html"),
            Self::SlidesPage => Some("slides.html"),
            Self::ViewerPage => Some("viewer.html"),
            _ => None,
        }
    }
}

/// Fallback handler receiving every request
pub async fn dispatch(State(state): State<AppState>, request: Request) -> Response {
    let method = request.method().clone();

    if method == Method::HEAD {
        return serve_static(&state, request).await;
    }
    if method != Method::GET {
        return unsupported_method(&method);
    }

    // handlers below borrow the head only
    let (parts, body) = request.into_parts();
    let path = parts.uri.path();
    let route = Route::classify(path);
    tracing::debug!("{} -> {:?}", path, route);

    if let Some(file) = route.page_file() {
        return serve_page(&state.web_dir.join(file)).await;
    }

    match route {
        Route::Tile => slide_routes::get_tile(&state.slides, &parts.uri, &parts.headers)
            .await
            .into_response(),
        Route::SlideList => slide_routes::list_slides(&state.slides)
            .await
            .into_response(),
        Route::SlideDetail => {
            let id = &path[SLIDE_DETAIL_PREFIX.len()..];
            slide_routes::get_slide(&state.slides, id)
                .await
                .into_response()
        }
        Route::SystemStats => slide_routes::system_stats(&state.slides)
            .await
            .into_response(),
        _ => serve_static(&state, Request::from_parts(parts, body)).await,
    }
}

/// Serve a file from the static root; missing files are 404
async fn serve_static(state: &AppState, request: Request) -> Response {
    let service = ServiceBuilder::new()
        .layer(CompressionLayer::new())
        .service(ServeDir::new(&state.static_root));

    match service.oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

fn unsupported_method(method: &Method) -> Response {
    (
        StatusCode::NOT_IMPLEMENTED,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        format!("Unsupported method ('{}')", method),
    )
        .into_response()
}
