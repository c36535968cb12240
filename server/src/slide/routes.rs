//! HTTP handlers for the mock viewer API
//!
//! These are invoked by the dispatch table in [`crate::server`] rather than
//! mounted on an axum router, since routing is by prefix.

use axum::{
    extract::Query,
    http::{HeaderMap, HeaderValue, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

use super::service::SlideService;
use super::types::SlideError;
use crate::tile::TileParams;

/// Cache policy for tiles; a tile's bytes never change for given coordinates
pub const TILE_CACHE_CONTROL: &str = "public, max-age=31536000";

/// Application state containing the slide service
#[derive(Clone)]
pub struct SlideAppState {
    pub slide_service: Arc<dyn SlideService>,
}

/// Plain-text error response for the mock API
#[derive(Debug)]
pub struct SlideErrorResponse {
    pub status: StatusCode,
    pub message: String,
}

impl SlideErrorResponse {
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<SlideError> for SlideErrorResponse {
    fn from(e: SlideError) -> Self {
        let status = match &e {
            SlideError::NotFound(_) => StatusCode::NOT_FOUND,
            SlideError::Tile(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: e.to_string(),
        }
    }
}

impl IntoResponse for SlideErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.message,
        )
            .into_response()
    }
}

/// Serialize `value` as indented JSON
pub fn json_response<T: Serialize>(value: &T) -> Result<Response, SlideErrorResponse> {
    let body = serde_json::to_vec_pretty(value)
        .map_err(|e| SlideErrorResponse::internal(format!("Error encoding JSON: {}", e)))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_LENGTH, body.len().to_string()),
        ],
        body,
    )
        .into_response())
}

/// GET /api/slides - List all slides
pub async fn list_slides(state: &SlideAppState) -> Result<Response, SlideErrorResponse> {
    let slides = state.slide_service.list_slides().await.map_err(|e| {
        tracing::error!("Failed to list slides: {}", e);
        SlideErrorResponse::from(e)
    })?;

    json_response(&slides)
}

/// GET /api/slides/:id - Get metadata for a specific slide
pub async fn get_slide(state: &SlideAppState, id: &str) -> Result<Response, SlideErrorResponse> {
    let detail = state.slide_service.get_slide(id).await.map_err(|e| {
        tracing::warn!("Failed to get slide {}: {}", id, e);
        SlideErrorResponse::from(e)
    })?;

    json_response(&detail)
}

/// GET /api/system/stats - Server statistics
pub async fn system_stats(state: &SlideAppState) -> Result<Response, SlideErrorResponse> {
    let stats = state.slide_service.system_stats().await.map_err(|e| {
        tracing::error!("Failed to collect system stats: {}", e);
        SlideErrorResponse::from(e)
    })?;

    json_response(&stats)
}

/// GET /api/tiles/*?layer=&x=&y=&z= - Get a mock tile as JPEG
pub async fn get_tile(
    state: &SlideAppState,
    uri: &Uri,
    headers: &HeaderMap,
) -> Result<Response, SlideErrorResponse> {
    let start = Instant::now();

    let Query(query) = Query::<Vec<(String, String)>>::try_from_uri(uri).map_err(|e| {
        tracing::error!("Error generating tile: {}", e);
        SlideErrorResponse::internal(format!("Error generating tile: {}", e))
    })?;

    let params = TileParams::from_query(&query).map_err(|e| {
        tracing::error!("Error generating tile: {}", e);
        SlideErrorResponse::from(SlideError::from(e))
    })?;

    let etag = format!("\"{}\"", state.slide_service.tile_cache_key(&params));
    let etag_value = HeaderValue::from_str(&etag)
        .map_err(|e| SlideErrorResponse::internal(format!("Error generating tile: {}", e)))?;

    if headers
        .get(header::IF_NONE_MATCH)
        .is_some_and(|v| v.as_bytes() == etag.as_bytes())
    {
        tracing::debug!("Tile {} not modified", params.label());
        return Ok((
            StatusCode::NOT_MODIFIED,
            [
                (header::ETAG, etag_value),
                (header::CACHE_CONTROL, HeaderValue::from_static(TILE_CACHE_CONTROL)),
            ],
        )
            .into_response());
    }

    let jpeg_bytes = state.slide_service.get_tile(&params).await.map_err(|e| {
        tracing::error!("Error generating tile {}: {}", params.label(), e);
        SlideErrorResponse::from(e)
    })?;

    let elapsed = format!("{}ms", start.elapsed().as_millis());
    let mut response = (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("image/jpeg")),
            (header::CONTENT_LENGTH, HeaderValue::from(jpeg_bytes.len())),
            (header::CACHE_CONTROL, HeaderValue::from_static(TILE_CACHE_CONTROL)),
            (header::ETAG, etag_value),
        ],
        jpeg_bytes,
    )
        .into_response();

    if let Ok(value) = HeaderValue::from_str(&elapsed) {
        response.headers_mut().insert("x-processing-time", value);
    }

    Ok(response)
}
