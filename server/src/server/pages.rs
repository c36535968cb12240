//! HTML page serving

use std::path::{Path, PathBuf};

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Errors that can occur when serving a page
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Error serving page: {source} ({path:?})")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}

/// Read an HTML page
pub async fn read_page(path: &Path) -> Result<Vec<u8>, PageError> {
    tokio::fs::read(path).await.map_err(|source| PageError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Serve the HTML page at `path`, or a 500 if it cannot be read
pub async fn serve_page(path: &Path) -> Response {
    match read_page(path).await {
        Ok(content) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/html".to_string()),
                (header::CONTENT_LENGTH, content.len().to_string()),
            ],
            content,
        )
            .into_response(),
        Err(e) => {
            error!("{}", e);
            e.into_response()
        }
    }
}
