//! One-line access log

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request},
    http::{Method, StatusCode, Uri, Version},
    middleware::Next,
    response::Response,
};
use tracing::info;

/// Log one [`access_line`] per request
pub async fn access_log(
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Response {
    let client = connect_info.map(|ConnectInfo(addr)| addr);
    let method = request.method().clone();
    let uri = request.uri().clone();
    let version = request.version();

    let response = next.run(request).await;

    info!("{}", access_line(client, &method, &uri, version, response.status()));

    response
}

/// Format `[DEV SERVER] <client> - "<method> <uri> <version>" <status>`.
/// The client is `-` when the connection address is unknown.
pub fn access_line(
    client: Option<SocketAddr>,
    method: &Method,
    uri: &Uri,
    version: Version,
    status: StatusCode,
) -> String {
    let client = client
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "-".to_string());

    format!(
        "[DEV SERVER] {} - \"{} {} {:?}\" {}",
        client,
        method,
        uri,
        version,
        status.as_u16()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_with_client_address() {
        let uri: Uri = "/api/tiles/x?layer=2&x=5".parse().unwrap();
        let line = access_line(
            Some("192.168.1.20:54012".parse().unwrap()),
            &Method::GET,
            &uri,
            Version::HTTP_11,
            StatusCode::OK,
        );
        assert_eq!(
            line,
            "[DEV SERVER] 192.168.1.20 - \"GET /api/tiles/x?layer=2&x=5 HTTP/1.1\" 200"
        );
    }

    #[test]
    fn test_line_without_client_address() {
        let uri: Uri = "/nonexistent.txt".parse().unwrap();
        let line = access_line(
            None,
            &Method::HEAD,
            &uri,
            Version::HTTP_10,
            StatusCode::NOT_FOUND,
        );
        assert_eq!(line, "[DEV SERVER] - - \"HEAD /nonexistent.txt HTTP/1.0\" 404");
    }

    #[test]
    fn test_line_for_unsupported_method() {
        let uri: Uri = "/api/slides".parse().unwrap();
        let line = access_line(
            Some("[::1]:8081".parse().unwrap()),
            &Method::OPTIONS,
            &uri,
            Version::HTTP_11,
            StatusCode::NOT_IMPLEMENTED,
        );
        assert_eq!(line, "[DEV SERVER] ::1 - \"OPTIONS /api/slides HTTP/1.1\" 501");
    }
}
