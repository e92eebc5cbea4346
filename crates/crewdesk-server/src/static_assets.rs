//! Embedded single-page frontend, compiled into the binary.

use axum::{
    body::Body,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "assets/"]
#[include = "*"]
pub struct Assets;

/// Fallback handler: serves an embedded asset when one matches,
/// otherwise hands extensionless paths to index.html.
pub async fn static_handler(uri: Uri) -> impl IntoResponse {
    let path = uri.path().trim_start_matches('/');

    if let Some(response) = serve_asset(path) {
        return response;
    }

    // Paths without an extension fall through to the SPA entry point.
    if path.is_empty() || !path.contains('.') {
        if let Some(response) = serve_asset("index.html") {
            return response;
        }
    }

    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .body(Body::from("404 Not Found"))
        .unwrap()
}

fn serve_asset(path: &str) -> Option<Response> {
    let content = Assets::get(path)?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    Some(
        Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, mime.as_ref())
            .body(Body::from(content.data.to_vec()))
            .unwrap(),
    )
}
