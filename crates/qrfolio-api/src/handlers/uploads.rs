//! Serves stored images.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use qrfolio_storage::mime_from_path;

use crate::error::ApiResult;
use crate::state::AppState;

/// GET {public_prefix}/{*path}
pub async fn serve(State(state): State<AppState>, Path(path): Path<String>) -> ApiResult<Response> {
    let (stream, len) = state.blobs.read_stream(&path).await?;
    let mime = mime_from_path(&path).unwrap_or("application/octet-stream");

    let mut response = (StatusCode::OK, Body::from_stream(stream)).into_response();
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(mime));
    headers.insert(CONTENT_LENGTH, HeaderValue::from(len));
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("public, max-age=86400"));
    Ok(response)
}
