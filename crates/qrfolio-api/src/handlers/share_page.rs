//! Public share page handler.

use axum::extract::{Path, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use qrfolio_service::page::SharePage;

use crate::extractors::ClientInfo;
use crate::render::{render_page, render_rejection};
use crate::state::AppState;

fn html(status: StatusCode, body: String) -> Response {
    let mut response = (status, body).into_response();
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/html; charset=utf-8"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

/// GET /share/{token}
///
/// Each successful request redeems the link once. The response is never
/// cacheable so a one-time link cannot be replayed from a cache.
pub async fn open(
    State(state): State<AppState>,
    Path(token): Path<String>,
    ClientInfo(requester): ClientInfo,
) -> Response {
    match state.public_pages.open(&token, &requester).await {
        SharePage::Page(page) => html(StatusCode::OK, render_page(&page)),
        SharePage::Rejected(reason) => {
            let (status, body) = render_rejection(reason);
            html(status, body)
        }
    }
}
