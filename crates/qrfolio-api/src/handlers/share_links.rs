//! Owner-facing share link handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use qrfolio_entity::share::ShareLinkLog;
use qrfolio_service::share::{IssueRequest, SharedLink};

use crate::dto::request::CreateShareLinkRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/share-links
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<SharedLink>>>> {
    let links = state.share_links.list(&auth).await?;
    Ok(Json(ApiResponse::ok(links)))
}

/// POST /api/share-links
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateShareLinkRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<SharedLink>>)> {
    let request = IssueRequest::from_parts(req.link_type, req.expires_in)?;
    let link = state.share_links.issue(&auth, request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(link))))
}

/// DELETE /api/share-links/{id}
pub async fn revoke(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.share_links.revoke(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/share-links/{id}/logs
pub async fn logs(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Vec<ShareLinkLog>>>> {
    let logs = state.share_links.access_logs(&auth, id).await?;
    Ok(Json(ApiResponse::ok(logs)))
}
