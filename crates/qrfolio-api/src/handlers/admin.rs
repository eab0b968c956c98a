//! Administrator handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use qrfolio_entity::invite::{AccessRequest, RegistrationPhrase};
use qrfolio_entity::user::User;
use qrfolio_service::admin::AdminStats;

use crate::dto::request::{GeneratePhraseRequest, ReviewRequest, validated};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::AdminUser;
use crate::state::AppState;

/// GET /api/admin/stats
pub async fn stats(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<ApiResponse<AdminStats>>> {
    Ok(Json(ApiResponse::ok(state.admin.stats().await?)))
}

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<ApiResponse<Vec<User>>>> {
    Ok(Json(ApiResponse::ok(state.admin.list_users().await?)))
}

/// GET /api/admin/phrases
pub async fn list_phrases(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<ApiResponse<Vec<RegistrationPhrase>>>> {
    Ok(Json(ApiResponse::ok(state.admin.list_phrases().await?)))
}

/// POST /api/admin/phrases
pub async fn generate_phrase(
    State(state): State<AppState>,
    admin: AdminUser,
    body: Option<Json<GeneratePhraseRequest>>,
) -> ApiResult<(StatusCode, Json<ApiResponse<RegistrationPhrase>>)> {
    let req = validated(body.map(|Json(b)| b).unwrap_or_default())?;
    let phrase = state.admin.generate_phrase(&admin, req.expires_in).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(phrase))))
}

/// DELETE /api/admin/phrases/{id}
pub async fn revoke_phrase(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.admin.revoke_phrase(&admin, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/admin/access-requests
pub async fn list_access_requests(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<ApiResponse<Vec<AccessRequest>>>> {
    Ok(Json(ApiResponse::ok(state.admin.list_access_requests().await?)))
}

/// PUT /api/admin/access-requests/{id}
pub async fn review_access_request(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ReviewRequest>,
) -> ApiResult<Json<ApiResponse<AccessRequest>>> {
    let reviewed = state
        .admin
        .review_access_request(&admin, id, req.status)
        .await?;
    Ok(Json(ApiResponse::ok(reviewed)))
}
