//! Registration, login and current-user handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use qrfolio_entity::user::User;
use qrfolio_service::account::{AuthSession, RegisterInput};

use crate::dto::request::{LoginRequest, validated};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterInput>,
) -> ApiResult<(StatusCode, Json<ApiResponse<AuthSession>>)> {
    let session = state.accounts.register(req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(session))))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<ApiResponse<AuthSession>>> {
    let req = validated(req)?;
    let session = state.accounts.login(&req.email, &req.password).await?;
    Ok(Json(ApiResponse::ok(session)))
}

/// GET /api/auth/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<ApiResponse<User>>> {
    let user = state.accounts.me(auth.user_id).await?;
    Ok(Json(ApiResponse::ok(user)))
}
