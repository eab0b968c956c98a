//! Public access request form handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use qrfolio_service::admin::AccessRequestInput;

use crate::dto::request::{AccessRequestBody, validated};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// POST /api/access-requests
pub async fn submit(
    State(state): State<AppState>,
    Json(req): Json<AccessRequestBody>,
) -> ApiResult<(StatusCode, Json<ApiResponse<MessageResponse>>)> {
    let req = validated(req)?;
    state
        .access_requests
        .submit(AccessRequestInput {
            name: req.name,
            email: req.email,
            reason: req.reason,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(MessageResponse::new(
            "Your request has been submitted. You will receive an email once it is reviewed.",
        ))),
    ))
}
