//! QR code management handlers.

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use qrfolio_entity::qr_code::{QrCode, UpdateQrCode};
use qrfolio_service::qr_code::NewQrCode;

use super::read_file_part;
use crate::dto::request::{CreateQrCodeRequest, ReorderRequest, UpdateQrCodeRequest, validated};
use crate::dto::response::{ApiResponse, UploadResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/qr-codes
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<QrCode>>>> {
    let codes = state.qr_codes.list(&auth).await?;
    Ok(Json(ApiResponse::ok(codes)))
}

/// POST /api/qr-codes/upload
pub async fn upload(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<ApiResponse<UploadResponse>>)> {
    let file = read_file_part(multipart).await?;
    let url = state
        .qr_codes
        .upload_image(&auth, file.content_type.as_deref(), file.data)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(UploadResponse { url }))))
}

/// POST /api/qr-codes
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateQrCodeRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<QrCode>>)> {
    let req = validated(req)?;
    let code = state
        .qr_codes
        .create(
            &auth,
            NewQrCode {
                title: req.title,
                description: req.description,
                image_url: req.image_url,
                account_name: req.account_name,
                account_number: req.account_number,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(code))))
}

/// PUT /api/qr-codes/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateQrCodeRequest>,
) -> ApiResult<Json<ApiResponse<QrCode>>> {
    let req = validated(req)?;
    let code = state
        .qr_codes
        .update(
            &auth,
            id,
            UpdateQrCode {
                title: req.title,
                description: req.description,
                account_name: req.account_name,
                account_number: req.account_number,
                is_active: req.is_active,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(code)))
}

/// PUT /api/qr-codes/order
pub async fn reorder(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ReorderRequest>,
) -> ApiResult<Json<ApiResponse<Vec<QrCode>>>> {
    let positions: Vec<(Uuid, i32)> = req
        .items
        .iter()
        .map(|item| (item.id, item.display_order))
        .collect();
    state.qr_codes.reorder(&auth, &positions).await?;
    let codes = state.qr_codes.list(&auth).await?;
    Ok(Json(ApiResponse::ok(codes)))
}

/// DELETE /api/qr-codes/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.qr_codes.delete(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
