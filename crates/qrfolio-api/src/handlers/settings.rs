//! Appearance settings handlers.

use axum::Json;
use axum::extract::{Multipart, State};

use qrfolio_entity::settings::{PageAppearance, UpdateSettings, UserSettings};

use super::read_file_part;
use crate::dto::request::{UpdateSettingsRequest, validated};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/settings
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<PageAppearance>>> {
    let appearance = state.settings.get(&auth).await?;
    Ok(Json(ApiResponse::ok(appearance)))
}

/// PUT /api/settings
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateSettingsRequest>,
) -> ApiResult<Json<ApiResponse<UserSettings>>> {
    let req = validated(req)?;
    let saved = state
        .settings
        .update(
            &auth,
            UpdateSettings {
                display_style: req.display_style,
                primary_color: req.primary_color,
                secondary_color: req.secondary_color,
                background_color: req.background_color,
                logo_url: None,
                custom_css: req.custom_css,
                show_account_details: req.show_account_details,
                page_title: req.page_title,
                page_description: req.page_description,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(saved)))
}

/// POST /api/settings/logo
pub async fn upload_logo(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> ApiResult<Json<ApiResponse<UserSettings>>> {
    let file = read_file_part(multipart).await?;
    let saved = state
        .settings
        .upload_logo(&auth, file.content_type.as_deref(), file.data)
        .await?;
    Ok(Json(ApiResponse::ok(saved)))
}
