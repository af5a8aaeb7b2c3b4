//! Asset generation and retrieval routes.

use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, StatusCode};
use axum::response::Json;
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::services::asset::{self, AssetError, AssetRequest};
use crate::services::session;
use crate::state::{AppState, AssetType, GeneratedAsset, Language, MediaKind};

use super::brand::session_error_to_status;

#[derive(Serialize)]
pub struct AssetResponse {
    pub id: Uuid,
    pub kind: AssetType,
    pub kind_label: &'static str,
    /// Raw markdown, used by the copy action.
    pub content: String,
    /// Server-rendered HTML for the result card.
    pub content_html: String,
    pub media_url: Option<String>,
    pub media_kind: Option<MediaKind>,
    pub language: Language,
    pub language_label: &'static str,
    pub created_at_ms: i64,
}

pub(crate) fn to_asset_response(session_id: Uuid, asset: &GeneratedAsset) -> AssetResponse {
    let media_url = asset
        .media
        .as_ref()
        .map(|_| format!("/api/session/{session_id}/assets/{}/media", asset.id));

    AssetResponse {
        id: asset.id,
        kind: asset.kind,
        kind_label: asset.kind.label(),
        content: asset.content.clone(),
        content_html: asset::render_markdown(&asset.content),
        media_url,
        media_kind: asset.media_kind,
        language: asset.language,
        language_label: asset.language.display_name(),
        created_at_ms: asset.created_at_ms,
    }
}

/// `POST /api/session/:id/assets` — generate one asset.
pub async fn create_asset(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<AssetRequest>,
) -> Result<(StatusCode, Json<AssetResponse>), StatusCode> {
    let Some(model) = state.model.clone() else {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    };

    let generated = asset::generate_asset(&state, model.as_ref(), session_id, &request)
        .await
        .map_err(asset_error_to_status)?;

    Ok((StatusCode::CREATED, Json(to_asset_response(session_id, &generated))))
}

/// `GET /api/session/:id/assets` — ordered asset list, newest first.
pub async fn list_assets(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Vec<AssetResponse>>, StatusCode> {
    let (_, assets) = session::session_snapshot(&state, session_id)
        .await
        .map_err(session_error_to_status)?;

    Ok(Json(assets.iter().map(|a| to_asset_response(session_id, a)).collect()))
}

/// `DELETE /api/session/:id/assets/:asset_id` — remove one asset.
pub async fn delete_asset(
    State(state): State<AppState>,
    Path((session_id, asset_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    asset::remove_asset(&state, session_id, asset_id)
        .await
        .map_err(asset_error_to_status)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// `GET /api/session/:id/assets/:asset_id/media` — attachment bytes.
pub async fn serve_media(
    State(state): State<AppState>,
    Path((session_id, asset_id)): Path<(Uuid, Uuid)>,
) -> Result<([(HeaderName, String); 1], Vec<u8>), StatusCode> {
    let media = asset::asset_media(&state, session_id, asset_id)
        .await
        .map_err(asset_error_to_status)?;
    Ok(([(CONTENT_TYPE, media.mime_type)], media.bytes))
}

pub(crate) fn asset_error_to_status(err: AssetError) -> StatusCode {
    warn!(error = %err, "asset: request failed");
    match err {
        AssetError::SessionNotFound(_) | AssetError::NotFound(_) => StatusCode::NOT_FOUND,
        AssetError::GenAi(_) => StatusCode::BAD_GATEWAY,
    }
}

#[cfg(test)]
#[path = "assets_test.rs"]
mod tests;
