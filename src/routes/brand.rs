//! Brand analysis and session routes.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::routes::assets::{AssetResponse, to_asset_response};
use crate::services::brand::{self, BrandError};
use crate::services::session::{self, SessionError};
use crate::state::{AppState, BrandProfile};

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub session_id: Uuid,
    pub profile: BrandProfile,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub profile: BrandProfile,
    pub assets: Vec<AssetResponse>,
}

/// `POST /api/brand/analyze` — multipart `logo` + `website_url` → new session.
pub async fn analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<AnalyzeResponse>), StatusCode> {
    let Some(model) = state.model.clone() else {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    };

    let mut logo: Option<(String, Vec<u8>)> = None;
    let mut website_url: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        // Field name/content-type borrow the field; take owned copies before
        // consuming the body.
        let name = field.name().map(ToString::to_string);
        match name.as_deref() {
            Some("logo") => {
                let mime = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
                logo = Some((mime, bytes.to_vec()));
            }
            Some("website_url") => {
                website_url = Some(field.text().await.map_err(|_| StatusCode::BAD_REQUEST)?);
            }
            _ => {}
        }
    }

    let Some((mime, bytes)) = logo else {
        return Err(StatusCode::BAD_REQUEST);
    };
    let Some(url) = website_url else {
        return Err(StatusCode::BAD_REQUEST);
    };

    let profile = brand::analyze_brand(model.as_ref(), &bytes, &mime, &url)
        .await
        .map_err(brand_error_to_status)?;
    let session_id = session::create_session(&state, profile.clone()).await;

    Ok((StatusCode::CREATED, Json(AnalyzeResponse { session_id, profile })))
}

/// `GET /api/session/:id` — profile + asset list snapshot.
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionResponse>, StatusCode> {
    let (profile, assets) = session::session_snapshot(&state, session_id)
        .await
        .map_err(session_error_to_status)?;

    let assets = assets
        .iter()
        .map(|a| to_asset_response(session_id, a))
        .collect();
    Ok(Json(SessionResponse { session_id, profile, assets }))
}

/// `DELETE /api/session/:id` — discard the session ("start new project").
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    session::delete_session(&state, session_id)
        .await
        .map_err(session_error_to_status)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

pub(crate) fn brand_error_to_status(err: BrandError) -> StatusCode {
    warn!(error = %err, "brand: request failed");
    match err {
        BrandError::InvalidLogo(_) | BrandError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
        BrandError::GenAi(_) | BrandError::ProfileParse(_) => StatusCode::BAD_GATEWAY,
    }
}

pub(crate) fn session_error_to_status(err: SessionError) -> StatusCode {
    match err {
        SessionError::NotFound(_) => StatusCode::NOT_FOUND,
    }
}

#[cfg(test)]
#[path = "brand_test.rs"]
mod tests;
