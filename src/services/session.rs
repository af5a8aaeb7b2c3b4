//! Session lifecycle: create on analysis, snapshot for the dashboard,
//! discard on reset.

use uuid::Uuid;

use crate::state::{AppState, BrandProfile, GeneratedAsset, SessionState};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session not found: {0}")]
    NotFound(Uuid),
}

/// Create a session around a freshly analyzed profile and return its ID.
pub async fn create_session(state: &AppState, profile: BrandProfile) -> Uuid {
    let session_id = Uuid::new_v4();
    let mut sessions = state.sessions.write().await;
    sessions.insert(session_id, SessionState::new(profile));
    session_id
}

/// Snapshot a session's profile and asset list.
///
/// # Errors
///
/// Returns [`SessionError::NotFound`] for unknown session IDs.
pub async fn session_snapshot(
    state: &AppState,
    session_id: Uuid,
) -> Result<(BrandProfile, Vec<GeneratedAsset>), SessionError> {
    let sessions = state.sessions.read().await;
    let session = sessions
        .get(&session_id)
        .ok_or(SessionError::NotFound(session_id))?;
    Ok((session.profile.clone(), session.assets.clone()))
}

/// Discard a session and everything it generated.
///
/// # Errors
///
/// Returns [`SessionError::NotFound`] for unknown session IDs.
pub async fn delete_session(state: &AppState, session_id: Uuid) -> Result<(), SessionError> {
    let mut sessions = state.sessions.write().await;
    sessions
        .remove(&session_id)
        .map(|_| ())
        .ok_or(SessionError::NotFound(session_id))
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
