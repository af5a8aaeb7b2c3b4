//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the optional generative model client and a map of live
//! sessions. Each session owns one immutable brand profile and an ordered
//! list of generated assets. Nothing is persisted: a session lives exactly
//! as long as the process and is discarded on reset.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::genai::types::{GenerativeModel, Media};

/// Current time as milliseconds since Unix epoch.
#[must_use]
pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

// =============================================================================
// BRAND PROFILE
// =============================================================================

/// AI-derived brand identity summary. Produced once per session by the
/// analysis call; immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandProfile {
    pub brand_name: String,
    pub industry: String,
    /// Dominant palette as hex color strings.
    pub colors: Vec<String>,
    pub tone_of_voice: String,
    pub target_audience: String,
    /// Optional in the analysis schema; empty when the model omits it.
    #[serde(default)]
    pub tagline: String,
    pub description: String,
}

// =============================================================================
// ASSET TYPES
// =============================================================================

/// Closed set of generatable marketing asset kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    SocialPost,
    SocialImage,
    SocialVideo,
    AdCopy,
    EmailNewsletter,
    BlogOutline,
    LandingHero,
}

impl AssetType {
    /// Human-readable label shown on result cards.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::SocialPost => "Social Media Post",
            Self::SocialImage => "Social Image",
            Self::SocialVideo => "Social Video",
            Self::AdCopy => "Ad Campaign",
            Self::EmailNewsletter => "Newsletter Email",
            Self::BlogOutline => "Blog Article Structure",
            Self::LandingHero => "Landing Page Hero",
        }
    }
}

/// Closed set of output languages for generated copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    English,
    Italian,
    Spanish,
    French,
    German,
}

impl Language {
    /// Native display name, as shown in the selector and sent to the model.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Italian => "Italiano",
            Self::Spanish => "Español",
            Self::French => "Français",
            Self::German => "Deutsch",
        }
    }
}

/// Kind tag for a generated media attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

// =============================================================================
// GENERATED ASSET
// =============================================================================

/// One generated marketing artifact. Appended to the session list on each
/// successful generation; removable by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedAsset {
    pub id: Uuid,
    pub kind: AssetType,
    /// Markdown body of the asset.
    pub content: String,
    /// Raw media bytes, held in memory and served by the media endpoint.
    #[serde(skip)]
    pub media: Option<Media>,
    pub media_kind: Option<MediaKind>,
    pub language: Language,
    pub created_at_ms: i64,
}

// =============================================================================
// SESSION STATE
// =============================================================================

/// Per-session live state: the single active brand profile plus its assets,
/// newest first.
pub struct SessionState {
    pub profile: BrandProfile,
    pub assets: Vec<GeneratedAsset>,
}

impl SessionState {
    #[must_use]
    pub fn new(profile: BrandProfile) -> Self {
        Self { profile, assets: Vec::new() }
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum — all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<RwLock<HashMap<Uuid, SessionState>>>,
    /// Optional generative model client. `None` if `GEMINI_API_KEY` is not set.
    pub model: Option<Arc<dyn GenerativeModel>>,
}

impl AppState {
    #[must_use]
    pub fn new(model: Option<Arc<dyn GenerativeModel>>) -> Self {
        Self { sessions: Arc::new(RwLock::new(HashMap::new())), model }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;

    /// Create a test `AppState` with no model client.
    #[must_use]
    pub fn test_app_state() -> AppState {
        AppState::new(None)
    }

    /// Seed a session with the given profile and return its ID.
    pub async fn seed_session(state: &AppState, profile: BrandProfile) -> Uuid {
        let session_id = Uuid::new_v4();
        let mut sessions = state.sessions.write().await;
        sessions.insert(session_id, SessionState::new(profile));
        session_id
    }

    /// Create a dummy `BrandProfile` for testing.
    #[must_use]
    pub fn dummy_profile() -> BrandProfile {
        BrandProfile {
            brand_name: "Acme Coffee".into(),
            industry: "Specialty coffee".into(),
            colors: vec!["#3E2723".into(), "#FFB300".into(), "#FFF8E1".into()],
            tone_of_voice: "Warm and playful".into(),
            target_audience: "Urban coffee lovers aged 25-40".into(),
            tagline: "Brew bolder.".into(),
            description: "A specialty roaster delivering single-origin beans.".into(),
        }
    }

    /// Create a dummy text `GeneratedAsset` for testing.
    #[must_use]
    pub fn dummy_asset() -> GeneratedAsset {
        GeneratedAsset {
            id: Uuid::new_v4(),
            kind: AssetType::SocialPost,
            content: "**Hello** world".into(),
            media: None,
            media_kind: None,
            language: Language::English,
            created_at_ms: now_ms(),
        }
    }
}
