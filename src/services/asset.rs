//! Asset generation — brand profile + request → marketing artifact.
//!
//! DESIGN
//! ======
//! Dispatches on asset kind: image and video kinds call the media models
//! and attach the returned bytes; everything else is a copywriting call
//! with a profile-derived system instruction and a per-kind user prompt.
//! Successful results are prepended to the session's asset list (newest
//! first). A failed generation leaves the session untouched.

use pulldown_cmark::{Parser, html};
use tracing::info;
use uuid::Uuid;

use crate::genai::types::{GenAiError, GenerativeModel, Media};
use crate::state::{AppState, AssetType, BrandProfile, GeneratedAsset, Language, MediaKind, now_ms};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("session not found: {0}")]
    SessionNotFound(Uuid),
    #[error("asset not found: {0}")]
    NotFound(Uuid),
    #[error("generative call failed: {0}")]
    GenAi(#[from] GenAiError),
}

/// One generation request from the UI.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct AssetRequest {
    pub kind: AssetType,
    /// Free-text context ("topic") supplied by the user. May be empty.
    #[serde(default)]
    pub topic: String,
    pub language: Language,
}

struct Draft {
    content: String,
    media: Option<Media>,
    media_kind: Option<MediaKind>,
}

// =============================================================================
// GENERATION
// =============================================================================

/// Generate one asset for the session and prepend it to the session list.
///
/// # Errors
///
/// Returns an [`AssetError`] if the session is unknown (including a reset
/// that raced the generation) or the generative call fails.
pub async fn generate_asset(
    state: &AppState,
    model: &dyn GenerativeModel,
    session_id: Uuid,
    request: &AssetRequest,
) -> Result<GeneratedAsset, AssetError> {
    info!(%session_id, kind = request.kind.label(), "asset: generation requested");

    // Snapshot the profile without holding the lock across the network call.
    let profile = {
        let sessions = state.sessions.read().await;
        sessions
            .get(&session_id)
            .ok_or(AssetError::SessionNotFound(session_id))?
            .profile
            .clone()
    };

    let draft = match request.kind {
        AssetType::SocialImage => {
            let prompt = build_image_prompt(&profile, &request.topic);
            let media = model.generate_image(&prompt).await?;
            Draft {
                content: image_note(&profile, &request.topic),
                media: Some(media),
                media_kind: Some(MediaKind::Image),
            }
        }
        AssetType::SocialVideo => {
            let prompt = build_video_prompt(&profile, &request.topic);
            let media = model.generate_video(&prompt).await?;
            Draft { content: video_note(&request.topic), media: Some(media), media_kind: Some(MediaKind::Video) }
        }
        _ => {
            let system = build_system_instruction(&profile, request.language);
            let prompt = build_user_prompt(request.kind, &request.topic);
            let content = model.generate_text(&system, &prompt).await?;
            Draft { content, media: None, media_kind: None }
        }
    };

    let asset = GeneratedAsset {
        id: Uuid::new_v4(),
        kind: request.kind,
        content: draft.content,
        media: draft.media,
        media_kind: draft.media_kind,
        language: request.language,
        created_at_ms: now_ms(),
    };

    // The session may have been reset while the model was working.
    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_mut(&session_id)
        .ok_or(AssetError::SessionNotFound(session_id))?;
    session.assets.insert(0, asset.clone());

    info!(
        %session_id,
        asset_id = %asset.id,
        kind = asset.kind.label(),
        has_media = asset.media.is_some(),
        "asset: generated"
    );
    Ok(asset)
}

/// Remove one asset from the session by id.
///
/// # Errors
///
/// Returns an [`AssetError`] if the session or the asset is unknown.
pub async fn remove_asset(state: &AppState, session_id: Uuid, asset_id: Uuid) -> Result<(), AssetError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_mut(&session_id)
        .ok_or(AssetError::SessionNotFound(session_id))?;

    let before = session.assets.len();
    session.assets.retain(|a| a.id != asset_id);
    if session.assets.len() == before {
        return Err(AssetError::NotFound(asset_id));
    }
    info!(%session_id, %asset_id, "asset: removed");
    Ok(())
}

/// Fetch an asset's media attachment for serving.
///
/// # Errors
///
/// Returns an [`AssetError`] if the session or asset is unknown, or the
/// asset carries no media.
pub async fn asset_media(state: &AppState, session_id: Uuid, asset_id: Uuid) -> Result<Media, AssetError> {
    let sessions = state.sessions.read().await;
    let session = sessions
        .get(&session_id)
        .ok_or(AssetError::SessionNotFound(session_id))?;
    session
        .assets
        .iter()
        .find(|a| a.id == asset_id)
        .and_then(|a| a.media.clone())
        .ok_or(AssetError::NotFound(asset_id))
}

// =============================================================================
// MARKDOWN
// =============================================================================

/// Render asset markdown to HTML for the result cards.
#[must_use]
pub fn render_markdown(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut out = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut out, parser);
    out
}

// =============================================================================
// PROMPTS
// =============================================================================

pub(crate) fn build_system_instruction(profile: &BrandProfile, language: Language) -> String {
    format!(
        "You are a senior copywriter working for the brand \"{brand}\".\n\n\
         Brand details:\n\
         - Industry: {industry}\n\
         - Tone of voice: {tone}\n\
         - Target audience: {audience}\n\
         - Description: {description}\n\n\
         Your goal is to create high-quality marketing content in {language}.\n\
         Use Markdown formatting (bold, bullet points) to make the text readable and engaging.\n\
         Keep it professional yet creative, aligned with the specified tone of voice.",
        brand = profile.brand_name,
        industry = profile.industry,
        tone = profile.tone_of_voice,
        audience = profile.target_audience,
        description = profile.description,
        language = language.display_name(),
    )
}

pub(crate) fn build_user_prompt(kind: AssetType, topic: &str) -> String {
    match kind {
        AssetType::SocialPost => format!(
            "Create a social media post (Instagram/LinkedIn) about: \"{topic}\". Include an engaging caption, \
             3-5 relevant hashtags, and a brief visual description for the image."
        ),
        AssetType::AdCopy => format!(
            "Write ad copy for a paid campaign (Meta Ads or Google Ads) focusing on: \"{topic}\". Include a main \
             headline, primary text, and a call to action."
        ),
        AssetType::EmailNewsletter => {
            format!("Draft an email newsletter about: \"{topic}\". Include a catchy subject line and the body text.")
        }
        AssetType::BlogOutline => format!(
            "Generate a blog post structure (outline) on the topic: \"{topic}\". Include an H1 title, an \
             introduction, 3 main sections (H2) with bullet points, and a conclusion."
        ),
        AssetType::LandingHero => format!(
            "Write the copy for a landing page hero section. Goal/offer: \"{topic}\". Include a headline, a \
             sub-headline, and CTA button text."
        ),
        AssetType::SocialImage | AssetType::SocialVideo => {
            format!("Generate marketing content regarding: \"{topic}\".")
        }
    }
}

pub(crate) fn build_image_prompt(profile: &BrandProfile, topic: &str) -> String {
    format!(
        "Create a high-quality, professional social media photo for the brand \"{brand}\" ({industry}). \
         Context: {topic}. Style: {tone}, clean, modern. Dominant colors: {colors}. \
         Ensure the image is suitable for Instagram.",
        brand = profile.brand_name,
        industry = profile.industry,
        tone = profile.tone_of_voice,
        colors = profile.colors.join(", "),
    )
}

pub(crate) fn build_video_prompt(profile: &BrandProfile, topic: &str) -> String {
    format!(
        "A cinematic, high-quality social media video for brand \"{brand}\" ({industry}). \
         Topic: {topic}. Mood: {tone}. Vertical 9:16 format. Professional lighting.",
        brand = profile.brand_name,
        industry = profile.industry,
        tone = profile.tone_of_voice,
    )
}

fn image_note(profile: &BrandProfile, topic: &str) -> String {
    format!(
        "**Prompt Used:** {topic}\n\nGenerated a visual asset for {brand} reflecting the {tone} style.",
        brand = profile.brand_name,
        tone = profile.tone_of_voice,
    )
}

fn video_note(topic: &str) -> String {
    format!("**Video Concept:** {topic}\n\nGenerated a 720p vertical video for social media stories/reels.")
}

#[cfg(test)]
#[path = "asset_test.rs"]
mod tests;
