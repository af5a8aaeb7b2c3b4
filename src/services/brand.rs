//! Brand analysis — logo + website URL → brand profile.
//!
//! DESIGN
//! ======
//! The uploaded logo is base64-encoded and sent inline with an analysis
//! prompt and a fixed JSON response schema. The model's JSON output is
//! parsed optimistically into a [`BrandProfile`]; there is no semantic
//! validation of the extracted fields beyond the schema itself.

use base64::Engine;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::genai::types::{GenAiError, GenerativeModel, InlineImage};
use crate::state::BrandProfile;

/// Upper bound for uploaded logos. Mirrors the size hint shown by the picker.
pub const MAX_LOGO_BYTES: usize = 4 * 1024 * 1024;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum BrandError {
    #[error("invalid logo: {0}")]
    InvalidLogo(String),
    #[error("invalid website URL: {0}")]
    InvalidUrl(String),
    #[error("generative call failed: {0}")]
    GenAi(#[from] GenAiError),
    #[error("profile parse failed: {0}")]
    ProfileParse(String),
}

/// Wire shape of the model's analysis output, per the response schema.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileWire {
    brand_name: String,
    industry: String,
    colors: Vec<String>,
    tone_of_voice: String,
    target_audience: String,
    #[serde(default)]
    tagline: String,
    description: String,
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Validate the uploaded logo: must be a non-empty image within the size cap.
///
/// # Errors
///
/// Returns [`BrandError::InvalidLogo`] describing the first failed check.
pub fn validate_logo(mime_type: &str, bytes: &[u8]) -> Result<(), BrandError> {
    if !mime_type.starts_with("image/") {
        return Err(BrandError::InvalidLogo(format!("unsupported content type {mime_type}")));
    }
    if bytes.is_empty() {
        return Err(BrandError::InvalidLogo("empty file".into()));
    }
    if bytes.len() > MAX_LOGO_BYTES {
        return Err(BrandError::InvalidLogo(format!("file exceeds {MAX_LOGO_BYTES} bytes")));
    }
    Ok(())
}

/// Validate the website URL field: non-empty, http(s) scheme.
///
/// # Errors
///
/// Returns [`BrandError::InvalidUrl`] when the field is empty or not http.
pub fn validate_website_url(url: &str) -> Result<(), BrandError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(BrandError::InvalidUrl("empty".into()));
    }
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(BrandError::InvalidUrl("must start with http:// or https://".into()));
    }
    Ok(())
}

// =============================================================================
// PROMPT + SCHEMA
// =============================================================================

pub(crate) fn build_analysis_prompt(website_url: &str) -> String {
    format!(
        "Analyze this logo and the provided website URL: \"{website_url}\".\n\n\
         Act as a brand identity expert. Extract or infer the following:\n\
         1. The brand name (from the logo or the URL).\n\
         2. The industry it operates in.\n\
         3. A palette of 3-5 dominant hex colors from the logo, or colors that suit the brand.\n\
         4. The tone of voice (e.g. Professional, Playful, Luxurious).\n\
         5. The primary target audience.\n\
         6. A catchy tagline (slogan).\n\
         7. A short description of the business (2 sentences max).\n\n\
         Respond strictly in JSON."
    )
}

/// Response schema for the analysis call, in the provider's schema dialect.
/// `tagline` is deliberately not required.
pub(crate) fn profile_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "brandName": { "type": "STRING" },
            "industry": { "type": "STRING" },
            "colors": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Hex color codes"
            },
            "toneOfVoice": { "type": "STRING" },
            "targetAudience": { "type": "STRING" },
            "tagline": { "type": "STRING" },
            "description": { "type": "STRING" }
        },
        "required": ["brandName", "industry", "colors", "toneOfVoice", "targetAudience", "description"]
    })
}

pub(crate) fn parse_profile(raw: &str) -> Result<BrandProfile, BrandError> {
    let wire: ProfileWire = serde_json::from_str(raw).map_err(|e| BrandError::ProfileParse(e.to_string()))?;
    Ok(BrandProfile {
        brand_name: wire.brand_name,
        industry: wire.industry,
        colors: wire.colors,
        tone_of_voice: wire.tone_of_voice,
        target_audience: wire.target_audience,
        tagline: wire.tagline,
        description: wire.description,
    })
}

// =============================================================================
// ANALYSIS
// =============================================================================

/// Analyze the logo and URL into a brand profile.
///
/// # Errors
///
/// Returns a [`BrandError`] for invalid input, a failed generative call, or
/// unparseable model output.
pub async fn analyze_brand(
    model: &dyn GenerativeModel,
    logo_bytes: &[u8],
    logo_mime: &str,
    website_url: &str,
) -> Result<BrandProfile, BrandError> {
    validate_logo(logo_mime, logo_bytes)?;
    validate_website_url(website_url)?;

    let image = InlineImage {
        mime_type: logo_mime.to_string(),
        data: base64::engine::general_purpose::STANDARD.encode(logo_bytes),
    };
    let prompt = build_analysis_prompt(website_url.trim());
    let schema = profile_schema();

    let raw = model.analyze_json(&prompt, &image, &schema).await?;
    let profile = parse_profile(&raw)?;

    info!(
        brand = %profile.brand_name,
        industry = %profile.industry,
        colors = profile.colors.len(),
        "brand: analysis complete"
    );
    Ok(profile)
}

#[cfg(test)]
#[path = "brand_test.rs"]
mod tests;
