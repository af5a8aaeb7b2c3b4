//! Generative model types — provider-neutral call shapes and errors.
//!
//! DESIGN
//! ======
//! The service layer never talks HTTP directly. It calls through the
//! [`GenerativeModel`] trait, which exposes the three call shapes the app
//! needs: schema-constrained multimodal analysis, free-text generation with
//! a system instruction, and media generation (one-shot image, long-running
//! video). Tests substitute a mock implementation.

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by generative model operations.
#[derive(Debug, thiserror::Error)]
pub enum GenAiError {
    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request to the provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The response contained no usable candidate content.
    #[error("API response contained no content")]
    EmptyResponse,

    /// The video job did not complete within the polling budget.
    #[error("video generation timed out after {attempts} polls")]
    VideoTimedOut { attempts: u32 },

    /// The video job completed without producing a downloadable result.
    #[error("video generation failed: {0}")]
    VideoFailed(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl GenAiError {
    /// Transient failures a caller could reasonably retry.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(
            self,
            Self::ApiRequest(_) | Self::ApiResponse { status: 429 | 500..=599, .. } | Self::VideoTimedOut { .. }
        )
    }
}

// =============================================================================
// MEDIA
// =============================================================================

/// Raw generated media: bytes plus the provider-reported content type.
#[derive(Debug, Clone)]
pub struct Media {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Base64-encoded image sent inline with an analysis request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineImage {
    pub mime_type: String,
    /// Base64 payload without any data-URL prefix.
    pub data: String,
}

// =============================================================================
// MODEL TRAIT
// =============================================================================

/// Provider-neutral async trait for generative calls. Enables mocking in tests.
#[async_trait::async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Analyze an image plus instructions against a JSON response schema.
    /// Returns the raw JSON text emitted by the model.
    ///
    /// # Errors
    ///
    /// Returns a [`GenAiError`] if the request fails or the response carries
    /// no text content.
    async fn analyze_json(
        &self,
        prompt: &str,
        image: &InlineImage,
        schema: &serde_json::Value,
    ) -> Result<String, GenAiError>;

    /// Generate free text from a system instruction and a user prompt.
    ///
    /// # Errors
    ///
    /// Returns a [`GenAiError`] if the request fails or the response carries
    /// no text content.
    async fn generate_text(&self, system: &str, prompt: &str) -> Result<String, GenAiError>;

    /// Generate a single image from a text prompt.
    ///
    /// # Errors
    ///
    /// Returns a [`GenAiError`] if the request fails or no inline image data
    /// is present in the response.
    async fn generate_image(&self, prompt: &str) -> Result<Media, GenAiError>;

    /// Generate a video from a text prompt. Blocks through the provider's
    /// long-running job: start, poll until done, fetch the binary.
    ///
    /// # Errors
    ///
    /// Returns a [`GenAiError`] if any stage fails or the polling budget is
    /// exhausted before the job completes.
    async fn generate_video(&self, prompt: &str) -> Result<Media, GenAiError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
