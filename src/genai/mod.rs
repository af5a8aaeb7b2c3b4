//! Generative AI — Gemini-backed model client.
//!
//! DESIGN
//! ======
//! The app makes three kinds of generative calls: schema-constrained brand
//! analysis over an image, free-text copywriting, and media generation
//! (image one-shot, video as a polled long-running job). Services depend on
//! the [`GenerativeModel`] trait; [`from_env`] wires up the real Gemini
//! client from environment variables.

pub mod config;
pub mod gemini;
pub mod types;

pub use types::GenerativeModel;

use config::GenAiConfig;
use gemini::GeminiClient;
use types::GenAiError;

/// Build the Gemini client from environment variables.
///
/// Reads `GEMINI_API_KEY` plus the optional model/timeout/poll overrides
/// documented on [`GenAiConfig::from_env`].
///
/// # Errors
///
/// Returns an error if the API key is missing or the HTTP client fails to
/// build.
pub fn from_env() -> Result<GeminiClient, GenAiError> {
    let config = GenAiConfig::from_env()?;
    GeminiClient::new(config)
}
