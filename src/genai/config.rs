//! Generative API configuration parsed from environment variables.

use super::types::GenAiError;

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_VIDEO_MODEL: &str = "veo-3.1-fast-generate-preview";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_VIDEO_POLL_SECS: u64 = 5;
pub const DEFAULT_VIDEO_POLL_MAX_ATTEMPTS: u32 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenAiTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenAiConfig {
    pub api_key: String,
    pub text_model: String,
    pub image_model: String,
    pub video_model: String,
    pub timeouts: GenAiTimeouts,
    /// Seconds between polls of a long-running video operation.
    pub video_poll_secs: u64,
    /// Upper bound on poll attempts before the job is declared timed out.
    pub video_poll_max_attempts: u32,
}

impl GenAiConfig {
    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `GEMINI_API_KEY`
    ///
    /// Optional:
    /// - `GENAI_TEXT_MODEL`, `GENAI_IMAGE_MODEL`, `GENAI_VIDEO_MODEL`
    /// - `GENAI_REQUEST_TIMEOUT_SECS`: default 120
    /// - `GENAI_CONNECT_TIMEOUT_SECS`: default 10
    /// - `GENAI_VIDEO_POLL_SECS`: default 5
    /// - `GENAI_VIDEO_POLL_MAX_ATTEMPTS`: default 120
    ///
    /// # Errors
    ///
    /// Returns [`GenAiError::MissingApiKey`] when `GEMINI_API_KEY` is unset.
    pub fn from_env() -> Result<Self, GenAiError> {
        let api_key =
            std::env::var(API_KEY_VAR).map_err(|_| GenAiError::MissingApiKey { var: API_KEY_VAR.into() })?;

        Ok(Self {
            api_key,
            text_model: env_or("GENAI_TEXT_MODEL", DEFAULT_TEXT_MODEL),
            image_model: env_or("GENAI_IMAGE_MODEL", DEFAULT_IMAGE_MODEL),
            video_model: env_or("GENAI_VIDEO_MODEL", DEFAULT_VIDEO_MODEL),
            timeouts: GenAiTimeouts {
                request_secs: env_parse_u64("GENAI_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
                connect_secs: env_parse_u64("GENAI_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
            },
            video_poll_secs: env_parse_u64("GENAI_VIDEO_POLL_SECS", DEFAULT_VIDEO_POLL_SECS),
            video_poll_max_attempts: env_parse_u32("GENAI_VIDEO_POLL_MAX_ATTEMPTS", DEFAULT_VIDEO_POLL_MAX_ATTEMPTS),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_parse_u32(key: &str, default: u32) -> u32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
