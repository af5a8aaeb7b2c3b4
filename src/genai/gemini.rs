//! Gemini REST API client.
//!
//! DESIGN
//! ======
//! Thin HTTP wrapper over the `v1beta` generative endpoints. Three wire
//! shapes: `generateContent` (text and image output, optionally schema
//! constrained), `predictLongRunning` + operation polling for video, and a
//! plain binary fetch for the finished video file. Response parsing lives in
//! pure functions for testability.

use std::time::Duration;

use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::config::GenAiConfig;
use super::types::{GenAiError, GenerativeModel, InlineImage, Media};

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Low temperature keeps the brand analysis close to what the logo shows.
const ANALYZE_TEMPERATURE: f64 = 0.4;
/// Copywriting wants some creative range.
const TEXT_TEMPERATURE: f64 = 0.7;

/// Vertical social format for stories/reels.
const VIDEO_ASPECT_RATIO: &str = "9:16";
const VIDEO_RESOLUTION: &str = "720p";
const VIDEO_SAMPLE_COUNT: u32 = 1;
const VIDEO_FALLBACK_MIME: &str = "video/mp4";

// =============================================================================
// CLIENT
// =============================================================================

pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    config: GenAiConfig,
}

impl GeminiClient {
    /// Build the client with timeouts from config.
    ///
    /// # Errors
    ///
    /// Returns [`GenAiError::HttpClientBuild`] if the reqwest client fails
    /// to construct.
    pub fn new(config: GenAiConfig) -> Result<Self, GenAiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| GenAiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: API_BASE_URL.to_string(), config })
    }

    /// Configured text model name (e.g. `"gemini-2.5-flash"`).
    #[must_use]
    pub fn text_model(&self) -> &str {
        &self.config.text_model
    }

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest<'_>,
    ) -> Result<GenerateContentResponse, GenAiError> {
        let url = format!("{}/models/{model}:generateContent", self.base_url);
        let text = self.post_json(&url, request).await?;
        parse_generate_content(&text)
    }

    async fn start_video_job(&self, prompt: &str) -> Result<String, GenAiError> {
        let url = format!("{}/models/{}:predictLongRunning", self.base_url, self.config.video_model);
        let request = PredictLongRunningRequest {
            instances: vec![VideoInstance { prompt }],
            parameters: VideoParameters {
                aspect_ratio: VIDEO_ASPECT_RATIO,
                resolution: VIDEO_RESOLUTION,
                sample_count: VIDEO_SAMPLE_COUNT,
            },
        };
        let text = self.post_json(&url, &request).await?;
        let handle: OperationHandle = serde_json::from_str(&text).map_err(|e| GenAiError::ApiParse(e.to_string()))?;
        Ok(handle.name)
    }

    async fn poll_operation(&self, name: &str) -> Result<Operation, GenAiError> {
        let url = format!("{}/{name}", self.base_url);
        let response = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .send()
            .await
            .map_err(|e| GenAiError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| GenAiError::ApiRequest(e.to_string()))?;
        if status != 200 {
            return Err(GenAiError::ApiResponse { status, body: text });
        }
        serde_json::from_str(&text).map_err(|e| GenAiError::ApiParse(e.to_string()))
    }

    async fn fetch_video(&self, uri: &str) -> Result<Media, GenAiError> {
        let response = self
            .http
            .get(uri)
            .header(API_KEY_HEADER, &self.config.api_key)
            .send()
            .await
            .map_err(|e| GenAiError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(GenAiError::ApiResponse { status, body });
        }

        let mime_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(VIDEO_FALLBACK_MIME)
            .to_string();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| GenAiError::ApiRequest(e.to_string()))?;
        Ok(Media { mime_type, bytes: bytes.to_vec() })
    }

    async fn post_json<T: Serialize>(&self, url: &str, body: &T) -> Result<String, GenAiError> {
        let response = self
            .http
            .post(url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| GenAiError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| GenAiError::ApiRequest(e.to_string()))?;
        if status != 200 {
            return Err(GenAiError::ApiResponse { status, body: text });
        }
        Ok(text)
    }
}

// =============================================================================
// MODEL TRAIT IMPL
// =============================================================================

#[async_trait::async_trait]
impl GenerativeModel for GeminiClient {
    async fn analyze_json(
        &self,
        prompt: &str,
        image: &InlineImage,
        schema: &serde_json::Value,
    ) -> Result<String, GenAiError> {
        let request = GenerateContentRequest {
            contents: vec![WireContent {
                parts: vec![
                    WirePart::inline_data(&image.mime_type, &image.data),
                    WirePart::text(prompt),
                ],
            }],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json"),
                response_schema: Some(schema),
                temperature: ANALYZE_TEMPERATURE,
            }),
        };
        let response = self.generate_content(&self.config.text_model, &request).await?;
        first_text(&response)
    }

    async fn generate_text(&self, system: &str, prompt: &str) -> Result<String, GenAiError> {
        let request = GenerateContentRequest {
            contents: vec![WireContent { parts: vec![WirePart::text(prompt)] }],
            system_instruction: Some(WireContent { parts: vec![WirePart::text(system)] }),
            generation_config: Some(GenerationConfig {
                response_mime_type: None,
                response_schema: None,
                temperature: TEXT_TEMPERATURE,
            }),
        };
        let response = self.generate_content(&self.config.text_model, &request).await?;
        first_text(&response)
    }

    async fn generate_image(&self, prompt: &str) -> Result<Media, GenAiError> {
        // The image model rejects responseMimeType/responseSchema; send the
        // prompt bare and take the inline data part from the response.
        let request = GenerateContentRequest {
            contents: vec![WireContent { parts: vec![WirePart::text(prompt)] }],
            system_instruction: None,
            generation_config: None,
        };
        let response = self.generate_content(&self.config.image_model, &request).await?;
        first_inline_image(&response)
    }

    async fn generate_video(&self, prompt: &str) -> Result<Media, GenAiError> {
        let name = self.start_video_job(prompt).await?;
        info!(operation = %name, "genai: video job started");

        let mut attempts: u32 = 0;
        let operation = loop {
            if attempts >= self.config.video_poll_max_attempts {
                return Err(GenAiError::VideoTimedOut { attempts });
            }
            tokio::time::sleep(Duration::from_secs(self.config.video_poll_secs)).await;
            attempts += 1;

            let operation = self.poll_operation(&name).await?;
            if operation.done {
                break operation;
            }
            debug!(attempts, operation = %name, "genai: video job pending");
        };

        let uri = extract_video_uri(&operation)?;
        info!(attempts, "genai: video job done, fetching binary");
        self.fetch_video(&uri).await
    }
}

// =============================================================================
// WIRE TYPES — generateContent
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<WireContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<WireContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireContent {
    #[serde(default)]
    parts: Vec<WirePart>,
}

/// One content part: exactly one of `text` or `inline_data` is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<WireInlineData>,
}

impl WirePart {
    fn text(text: &str) -> Self {
        Self { text: Some(text.to_string()), inline_data: None }
    }

    fn inline_data(mime_type: &str, data: &str) -> Self {
        Self {
            text: None,
            inline_data: Some(WireInlineData { mime_type: mime_type.to_string(), data: data.to_string() }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireInlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<&'a serde_json::Value>,
    temperature: f64,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<WireContent>,
}

// =============================================================================
// WIRE TYPES — video long-running operation
// =============================================================================

#[derive(Serialize)]
struct PredictLongRunningRequest<'a> {
    instances: Vec<VideoInstance<'a>>,
    parameters: VideoParameters<'a>,
}

#[derive(Serialize)]
struct VideoInstance<'a> {
    prompt: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VideoParameters<'a> {
    aspect_ratio: &'a str,
    resolution: &'a str,
    sample_count: u32,
}

#[derive(Deserialize)]
struct OperationHandle {
    name: String,
}

#[derive(Deserialize)]
struct Operation {
    #[serde(default)]
    done: bool,
    error: Option<OperationError>,
    response: Option<VideoOperationResponse>,
}

#[derive(Deserialize)]
struct OperationError {
    message: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoOperationResponse {
    generate_video_response: Option<VideoResults>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoResults {
    #[serde(default)]
    generated_samples: Vec<GeneratedSample>,
}

#[derive(Deserialize)]
struct GeneratedSample {
    video: Option<VideoRef>,
}

#[derive(Deserialize)]
struct VideoRef {
    uri: Option<String>,
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_generate_content(json: &str) -> Result<GenerateContentResponse, GenAiError> {
    serde_json::from_str(json).map_err(|e| GenAiError::ApiParse(e.to_string()))
}

/// Concatenate the text parts of the first candidate.
fn first_text(response: &GenerateContentResponse) -> Result<String, GenAiError> {
    let parts = response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|content| content.parts.as_slice())
        .unwrap_or_default();

    let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
    if text.is_empty() {
        return Err(GenAiError::EmptyResponse);
    }
    Ok(text)
}

/// Decode the first inline-data part of the first candidate.
fn first_inline_image(response: &GenerateContentResponse) -> Result<Media, GenAiError> {
    let parts = response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|content| content.parts.as_slice())
        .unwrap_or_default();

    let Some(inline) = parts.iter().find_map(|p| p.inline_data.as_ref()) else {
        return Err(GenAiError::EmptyResponse);
    };

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(&inline.data)
        .map_err(|e| GenAiError::ApiParse(format!("inline data decode: {e}")))?;
    Ok(Media { mime_type: inline.mime_type.clone(), bytes })
}

/// Pull the downloadable URI out of a completed operation.
fn extract_video_uri(operation: &Operation) -> Result<String, GenAiError> {
    if let Some(error) = &operation.error {
        let message = error.message.clone().unwrap_or_else(|| "unspecified operation error".into());
        return Err(GenAiError::VideoFailed(message));
    }

    operation
        .response
        .as_ref()
        .and_then(|r| r.generate_video_response.as_ref())
        .and_then(|r| r.generated_samples.first())
        .and_then(|s| s.video.as_ref())
        .and_then(|v| v.uri.clone())
        .ok_or_else(|| GenAiError::VideoFailed("no video URI in completed operation".into()))
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
