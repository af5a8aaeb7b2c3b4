use super::*;

// =========================================================================
// GenAiError
// =========================================================================

#[test]
fn error_display_includes_context() {
    let err = GenAiError::MissingApiKey { var: "GEMINI_API_KEY".into() };
    assert_eq!(err.to_string(), "missing API key: env var GEMINI_API_KEY not set");

    let err = GenAiError::ApiResponse { status: 429, body: "slow down".into() };
    assert_eq!(err.to_string(), "API response error: status 429");

    let err = GenAiError::VideoTimedOut { attempts: 120 };
    assert_eq!(err.to_string(), "video generation timed out after 120 polls");
}

#[test]
fn retryable_classification() {
    assert!(GenAiError::ApiRequest("connection reset".into()).retryable());
    assert!(GenAiError::ApiResponse { status: 429, body: String::new() }.retryable());
    assert!(GenAiError::ApiResponse { status: 503, body: String::new() }.retryable());
    assert!(GenAiError::VideoTimedOut { attempts: 1 }.retryable());

    assert!(!GenAiError::ApiResponse { status: 400, body: String::new() }.retryable());
    assert!(!GenAiError::ApiParse("bad json".into()).retryable());
    assert!(!GenAiError::EmptyResponse.retryable());
    assert!(!GenAiError::VideoFailed("no uri".into()).retryable());
    assert!(!GenAiError::MissingApiKey { var: "X".into() }.retryable());
}

// =========================================================================
// InlineImage
// =========================================================================

#[test]
fn inline_image_serde_round_trip() {
    let image = InlineImage { mime_type: "image/png".into(), data: "aGVsbG8=".into() };
    let json = serde_json::to_string(&image).unwrap();
    let restored: InlineImage = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.mime_type, "image/png");
    assert_eq!(restored.data, "aGVsbG8=");
}
