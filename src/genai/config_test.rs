use super::*;

/// Single test covering all env scenarios sequentially — `GEMINI_API_KEY`
/// is process-global, so splitting these into separate tests would race.
#[test]
fn from_env_scenarios() {
    // Missing key.
    unsafe {
        std::env::remove_var(API_KEY_VAR);
    }
    let err = GenAiConfig::from_env().unwrap_err();
    assert!(matches!(err, GenAiError::MissingApiKey { ref var } if var == API_KEY_VAR));

    // Key set, everything else defaulted.
    unsafe {
        std::env::set_var(API_KEY_VAR, "test-key");
        std::env::remove_var("GENAI_TEXT_MODEL");
        std::env::remove_var("GENAI_VIDEO_POLL_SECS");
    }
    let cfg = GenAiConfig::from_env().unwrap();
    assert_eq!(cfg.api_key, "test-key");
    assert_eq!(cfg.text_model, DEFAULT_TEXT_MODEL);
    assert_eq!(cfg.image_model, DEFAULT_IMAGE_MODEL);
    assert_eq!(cfg.video_model, DEFAULT_VIDEO_MODEL);
    assert_eq!(
        cfg.timeouts,
        GenAiTimeouts { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    );
    assert_eq!(cfg.video_poll_secs, DEFAULT_VIDEO_POLL_SECS);
    assert_eq!(cfg.video_poll_max_attempts, DEFAULT_VIDEO_POLL_MAX_ATTEMPTS);

    // Overrides, including an unparseable number falling back to default.
    unsafe {
        std::env::set_var("GENAI_TEXT_MODEL", "gemini-x");
        std::env::set_var("GENAI_VIDEO_POLL_SECS", "2");
        std::env::set_var("GENAI_VIDEO_POLL_MAX_ATTEMPTS", "not-a-number");
    }
    let cfg = GenAiConfig::from_env().unwrap();
    assert_eq!(cfg.text_model, "gemini-x");
    assert_eq!(cfg.video_poll_secs, 2);
    assert_eq!(cfg.video_poll_max_attempts, DEFAULT_VIDEO_POLL_MAX_ATTEMPTS);

    unsafe {
        std::env::remove_var(API_KEY_VAR);
        std::env::remove_var("GENAI_TEXT_MODEL");
        std::env::remove_var("GENAI_VIDEO_POLL_SECS");
        std::env::remove_var("GENAI_VIDEO_POLL_MAX_ATTEMPTS");
    }
}
