use super::*;

// =========================================================================
// generateContent parsing
// =========================================================================

#[test]
fn parse_text_response() {
    let json = r#"{
        "candidates": [
            { "content": { "parts": [ { "text": "Hello " }, { "text": "world" } ] } }
        ]
    }"#;
    let response = parse_generate_content(json).unwrap();
    assert_eq!(first_text(&response).unwrap(), "Hello world");
}

#[test]
fn parse_response_without_candidates_is_empty() {
    let response = parse_generate_content("{}").unwrap();
    assert!(matches!(first_text(&response), Err(GenAiError::EmptyResponse)));
    assert!(matches!(first_inline_image(&response), Err(GenAiError::EmptyResponse)));
}

#[test]
fn parse_invalid_json_errors() {
    assert!(matches!(parse_generate_content("not json"), Err(GenAiError::ApiParse(_))));
}

#[test]
fn first_text_skips_inline_parts() {
    let json = r#"{
        "candidates": [
            { "content": { "parts": [
                { "inlineData": { "mimeType": "image/png", "data": "AAAA" } },
                { "text": "caption" }
            ] } }
        ]
    }"#;
    let response = parse_generate_content(json).unwrap();
    assert_eq!(first_text(&response).unwrap(), "caption");
}

#[test]
fn first_inline_image_decodes_base64() {
    // "aGVsbG8=" is "hello".
    let json = r#"{
        "candidates": [
            { "content": { "parts": [ { "inlineData": { "mimeType": "image/png", "data": "aGVsbG8=" } } ] } }
        ]
    }"#;
    let response = parse_generate_content(json).unwrap();
    let media = first_inline_image(&response).unwrap();
    assert_eq!(media.mime_type, "image/png");
    assert_eq!(media.bytes, b"hello");
}

#[test]
fn first_inline_image_rejects_bad_base64() {
    let json = r#"{
        "candidates": [
            { "content": { "parts": [ { "inlineData": { "mimeType": "image/png", "data": "!!!" } } ] } }
        ]
    }"#;
    let response = parse_generate_content(json).unwrap();
    assert!(matches!(first_inline_image(&response), Err(GenAiError::ApiParse(_))));
}

#[test]
fn text_only_candidate_has_no_image() {
    let json = r#"{ "candidates": [ { "content": { "parts": [ { "text": "no picture" } ] } } ] }"#;
    let response = parse_generate_content(json).unwrap();
    assert!(matches!(first_inline_image(&response), Err(GenAiError::EmptyResponse)));
}

// =========================================================================
// generateContent request serialization
// =========================================================================

#[test]
fn request_serializes_camel_case_and_skips_none() {
    let schema = serde_json::json!({ "type": "OBJECT" });
    let request = GenerateContentRequest {
        contents: vec![WireContent {
            parts: vec![WirePart::inline_data("image/png", "AAAA"), WirePart::text("analyze")],
        }],
        system_instruction: None,
        generation_config: Some(GenerationConfig {
            response_mime_type: Some("application/json"),
            response_schema: Some(&schema),
            temperature: 0.4,
        }),
    };

    let value = serde_json::to_value(&request).unwrap();
    assert!(value.get("systemInstruction").is_none());
    assert_eq!(value["generationConfig"]["responseMimeType"], "application/json");
    assert_eq!(value["generationConfig"]["responseSchema"]["type"], "OBJECT");

    let parts = value["contents"][0]["parts"].as_array().unwrap();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
    assert!(parts[0].get("text").is_none());
    assert_eq!(parts[1]["text"], "analyze");
    assert!(parts[1].get("inlineData").is_none());
}

#[test]
fn request_with_system_instruction() {
    let request = GenerateContentRequest {
        contents: vec![WireContent { parts: vec![WirePart::text("write a post")] }],
        system_instruction: Some(WireContent { parts: vec![WirePart::text("you are a copywriter")] }),
        generation_config: Some(GenerationConfig {
            response_mime_type: None,
            response_schema: None,
            temperature: 0.7,
        }),
    };

    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["systemInstruction"]["parts"][0]["text"], "you are a copywriter");
    assert!(value["generationConfig"].get("responseMimeType").is_none());
    assert!((value["generationConfig"]["temperature"].as_f64().unwrap() - 0.7).abs() < f64::EPSILON);
}

// =========================================================================
// video operation wire types
// =========================================================================

#[test]
fn video_request_serializes_parameters() {
    let request = PredictLongRunningRequest {
        instances: vec![VideoInstance { prompt: "a cinematic brand video" }],
        parameters: VideoParameters { aspect_ratio: "9:16", resolution: "720p", sample_count: 1 },
    };

    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["instances"][0]["prompt"], "a cinematic brand video");
    assert_eq!(value["parameters"]["aspectRatio"], "9:16");
    assert_eq!(value["parameters"]["resolution"], "720p");
    assert_eq!(value["parameters"]["sampleCount"], 1);
}

#[test]
fn pending_operation_defaults_done_false() {
    let operation: Operation = serde_json::from_str(r#"{ "name": "models/veo/operations/abc" }"#).unwrap();
    assert!(!operation.done);
    assert!(operation.response.is_none());
}

#[test]
fn extract_uri_from_completed_operation() {
    let json = r#"{
        "done": true,
        "response": {
            "generateVideoResponse": {
                "generatedSamples": [ { "video": { "uri": "https://example.test/video.mp4" } } ]
            }
        }
    }"#;
    let operation: Operation = serde_json::from_str(json).unwrap();
    assert!(operation.done);
    assert_eq!(extract_video_uri(&operation).unwrap(), "https://example.test/video.mp4");
}

#[test]
fn extract_uri_surfaces_operation_error() {
    let json = r#"{ "done": true, "error": { "message": "quota exceeded" } }"#;
    let operation: Operation = serde_json::from_str(json).unwrap();
    let err = extract_video_uri(&operation).unwrap_err();
    assert!(matches!(err, GenAiError::VideoFailed(ref msg) if msg == "quota exceeded"));
}

#[test]
fn extract_uri_without_samples_fails() {
    let json = r#"{ "done": true, "response": { "generateVideoResponse": { "generatedSamples": [] } } }"#;
    let operation: Operation = serde_json::from_str(json).unwrap();
    assert!(matches!(extract_video_uri(&operation), Err(GenAiError::VideoFailed(_))));
}
