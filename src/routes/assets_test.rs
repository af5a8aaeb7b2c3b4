use super::*;
use crate::genai::types::{GenAiError, Media};
use crate::state::test_helpers;

#[test]
fn asset_error_to_status_maps_not_found() {
    let err = AssetError::SessionNotFound(Uuid::nil());
    assert_eq!(asset_error_to_status(err), StatusCode::NOT_FOUND);

    let err = AssetError::NotFound(Uuid::nil());
    assert_eq!(asset_error_to_status(err), StatusCode::NOT_FOUND);
}

#[test]
fn asset_error_to_status_maps_upstream_failure() {
    let err = AssetError::GenAi(GenAiError::ApiRequest("timeout".into()));
    assert_eq!(asset_error_to_status(err), StatusCode::BAD_GATEWAY);
}

#[test]
fn text_asset_response_has_no_media_url() {
    let asset = test_helpers::dummy_asset();
    let response = to_asset_response(Uuid::nil(), &asset);

    assert_eq!(response.kind_label, "Social Media Post");
    assert_eq!(response.language_label, "English");
    assert!(response.media_url.is_none());
    assert_eq!(response.content, "**Hello** world");
    assert!(response.content_html.contains("<strong>Hello</strong>"));
}

#[test]
fn media_asset_response_links_the_media_endpoint() {
    let session_id = Uuid::new_v4();
    let mut asset = test_helpers::dummy_asset();
    asset.kind = AssetType::SocialImage;
    asset.media = Some(Media { mime_type: "image/png".into(), bytes: vec![1] });
    asset.media_kind = Some(MediaKind::Image);

    let response = to_asset_response(session_id, &asset);
    let url = response.media_url.unwrap();
    assert_eq!(url, format!("/api/session/{session_id}/assets/{}/media", asset.id));
    assert_eq!(response.media_kind, Some(MediaKind::Image));
}

#[test]
fn asset_response_serializes_snake_case_kind() {
    let asset = test_helpers::dummy_asset();
    let response = to_asset_response(Uuid::nil(), &asset);
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["kind"], "social_post");
    assert_eq!(value["language"], "english");
    assert!(value.get("media").is_none());
}
