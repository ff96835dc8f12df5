use crate::e2e::helpers;

use helpers::{TestContext, STUB_AUDIO_LEN};
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;

async fn synthesize(ctx: &TestContext) -> String {
    let response = ctx
        .client
        .post(
            "/api/tts/synthesize",
            &json!({ "text": "Ciao a tutti", "language": "Italian" }),
        )
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
    response.json_field("id").as_str().unwrap().to_string()
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_audio_for_playback(ctx: &TestContext) {
    let id = synthesize(ctx).await;

    let response = ctx.client.get(&format!("/api/audio/{}", id)).await.unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "audio/mpeg")
        .assert_header("content-length", &STUB_AUDIO_LEN.to_string());
    assert!(response.header("content-disposition").is_none());
    assert_eq!(response.body_bytes, vec![0xFF; STUB_AUDIO_LEN]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_audio_as_an_attachment(ctx: &TestContext) {
    let id = synthesize(ctx).await;

    let response = ctx
        .client
        .get(&format!("/api/audio/{}/download", id))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "audio/mpeg");
    let disposition = response.header("content-disposition").unwrap();
    assert!(disposition.starts_with("attachment;"));
    assert!(disposition.contains(&format!("speech-{}.mp3", id)));
    assert_eq!(response.body_bytes.len(), STUB_AUDIO_LEN);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_unknown_audio(ctx: &TestContext) {
    let response = ctx
        .client
        .get("/api/audio/6f1c2a3e-0b4d-4c8e-9a7f-1234567890ab")
        .await
        .unwrap();

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_message("Audio not found");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_malformed_audio_ids(ctx: &TestContext) {
    let response = ctx.client.get("/api/audio/..%2F..%2Fetc%2Fpasswd").await.unwrap();
    assert!(response.status.is_client_error());

    let response = ctx.client.get("/api/audio/not-a-uuid/download").await.unwrap();
    assert!(response.status.is_client_error());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_after_cleanup(ctx: &TestContext) {
    let id = synthesize(ctx).await;
    std::fs::remove_file(ctx.audio_dir().join(format!("{}.mp3", id))).unwrap();

    let response = ctx.client.get(&format!("/api/audio/{}", id)).await.unwrap();
    response.assert_status(StatusCode::NOT_FOUND);
}
