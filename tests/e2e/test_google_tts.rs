use crate::e2e::helpers;

use helpers::{
    mock_google::{MockBehavior, MockGoogle},
    TestContext,
};
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use ttsconvert_backend::{
    domain::tts::{LanguageCode, LanguageTable},
    infrastructure::repositories::{GoogleTtsRepository, TtsRepository},
};

fn client_for(mock: &MockGoogle, timeout: Duration) -> GoogleTtsRepository {
    GoogleTtsRepository::new(&mock.base_url, timeout).unwrap()
}

#[tokio::test]
async fn it_should_send_text_language_and_speed() {
    let mock = MockGoogle::start(MockBehavior::Audio(vec![0xAA; 16])).await;
    let client = client_for(&mock, Duration::from_secs(5));

    let audio = client
        .synthesize("Good morning", &LanguageCode::new("en-au"), true)
        .await
        .unwrap();

    assert_eq!(audio.len(), 17);
    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["q"], "Good morning");
    assert_eq!(requests[0]["tl"], "en-au");
    assert_eq!(requests[0]["ttsspeed"], "0.3");
    assert_eq!(requests[0]["client"], "tw-ob");
    assert_eq!(requests[0]["total"], "1");
}

#[tokio::test]
async fn it_should_use_normal_speed_when_not_slow() {
    let mock = MockGoogle::start(MockBehavior::Audio(vec![1])).await;
    let client = client_for(&mock, Duration::from_secs(5));

    client
        .synthesize("Hallo", &LanguageCode::new("de"), false)
        .await
        .unwrap();

    assert_eq!(mock.requests()[0]["ttsspeed"], "1");
}

#[tokio::test]
async fn it_should_split_long_text_and_merge_in_order() {
    let mock = MockGoogle::start(MockBehavior::Audio(vec![0xEE; 4])).await;
    let client = client_for(&mock, Duration::from_secs(5));
    let text = "This sentence is here to pad the text out. ".repeat(6);

    let audio = client
        .synthesize(&text, &LanguageCode::new("en-us"), false)
        .await
        .unwrap();

    let requests = mock.requests();
    assert!(requests.len() > 1);
    for (index, request) in requests.iter().enumerate() {
        assert_eq!(request["idx"], index.to_string());
        assert_eq!(request["total"], requests.len().to_string());
        assert!(request["q"].chars().count() <= 100);
    }

    // Every chunk answers with its index followed by 4 bytes
    let markers: Vec<u8> = audio.chunks(5).map(|c| c[0]).collect();
    let expected: Vec<u8> = (0..requests.len() as u8).collect();
    assert_eq!(markers, expected);
}

#[tokio::test]
async fn it_should_fail_on_service_rejection() {
    let mock = MockGoogle::start(MockBehavior::Status(StatusCode::TOO_MANY_REQUESTS)).await;
    let client = client_for(&mock, Duration::from_secs(5));

    let err = client
        .synthesize("Hola", &LanguageCode::new("es"), false)
        .await
        .unwrap_err();

    assert!(err.contains("429"), "unexpected error: {}", err);
    assert_eq!(mock.requests().len(), 1);
}

#[tokio::test]
async fn it_should_fail_on_empty_audio() {
    let mock = MockGoogle::start(MockBehavior::Empty).await;
    let client = client_for(&mock, Duration::from_secs(5));

    let err = client
        .synthesize("Hola", &LanguageCode::new("es"), false)
        .await
        .unwrap_err();

    assert!(err.contains("no audio"), "unexpected error: {}", err);
}

#[tokio::test]
async fn it_should_time_out_instead_of_blocking() {
    let mock = MockGoogle::start(MockBehavior::Stall(Duration::from_secs(10))).await;
    let client = client_for(&mock, Duration::from_secs(1));

    let started = std::time::Instant::now();
    let err = client
        .synthesize("Hello", &LanguageCode::new("en-gb"), false)
        .await
        .unwrap_err();

    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(err.contains("did not answer within 1s"), "unexpected error: {}", err);
}

#[tokio::test]
async fn it_should_bound_the_whole_submission_by_the_timeout() {
    // Each chunk answers inside the timeout, but all of them together do not
    let mock = MockGoogle::start(MockBehavior::Stall(Duration::from_millis(400))).await;
    let client = client_for(&mock, Duration::from_secs(1));
    let text = "This sentence is here to pad the text out. ".repeat(12);

    let started = std::time::Instant::now();
    let err = client
        .synthesize(&text, &LanguageCode::new("en-us"), false)
        .await
        .unwrap_err();

    assert!(started.elapsed() < Duration::from_millis(1800));
    assert!(err.contains("did not answer within 1s"), "unexpected error: {}", err);
    // At least six chunks are needed, only the first few were sent
    assert!(mock.requests().len() < 6);
}

#[tokio::test]
async fn it_should_synthesize_end_to_end_through_google() {
    let mock = MockGoogle::start(MockBehavior::Audio(vec![0x42; 99])).await;
    let client = Arc::new(client_for(&mock, Duration::from_secs(5)));
    let ctx = TestContext::with_repository(client, LanguageTable::standard())
        .await
        .unwrap();

    let response = ctx
        .client
        .post(
            "/api/tts/synthesize",
            &json!({ "text": "Bom dia", "language": "Portuguese", "speed": 0.7 }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("x-speech-slow", "true");
    assert_eq!(response.json_field("size_bytes"), 100);
    assert_eq!(mock.requests()[0]["tl"], "pt");
    assert_eq!(ctx.stored_files(), 1);
}

#[tokio::test]
async fn it_should_surface_google_timeouts_as_bad_gateway() {
    let mock = MockGoogle::start(MockBehavior::Stall(Duration::from_secs(10))).await;
    let client = Arc::new(client_for(&mock, Duration::from_secs(1)));
    let ctx = TestContext::with_repository(client, LanguageTable::standard())
        .await
        .unwrap();

    let response = ctx
        .client
        .post(
            "/api/tts/synthesize",
            &json!({ "text": "Hello", "language": "English", "accent": "American" }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_GATEWAY)
        .assert_error_message("did not answer");
    assert_eq!(ctx.stored_files(), 0);
}
