use crate::e2e::helpers;

use helpers::{tts_stub::StubTtsRepository, TestContext};
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;
use ttsconvert_backend::domain::tts::LanguageTable;

fn labels(values: &serde_json::Value) -> Vec<String> {
    values
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["label"].as_str().unwrap().to_string())
        .collect()
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_configured_languages(ctx: &TestContext) {
    let response = ctx.client.get("/api/languages").await.unwrap();
    response.assert_status(StatusCode::OK);

    let languages = response.json_field("languages");
    assert_eq!(
        labels(languages),
        vec!["English", "French", "German", "Spanish", "Italian", "Portuguese"]
    );

    let english = &languages[0];
    assert_eq!(english["code"], "en");
    assert_eq!(
        labels(&english["accents"]),
        vec!["British (UK)", "American (US)", "Australian", "Indian", "Irish"]
    );
    // Aliases are accepted but never offered
    assert!(english["accents"][0].get("aliases").is_none());

    let french = &languages[1];
    assert_eq!(french["code"], "fr");
    assert_eq!(french["accents"], json!([]));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_describe_the_two_speeds(ctx: &TestContext) {
    let response = ctx.client.get("/api/languages").await.unwrap();

    let speed = response.json_field("speed");
    assert_eq!(speed["min"], 0.5);
    assert_eq!(speed["max"], 1.5);
    assert_eq!(speed["neutral"], 1.0);
    assert!(speed["note"].as_str().unwrap().contains("Only two speeds"));
}

#[tokio::test]
async fn it_should_serve_the_extended_table() {
    let stub = StubTtsRepository::returning(vec![1, 2, 3]);
    let ctx = TestContext::with_repository(stub.clone(), LanguageTable::extended())
        .await
        .unwrap();

    let response = ctx.client.get("/api/languages").await.unwrap();
    let names = labels(response.json_field("languages"));
    assert!(names.contains(&"Dutch".to_string()));
    assert!(names.contains(&"Japanese".to_string()));

    let response = ctx
        .client
        .post(
            "/api/tts/synthesize",
            &json!({ "text": "Hello", "language": "English", "accent": "New Zealand" }),
        )
        .await
        .unwrap();
    response
        .assert_status(StatusCode::OK)
        .assert_header("x-language-code", "en-nz");
    assert_eq!(stub.calls()[0].language, "en-nz");
}
