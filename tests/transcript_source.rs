use restyle::source::{CaptionTrack, YoutubeTranscriptSource};
use restyle::RestyleError;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CAPTIONS: &str = r#"{
    "events": [
        {"tStartMs": 0, "segs": [{"utf8": "Hello and welcome"}]},
        {"tStartMs": 1800, "segs": [{"utf8": "\n"}]},
        {"tStartMs": 2000, "segs": [{"utf8": "today we learn "}, {"utf8": "Rust"}]}
    ]
}"#;

fn track(server: &MockServer) -> CaptionTrack {
    CaptionTrack {
        language: "en".to_string(),
        automatic: true,
        url: format!("{}/api/timedtext?lang=en&fmt=json3", server.uri()),
    }
}

#[tokio::test]
async fn downloads_and_flattens_caption_track() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/timedtext"))
        .and(query_param("fmt", "json3"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(CAPTIONS, "application/json"))
        .mount(&server)
        .await;

    let source = YoutubeTranscriptSource::default();
    let text = source.fetch_track(&track(&server)).await.expect("captions");

    assert_eq!(text, "Hello and welcome\ntoday we learn Rust");
}

#[tokio::test]
async fn caption_http_error_is_a_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/timedtext"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let source = YoutubeTranscriptSource::default();
    let err = source
        .fetch_track(&track(&server))
        .await
        .expect_err("403 must fail");

    assert!(matches!(err, RestyleError::Fetch(_)));
}
