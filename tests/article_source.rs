use restyle::config::{Settings, SourceSettings};
use restyle::source::{resolve_input, ArticleSource, ContentSource, SourceKind};
use restyle::RestyleError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE: &str = r#"<html>
<head><title>Harvest report</title></head>
<body>
  <nav><a href="/">Home</a></nav>
  <article>
    <h1>A good year</h1>
    <p>The rice harvest came in early this year.</p>
    <p>Farmers expect prices to hold.</p>
  </article>
</body>
</html>"#;

async fn serve(route: &str, response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(&server)
        .await;
    server
}

fn url(server: &MockServer, route: &str) -> url::Url {
    url::Url::parse(&format!("{}{}", server.uri(), route)).expect("valid url")
}

#[tokio::test]
async fn fetches_and_extracts_article() {
    let server = serve(
        "/post",
        ResponseTemplate::new(200).set_body_raw(PAGE, "text/html; charset=utf-8"),
    )
    .await;

    let source = ArticleSource::new(&SourceSettings::default());
    let text = source.fetch(&url(&server, "/post")).await.expect("fetch ok");

    assert_eq!(text.kind, SourceKind::Article);
    assert_eq!(text.title.as_deref(), Some("Harvest report"));
    assert_eq!(
        text.text,
        "A good year\n\nThe rice harvest came in early this year.\n\nFarmers expect prices to hold."
    );
}

#[tokio::test]
async fn http_error_status_is_a_fetch_error() {
    let server = serve("/missing", ResponseTemplate::new(404)).await;

    let source = ArticleSource::new(&SourceSettings::default());
    let err = source
        .fetch(&url(&server, "/missing"))
        .await
        .expect_err("404 must fail");

    assert!(matches!(err, RestyleError::Fetch(_)));
    assert!(err.is_source_error());
}

#[tokio::test]
async fn non_html_content_is_rejected() {
    let server = serve(
        "/photo.png",
        ResponseTemplate::new(200).set_body_raw(vec![0x89, 0x50, 0x4e, 0x47], "image/png"),
    )
    .await;

    let source = ArticleSource::new(&SourceSettings::default());
    let err = source
        .fetch(&url(&server, "/photo.png"))
        .await
        .expect_err("png must fail");

    assert!(matches!(err, RestyleError::UnsupportedSource(_)));
}

#[tokio::test]
async fn page_without_text_is_empty_content() {
    let server = serve(
        "/blank",
        ResponseTemplate::new(200).set_body_raw(
            "<html><body><script>var x = 1;</script></body></html>",
            "text/html",
        ),
    )
    .await;

    let source = ArticleSource::new(&SourceSettings::default());
    let err = source
        .fetch(&url(&server, "/blank"))
        .await
        .expect_err("blank page must fail");

    assert!(matches!(err, RestyleError::ContentEmpty(_)));
}

#[tokio::test]
async fn resolve_input_routes_urls_to_article_source() {
    let server = serve(
        "/post",
        ResponseTemplate::new(200).set_body_raw(PAGE, "text/html"),
    )
    .await;

    let input = format!("{}/post", server.uri());
    let text = resolve_input(&input, &Settings::default())
        .await
        .expect("resolve ok");

    assert_eq!(text.kind, SourceKind::Article);
    assert!(text.text.contains("rice harvest"));
}

#[tokio::test]
async fn resolve_input_keeps_literal_text() {
    let text = resolve_input("Just some words to rewrite.", &Settings::default())
        .await
        .expect("literal text");

    assert_eq!(text.kind, SourceKind::Text);
    assert_eq!(text.text, "Just some words to rewrite.");
}
