use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use newsbrief_core::ai::{CohereProvider, GenerationParams, GenerationProvider};
use newsbrief_core::article::{ArticleLookup, BackendClient};
use newsbrief_core::{AppConfig, ArticleRef, Error, SummaryOrchestrator};

const ARTICLE_URL: &str = "https://example.com/world/story?id=7&lang=en";

fn provider_for(server: &MockServer, api_key: Option<&str>) -> CohereProvider {
    CohereProvider::with_base_url(
        &server.uri(),
        api_key.map(str::to_string),
        GenerationParams::default(),
        5,
    )
    .unwrap()
}

#[tokio::test]
async fn backend_lookup_encodes_url_and_returns_record() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/news/article"))
        .and(query_param("url", ARTICLE_URL))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": ARTICLE_URL,
            "title": "Story",
            "content": "Full body..."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = BackendClient::with_base_url(&server.uri(), 5).unwrap();
    let record = client.fetch_article(ARTICLE_URL).await.unwrap().unwrap();

    assert_eq!(record["content"], "Full body...");
}

#[tokio::test]
async fn backend_lookup_maps_not_found_to_lookup_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/news/article"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Article not found"))
        .mount(&server)
        .await;

    let client = BackendClient::with_base_url(&server.uri(), 5).unwrap();
    let err = client.fetch_article(ARTICLE_URL).await.unwrap_err();

    assert!(matches!(err, Error::ContentLookupFailed { status: 404, .. }));
}

#[tokio::test]
async fn backend_lookup_treats_empty_body_as_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/news/article"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = BackendClient::with_base_url(&server.uri(), 5).unwrap();
    assert!(client.fetch_article(ARTICLE_URL).await.unwrap().is_none());
}

#[tokio::test]
async fn provider_sends_fixed_generation_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/generate"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "command",
            "prompt": "Summarize this",
            "max_tokens": 300,
            "k": 0,
            "stop_sequences": [],
            "return_likelihoods": "NONE"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "gen-1",
            "generations": [{"id": "g1", "text": "  Short.  "}, {"id": "g2", "text": "Other"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server, Some("test-key"));
    let text = provider.generate("Summarize this").await.unwrap();

    // Trimming is the caller's job
    assert_eq!(text, "  Short.  ");
}

#[tokio::test]
async fn provider_surfaces_error_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/generate"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "invalid api token"})),
        )
        .mount(&server)
        .await;

    let err = provider_for(&server, Some("bad-key"))
        .generate("prompt")
        .await
        .unwrap_err();

    match err {
        Error::GenerationFailed(msg) => assert!(msg.contains("invalid api token"), "{msg}"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn provider_tolerates_empty_error_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/generate"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = provider_for(&server, Some("key"))
        .generate("prompt")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::GenerationFailed(ref msg) if msg.contains("503")));
}

#[tokio::test]
async fn provider_rejects_malformed_success_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = provider_for(&server, Some("key"))
        .generate("prompt")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::GenerationFailed(ref msg) if msg.contains("malformed")));
}

#[tokio::test]
async fn provider_without_key_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/generate"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let provider = provider_for(&server, None);
    assert!(!provider.is_configured());

    let err = provider.generate("prompt").await.unwrap_err();
    assert!(matches!(err, Error::MissingCredentials(_)));
}

#[tokio::test]
async fn orchestrator_from_config_runs_full_pipeline_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/news/article"))
        .and(query_param("url", "https://example.com/a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": "Full body...",
            "title": "A"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "generations": [{"text": "  A short summary.  "}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = AppConfig::default();
    config.backend.base_url = server.uri();
    config.ai.base_url = server.uri();
    config.ai.api_key = Some("test-key".to_string());

    let orchestrator = SummaryOrchestrator::from_config(&config).unwrap();
    let article = ArticleRef::from_url("https://example.com/a");

    assert_eq!(orchestrator.get_summary(&article).await.unwrap(), "A short summary.");
    assert_eq!(orchestrator.get_summary(&article).await.unwrap(), "A short summary.");
}

fn feed_article(url: &str) -> ArticleRef {
    ArticleRef {
        url: Some(url.to_string()),
        title: Some("Harbour reopens".to_string()),
        description: Some("Ferries resume service after the storm".to_string()),
        ..ArticleRef::default()
    }
}

async fn mount_generate_expecting_feed_fields(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/generate"))
        .and(body_string_contains("Ferries resume service after the storm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "generations": [{"text": "Ferries are running again."}]
        })))
        .expect(1)
        .mount(server)
        .await;
}

fn config_for(backend: &str, provider: &MockServer) -> AppConfig {
    let mut config = AppConfig::default();
    config.backend.base_url = backend.to_string();
    config.backend.request_timeout_secs = 5;
    config.ai.base_url = provider.uri();
    config.ai.api_key = Some("test-key".to_string());
    config
}

#[tokio::test]
async fn orchestrator_falls_back_when_backend_returns_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/news/article"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Article not found"))
        .expect(1)
        .mount(&server)
        .await;
    mount_generate_expecting_feed_fields(&server).await;

    let orchestrator = SummaryOrchestrator::from_config(&config_for(&server.uri(), &server)).unwrap();
    let summary = orchestrator
        .get_summary(&feed_article("https://example.com/harbour"))
        .await
        .unwrap();

    assert_eq!(summary, "Ferries are running again.");
}

#[tokio::test]
async fn orchestrator_falls_back_when_backend_returns_html() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/news/article"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string("<html><body>Maintenance</body></html>"),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_generate_expecting_feed_fields(&server).await;

    let orchestrator = SummaryOrchestrator::from_config(&config_for(&server.uri(), &server)).unwrap();
    let summary = orchestrator
        .get_summary(&feed_article("https://example.com/harbour"))
        .await
        .unwrap();

    assert_eq!(summary, "Ferries are running again.");
}

#[tokio::test]
async fn orchestrator_falls_back_when_backend_is_unreachable() {
    let server = MockServer::start().await;
    mount_generate_expecting_feed_fields(&server).await;

    // Nothing listens on port 1
    let config = config_for("http://127.0.0.1:1", &server);
    let orchestrator = SummaryOrchestrator::from_config(&config).unwrap();
    let summary = orchestrator
        .get_summary(&feed_article("https://example.com/harbour"))
        .await
        .unwrap();

    assert_eq!(summary, "Ferries are running again.");
}

#[tokio::test]
async fn backend_lookup_treats_non_object_reply_as_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/news/article"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = BackendClient::with_base_url(&server.uri(), 5).unwrap();
    assert!(client.fetch_article(ARTICLE_URL).await.unwrap().is_none());
}
