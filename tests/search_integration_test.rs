use httpmock::prelude::*;
use playfinder::config::RecommenderConfig;
use playfinder::{
    AiStatus, AppConfig, Catalog, FallbackReason, FileKeyStore, FinderEngine, GeminiRecommender,
    KeyStore, MemoryKeyStore, Query,
};
use tempfile::TempDir;

fn gemini_body(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{"content": {"parts": [{"text": text}]}}]
    })
}

fn recommender_config(server: &MockServer) -> RecommenderConfig {
    RecommenderConfig {
        endpoint: server.base_url(),
        diversify: false,
        ..RecommenderConfig::default()
    }
}

fn ids(activities: &[playfinder::Activity]) -> Vec<&str> {
    activities.iter().map(|a| a.id.as_str()).collect()
}

#[tokio::test]
async fn test_end_to_end_search_with_ai_ranking() {
    // Setup mock Gemini endpoint
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/models/gemini-pro:generateContent")
            .query_param("key", "test-key")
            .body_contains("Balloon Keep Up")
            .body_contains("I Spy");
        then.status(200)
            .json_body(gemini_body("Sure! [\"Balloon Keep Up\", \"I Spy\"]"));
    });

    // Key comes from the store, the same way the CLI reads it
    let store = MemoryKeyStore::with_key("test-key");
    let recommender = GeminiRecommender::new(recommender_config(&server), store.get().unwrap());
    let engine = FinderEngine::new(Catalog::builtin(), recommender);

    let report = engine.search(&Query::new(3, 5), true).await;

    api_mock.assert();
    assert_eq!(report.ai, AiStatus::Ranked);
    assert_eq!(ids(&report.activities), vec!["6", "3"]);
}

#[tokio::test]
async fn test_search_falls_back_when_model_rambles() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/models/gemini-pro:generateContent");
        then.status(200)
            .json_body(gemini_body("I think I Spy is the best one for today."));
    });

    let recommender =
        GeminiRecommender::new(recommender_config(&server), Some("test-key".to_string()));
    let engine = FinderEngine::new(Catalog::builtin(), recommender);

    let report = engine.search(&Query::new(3, 5), true).await;

    api_mock.assert();
    assert!(matches!(
        report.ai,
        AiStatus::Fallback(FallbackReason::ResponseShape(_))
    ));
    assert_eq!(ids(&report.activities), vec!["3", "6"]);
}

#[tokio::test]
async fn test_search_without_key_never_calls_the_model() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST);
        then.status(200).json_body(gemini_body("[]"));
    });

    let store = MemoryKeyStore::new();
    let recommender = GeminiRecommender::new(recommender_config(&server), store.get().unwrap());
    let engine = FinderEngine::new(Catalog::builtin(), recommender);

    let report = engine.search(&Query::new(6, 15), true).await;

    api_mock.assert_hits(0);
    assert_eq!(report.ai, AiStatus::Unchanged);
    assert!(!report.activities.is_empty());
}

#[tokio::test]
async fn test_query_string_search() {
    let engine: FinderEngine<GeminiRecommender> =
        FinderEngine::without_recommender(Catalog::builtin());

    // 精選遊戲優先於其他條件
    let report = engine
        .search(&Query::from_query_string("?age=99&time=1&featured=5"), false)
        .await;
    assert_eq!(ids(&report.activities), vec!["5"]);

    // 無效的數字不會配對任何遊戲
    let report = engine
        .search(&Query::from_query_string("age=six&time=15"), false)
        .await;
    assert!(report.activities.is_empty());

    // 缺少的參數使用預設值 (4 歲, 15 分鐘)
    let report = engine.search(&Query::from_query_string(""), false).await;
    assert!(!report.activities.is_empty());
    assert!(report
        .activities
        .iter()
        .all(|a| a.min_age <= 4 && 4 <= a.max_age && a.time_required_minutes <= 15));
}

#[tokio::test]
async fn test_config_file_drives_recommender_and_key_store() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let key_file = temp_dir.path().join("nested").join("credentials.toml");

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/models/gemini-flash:generateContent")
            .query_param("key", "saved-key")
            .body_contains("\"maxOutputTokens\":256");
        then.status(200)
            .json_body(gemini_body("[\"I Spy\", \"Balloon Keep Up\"]"));
    });

    let config_path = temp_dir.path().join("playfinder.toml");
    let toml_content = format!(
        r#"
[recommender]
endpoint = "{}"
model = "gemini-flash"
diversify = false

[recommender.generation]
max_output_tokens = 256

[storage]
key_file = "{}"
"#,
        server.base_url(),
        key_file.display()
    );
    std::fs::write(&config_path, toml_content)?;

    let config = AppConfig::load(Some(config_path.as_path()))?;
    let store = FileKeyStore::new(config.key_file_path()?);
    assert!(!store.has_key()?);

    store.set("saved-key")?;
    assert!(key_file.exists());

    let recommender = GeminiRecommender::new(config.recommender.clone(), store.get()?);
    let engine = FinderEngine::new(Catalog::builtin(), recommender);
    let report = engine.search(&Query::new(3, 5), true).await;

    api_mock.assert();
    assert_eq!(report.ai, AiStatus::Ranked);
    assert_eq!(ids(&report.activities), vec!["3", "6"]);

    store.clear()?;
    assert_eq!(store.get()?, None);
    Ok(())
}

#[tokio::test]
async fn test_server_error_keeps_results_usable() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST);
        then.status(503).body("overloaded");
    });

    let recommender =
        GeminiRecommender::new(recommender_config(&server), Some("test-key".to_string()));
    let engine = FinderEngine::new(Catalog::builtin(), recommender);

    let report = engine.search(&Query::new(6, 15), true).await;

    api_mock.assert();
    assert_eq!(report.ai, AiStatus::Fallback(FallbackReason::Status(503)));
    let expected = playfinder::find_activities(&Catalog::builtin(), &Query::new(6, 15));
    assert_eq!(report.activities, expected);
}
