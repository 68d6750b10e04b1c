//! End-to-end tests for the HTTP API over scripted providers

use std::fs;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use campus_assistant::{
    config::{AssistantConfig, LoggingConfig, ServerConfig},
    logging::{LogWorker, RequestLogger},
    providers::mock::{MockLlm, MockSearch},
    server::{build_router, AppState},
    types::SearchHit,
};

const CLASSIFIER: &str = "itmo-info-chooser";
const ANSWERER: &str = "itmo-answers";
const SUFFIX: &str = "\nAnswer prepared by model gpt-4o-mini.";

struct Harness {
    router: Router,
    logger: RequestLogger,
    worker: LogWorker,
    log_file: std::path::PathBuf,
    _dir: TempDir,
}

impl Harness {
    fn new(llm: Arc<MockLlm>, search: Arc<MockSearch>) -> Self {
        Self::with_server(llm, search, ServerConfig::default())
    }

    fn with_server(llm: Arc<MockLlm>, search: Arc<MockSearch>, server: ServerConfig) -> Self {
        let dir = TempDir::new().unwrap();
        let log_file = dir.path().join("logs").join("api.log");

        let config = AssistantConfig {
            server,
            logging: LoggingConfig {
                file: log_file.clone(),
                console: false,
                ..LoggingConfig::default()
            },
            ..AssistantConfig::default()
        };

        let (logger, worker) = RequestLogger::start(&config.logging).unwrap();
        let state = AppState::with_providers(config, llm, search, logger.clone());

        Self {
            router: build_router(state),
            logger,
            worker,
            log_file,
            _dir: dir,
        }
    }

    async fn post(&self, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/request")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn log_contents(self) -> String {
        self.logger.flush().await;
        self.worker.shutdown().await;
        fs::read_to_string(&self.log_file).unwrap()
    }
}

fn university_hit() -> SearchHit {
    SearchHit::new(
        "https://itmo.ru/ru/page/history",
        "Университет ИТМО основан в 1900 году.",
    )
}

#[tokio::test]
async fn test_open_ended_question() {
    let llm = Arc::new(
        MockLlm::new("gpt-4o-mini")
            .with_response(
                CLASSIFIER,
                json!({ "is_variants": 2, "search_query": "ИТМО год основания" }),
            )
            .with_response(
                ANSWERER,
                json!({ "answer": 3, "reasoning": "Университет основан в 1900 году.", "sources": [1] }),
            ),
    );
    let search = Arc::new(MockSearch::new(vec![university_hit()]));
    let harness = Harness::new(llm, search.clone());

    let (status, body) = harness
        .post(r#"{"id": "1", "query": "Когда основан университет?"}"#)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "1");
    assert_eq!(body["answer"], Value::Null);
    assert_eq!(body["sources"], json!(["https://itmo.ru/ru/page/history"]));
    assert!(body["reasoning"].as_str().unwrap().ends_with(SUFFIX));
    assert_eq!(
        search.last_request().unwrap().query,
        "ИТМО год основания"
    );

    let log = harness.log_contents().await;
    assert!(log.contains("Incoming request: POST /api/request"));
    assert!(log.contains("Processing prediction request with id: 1"));
    assert!(log.contains("Successfully processed request 1"));
    assert!(log.contains("Status: 200"));
}

#[tokio::test]
async fn test_irrelevant_question_skips_search() {
    let llm = Arc::new(MockLlm::new("gpt-4o-mini").with_response(
        CLASSIFIER,
        json!({ "is_variants": 0, "search_query": "" }),
    ));
    let search = Arc::new(MockSearch::new(vec![university_hit()]));
    let harness = Harness::new(llm.clone(), search.clone());

    let (status, body) = harness
        .post(r#"{"id": "2", "query": "Сколько будет дважды два?"}"#)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "id": "2",
            "answer": null,
            "reasoning": format!("Вопрос не связан с тематикой сервиса!{}", SUFFIX),
            "sources": []
        })
    );
    assert_eq!(search.calls(), 0);
    assert_eq!(llm.calls_for(ANSWERER), 0);
}

#[tokio::test]
async fn test_empty_search_uses_fallback_context() {
    let llm = Arc::new(
        MockLlm::new("gpt-4o-mini")
            .with_response(
                CLASSIFIER,
                json!({ "is_variants": 1, "search_query": "ИТМО ректор" }),
            )
            .with_response(
                ANSWERER,
                json!({ "answer": 1, "reasoning": "Исходя из общих знаний.", "sources": [] }),
            ),
    );
    let search = Arc::new(MockSearch::new(vec![]));
    let harness = Harness::new(llm.clone(), search);

    let (status, body) = harness
        .post(r#"{"id": "3", "query": "Кто ректор? 1) Васильев 2) Иванов"}"#)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], 1);
    assert_eq!(body["sources"], json!([]));

    let messages = llm.last_messages(ANSWERER).unwrap();
    assert!(messages[1].content.contains("Информации из открытых источников нет!"));
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let harness = Harness::new(
        Arc::new(MockLlm::new("gpt-4o-mini")),
        Arc::new(MockSearch::new(vec![])),
    );

    for body in [r#"{"id": "4"}"#, r#"{"query": "Где находится ИТМО?"}"#] {
        let (status, response) = harness.post(body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!response["detail"].as_str().unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_rejected_body_is_logged_with_its_id() {
    let harness = Harness::new(
        Arc::new(MockLlm::new("gpt-4o-mini")),
        Arc::new(MockSearch::new(vec![])),
    );

    let (status, _) = harness.post(r#"{"id": "41"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let log = harness.log_contents().await;
    assert!(log.contains("Validation error for request 41: "));
    assert!(log.contains("missing field `query`"));
    assert!(log.contains("Status: 400"));
}

#[tokio::test]
async fn test_wrong_content_type_is_bad_request() {
    let harness = Harness::new(
        Arc::new(MockLlm::new("gpt-4o-mini")),
        Arc::new(MockSearch::new(vec![])),
    );

    let request = Request::builder()
        .method("POST")
        .uri("/api/request")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(r#"{"id": "8", "query": "Где ИТМО?"}"#))
        .unwrap();
    let response = harness.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_oversized_body_is_rejected_and_logged() {
    let llm = Arc::new(MockLlm::new("gpt-4o-mini"));
    let harness = Harness::with_server(
        llm.clone(),
        Arc::new(MockSearch::new(vec![])),
        ServerConfig {
            max_body_size: 64,
            ..ServerConfig::default()
        },
    );

    let body = format!(r#"{{"id": "9", "query": "{}"}}"#, "а".repeat(100));
    assert!(body.len() > 64);
    let request = Request::builder()
        .method("POST")
        .uri("/api/request")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap();

    let response = harness.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let detail: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(!detail["detail"].as_str().unwrap().is_empty());
    assert_eq!(llm.calls_for(CLASSIFIER), 0);

    let log = harness.log_contents().await;
    assert!(log.contains("Failed to read request body"));
    assert!(log.contains("Request completed: POST /api/request"));
    assert!(log.contains("Status: 400"));
}

#[tokio::test]
async fn test_blank_query_is_bad_request() {
    let llm = Arc::new(MockLlm::new("gpt-4o-mini"));
    let harness = Harness::new(llm.clone(), Arc::new(MockSearch::new(vec![])));

    let (status, response) = harness.post(r#"{"id": "5", "query": "   "}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["detail"], "query must not be empty");
    assert_eq!(llm.calls_for(CLASSIFIER), 0);
}

#[tokio::test]
async fn test_stage_failure_is_opaque_and_logged() {
    let llm = Arc::new(
        MockLlm::new("gpt-4o-mini").with_failure(CLASSIFIER, "upstream rate limit exceeded"),
    );
    let harness = Harness::new(llm, Arc::new(MockSearch::new(vec![])));

    let (status, body) = harness
        .post(r#"{"id": "6", "query": "Когда день открытых дверей?"}"#)
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "detail": "Internal server error" }));

    let log = harness.log_contents().await;
    assert!(log.contains("Internal error processing request 6"));
    assert!(log.contains("upstream rate limit exceeded"));
    assert!(log.contains("| ERROR |"));
}

#[tokio::test]
async fn test_search_failure_is_internal_error() {
    let llm = Arc::new(MockLlm::new("gpt-4o-mini").with_response(
        CLASSIFIER,
        json!({ "is_variants": 2, "search_query": "ИТМО общежития" }),
    ));
    let harness = Harness::new(llm, Arc::new(MockSearch::failing("connection reset")));

    let (status, body) = harness
        .post(r#"{"id": "7", "query": "Сколько общежитий у ИТМО?"}"#)
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Internal server error");
}

#[tokio::test]
async fn test_health_and_info() {
    let harness = Harness::new(
        Arc::new(MockLlm::new("gpt-4o-mini")),
        Arc::new(MockSearch::new(vec![])),
    );

    let response = harness
        .router
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = harness
        .router
        .clone()
        .oneshot(Request::builder().uri("/api/info").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let info: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(info["model"], "gpt-4o-mini");
    assert_eq!(info["search"]["max_results"], 5);
}
