use std::time::Duration;

use essay_feedback::{logger, AnalysisClient, AnalysisError, Config, EssayText};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ESSAY: &str = "Technology shapes how we learn.\n\nSchools should embrace it.";

fn create_test_client(mock_server: &MockServer) -> AnalysisClient {
    logger::init();
    let config = Config::default().with_endpoint(format!("{}/api/chat", mock_server.uri()));
    AnalysisClient::new(&config).expect("创建客户端失败")
}

#[tokio::test]
async fn test_analyze_structured_response() {
    let mock_server = MockServer::start().await;

    let raw = "Your essay is persuasive.\nJSON_SUMMARY= {\"strengths\":[\"clear thesis\"],\"weaknesses\":[\"thin evidence\"],\"suggestions\":[\"cite a study\"],\"grammar\":{\"overallScore\":82,\"issues\":[]}}";

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({ "history": [] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": raw })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let summary = client
        .analyze(EssayText::new(ESSAY))
        .await
        .expect("分析失败");

    assert_eq!(summary.strengths, vec!["clear thesis"]);
    assert_eq!(summary.weaknesses, vec!["thin evidence"]);
    assert_eq!(summary.suggestions, vec!["cite a study"]);
    assert_eq!(summary.grammar.and_then(|g| g.overall_score), Some(82));
}

#[tokio::test]
async fn test_request_body_carries_prompt() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "ok" })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    client
        .analyze(EssayText::new(ESSAY))
        .await
        .expect("分析失败");

    let requests = mock_server.received_requests().await.expect("请求记录");
    assert_eq!(requests.len(), 1);

    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let message = body["message"].as_str().expect("message 字段");
    assert!(message.contains("JSON_SUMMARY="));
    assert!(message.ends_with(ESSAY));
    assert_eq!(body["history"], json!([]));
}

#[tokio::test]
async fn test_analyze_prose_only_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "Positive: good structure\nNegative: weak conclusion\nrandom line"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let summary = client
        .analyze(EssayText::new(ESSAY))
        .await
        .expect("分析失败");

    assert_eq!(summary.strengths, vec!["good structure"]);
    assert_eq!(summary.weaknesses, vec!["weak conclusion"]);
    assert!(summary.suggestions.is_empty());
    assert!(summary.grammar.is_none());
}

#[tokio::test]
async fn test_error_status_is_response_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({ "error": "model overloaded" })),
        )
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let err = client
        .analyze(EssayText::new(ESSAY))
        .await
        .unwrap_err();

    match err {
        AnalysisError::Response { status, detail, .. } => {
            assert_eq!(status, Some(503));
            assert_eq!(detail.as_deref(), Some("model overloaded"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_response_field_is_response_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let err = client
        .analyze(EssayText::new(ESSAY))
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::Response { status: Some(200), .. }));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "response": "late" }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let config = Config::default()
        .with_endpoint(format!("{}/api/chat", mock_server.uri()))
        .with_timeout_secs(1);
    let client = AnalysisClient::new(&config).unwrap();

    let err = client
        .analyze(EssayText::new(ESSAY))
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::Transport { .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_unconfigured_client_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = AnalysisClient::new(&Config::default()).unwrap();
    assert_eq!(client.endpoint(), None);

    let err = client
        .analyze(EssayText::new(ESSAY))
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::Configuration { .. }));
}
