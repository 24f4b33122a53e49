//! Parse REST 어댑터 통합 테스트

mod common;

use std::net::TcpListener;
use std::time::Duration;
use common::*;
use parse_social_oauth::config::ParseConfig;
use parse_social_oauth::core::errors::AppError;
use parse_social_oauth::db::{FileUpload, ParseRest, Payload, RequestOptions};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_master_query_headers_and_results_unwrapping() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/parse/classes/Post"))
        .and(header("x-parse-application-id", APP_ID))
        .and(header("x-parse-master-key", MASTER_KEY))
        .and(query_param("where", r#"{"author":"kim"}"#))
        .and(query_param("order", "-createdAt"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "objectId": "p1" }, { "objectId": "p2" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let rest = parse_rest(&server);
    let posts = rest
        .get(
            "/classes/Post",
            Some(json!({ "where": { "author": "kim" }, "limit": 10 }).into()),
            RequestOptions::master(),
        )
        .await
        .unwrap();

    assert_eq!(posts, json!([{ "objectId": "p1" }, { "objectId": "p2" }]));
}

#[tokio::test]
async fn test_object_id_becomes_path_segment() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/parse/classes/Post/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "objectId": "p1", "title": "hello" })))
        .expect(1)
        .mount(&server)
        .await;

    let rest = parse_rest(&server);
    let post = rest
        .get("/classes/Post", Some(json!({ "objectId": "p1" }).into()), RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(post["title"], "hello");
    let requests = requests_to(&server, "GET", "/parse/classes/Post/p1").await;
    assert!(requests[0].url.query().is_none());
    assert!(requests[0].headers.get("x-parse-master-key").is_none());
}

#[tokio::test]
async fn test_write_payload_is_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/parse/functions/hello"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "name": "kim" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "Hello kim" })))
        .expect(1)
        .mount(&server)
        .await;

    let rest = parse_rest(&server);
    let result = rest
        .post("/functions/hello", Some(json!({ "name": "kim" }).into()), RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(result, json!("Hello kim"));
}

#[tokio::test]
async fn test_session_token_and_caller_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/parse/users/me"))
        .and(header("x-parse-session-token", "r:abc"))
        .and(header("x-parse-revocable-session", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "objectId": "u1" })))
        .expect(1)
        .mount(&server)
        .await;

    let rest = parse_rest(&server);
    let options = RequestOptions::session("r:abc").with_header("X-Parse-Revocable-Session", "1");
    let me = rest.get("/users/me", None, options).await.unwrap();

    assert_eq!(me["objectId"], "u1");
}

#[tokio::test]
async fn test_file_upload_uses_raw_body_and_mime_type() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/parse/files/avatar.png"))
        .and(header("content-type", "image/png"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "name": "abc_avatar.png",
            "url": "http://files.example.com/abc_avatar.png"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let rest = parse_rest(&server);
    let upload = FileUpload {
        data: vec![0x89, 0x50, 0x4e, 0x47],
        mime_type: Some("image/png".to_string()),
    };
    let file = rest
        .post("/files/avatar.png", Some(Payload::File(upload)), RequestOptions::master())
        .await
        .unwrap();

    assert_eq!(file["name"], "abc_avatar.png");
    let requests = requests_to(&server, "POST", "/parse/files/avatar.png").await;
    assert_eq!(requests[0].body, vec![0x89, 0x50, 0x4e, 0x47]);
}

#[tokio::test]
async fn test_non_success_uses_backend_code_and_error() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/parse/users/u1"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": 137,
            "error": "A duplicate value for a field with unique values was provided"
        })))
        .mount(&server)
        .await;

    let rest = parse_rest(&server);
    let err = rest
        .put("/users/u1", Some(json!({ "email": "dup@example.com" }).into()), RequestOptions::master())
        .await
        .unwrap_err();

    match err {
        AppError::QueryFailed { code, error } => {
            assert_eq!(code, 137);
            assert_eq!(error, json!("A duplicate value for a field with unique values was provided"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_non_success_without_code_falls_back_to_status() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/parse/classes/Post/p1"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let rest = parse_rest(&server);
    let err = rest
        .delete("/classes/Post", Some(json!({ "objectId": "p1" }).into()), RequestOptions::master())
        .await
        .unwrap_err();

    assert_eq!(err.to_body(), json!({ "code": 503, "error": "upstream unavailable" }));
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/parse/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "ok" }))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let config = parse_config(&server).with_timeout(Duration::from_millis(100));
    let rest = ParseRest::new(config).unwrap();
    let err = rest.get("/health", None, RequestOptions::default()).await.unwrap_err();

    assert!(err.is_timeout());
    assert_eq!(err.code(), 124);
}

#[tokio::test]
async fn test_connection_failure_is_code_100() {
    // 바인딩 후 바로 닫아 아무도 듣지 않는 포트를 얻습니다.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let config = ParseConfig::new(format!("http://127.0.0.1:{}/parse", port), APP_ID, MASTER_KEY);
    let rest = ParseRest::new(config).unwrap();
    let err = rest.get("/health", None, RequestOptions::default()).await.unwrap_err();

    assert!(matches!(err, AppError::QueryFailed { code: 100, .. }), "unexpected error: {:?}", err);
    assert!(!err.is_timeout());
}
