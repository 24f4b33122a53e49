//! 통합 테스트 공용 헬퍼
//!
//! Parse Server는 `wiremock::MockServer`로 대체하고, 프로바이더 프로필은
//! 고정 응답을 돌려주는 [`StubFetcher`]로 대체합니다.

#![allow(dead_code)]

use std::sync::Arc;
use async_trait::async_trait;
use parse_social_oauth::config::{AuthProvider, LoginPolicy, ParseConfig};
use parse_social_oauth::core::errors::AppResult;
use parse_social_oauth::db::ParseRest;
use parse_social_oauth::domain::entities::sessions::user_pointer;
use parse_social_oauth::domain::models::oauth::{AccessCredential, ExternalProfile};
use parse_social_oauth::repositories::sessions::session_repo::SessionRepository;
use parse_social_oauth::repositories::users::user_repo::UserRepository;
use parse_social_oauth::services::auth::{DefaultUserHandler, IdentityPipeline};
use parse_social_oauth::services::providers::{normalize_profile, ProfileFetcher};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const APP_ID: &str = "test-app";
pub const MASTER_KEY: &str = "test-master";

/// 고정된 프로바이더 응답을 정규화해 돌려주는 프로필 소스
pub struct StubFetcher {
    provider: AuthProvider,
    payload: Value,
}

impl StubFetcher {
    pub fn new(provider: AuthProvider, payload: Value) -> Self {
        Self { provider, payload }
    }
}

#[async_trait]
impl ProfileFetcher for StubFetcher {
    fn provider(&self) -> AuthProvider {
        self.provider
    }

    async fn fetch_profile(&self, _credential: &AccessCredential) -> AppResult<ExternalProfile> {
        normalize_profile(self.provider, self.payload.clone())
    }
}

pub fn parse_config(server: &MockServer) -> ParseConfig {
    ParseConfig::new(format!("{}/parse", server.uri()), APP_ID, MASTER_KEY)
}

pub fn parse_rest(server: &MockServer) -> Arc<ParseRest> {
    Arc::new(ParseRest::new(parse_config(server)).expect("client"))
}

pub fn pipeline(server: &MockServer, provider: AuthProvider, profile: Value, policy: LoginPolicy) -> IdentityPipeline {
    let rest = parse_rest(server);
    IdentityPipeline::new(
        Arc::new(StubFetcher::new(provider, profile)),
        Arc::new(UserRepository::new(rest.clone())),
        Arc::new(SessionRepository::new(rest)),
        Arc::new(DefaultUserHandler),
        policy,
    )
}

pub fn credential(token: &str) -> AccessCredential {
    AccessCredential {
        access_token: token.to_string(),
        expiration_date: None,
    }
}

/// `GET /users?where={"username": ..}`
pub async fn mount_user_lookup(server: &MockServer, username: &str, results: Value) {
    Mock::given(method("GET"))
        .and(path("/parse/users"))
        .and(query_param("where", json!({ "username": username }).to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": results })))
        .mount(server)
        .await;
}

/// `GET /users?where={"objectId": ..}`
pub async fn mount_user_by_id(server: &MockServer, object_id: &str, results: Value) {
    Mock::given(method("GET"))
        .and(path("/parse/users"))
        .and(query_param("where", json!({ "objectId": object_id }).to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": results })))
        .mount(server)
        .await;
}

/// `GET /sessions?where={"user": <pointer>}`
pub async fn mount_sessions(server: &MockServer, user_id: &str, results: Value) {
    Mock::given(method("GET"))
        .and(path("/parse/sessions"))
        .and(query_param("where", json!({ "user": user_pointer(user_id) }).to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": results })))
        .mount(server)
        .await;
}

/// `PUT /users/{id}`
pub async fn mount_user_update(server: &MockServer, user_id: &str) {
    Mock::given(method("PUT"))
        .and(path(format!("/parse/users/{}", user_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "updatedAt": "2024-01-01T00:00:00.000Z" })))
        .mount(server)
        .await;
}

/// `GET /users/me`
pub async fn mount_users_me(server: &MockServer, session_token: &str, user: Value) {
    Mock::given(method("GET"))
        .and(path("/parse/users/me"))
        .and(wiremock::matchers::header("x-parse-session-token", session_token))
        .respond_with(ResponseTemplate::new(200).set_body_json(user))
        .mount(server)
        .await;
}

/// 서버가 받은 요청 중 메서드/경로가 일치하는 것들
pub async fn requests_to(server: &MockServer, verb: &str, request_path: &str) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|request| request.method.as_str() == verb && request.url.path() == request_path)
        .collect()
}

pub fn body_json(request: &Request) -> Value {
    serde_json::from_slice(&request.body).expect("json body")
}
