//! 식별 파이프라인 통합 테스트
//!
//! 로그인/가입/세션 확보를 Parse Server 목 서버에 대해 검증합니다.

mod common;

use common::*;
use parse_social_oauth::config::{AuthProvider, LoginPolicy, SessionPolicy};
use parse_social_oauth::core::errors::AppError;
use parse_social_oauth::domain::dto::oauth::LoginRequest;
use parse_social_oauth::domain::models::auth::RequestContext;
use parse_social_oauth::utils::string_utils::password_placeholder;
use serde_json::json;
use wiremock::matchers::{any, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn google_profile() -> serde_json::Value {
    json!({
        "id": "g-1",
        "email": "kim@example.com",
        "name": "Kim",
        "picture": "https://img.example.com/kim.png"
    })
}

fn existing_user() -> serde_json::Value {
    json!({
        "objectId": "u1",
        "username": "kim@example.com",
        "socialType": "facebook",
        "loginCount": 3,
        "authData": {
            "facebook": { "id": "fb-9", "access_token": "fb-token" }
        }
    })
}

#[tokio::test]
async fn test_first_login_creates_user() {
    let server = MockServer::start().await;

    mount_user_lookup(&server, "kim@example.com", json!([])).await;

    Mock::given(method("POST"))
        .and(path("/parse/users"))
        .and(header("x-parse-master-key", MASTER_KEY))
        .and(body_partial_json(json!({
            "username": "kim@example.com",
            "password": password_placeholder("g-1"),
            "name": "Kim",
            "email": "kim@example.com",
            "socialType": "google",
            "profileImage": { "url": "https://img.example.com/kim.png" },
            "authData": { "google": { "id": "g-1", "access_token": "tok", "expiration_date": 3599 } },
            "loginCount": 1
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "objectId": "u1",
            "sessionToken": "r:new",
            "createdAt": "2024-01-01T00:00:00.000Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    mount_users_me(
        &server,
        "r:new",
        json!({ "objectId": "u1", "username": "kim@example.com", "socialType": "google", "loginCount": 1 }),
    )
    .await;

    let pipeline = pipeline(&server, AuthProvider::Google, google_profile(), LoginPolicy::default());
    let request = LoginRequest {
        access_token: Some("tok".to_string()),
        expiration_date: Some(json!(3599)),
    };

    let user = pipeline.login(&RequestContext::new(), request).await.unwrap();

    assert_eq!(user["objectId"], "u1");
    assert_eq!(user["sessionToken"], "r:new");
    assert_eq!(user["socialType"], "google");
}

#[tokio::test]
async fn test_existing_user_reuses_session_and_merges_auth_data() {
    let server = MockServer::start().await;

    mount_user_lookup(&server, "kim@example.com", json!([existing_user()])).await;
    mount_sessions(&server, "u1", json!([{ "objectId": "s1", "sessionToken": "r:existing" }])).await;

    Mock::given(method("PUT"))
        .and(path("/parse/users/u1"))
        .and(body_partial_json(json!({
            "socialType": "google",
            "authData": {
                "facebook": { "id": "fb-9", "access_token": "fb-token" },
                "google": { "id": "g-1", "access_token": "tok" }
            },
            "loginCount": { "__op": "Increment", "amount": 1 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "updatedAt": "2024-01-02T00:00:00.000Z" })))
        .expect(1)
        .mount(&server)
        .await;

    let pipeline = pipeline(&server, AuthProvider::Google, google_profile(), LoginPolicy::default());
    let outcome = pipeline.resolve(&credential("tok")).await.unwrap();

    assert_eq!(outcome.session_token, "r:existing");
    assert_eq!(outcome.user.session_token.as_deref(), Some("r:existing"));
    assert_eq!(outcome.user.social_type.as_deref(), Some("google"));
    assert_eq!(outcome.user.login_count, Some(4));

    let auth_data = outcome.user.auth_data.unwrap();
    assert!(auth_data.contains_key("facebook"));
    assert_eq!(auth_data["google"]["access_token"], "tok");
}

#[tokio::test]
async fn test_login_count_tracking_can_be_disabled() {
    let server = MockServer::start().await;

    mount_user_lookup(&server, "kim@example.com", json!([existing_user()])).await;
    mount_sessions(&server, "u1", json!([{ "objectId": "s1", "sessionToken": "r:existing" }])).await;
    mount_user_update(&server, "u1").await;

    let policy = LoginPolicy {
        track_login_count: false,
        ..LoginPolicy::default()
    };
    let pipeline = pipeline(&server, AuthProvider::Google, google_profile(), policy);
    let outcome = pipeline.resolve(&credential("tok")).await.unwrap();

    assert_eq!(outcome.user.login_count, Some(3));

    let updates = requests_to(&server, "PUT", "/parse/users/u1").await;
    assert_eq!(updates.len(), 1);
    let body = body_json(&updates[0]);
    assert!(body.get("loginCount").is_none());
    assert_eq!(body["socialType"], "google");
}

#[tokio::test]
async fn test_relogin_when_no_session_exists() {
    let server = MockServer::start().await;
    let password = password_placeholder("g-1");

    mount_user_lookup(&server, "kim@example.com", json!([existing_user()])).await;
    mount_sessions(&server, "u1", json!([])).await;
    mount_user_update(&server, "u1").await;

    Mock::given(method("GET"))
        .and(path("/parse/login"))
        .and(query_param("username", "kim@example.com"))
        .and(query_param("password", password.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "objectId": "u1",
            "sessionToken": "r:relogin"
        })))
        .expect(1)
        .mount(&server)
        .await;

    mount_users_me(
        &server,
        "r:relogin",
        json!({ "objectId": "u1", "username": "kim@example.com", "socialType": "google", "loginCount": 4 }),
    )
    .await;

    let pipeline = pipeline(&server, AuthProvider::Google, google_profile(), LoginPolicy::default());
    let outcome = pipeline.resolve(&credential("tok")).await.unwrap();

    assert_eq!(outcome.session_token, "r:relogin");
    assert_eq!(outcome.user.login_count, Some(4));

    let updates = requests_to(&server, "PUT", "/parse/users/u1").await;
    assert_eq!(updates.len(), 2);
    assert_eq!(body_json(&updates[1]), json!({ "password": password }));
}

#[tokio::test]
async fn test_fail_policy_without_session() {
    let server = MockServer::start().await;

    mount_user_lookup(&server, "kim@example.com", json!([existing_user()])).await;
    mount_sessions(&server, "u1", json!([])).await;
    mount_user_update(&server, "u1").await;

    let policy = LoginPolicy {
        session_policy: SessionPolicy::Fail,
        ..LoginPolicy::default()
    };
    let pipeline = pipeline(&server, AuthProvider::Google, google_profile(), policy);
    let err = pipeline.resolve(&credential("tok")).await.unwrap_err();

    assert!(matches!(err, AppError::SessionResolutionFailed(ref id) if id == "u1"));
    assert!(requests_to(&server, "GET", "/parse/login").await.is_empty());
}

#[tokio::test]
async fn test_banned_user_is_rejected_before_any_write() {
    let server = MockServer::start().await;

    let mut banned = existing_user();
    banned["isBanned"] = json!(true);
    mount_user_lookup(&server, "kim@example.com", json!([banned])).await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let pipeline = pipeline(&server, AuthProvider::Google, google_profile(), LoginPolicy::default());
    let err = pipeline.resolve(&credential("tok")).await.unwrap_err();

    assert!(matches!(err, AppError::UserBanned));
    assert_eq!(err.code(), 101);
}

#[tokio::test]
async fn test_missing_identity_key_stops_before_backend() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let pipeline = pipeline(
        &server,
        AuthProvider::Facebook,
        json!({ "id": "fb-1", "name": "No Email" }),
        LoginPolicy::default(),
    );
    let err = pipeline.resolve(&credential("tok")).await.unwrap_err();

    assert!(matches!(err, AppError::EmailUnavailable));
    assert_eq!(err.to_body(), json!({ "code": 101, "error": "Email is unknown" }));
}

#[tokio::test]
async fn test_missing_access_token() {
    let server = MockServer::start().await;
    let pipeline = pipeline(&server, AuthProvider::Naver, json!({}), LoginPolicy::default());

    let err = pipeline
        .login(&RequestContext::new(), LoginRequest::default())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::MissingCredential(ref p) if p == "naver"));
    assert_eq!(err.to_body(), json!({ "code": 101, "error": "Invalid naver access_token" }));
}

#[tokio::test]
async fn test_backend_error_is_passed_through() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/parse/users"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "code": 119, "error": "unauthorized" })))
        .mount(&server)
        .await;

    let pipeline = pipeline(&server, AuthProvider::Google, google_profile(), LoginPolicy::default());
    let err = pipeline.resolve(&credential("tok")).await.unwrap_err();

    assert_eq!(err.to_body(), json!({ "code": 119, "error": "unauthorized" }));
}

#[tokio::test]
async fn test_kakao_without_email_uses_numeric_id() {
    let server = MockServer::start().await;

    mount_user_lookup(&server, "123456", json!([])).await;

    Mock::given(method("POST"))
        .and(path("/parse/users"))
        .and(body_partial_json(json!({
            "username": "123456",
            "socialType": "kakao",
            "name": "카카오",
            "authData": { "kakao": { "id": "123456", "access_token": "kk" } }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "objectId": "k1", "sessionToken": "r:kakao" })))
        .expect(1)
        .mount(&server)
        .await;

    mount_users_me(&server, "r:kakao", json!({ "objectId": "k1", "username": "123456" })).await;

    let pipeline = pipeline(
        &server,
        AuthProvider::Kakao,
        json!({ "id": 123456, "properties": { "nickname": "카카오" } }),
        LoginPolicy::default(),
    );
    let outcome = pipeline.resolve(&credential("kk")).await.unwrap();

    assert_eq!(outcome.user.object_id, "k1");
    assert!(body_json(&requests_to(&server, "POST", "/parse/users").await[0])
        .get("email")
        .is_none());
}

/// 같은 신규 식별 키로 동시에 첫 로그인하면 둘 다 생성을 시도합니다.
/// 두 번째 생성은 백엔드의 username 유일성 제약에 걸려 그 에러가 그대로 전달됩니다.
#[tokio::test]
async fn test_concurrent_first_login_race() {
    let server = MockServer::start().await;

    mount_user_lookup(&server, "kim@example.com", json!([])).await;

    Mock::given(method("POST"))
        .and(path("/parse/users"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "objectId": "u1", "sessionToken": "r:first" })))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/parse/users"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": 202,
            "error": "Account already exists for this username."
        })))
        .with_priority(2)
        .mount(&server)
        .await;

    mount_users_me(&server, "r:first", json!({ "objectId": "u1", "username": "kim@example.com" })).await;

    let pipeline = pipeline(&server, AuthProvider::Google, google_profile(), LoginPolicy::default());
    let token = credential("tok");

    let (first, second) = tokio::join!(pipeline.resolve(&token), pipeline.resolve(&token));
    let results = [first, second];

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    let failure = results.iter().find_map(|r| r.as_ref().err()).unwrap();
    assert_eq!(failure.code(), 202);
    assert_eq!(requests_to(&server, "POST", "/parse/users").await.len(), 2);
}

/// 유일성 제약이 없는 백엔드에서는 두 요청이 각각 별개의 사용자를 만듭니다.
#[tokio::test]
async fn test_concurrent_first_login_creates_two_users() {
    let server = MockServer::start().await;

    mount_user_lookup(&server, "kim@example.com", json!([])).await;

    Mock::given(method("POST"))
        .and(path("/parse/users"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "objectId": "u1", "sessionToken": "r:first" })))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/parse/users"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "objectId": "u2", "sessionToken": "r:second" })))
        .with_priority(2)
        .mount(&server)
        .await;

    mount_users_me(&server, "r:first", json!({ "objectId": "u1", "username": "kim@example.com" })).await;
    mount_users_me(&server, "r:second", json!({ "objectId": "u2", "username": "kim@example.com" })).await;

    let pipeline = pipeline(&server, AuthProvider::Google, google_profile(), LoginPolicy::default());
    let token = credential("tok");

    let (first, second) = tokio::join!(pipeline.resolve(&token), pipeline.resolve(&token));
    let mut ids = vec![first.unwrap().user.object_id, second.unwrap().user.object_id];
    ids.sort();

    assert_eq!(ids, vec!["u1".to_string(), "u2".to_string()]);
}
