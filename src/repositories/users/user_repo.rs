//! # 사용자 리포지토리 구현
//!
//! Parse Server `_User` 클래스에 대한 데이터 액세스 계층입니다.
//! 조회와 쓰기는 모두 마스터 키 권한으로 수행하며, `/users/me`만 사용자 세션 토큰으로 호출합니다.
//!
//! ## 사용하는 엔드포인트
//!
//! | 메서드 | 경로 | 용도 |
//! |--------|------|------|
//! | GET | `/users?where={"username":..}` | 식별 키로 조회 |
//! | GET | `/users?where={"objectId":..}` | ID로 조회 |
//! | PUT | `/users/{id}` | 필드 갱신 |
//! | POST | `/users` | 신규 가입 (세션 토큰 발급) |
//! | GET | `/users/me` | 세션 토큰으로 정식 레코드 재조회 |

use std::sync::Arc;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use crate::core::errors::{AppResult, ErrorContext};
use crate::db::{ParseRest, Payload, RequestOptions};
use crate::domain::entities::users::{CreatedUser, NewParseUser, ParseUser};

pub struct UserRepository {
    rest: Arc<ParseRest>,
}

impl UserRepository {
    pub fn new(rest: Arc<ParseRest>) -> Self {
        Self { rest }
    }

    /// 식별 키(`username`)로 사용자를 찾습니다. 여러 건이면 첫 번째가 정식 레코드입니다.
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<ParseUser>> {
        self.find_one(json!({ "username": username })).await
    }

    pub async fn find_by_id(&self, object_id: &str) -> AppResult<Option<ParseUser>> {
        self.find_one(json!({ "objectId": object_id })).await
    }

    async fn find_one(&self, where_clause: Value) -> AppResult<Option<ParseUser>> {
        let value = self
            .rest
            .get(
                "/users",
                Some(Payload::Json(json!({ "where": where_clause }))),
                RequestOptions::master(),
            )
            .await?;

        first_record(value)
    }

    /// 필드를 부분 갱신합니다.
    pub async fn update(&self, object_id: &str, fields: &Map<String, Value>) -> AppResult<()> {
        self.rest
            .put(
                &format!("/users/{}", object_id),
                Some(Payload::Json(Value::Object(fields.clone()))),
                RequestOptions::master(),
            )
            .await?;
        Ok(())
    }

    /// 신규 사용자를 생성합니다. 응답에 담긴 세션 토큰을 함께 반환합니다.
    pub async fn create(&self, user: &NewParseUser) -> AppResult<CreatedUser> {
        let body = serde_json::to_value(user).context("신규 사용자 본문 직렬화 실패")?;
        let value = self
            .rest
            .post("/users", Some(Payload::Json(body)), RequestOptions::master())
            .await?;

        serde_json::from_value(value).context("사용자 생성 응답 파싱 실패")
    }

    /// 세션 토큰의 주인을 정식 레코드로 다시 읽습니다.
    pub async fn find_by_session_token(&self, session_token: &str) -> AppResult<ParseUser> {
        let value = self
            .rest
            .get("/users/me", None, RequestOptions::session(session_token))
            .await?;

        serde_json::from_value(value).context("사용자 응답 파싱 실패")
    }
}

/// 조회 결과 배열의 첫 레코드를 꺼냅니다.
pub(crate) fn first_record<T: DeserializeOwned>(value: Value) -> AppResult<Option<T>> {
    match value {
        Value::Array(items) => match items.into_iter().next() {
            Some(first) => serde_json::from_value(first)
                .map(Some)
                .context("조회 결과 파싱 실패"),
            None => Ok(None),
        },
        _ => Ok(None),
    }
}
