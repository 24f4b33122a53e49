//! # 세션 리포지토리
//!
//! 기존 세션 조회(`/sessions`)와 비밀번호 로그인(`/login`)을 담당합니다.

use std::sync::Arc;
use serde::Deserialize;
use serde_json::json;
use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::db::{ParseRest, Payload, RequestOptions};
use crate::domain::entities::sessions::{user_pointer, ParseSession};
use crate::repositories::users::user_repo::first_record;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    #[serde(default)]
    session_token: Option<String>,
}

pub struct SessionRepository {
    rest: Arc<ParseRest>,
}

impl SessionRepository {
    pub fn new(rest: Arc<ParseRest>) -> Self {
        Self { rest }
    }

    /// 사용자에게 묶인 세션 중 첫 번째를 반환합니다.
    pub async fn find_by_user(&self, user_id: &str) -> AppResult<Option<ParseSession>> {
        let value = self
            .rest
            .get(
                "/sessions",
                Some(Payload::Json(json!({ "where": { "user": user_pointer(user_id) } }))),
                RequestOptions::master(),
            )
            .await?;

        first_record(value)
    }

    /// 사용자명/비밀번호로 로그인해 새 세션 토큰을 받습니다.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<String> {
        let value = self
            .rest
            .get(
                "/login",
                Some(Payload::Json(json!({ "username": username, "password": password }))),
                RequestOptions::default(),
            )
            .await?;

        let response: LoginResponse = serde_json::from_value(value).context("로그인 응답 파싱 실패")?;
        response
            .session_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::SessionResolutionFailed(username.to_string()))
    }
}
