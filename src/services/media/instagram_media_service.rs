//! # Instagram 최근 미디어 조회
//!
//! 사용자 authData에 저장된 Instagram access token으로 최근 게시물을 가져옵니다.

use std::sync::Arc;
use serde_json::Value;
use crate::config::AuthProvider;
use crate::core::errors::{AppError, AppResult};
use crate::repositories::users::user_repo::UserRepository;
use crate::services::providers::authorized_get;

pub struct InstagramMediaService {
    users: Arc<UserRepository>,
    client: reqwest::Client,
    recent_media_url: String,
}

impl InstagramMediaService {
    pub fn new(users: Arc<UserRepository>, client: reqwest::Client, recent_media_url: impl Into<String>) -> Self {
        Self {
            users,
            client,
            recent_media_url: recent_media_url.into(),
        }
    }

    /// 응답의 `data` 배열을 그대로 반환합니다.
    pub async fn recent_media(&self, user_id: Option<&str>) -> AppResult<Value> {
        let user_id = user_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| AppError::InvalidParameter("userId".to_string()))?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let access_token = user
            .provider_token(AuthProvider::Instagram)
            .ok_or_else(|| AppError::MissingCredential(AuthProvider::Instagram.as_str().to_string()))?;

        let mut response = authorized_get(&self.client, AuthProvider::Instagram, &self.recent_media_url, &access_token).await?;

        Ok(response
            .get_mut("data")
            .map(Value::take)
            .unwrap_or(Value::Null))
    }
}
