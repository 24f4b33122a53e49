//! # OAuth 콜백 컨텍스트 저장소
//!
//! `/auth` 요청의 `callback`, `host` 쿼리를 `state` 값을 키로 보관했다가
//! `/callback`에서 꺼내 씁니다. 키 형식은 `oauth2:context:{state}`입니다.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::caching::redis::RedisClient;
use crate::core::errors::AppResult;

/// 인가 요청 시점의 클라이언트 정보
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OAuthContext {
    /// 토큰 교환 후 리다이렉트할 클라이언트 URL
    pub callback: Option<String>,
    /// redirect_uri 계산에 쓸 외부 호스트
    pub host: Option<String>,
}

impl OAuthContext {
    pub fn is_empty(&self) -> bool {
        self.callback.is_none() && self.host.is_none()
    }
}

pub fn context_key(state: &str) -> String {
    format!("oauth2:context:{}", state)
}

#[async_trait]
pub trait OAuthContextStore: Send + Sync {
    async fn save(&self, state: &str, context: &OAuthContext, ttl_seconds: u64) -> AppResult<()>;

    /// 컨텍스트를 꺼내고 삭제합니다.
    async fn take(&self, state: &str) -> AppResult<Option<OAuthContext>>;
}

pub struct RedisOAuthContextStore {
    redis: Arc<RedisClient>,
}

impl RedisOAuthContextStore {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl OAuthContextStore for RedisOAuthContextStore {
    async fn save(&self, state: &str, context: &OAuthContext, ttl_seconds: u64) -> AppResult<()> {
        self.redis.set_with_expiry(&context_key(state), context, ttl_seconds).await
    }

    async fn take(&self, state: &str) -> AppResult<Option<OAuthContext>> {
        self.redis.take(&context_key(state)).await
    }
}

/// 프로세스 메모리 저장소
///
/// Redis 없이 띄울 때(`REDIS_URL` 미설정)와 테스트에서 사용합니다. TTL은 적용하지 않습니다.
#[derive(Default)]
pub struct InMemoryOAuthContextStore {
    entries: Mutex<HashMap<String, OAuthContext>>,
}

impl InMemoryOAuthContextStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OAuthContextStore for InMemoryOAuthContextStore {
    async fn save(&self, state: &str, context: &OAuthContext, _ttl_seconds: u64) -> AppResult<()> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(context_key(state), context.clone());
        Ok(())
    }

    async fn take(&self, state: &str) -> AppResult<Option<OAuthContext>> {
        Ok(self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&context_key(state)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_key() {
        assert_eq!(context_key("abc"), "oauth2:context:abc");
    }

    #[actix_web::test]
    async fn test_in_memory_store_is_single_use() {
        let store = InMemoryOAuthContextStore::new();
        let context = OAuthContext {
            callback: Some("https://app.example.com/done".to_string()),
            host: None,
        };

        store.save("s1", &context, 600).await.unwrap();

        assert_eq!(store.take("s1").await.unwrap(), Some(context));
        assert_eq!(store.take("s1").await.unwrap(), None);
    }
}
