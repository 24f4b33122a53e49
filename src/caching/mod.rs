//! # Caching Module
//!
//! OAuth 플로우 중간 상태를 보관하는 캐시 계층입니다.
//!
//! - [`redis`] - Redis 클라이언트 (JSON 직렬화, TTL)
//! - [`oauth_context_store`] - `state` 키 기반 콜백 컨텍스트 저장소

pub mod redis;
pub mod oauth_context_store;

pub use oauth_context_store::{InMemoryOAuthContextStore, OAuthContext, OAuthContextStore, RedisOAuthContextStore};
