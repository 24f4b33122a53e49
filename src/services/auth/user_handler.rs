//! 로그인 완료 후 훅
//!
//! 파이프라인이 세션까지 확보한 뒤 마지막으로 호출됩니다. 반환값이 그대로 HTTP 응답 본문이 됩니다.

use async_trait::async_trait;
use serde_json::Value;
use crate::core::errors::AppResult;
use crate::domain::models::auth::{LoginOutcome, RequestContext};

#[async_trait]
pub trait UserHandler: Send + Sync {
    async fn handle(&self, context: &RequestContext, outcome: LoginOutcome) -> AppResult<Value>;
}

/// 세션 토큰이 포함된 사용자 레코드를 그대로 돌려줍니다.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultUserHandler;

#[async_trait]
impl UserHandler for DefaultUserHandler {
    async fn handle(&self, _context: &RequestContext, outcome: LoginOutcome) -> AppResult<Value> {
        Ok(outcome.user.to_value())
    }
}
