//! # OAuth2 인가 코드 플로우
//!
//! ```text
//! 클라이언트 ── GET /{provider}/auth?callback=..&host=.. ──► 서버
//!                                                         │ state 생성, {callback, host} 저장
//! 클라이언트 ◄── 302 프로바이더 인가 페이지 ────────────────┘
//!     ...사용자 동의...
//! 프로바이더 ── GET /{provider}/callback?code=..&state=.. ──► 서버
//!                                                         │ 컨텍스트 꺼냄, 코드 교환
//! 클라이언트 ◄── 302 {callback}?access_token=.. 또는 JSON ──┘
//! ```
//!
//! 클라이언트는 받은 access_token으로 `POST /{provider}/login`을 호출합니다.

use std::collections::HashMap;
use std::sync::Arc;
use serde_json::{json, Map, Value};
use uuid::Uuid;
use validator::Validate;
use crate::caching::{OAuthContext, OAuthContextStore};
use crate::config::{AuthProvider, ProviderOAuthConfig};
use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::oauth::{AuthStartQuery, OAuthCallbackQuery, TokenResponse};
use crate::services::auth::oauth_client::{authorize_url, exchange_code};
use crate::utils::string_utils::{append_query, qs_stringify_literal};

/// 콜백 처리 결과
#[derive(Debug, Clone, PartialEq)]
pub enum CallbackResult {
    Json(Value),
    Redirect(String),
}

pub struct OAuthFlowService {
    providers: HashMap<AuthProvider, ProviderOAuthConfig>,
    client: reqwest::Client,
    store: Arc<dyn OAuthContextStore>,
    base_path: String,
    context_ttl_seconds: u64,
}

impl OAuthFlowService {
    pub fn new(
        providers: Vec<ProviderOAuthConfig>,
        client: reqwest::Client,
        store: Arc<dyn OAuthContextStore>,
        base_path: impl Into<String>,
        context_ttl_seconds: u64,
    ) -> Self {
        Self {
            providers: providers.into_iter().map(|c| (c.provider, c)).collect(),
            client,
            store,
            base_path: base_path.into(),
            context_ttl_seconds,
        }
    }

    fn config(&self, provider: AuthProvider) -> AppResult<&ProviderOAuthConfig> {
        self.providers
            .get(&provider)
            .ok_or_else(|| AppError::UnsupportedProvider(provider.as_str().to_string()))
    }

    /// `{scheme}://{host}{base_path}/{provider}/callback`
    pub fn redirect_uri(&self, scheme: &str, host: &str, provider: AuthProvider) -> String {
        format!("{}://{}{}/{}/callback", scheme, host, self.base_path, provider)
    }

    /// 인가 페이지로 보낼 URL을 만들고 클라이언트 컨텍스트를 저장합니다.
    pub async fn authorize_redirect(
        &self,
        provider: AuthProvider,
        query: AuthStartQuery,
        scheme: &str,
        request_host: &str,
    ) -> AppResult<String> {
        query
            .validate()
            .map_err(|e| AppError::InvalidParameter(e.to_string()))?;

        let config = self.config(provider)?;
        config.ensure_client()?;

        let state = Uuid::new_v4().to_string();
        let context = OAuthContext {
            callback: query.callback,
            host: query.host,
        };
        if !context.is_empty() {
            self.store.save(&state, &context, self.context_ttl_seconds).await?;
        }

        let host = context.host.as_deref().unwrap_or(request_host);
        let redirect_uri = self.redirect_uri(scheme, host, provider);
        log::info!("➡️ {} 인가 요청: redirect_uri={}", provider, redirect_uri);

        Ok(authorize_url(config, &redirect_uri, &state))
    }

    /// 인가 코드를 교환하고 결과를 클라이언트 콜백 또는 JSON으로 돌려줍니다.
    pub async fn complete(
        &self,
        provider: AuthProvider,
        query: OAuthCallbackQuery,
        scheme: &str,
        request_host: &str,
    ) -> AppResult<CallbackResult> {
        if let Some(reason) = query.failure_reason() {
            log::warn!("⚠️ {} 인가 거부: {}", provider, reason);
            return Err(AppError::ExternalServiceError(reason.to_string()));
        }
        query
            .validate()
            .map_err(|e| AppError::InvalidParameter(e.to_string()))?;
        let code = query
            .code
            .as_deref()
            .ok_or_else(|| AppError::InvalidParameter("code".to_string()))?;

        let config = self.config(provider)?;

        let context = match &query.state {
            Some(state) => self.store.take(state).await?.unwrap_or_default(),
            None => OAuthContext::default(),
        };

        let host = context.host.as_deref().unwrap_or(request_host);
        let redirect_uri = self.redirect_uri(scheme, host, provider);
        let token = exchange_code(&self.client, config, code, &redirect_uri).await?;

        let payload = callback_payload(provider, &token);
        Ok(match context.callback {
            Some(callback) => CallbackResult::Redirect(append_query(&callback, &qs_stringify_literal(&payload))),
            None => CallbackResult::Json(Value::Object(payload)),
        })
    }
}

/// 콜백으로 돌려줄 토큰 정보
///
/// - facebook: `{access_token, expiration_date: expires}`
/// - instagram: `{access_token, user}`
/// - 그 외: `{access_token, expiration_date: expires_in}`
pub fn callback_payload(provider: AuthProvider, token: &TokenResponse) -> Map<String, Value> {
    let mut payload = Map::new();
    payload.insert("access_token".to_string(), json!(token.access_token));

    let extra = match provider {
        AuthProvider::Instagram => token.user.clone().map(|user| ("user", user)),
        AuthProvider::Facebook => token
            .expires
            .clone()
            .or_else(|| token.expires_in.clone())
            .map(|expires| ("expiration_date", expires)),
        _ => token.expires_in.clone().map(|expires| ("expiration_date", expires)),
    };
    if let Some((key, value)) = extra {
        payload.insert(key.to_string(), value);
    }

    payload
}
