//! # 프로바이더 프로필 조회
//!
//! 검증된 access token으로 프로바이더의 "내 정보" API를 호출하고
//! 응답을 [`ExternalProfile`]로 정규화합니다.
//!
//! 식별 파이프라인은 [`ProfileFetcher`] 트레이트에만 의존하므로, 테스트나 다른
//! 프로필 소스는 이 트레이트를 구현해 끼워 넣을 수 있습니다.

use std::time::Duration;
use async_trait::async_trait;
use serde_json::Value;
use crate::config::{AuthProvider, ProviderOAuthConfig};
use crate::core::errors::{AppError, AppResult};
use crate::domain::models::oauth::{AccessCredential, ExternalProfile};
use crate::services::providers::normalize::normalize_profile;

/// 프로바이더 능력 집합
///
/// 프로바이더마다 하나씩 구현되며, 공통 파이프라인이 이 값으로 매개변수화됩니다.
#[async_trait]
pub trait ProfileFetcher: Send + Sync {
    fn provider(&self) -> AuthProvider;

    async fn fetch_profile(&self, credential: &AccessCredential) -> AppResult<ExternalProfile>;
}

/// 프로바이더 API 호출에 공유하는 HTTP 클라이언트를 만듭니다.
///
/// 호출마다 `timeout`이 적용되며, 초과하면 `AppError::Timeout`(124)으로 분류됩니다.
pub fn provider_http_client(timeout: Duration) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AppError::ConfigError(format!("프로바이더 HTTP 클라이언트 생성 실패: {}", e)))
}

/// access token 전달 방식
///
/// Facebook/Google/Instagram은 `access_token` 쿼리 파라미터,
/// Naver/Daum/Kakao는 `Authorization: Bearer` 헤더를 요구합니다.
pub fn uses_bearer_header(provider: AuthProvider) -> bool {
    matches!(provider, AuthProvider::Naver | AuthProvider::Daum | AuthProvider::Kakao)
}

/// 프로바이더 API에 토큰을 실어 GET 요청을 보내고 JSON 응답을 반환합니다.
pub async fn authorized_get(
    client: &reqwest::Client,
    provider: AuthProvider,
    url: &str,
    access_token: &str,
) -> AppResult<Value> {
    let request = if uses_bearer_header(provider) {
        client.get(url).bearer_auth(access_token)
    } else {
        client.get(url).query(&[("access_token", access_token)])
    };

    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            AppError::Timeout
        } else {
            AppError::ProfileFetchFailed(format!("{} 요청 실패: {}", provider, e))
        }
    })?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| AppError::ProfileFetchFailed(format!("{} 응답 읽기 실패: {}", provider, e)))?;

    if !status.is_success() {
        log::error!("❌ {} API 오류 ({}): {}", provider, status.as_u16(), text);
        return Err(AppError::ProfileFetchFailed(text));
    }

    serde_json::from_str(&text)
        .map_err(|e| AppError::ProfileFetchFailed(format!("{} 응답 파싱 실패: {}", provider, e)))
}

/// HTTP 기반 기본 구현
pub struct HttpProfileFetcher {
    provider: AuthProvider,
    profile_url: String,
    client: reqwest::Client,
}

impl HttpProfileFetcher {
    pub fn new(provider: AuthProvider, profile_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            provider,
            profile_url: profile_url.into(),
            client,
        }
    }

    pub fn from_config(config: &ProviderOAuthConfig, client: reqwest::Client) -> Self {
        Self::new(config.provider, config.profile_url.clone(), client)
    }
}

#[async_trait]
impl ProfileFetcher for HttpProfileFetcher {
    fn provider(&self) -> AuthProvider {
        self.provider
    }

    async fn fetch_profile(&self, credential: &AccessCredential) -> AppResult<ExternalProfile> {
        let payload = authorized_get(&self.client, self.provider, &self.profile_url, &credential.access_token).await?;
        let profile = normalize_profile(self.provider, payload)?;

        log::debug!("🔍 {} 프로필 조회: id={}", self.provider, profile.external_id);
        Ok(profile)
    }
}
