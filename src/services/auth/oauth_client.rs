//! # OAuth2 Authorization Code 클라이언트
//!
//! 인가 URL 생성과 인가 코드 → access token 교환만 담당합니다.
//! PKCE, state 검증, 토큰 갱신은 하지 않습니다.

use serde_json::{Map, Value};
use crate::config::ProviderOAuthConfig;
use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::oauth::TokenResponse;

/// 프로바이더 인가 페이지 URL을 만듭니다.
pub fn authorize_url(config: &ProviderOAuthConfig, redirect_uri: &str, state: &str) -> String {
    let mut params = vec![
        ("client_id", config.client_id.clone()),
        ("redirect_uri", redirect_uri.to_string()),
        ("response_type", "code".to_string()),
        ("state", state.to_string()),
    ];
    if let Some(scope) = &config.scope {
        params.push(("scope", scope.clone()));
    }

    let query_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    let joint = if config.authorize_url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", config.authorize_url, joint, query_string)
}

/// 인가 코드를 access token으로 교환합니다.
pub async fn exchange_code(
    client: &reqwest::Client,
    config: &ProviderOAuthConfig,
    code: &str,
    redirect_uri: &str,
) -> AppResult<TokenResponse> {
    let params = [
        ("code", code),
        ("client_id", config.client_id.as_str()),
        ("client_secret", config.client_secret.as_str()),
        ("redirect_uri", redirect_uri),
        ("grant_type", "authorization_code"),
    ];

    let response = client
        .post(&config.token_url)
        .form(&params)
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                AppError::Timeout
            } else {
                AppError::ExternalServiceError(format!("{} 토큰 요청 실패: {}", config.provider, e))
            }
        })?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| AppError::ExternalServiceError(format!("{} 토큰 응답 읽기 실패: {}", config.provider, e)))?;

    if !status.is_success() {
        return Err(AppError::ExternalServiceError(format!(
            "{} 토큰 교환 실패: {}",
            config.provider, text
        )));
    }

    parse_token_response(&text)
        .map_err(|e| AppError::ExternalServiceError(format!("{} 토큰 응답 파싱 실패: {}", config.provider, e)))
}

/// JSON 응답을 우선 해석하고, 실패하면 `a=1&b=2` 폼 인코딩으로 해석합니다.
pub fn parse_token_response(text: &str) -> Result<TokenResponse, serde_json::Error> {
    if let Ok(token) = serde_json::from_str::<TokenResponse>(text) {
        return Ok(token);
    }

    let mut map = Map::new();
    for pair in text.trim().split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let value = urlencoding::decode(value)
            .map(|v| v.into_owned())
            .unwrap_or_else(|_| value.to_string());
        map.insert(key.to_string(), Value::String(value));
    }

    serde_json::from_value(Value::Object(map))
}
