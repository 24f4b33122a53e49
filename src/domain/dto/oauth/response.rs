//! OAuth 응답 DTO

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 토큰 엔드포인트 응답
///
/// 프로바이더마다 만료 필드 이름이 다릅니다. (Facebook 구버전 `expires`, 그 외 `expires_in`)
/// Instagram은 `user` 객체를 함께 돌려줍니다.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<Value>,
    #[serde(default)]
    pub expires: Option<Value>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `/health` 응답
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub providers: Vec<&'static str>,
}
