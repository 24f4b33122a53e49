//! 인증 및 OAuth 프로바이더 설정
//!
//! 지원하는 소셜 프로바이더 목록과 프로바이더별 OAuth2 엔드포인트,
//! 클라이언트 자격 증명, 로그인 정책을 환경 변수에서 읽어옵니다.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::config::data_config::DEFAULT_TIMEOUT_MS;
use crate::core::errors::AppError;

/// 지원하는 소셜 로그인 프로바이더
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    Facebook,
    Google,
    Instagram,
    Naver,
    Daum,
    Kakao,
}

impl AuthProvider {
    /// 모든 프로바이더 (라우팅/초기화 순서)
    pub const ALL: [AuthProvider; 6] = [
        AuthProvider::Facebook,
        AuthProvider::Google,
        AuthProvider::Instagram,
        AuthProvider::Naver,
        AuthProvider::Daum,
        AuthProvider::Kakao,
    ];

    /// authData 키와 `socialType` 값으로 쓰이는 프로바이더 태그
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Facebook => "facebook",
            AuthProvider::Google => "google",
            AuthProvider::Instagram => "instagram",
            AuthProvider::Naver => "naver",
            AuthProvider::Daum => "daum",
            AuthProvider::Kakao => "kakao",
        }
    }

    /// 환경 변수 접두사 (`FB_APPIDS`, `INSTA_SECRETS` ...)
    pub fn env_prefix(&self) -> &'static str {
        match self {
            AuthProvider::Facebook => "FB",
            AuthProvider::Google => "GOOGLE",
            AuthProvider::Instagram => "INSTA",
            AuthProvider::Naver => "NAVER",
            AuthProvider::Daum => "DAUM",
            AuthProvider::Kakao => "KAKAO",
        }
    }

    /// 백엔드 사용자를 찾을 때 쓰는 프로필 필드 이름 (식별 키)
    pub fn identity_field(&self) -> &'static str {
        match self {
            AuthProvider::Facebook | AuthProvider::Google | AuthProvider::Naver => "email",
            AuthProvider::Instagram => "username",
            AuthProvider::Daum => "userid",
            AuthProvider::Kakao => "kaccount_email",
        }
    }

    /// 프로필 응답이 감싸진 봉투 키 (없으면 최상위가 프로필)
    pub fn profile_envelope(&self) -> Option<&'static str> {
        match self {
            AuthProvider::Instagram => Some("data"),
            AuthProvider::Naver => Some("response"),
            AuthProvider::Daum => Some("result"),
            _ => None,
        }
    }
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthProvider {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "facebook" => Ok(AuthProvider::Facebook),
            "google" => Ok(AuthProvider::Google),
            "instagram" => Ok(AuthProvider::Instagram),
            "naver" => Ok(AuthProvider::Naver),
            "daum" => Ok(AuthProvider::Daum),
            "kakao" => Ok(AuthProvider::Kakao),
            _ => Err(AppError::UnsupportedProvider(s.to_string())),
        }
    }
}

/// 환경 변수 값이 JSON 배열이면 첫 번째 원소를, 아니면 값 그대로를 반환합니다.
///
/// `FB_APPIDS=["1360181184056097"]`처럼 여러 앱 ID를 배열로 넣는 배포 관례를 지원합니다.
pub fn key_converter(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.contains('[') {
        if let Ok(values) = serde_json::from_str::<Vec<serde_json::Value>>(trimmed) {
            return match values.into_iter().next() {
                Some(serde_json::Value::String(s)) => s,
                Some(other) => other.to_string(),
                None => String::new(),
            };
        }
    }
    trimmed.to_string()
}

/// 프로바이더별 OAuth2 클라이언트 설정
#[derive(Debug, Clone)]
pub struct ProviderOAuthConfig {
    pub provider: AuthProvider,
    pub client_id: String,
    pub client_secret: String,
    pub authorize_url: String,
    pub token_url: String,
    pub profile_url: String,
    pub scope: Option<String>,
}

impl ProviderOAuthConfig {
    /// 환경 변수에서 프로바이더 설정을 읽습니다.
    ///
    /// # Environment Variables
    ///
    /// * `{PREFIX}_APPIDS` - 클라이언트 ID (Kakao는 `KAKAO_RESTKEY`)
    /// * `{PREFIX}_SECRETS` - 클라이언트 시크릿
    /// * `{PREFIX}_AUTHORIZE_URL`, `{PREFIX}_TOKEN_URL`, `{PREFIX}_PROFILE_URL` - 엔드포인트 재정의
    ///
    /// 자격 증명이 비어 있어도 로그인 파이프라인(프로필 조회)은 동작하므로
    /// 경고만 남기고, 인가 코드 플로우를 시작할 때 [`ProviderOAuthConfig::ensure_client`]에서 거부합니다.
    pub fn from_env(provider: AuthProvider) -> Self {
        let prefix = provider.env_prefix();
        let id_var = match provider {
            AuthProvider::Kakao => "KAKAO_RESTKEY".to_string(),
            _ => format!("{}_APPIDS", prefix),
        };

        let client_id = env::var(&id_var).map(|v| key_converter(&v)).unwrap_or_default();
        let client_secret = env::var(format!("{}_SECRETS", prefix))
            .map(|v| key_converter(&v))
            .unwrap_or_default();

        if client_id.is_empty() {
            log::warn!("{} not set, {} authorization flow is disabled", id_var, provider);
        }

        let defaults = Self::defaults(provider);
        Self {
            provider,
            client_id,
            client_secret,
            authorize_url: env::var(format!("{}_AUTHORIZE_URL", prefix)).unwrap_or(defaults.authorize_url),
            token_url: env::var(format!("{}_TOKEN_URL", prefix)).unwrap_or(defaults.token_url),
            profile_url: env::var(format!("{}_PROFILE_URL", prefix)).unwrap_or(defaults.profile_url),
            scope: defaults.scope,
        }
    }

    /// 자격 증명 없이 각 프로바이더의 기본 엔드포인트만 채운 설정
    pub fn defaults(provider: AuthProvider) -> Self {
        let (authorize_url, token_url, profile_url, scope) = match provider {
            AuthProvider::Facebook => (
                "https://www.facebook.com/dialog/oauth",
                "https://graph.facebook.com/oauth/access_token",
                "https://graph.facebook.com/me?fields=id,name,email",
                Some("email,public_profile"),
            ),
            AuthProvider::Google => (
                "https://accounts.google.com/o/oauth2/v2/auth",
                "https://www.googleapis.com/oauth2/v4/token",
                "https://www.googleapis.com/oauth2/v2/userinfo",
                Some("email profile"),
            ),
            AuthProvider::Instagram => (
                "https://api.instagram.com/oauth/authorize/",
                "https://api.instagram.com/oauth/access_token",
                "https://api.instagram.com/v1/users/self/",
                Some("basic public_content"),
            ),
            AuthProvider::Naver => (
                "https://nid.naver.com/oauth2.0/authorize",
                "https://nid.naver.com/oauth2.0/token",
                "https://openapi.naver.com/v1/nid/me",
                None,
            ),
            AuthProvider::Daum => (
                "https://apis.daum.net/oauth2/authorize",
                "https://apis.daum.net/oauth2/token",
                "https://apis.daum.net/user/v1/show.json",
                None,
            ),
            AuthProvider::Kakao => (
                "https://kauth.kakao.com/oauth/authorize",
                "https://kauth.kakao.com/oauth/token",
                "https://kapi.kakao.com/v1/user/me",
                None,
            ),
        };

        Self {
            provider,
            client_id: String::new(),
            client_secret: String::new(),
            authorize_url: authorize_url.to_string(),
            token_url: token_url.to_string(),
            profile_url: profile_url.to_string(),
            scope: scope.map(str::to_string),
        }
    }

    /// 인가 코드 플로우에 필요한 클라이언트 ID가 있는지 확인합니다.
    pub fn ensure_client(&self) -> Result<(), AppError> {
        if self.client_id.is_empty() {
            return Err(AppError::ConfigError(format!(
                "{} OAuth client is not configured",
                self.provider
            )));
        }
        Ok(())
    }
}

/// Instagram 부가 API 설정
pub struct InstagramConfig;

impl InstagramConfig {
    pub fn recent_media_url() -> String {
        env::var("INSTA_RECENT_URL")
            .unwrap_or_else(|_| "https://api.instagram.com/v1/users/self/media/recent/".to_string())
    }
}

pub struct OAuthConfig;

impl OAuthConfig {
    /// `/auth` → `/callback` 사이에 보관하는 콜백 컨텍스트의 유효 시간 (분)
    pub fn session_timeout_minutes() -> i64 {
        env::var("OAUTH_SESSION_TIMEOUT_MINUTES")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10)
    }

    /// 프로바이더 API 호출(프로필 조회, 토큰 교환, 미디어 조회) 한 번의 제한 시간
    ///
    /// `PROVIDER_TIMEOUT_MS`, 기본값 15000
    pub fn provider_timeout() -> Duration {
        let timeout_ms = env::var("PROVIDER_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        Duration::from_millis(timeout_ms)
    }
}

/// 기존 사용자에게 활성 세션이 없을 때의 처리 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPolicy {
    /// 마스터 키로 비밀번호를 재설정한 뒤 `/login`으로 새 세션을 발급합니다.
    #[default]
    Relogin,
    /// `SessionResolutionFailed`로 실패합니다.
    Fail,
}

impl FromStr for SessionPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "relogin" | "reset" => Ok(SessionPolicy::Relogin),
            "fail" => Ok(SessionPolicy::Fail),
            other => Err(AppError::ConfigError(format!("Unknown SESSION_POLICY: {}", other))),
        }
    }
}

/// 식별 파이프라인 정책
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginPolicy {
    pub session_policy: SessionPolicy,
    /// 로그인마다 `loginCount`를 1씩 증가시킬지 여부
    pub track_login_count: bool,
}

impl Default for LoginPolicy {
    fn default() -> Self {
        Self {
            session_policy: SessionPolicy::Relogin,
            track_login_count: true,
        }
    }
}

impl LoginPolicy {
    /// # Environment Variables
    ///
    /// * `SESSION_POLICY` - `relogin`(기본값) 또는 `fail`
    /// * `TRACK_LOGIN_COUNT` - `true`(기본값) 또는 `false`
    pub fn from_env() -> Result<Self, AppError> {
        let session_policy = match env::var("SESSION_POLICY") {
            Ok(value) => value.parse()?,
            Err(_) => SessionPolicy::default(),
        };

        let track_login_count = env::var("TRACK_LOGIN_COUNT")
            .map(|v| !matches!(v.trim().to_lowercase().as_str(), "false" | "0" | "no"))
            .unwrap_or(true);

        Ok(Self {
            session_policy,
            track_login_count,
        })
    }
}
