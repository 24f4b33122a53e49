//! 데이터 및 서버 설정 관리 모듈
//!
//! Parse 백엔드 연결, 서버 바인딩, 실행 환경 관련 설정을 관리합니다.

use std::env;
use std::time::Duration;
use crate::core::errors::AppError;

/// 백엔드 요청 기본 타임아웃 (밀리초)
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경 - 요청 상세 로그 출력
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경 - 요청 상세 로그 생략
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 또는 `NODE_ENV` 환경 변수를 확인하며,
    /// 설정되지 않은 경우 `Production`을 기본값으로 사용합니다.
    pub fn current() -> Self {
        Self::from_name(
            &env::var("ENVIRONMENT")
                .unwrap_or_else(|_| env::var("NODE_ENV").unwrap_or_else(|_| "production".to_string())),
        )
    }

    /// 문자열에서 Environment를 생성합니다. 알 수 없는 값은 `Production`입니다.
    pub fn from_name(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Parse Server REST 연결 설정
///
/// 시작 시 한 번 읽고 이후에는 불변으로 공유합니다.
#[derive(Debug, Clone)]
pub struct ParseConfig {
    /// REST API 기본 URL (예: `http://localhost:1337/parse`)
    pub server_url: String,
    /// `X-Parse-Application-Id` 값
    pub app_id: String,
    /// `X-Parse-Master-Key` 값 (권한 상승 요청에만 사용)
    pub master_key: String,
    /// 요청당 고정 타임아웃
    pub timeout: Duration,
    /// 요청 메서드/URL 상세 로그 여부 (프로덕션이 아닐 때만)
    pub log_requests: bool,
}

impl ParseConfig {
    pub fn new(server_url: impl Into<String>, app_id: impl Into<String>, master_key: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into().trim_end_matches('/').to_string(),
            app_id: app_id.into(),
            master_key: master_key.into(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            log_requests: false,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// 환경 변수에서 설정을 읽습니다.
    ///
    /// # Environment Variables
    ///
    /// * `SERVER_URL` - 필수
    /// * `APP_ID` - 기본값 `myAppId`
    /// * `MASTER_KEY` - 기본값 `myMasterKey`
    /// * `PARSE_TIMEOUT_MS` - 기본값 15000
    pub fn from_env() -> Result<Self, AppError> {
        let server_url = env::var("SERVER_URL")
            .map_err(|_| AppError::ConfigError("SERVER_URL must be set".to_string()))?;

        let app_id = env::var("APP_ID").unwrap_or_else(|_| {
            log::warn!("APP_ID not set, using default (not secure for production!)");
            "myAppId".to_string()
        });
        let master_key = env::var("MASTER_KEY").unwrap_or_else(|_| {
            log::warn!("MASTER_KEY not set, using default (not secure for production!)");
            "myMasterKey".to_string()
        });

        let timeout_ms = env::var("PARSE_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        let mut config = Self::new(server_url, app_id, master_key)
            .with_timeout(Duration::from_millis(timeout_ms));
        config.log_requests = !Environment::current().is_production();

        Ok(config)
    }
}

/// 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    /// 기본값: 8080 (`PORT`)
    pub fn port() -> u16 {
        env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080)
    }

    /// 기본값: "0.0.0.0" (`HOST`)
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }

    /// OAuth 라우트 스코프 경로. 기본값: `/oauth2` (`OAUTH_BASE_PATH`)
    ///
    /// 앞쪽 `/`는 보장하고 뒤쪽 `/`는 제거합니다.
    pub fn base_path() -> String {
        normalize_base_path(&env::var("OAUTH_BASE_PATH").unwrap_or_else(|_| "/oauth2".to_string()))
    }
}

pub(crate) fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_string() {
        assert_eq!(Environment::from_name("development"), Environment::Development);
        assert_eq!(Environment::from_name("test"), Environment::Test);
        assert_eq!(Environment::from_name("production"), Environment::Production);
        assert_eq!(Environment::from_name("unknown"), Environment::Production);
        assert!(!Environment::from_name("dev").is_production());
    }

    #[test]
    fn test_parse_config_defaults() {
        let config = ParseConfig::new("http://localhost:1337/parse/", "app", "master");

        assert_eq!(config.server_url, "http://localhost:1337/parse");
        assert_eq!(config.timeout, Duration::from_millis(15_000));
        assert!(!config.log_requests);
    }

    #[test]
    fn test_normalize_base_path() {
        assert_eq!(normalize_base_path("/oauth2"), "/oauth2");
        assert_eq!(normalize_base_path("oauth2/"), "/oauth2");
        assert_eq!(normalize_base_path("/"), "");
    }

    #[test]
    fn test_server_config_defaults() {
        if env::var("PORT").is_err() {
            assert_eq!(ServerConfig::port(), 8080);
        }

        if env::var("HOST").is_err() {
            assert_eq!(ServerConfig::host(), "0.0.0.0");
        }
    }
}
