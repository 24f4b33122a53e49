//! # Application Error Handling System
//!
//! 소셜 로그인 서비스 전역에서 사용하는 통합 에러 타입입니다.
//! 파이프라인의 모든 실패는 체인을 즉시 중단시키고, HTTP 호출자에게
//! `{ "code": int, "error": string | object }` 형태의 JSON 본문으로 그대로 전달됩니다.
//!
//! ## 에러 코드 체계
//!
//! Parse Server의 에러 코드 관례를 따릅니다.
//!
//! | 변형 | code | 설명 |
//! |------|------|------|
//! | `MissingCredential` | 101 | access_token 누락 |
//! | `InvalidParameter` | 102 | 요청 파라미터 누락/오류 |
//! | `ProfileFetchFailed` | 101 | 프로바이더 프로필 조회 실패 |
//! | `EmailUnavailable` | 101 | 식별 키(이메일/사용자명) 없음 |
//! | `UserBanned` | 101 | 차단된 사용자 |
//! | `UserNotFound` | 101 | 연결 대상 사용자 없음 |
//! | `QueryFailed` | 백엔드 코드 | 백엔드 non-2xx 응답 또는 전송 오류 |
//! | `Timeout` | 124 | 백엔드 또는 프로바이더 요청 타임아웃 |
//! | `SessionResolutionFailed` | 101 | 세션 토큰 확보 실패 |
//! | 그 외 내부 오류 | 1 | 설정/캐시/외부 서비스/내부 오류 |
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use crate::core::errors::{AppError, AppResult, ErrorContext};
//!
//! async fn lookup(rest: &ParseRest) -> AppResult<ParseUser> {
//!     let value = rest.get("/users/me", None, RequestOptions::default()).await?;
//!     serde_json::from_value(value).context("사용자 응답 파싱 실패")
//! }
//! ```
//!
//! 롤백은 수행하지 않습니다. authData 병합이 저장된 뒤 세션 단계가 실패하면
//! 백엔드 변경은 그대로 남습니다.

use actix_web::http::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;

/// Parse 에러 코드: 객체를 찾을 수 없음 / 일반 비즈니스 오류
pub const CODE_OBJECT_NOT_FOUND: i64 = 101;
/// Parse 에러 코드: 잘못된 쿼리/파라미터
pub const CODE_INVALID_QUERY: i64 = 102;
/// Parse 에러 코드: 백엔드 연결 실패
pub const CODE_CONNECTION_FAILED: i64 = 100;
/// 요청 타임아웃 코드
pub const CODE_TIMEOUT: i64 = 124;
/// 내부 서버 오류 코드
pub const CODE_INTERNAL: i64 = 1;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid {0} access_token")]
    MissingCredential(String),

    #[error("Invalid parameter : {0}")]
    InvalidParameter(String),

    #[error("api not found: {0}")]
    UnsupportedProvider(String),

    #[error("Profile fetch failed: {0}")]
    ProfileFetchFailed(String),

    #[error("Email is unknown")]
    EmailUnavailable,

    #[error("User is banned")]
    UserBanned,

    #[error("user not exist")]
    UserNotFound,

    /// 백엔드가 non-2xx로 응답했거나 전송 단계에서 실패한 경우
    ///
    /// `error`에는 백엔드가 보낸 `error` 값(없으면 응답 본문 전체)이 그대로 담깁니다.
    #[error("Query failed ({code}): {error}")]
    QueryFailed { code: i64, error: Value },

    #[error("Request timeout")]
    Timeout,

    #[error("Session not found for user: {0}")]
    SessionResolutionFailed(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Redis error: {0}")]
    CacheError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 응답 본문의 `code` 값을 반환합니다.
    pub fn code(&self) -> i64 {
        match self {
            AppError::Timeout => CODE_TIMEOUT,
            AppError::InvalidParameter(_) => CODE_INVALID_QUERY,
            AppError::QueryFailed { code, .. } => *code,
            AppError::MissingCredential(_)
            | AppError::UnsupportedProvider(_)
            | AppError::ProfileFetchFailed(_)
            | AppError::EmailUnavailable
            | AppError::UserBanned
            | AppError::UserNotFound
            | AppError::SessionResolutionFailed(_) => CODE_OBJECT_NOT_FOUND,
            AppError::ExternalServiceError(_)
            | AppError::CacheError(_)
            | AppError::ConfigError(_)
            | AppError::InternalError(_) => CODE_INTERNAL,
        }
    }

    /// `{ code, error }` 형태의 JSON 본문을 만듭니다.
    ///
    /// `QueryFailed`는 백엔드의 에러 값을 가공하지 않고 전달합니다.
    pub fn to_body(&self) -> Value {
        let error = match self {
            AppError::QueryFailed { error, .. } => error.clone(),
            AppError::SessionResolutionFailed(_) => Value::String("Session not found".to_string()),
            other => Value::String(other.to_string()),
        };

        json!({
            "code": self.code(),
            "error": error
        })
    }

    /// 백엔드 타임아웃인지 확인합니다.
    pub fn is_timeout(&self) -> bool {
        matches!(self, AppError::Timeout)
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::UnsupportedProvider(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(self.status_code()).json(self.to_body())
    }
}

/// 애플리케이션 전역 Result 타입
pub type AppResult<T> = Result<T, AppError>;

/// 외부 에러를 [`AppError::InternalError`]로 감싸는 확장 트레이트
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> AppResult<T>;

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}
