//! # Parse Server REST 어댑터
//!
//! 모든 백엔드 호출이 지나가는 단일 HTTP 창구입니다.
//!
//! ## 요청 구성
//!
//! - 기본 헤더: `X-Parse-Application-Id`, `Content-Type: application/json`
//! - [`RequestOptions::master`]이면 `X-Parse-Master-Key` 추가
//! - 호출자가 준 헤더가 기본 헤더를 덮어씀
//! - GET/DELETE 페이로드는 [`make_url`] 규칙으로 URL에 접어 넣고,
//!   POST/PUT/PATCH 페이로드는 JSON 본문으로 보냄
//! - 파일 페이로드는 원시 바이트 본문과 파일의 MIME 타입(기본 `text/plain`)을 사용
//!
//! ## 응답 처리
//!
//! - 본문이 JSON이면 파싱하고, 키가 `results` 또는 `result` 하나뿐인 객체는 그 값만 꺼냄
//! - 2xx가 아니면 [`AppError::QueryFailed`], 타임아웃은 [`AppError::Timeout`]
//!
//! ```rust,ignore
//! let rest = ParseRest::new(ParseConfig::from_env()?)?;
//! let users = rest
//!     .get("/users", Some(json!({ "where": { "username": "kim" } }).into()), RequestOptions::master())
//!     .await?;
//! ```

use std::collections::BTreeMap;
use log::{debug, error};
use reqwest::Method;
use serde_json::Value;
use crate::config::ParseConfig;
use crate::core::errors::{AppError, AppResult, CODE_CONNECTION_FAILED};
use crate::db::query::make_url;

const HEADER_APP_ID: &str = "x-parse-application-id";
const HEADER_MASTER_KEY: &str = "x-parse-master-key";
const HEADER_SESSION_TOKEN: &str = "x-parse-session-token";
const HEADER_CONTENT_TYPE: &str = "content-type";

/// 파일 업로드 페이로드
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    pub data: Vec<u8>,
    pub mime_type: Option<String>,
}

/// 요청 페이로드
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    File(FileUpload),
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Json(value)
    }
}

impl From<FileUpload> for Payload {
    fn from(file: FileUpload) -> Self {
        Payload::File(file)
    }
}

/// 요청별 옵션
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub use_master_key: bool,
    pub session_token: Option<String>,
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    /// 마스터 키 권한으로 요청합니다.
    pub fn master() -> Self {
        Self {
            use_master_key: true,
            ..Self::default()
        }
    }

    /// 사용자 세션 토큰으로 요청합니다.
    pub fn session(token: impl Into<String>) -> Self {
        Self {
            session_token: Some(token.into()),
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// 최종 요청 헤더를 계산합니다. 키는 소문자로 정규화됩니다.
pub fn compose_headers(
    config: &ParseConfig,
    options: &RequestOptions,
    payload: Option<&Payload>,
) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    headers.insert(HEADER_APP_ID.to_string(), config.app_id.clone());
    headers.insert(HEADER_CONTENT_TYPE.to_string(), "application/json".to_string());

    if options.use_master_key {
        headers.insert(HEADER_MASTER_KEY.to_string(), config.master_key.clone());
    }
    if let Some(token) = &options.session_token {
        headers.insert(HEADER_SESSION_TOKEN.to_string(), token.clone());
    }

    for (name, value) in &options.headers {
        headers.insert(name.to_lowercase(), value.clone());
    }

    // 파일 본문의 타입은 호출자 헤더보다 우선
    if let Some(Payload::File(file)) = payload {
        let mime = file
            .mime_type
            .clone()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "text/plain".to_string());
        headers.insert(HEADER_CONTENT_TYPE.to_string(), mime);
    }

    headers
}

/// 응답 본문 텍스트를 JSON으로 해석하고 단일 `results`/`result` 봉투를 벗깁니다.
///
/// 빈 본문은 `null`, JSON이 아니면 원문 문자열을 그대로 반환합니다.
pub fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }

    match serde_json::from_str::<Value>(text) {
        Ok(value) => unwrap_results(value),
        Err(e) => {
            error!("❌ 응답 JSON 파싱 실패: {}", e);
            Value::String(text.to_string())
        }
    }
}

pub fn unwrap_results(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.len() == 1 => {
            let key = map.keys().next().cloned().unwrap_or_default();
            if key == "results" || key == "result" {
                map.remove(&key).unwrap_or(Value::Null)
            } else {
                Value::Object(map)
            }
        }
        other => other,
    }
}

/// non-2xx 응답을 에러로 변환합니다.
///
/// 백엔드 `code`가 없으면 HTTP 상태 코드를, `error`가 없으면 본문 전체를 사용합니다.
fn failure_from_response(status: u16, body: Value) -> AppError {
    let code = body
        .get("code")
        .and_then(Value::as_i64)
        .unwrap_or(status as i64);
    let error = match body.get("error") {
        Some(error) => error.clone(),
        None => body,
    };
    AppError::QueryFailed { code, error }
}

fn classify_transport_error(e: reqwest::Error) -> AppError {
    if e.is_timeout() {
        return AppError::Timeout;
    }
    AppError::QueryFailed {
        code: CODE_CONNECTION_FAILED,
        error: Value::String(e.to_string()),
    }
}

/// Parse Server REST 클라이언트
///
/// 설정은 생성 시 고정되며, 인스턴스는 여러 요청에서 공유할 수 있습니다.
#[derive(Clone)]
pub struct ParseRest {
    config: ParseConfig,
    client: reqwest::Client,
}

impl ParseRest {
    pub fn new(config: ParseConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::ConfigError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    /// 경로를 절대 URL로 만듭니다. 이미 `://`를 포함하면 그대로 사용합니다.
    pub fn resolve_url(&self, path: &str) -> String {
        if path.contains("://") {
            path.to_string()
        } else {
            format!("{}{}", self.config.server_url, path)
        }
    }

    pub async fn get(&self, path: &str, payload: Option<Payload>, options: RequestOptions) -> AppResult<Value> {
        self.request(Method::GET, path, payload, options).await
    }

    pub async fn post(&self, path: &str, payload: Option<Payload>, options: RequestOptions) -> AppResult<Value> {
        self.request(Method::POST, path, payload, options).await
    }

    pub async fn put(&self, path: &str, payload: Option<Payload>, options: RequestOptions) -> AppResult<Value> {
        self.request(Method::PUT, path, payload, options).await
    }

    pub async fn patch(&self, path: &str, payload: Option<Payload>, options: RequestOptions) -> AppResult<Value> {
        self.request(Method::PATCH, path, payload, options).await
    }

    pub async fn delete(&self, path: &str, payload: Option<Payload>, options: RequestOptions) -> AppResult<Value> {
        self.request(Method::DELETE, path, payload, options).await
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        payload: Option<Payload>,
        options: RequestOptions,
    ) -> AppResult<Value> {
        let headers = compose_headers(&self.config, &options, payload.as_ref());
        let has_body = matches!(method, Method::POST | Method::PUT | Method::PATCH);

        let mut url = self.resolve_url(path);
        let mut body: Option<Vec<u8>> = None;

        match payload {
            Some(Payload::Json(value)) if has_body => {
                body = Some(serde_json::to_vec(&value).map_err(|e| {
                    AppError::InternalError(format!("요청 본문 직렬화 실패: {}", e))
                })?);
            }
            Some(Payload::Json(value)) => {
                url = make_url(&url, Some(&value));
            }
            Some(Payload::File(file)) => {
                body = Some(file.data);
            }
            None => {}
        }

        if self.config.log_requests {
            debug!("➡️ {} {}", method, url);
        }

        let mut builder = self.client.request(method.clone(), &url);
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            error!("❌ {} {} 요청 실패: {}", method, url, e);
            classify_transport_error(e)
        })?;

        let status = response.status();
        let text = response.text().await.map_err(classify_transport_error)?;
        let value = parse_body(&text);

        if status.is_success() {
            Ok(value)
        } else {
            error!("❌ {} {} 응답 오류 ({}): {}", method, url, status.as_u16(), value);
            Err(failure_from_response(status.as_u16(), value))
        }
    }
}
