//! 요청 컨텍스트
//!
//! 파이프라인에 넘기는 인바운드 요청 정보의 불변 스냅샷입니다.
//! 파이프라인은 이 값을 읽기만 하고, 결과(세션 토큰 포함)는 [`LoginOutcome`]으로 돌려줍니다.

use std::collections::BTreeMap;
use std::future::{ready, Ready};
use actix_web::{Error, FromRequest, HttpRequest};
use serde::Serialize;
use crate::domain::entities::users::ParseUser;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestContext {
    /// 소문자로 정규화된 요청 헤더
    headers: BTreeMap<String, String>,
    /// 호출자가 이미 가진 Parse 세션 토큰
    pub session_token: Option<String>,
    pub host: Option<String>,
    pub scheme: String,
}

impl RequestContext {
    pub fn new() -> Self {
        Self {
            scheme: "http".to_string(),
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        let name = name.to_lowercase();
        if self.session_token.is_none() && (name == "x-parse-session-token" || name == "sessiontoken") {
            self.session_token = Some(value.to_string());
        }
        self.headers.insert(name, value.to_string());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn from_http(req: &HttpRequest) -> Self {
        let info = req.connection_info();
        let mut context = Self {
            host: Some(info.host().to_string()),
            scheme: info.scheme().to_string(),
            ..Self::default()
        };
        drop(info);

        for (name, value) in req.headers() {
            if let Ok(value) = value.to_str() {
                context = context.with_header(name.as_str(), value);
            }
        }
        context
    }
}

impl FromRequest for RequestContext {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(Ok(RequestContext::from_http(req)))
    }
}

/// 식별 파이프라인의 결과
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginOutcome {
    pub session_token: String,
    pub user: ParseUser,
}

impl LoginOutcome {
    /// 세션 토큰을 사용자 레코드에 넣어 하나의 객체로 만듭니다.
    pub fn new(session_token: String, mut user: ParseUser) -> Self {
        user.session_token = Some(session_token.clone());
        Self { session_token, user }
    }
}
