//! Parse REST 조회 URL 구성
//!
//! 읽기 요청의 페이로드(JSON 객체)를 URL로 접어 넣는 규칙을 담당합니다.
//!
//! 1. `objectId`와 `order`가 모두 없으면 마지막 파라미터로 `order=-createdAt`을 붙입니다.
//! 2. `objectId`가 있으면 경로 세그먼트로 붙이고 페이로드에서 뺍니다.
//! 3. `where`가 비어 있지 않은 객체이면 JSON 문자열을 URL 인코딩해 `where=`로 붙입니다.
//!    `where`는 어떤 경우에도 일반 쿼리 키로 남지 않습니다.
//! 4. 남은 필드는 이스케이프 없이 `k=v`로 이어 붙입니다.

use serde_json::{Map, Value};
use crate::utils::string_utils::{append_query, qs_stringify_literal};

/// 기본 정렬 (최신순)
pub const DEFAULT_ORDER: &str = "-createdAt";

/// 어댑터의 조회 요청 형태
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    object_id: Option<String>,
    where_clause: Option<Map<String, Value>>,
    params: Map<String, Value>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// JSON 페이로드를 분해합니다. 객체가 아니면 빈 쿼리가 됩니다.
    pub fn from_payload(payload: &Value) -> Self {
        let mut params = payload.as_object().cloned().unwrap_or_default();

        let object_id = params.remove("objectId").and_then(|id| match id {
            Value::String(s) if !s.is_empty() => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

        let where_clause = match params.remove("where") {
            Some(Value::Object(map)) if !map.is_empty() => Some(map),
            _ => None,
        };

        Self {
            object_id,
            where_clause,
            params,
        }
    }

    pub fn object_id(mut self, id: impl Into<String>) -> Self {
        self.object_id = Some(id.into());
        self
    }

    pub fn where_clause(mut self, clause: Map<String, Value>) -> Self {
        self.where_clause = if clause.is_empty() { None } else { Some(clause) };
        self
    }

    pub fn order(self, order: impl Into<String>) -> Self {
        self.param("order", Value::String(order.into()))
    }

    pub fn param(mut self, key: &str, value: Value) -> Self {
        self.params.insert(key.to_string(), value);
        self
    }

    /// 기본 URL에 쿼리를 적용한 최종 URL을 만듭니다.
    pub fn apply_to(&self, url: &str) -> String {
        let mut url = url.to_string();

        if let Some(id) = &self.object_id {
            url.push('/');
            url.push_str(id);
        }

        if let Some(clause) = &self.where_clause {
            let encoded = urlencoding::encode(&Value::Object(clause.clone()).to_string()).into_owned();
            url = append_query(&url, &format!("where={}", encoded));
        }

        url = append_query(&url, &qs_stringify_literal(&self.params));

        // 기본 정렬은 항상 마지막 파라미터로 붙습니다.
        if self.object_id.is_none() && !self.params.contains_key("order") {
            url = append_query(&url, &format!("order={}", DEFAULT_ORDER));
        }

        url
    }
}

/// 페이로드가 없으면 URL을 그대로 두고, 있으면 [`Query`] 규칙을 적용합니다.
pub fn make_url(url: &str, payload: Option<&Value>) -> String {
    match payload {
        Some(payload) => Query::from_payload(payload).apply_to(url),
        None => url.to_string(),
    }
}
