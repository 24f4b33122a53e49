//! # 문자열 유틸리티
//!
//! 쿼리 문자열 직렬화와 요청 값 정리에 쓰는 공통 함수들입니다.

use serde::Deserialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

/// 객체를 퍼센트 인코딩 없이 `k=v&k2=v2` 형태로 직렬화합니다.
///
/// Parse REST 쿼리와 콜백 리다이렉트는 값을 이스케이프하지 않은 원문 그대로 전달합니다.
/// - 문자열/숫자/불리언: `k=v`
/// - 배열: `k=a&k=b` (원소가 원시값이 아니면 빈 값)
/// - null/객체: `k=`
pub fn qs_stringify_literal(params: &Map<String, Value>) -> String {
    let mut pairs = Vec::with_capacity(params.len());

    for (key, value) in params {
        match value {
            Value::Array(items) => {
                for item in items {
                    pairs.push(format!("{}={}", key, primitive_to_string(item)));
                }
            }
            other => pairs.push(format!("{}={}", key, primitive_to_string(other))),
        }
    }

    pairs.join("&")
}

fn primitive_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// URL에 쿼리 문자열을 붙입니다. 이미 `?`가 있으면 `&`로 잇습니다.
pub fn append_query(url: &str, query: &str) -> String {
    if query.is_empty() {
        return url.to_string();
    }
    let joint = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", url, joint, query)
}

/// 외부 계정 ID에서 결정적으로 유도한 비밀번호 자리표시자 (SHA-256 hex)
pub fn password_placeholder(external_id: &str) -> String {
    let digest = Sha256::digest(external_id.as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 공백뿐인 문자열을 `None`으로 역직렬화합니다.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}
