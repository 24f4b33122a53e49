//! 프로바이더 프로필 응답 정규화
//!
//! 식별 키는 [`AuthProvider::identity_field`]가 가리키는 필드에서 읽습니다.
//!
//! | provider | 봉투 | 식별 키 | 이름 | 아바타 |
//! |----------|------|---------|------|--------|
//! | facebook | - | `email` | `name` | `https://graph.facebook.com/{id}/picture` |
//! | google | - | `email` | `name` | `picture` |
//! | instagram | `data` | `username` | `full_name` | `profile_picture` |
//! | naver | `response` | `email` | `name` | `profile_image` |
//! | daum | `result` | `userid` | `nickname` | `imagePath` |
//! | kakao | - | `kaccount_email`, 없으면 `id` | `properties.nickname` | `properties.profile_image` |

use serde_json::Value;
use crate::config::AuthProvider;
use crate::core::errors::{AppError, AppResult};
use crate::domain::models::oauth::ExternalProfile;

/// 봉투를 벗긴 프로필 객체를 반환합니다.
pub fn unwrap_envelope(provider: AuthProvider, payload: Value) -> AppResult<Value> {
    let profile = match provider.profile_envelope() {
        Some(key) => match payload {
            Value::Object(mut map) => map.remove(key).unwrap_or(Value::Null),
            _ => Value::Null,
        },
        None => payload,
    };

    if profile.is_object() {
        Ok(profile)
    } else {
        Err(AppError::ProfileFetchFailed(format!(
            "unexpected {} profile response",
            provider
        )))
    }
}

/// 프로바이더 응답을 [`ExternalProfile`]로 정규화합니다.
pub fn normalize_profile(provider: AuthProvider, payload: Value) -> AppResult<ExternalProfile> {
    let raw = unwrap_envelope(provider, payload)?;

    let external_id = string_field(&raw, "id").ok_or_else(|| {
        AppError::ProfileFetchFailed(format!("{} profile has no id", provider))
    })?;

    let identity_key = match string_field(&raw, provider.identity_field()) {
        // 카카오는 이메일 동의가 선택이라 숫자 id로 대신 식별합니다.
        None if provider == AuthProvider::Kakao => Some(external_id.clone()),
        key => key,
    };

    let (display_name, email, avatar_url) = match provider {
        AuthProvider::Facebook => (
            string_field(&raw, "name"),
            string_field(&raw, "email"),
            Some(format!("https://graph.facebook.com/{}/picture", external_id)),
        ),
        AuthProvider::Google => (
            string_field(&raw, "name"),
            string_field(&raw, "email"),
            string_field(&raw, "picture"),
        ),
        AuthProvider::Instagram => (
            string_field(&raw, "full_name"),
            None,
            string_field(&raw, "profile_picture"),
        ),
        AuthProvider::Naver => (
            string_field(&raw, "name"),
            string_field(&raw, "email"),
            string_field(&raw, "profile_image"),
        ),
        AuthProvider::Daum => (
            string_field(&raw, "nickname"),
            None,
            string_field(&raw, "imagePath"),
        ),
        AuthProvider::Kakao => {
            let properties = raw.get("properties").cloned().unwrap_or(Value::Null);
            (
                string_field(&properties, "nickname"),
                string_field(&raw, "kaccount_email"),
                string_field(&properties, "profile_image"),
            )
        }
    };

    Ok(ExternalProfile {
        provider,
        external_id,
        identity_key,
        display_name,
        email,
        avatar_url,
        raw,
    })
}

/// 문자열 또는 숫자 필드를 문자열로 읽습니다. 빈 문자열은 없는 것으로 봅니다.
fn string_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
