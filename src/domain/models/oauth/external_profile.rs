//! 외부 프로바이더 프로필 모델

use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::config::AuthProvider;
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::users::AuthDataEntry;

/// 호출자가 넘긴 프로바이더 access token과 만료 정보
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessCredential {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<Value>,
}

impl AccessCredential {
    /// 토큰이 비어 있으면 `MissingCredential`로 거부합니다.
    pub fn require(
        provider: AuthProvider,
        access_token: Option<String>,
        expiration_date: Option<Value>,
    ) -> AppResult<Self> {
        match access_token {
            Some(token) if !token.trim().is_empty() => Ok(Self {
                access_token: token,
                expiration_date: expiration_date.filter(|v| !v.is_null()),
            }),
            _ => Err(AppError::MissingCredential(provider.as_str().to_string())),
        }
    }
}

/// 프로바이더별 응답을 정규화한 프로필
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExternalProfile {
    pub provider: AuthProvider,
    /// 프로바이더 내부 계정 ID (숫자 ID도 문자열로 정규화)
    pub external_id: String,
    /// 백엔드 `username`으로 쓰이는 식별 키
    pub identity_key: Option<String>,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    /// 봉투를 벗긴 원본 프로필 (`socialProfile`로 저장)
    pub raw: Value,
}

impl ExternalProfile {
    pub fn require_identity_key(&self) -> AppResult<&str> {
        self.identity_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(AppError::EmailUnavailable)
    }

    pub fn auth_data_entry(&self, credential: &AccessCredential) -> AuthDataEntry {
        AuthDataEntry {
            id: self.external_id.clone(),
            access_token: credential.access_token.clone(),
            expiration_date: credential.expiration_date.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile(identity_key: Option<&str>) -> ExternalProfile {
        ExternalProfile {
            provider: AuthProvider::Naver,
            external_id: "n-1".to_string(),
            identity_key: identity_key.map(str::to_string),
            display_name: None,
            email: None,
            avatar_url: None,
            raw: json!({}),
        }
    }

    #[test]
    fn test_require_credential() {
        let credential = AccessCredential::require(AuthProvider::Kakao, Some("tok".to_string()), Some(json!(3600)))
            .unwrap();
        assert_eq!(credential.expiration_date, Some(json!(3600)));

        let error = AccessCredential::require(AuthProvider::Kakao, Some("  ".to_string()), None).unwrap_err();
        assert_eq!(error.to_string(), "Invalid kakao access_token");

        assert!(AccessCredential::require(AuthProvider::Kakao, None, None).is_err());
    }

    #[test]
    fn test_require_identity_key() {
        assert_eq!(profile(Some("a@b.com")).require_identity_key().unwrap(), "a@b.com");
        assert!(matches!(profile(None).require_identity_key(), Err(AppError::EmailUnavailable)));
        assert!(matches!(profile(Some("")).require_identity_key(), Err(AppError::EmailUnavailable)));
    }

    #[test]
    fn test_auth_data_entry_omits_missing_expiry() {
        let credential = AccessCredential { access_token: "tok".to_string(), expiration_date: None };
        let entry = profile(Some("a@b.com")).auth_data_entry(&credential);

        assert_eq!(entry.to_value(), json!({ "id": "n-1", "access_token": "tok" }));
    }
}
