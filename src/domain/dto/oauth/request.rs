//! 소셜 로그인 요청 DTO
//!
//! 로그인/연결 요청 본문과 OAuth2 콜백 쿼리를 매핑합니다.

use serde::Deserialize;
use serde_json::Value;
use validator::Validate;
use crate::utils::string_utils::deserialize_optional_string;

/// `POST /{provider}/login` 본문
///
/// 토큰 누락은 역직렬화 오류가 아니라 `MissingCredential`로 응답해야 하므로 선택 필드입니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub access_token: Option<String>,
    #[serde(default)]
    pub expiration_date: Option<Value>,
}

/// `POST /{provider}/link` 본문
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LinkRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub access_token: Option<String>,
    #[serde(default)]
    pub expiration_date: Option<Value>,
    #[serde(default, rename = "userId", deserialize_with = "deserialize_optional_string")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub username: Option<String>,
}

/// `GET /{provider}/auth` 쿼리
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AuthStartQuery {
    /// 토큰 교환 후 돌아갈 클라이언트 URL
    #[validate(url(message = "callback은 절대 URL이어야 합니다"))]
    pub callback: Option<String>,
    /// redirect_uri에 쓸 호스트 (프록시 뒤에서 외부 호스트 지정)
    #[validate(length(min = 1, max = 255, message = "host 길이가 올바르지 않습니다"))]
    pub host: Option<String>,
}

/// `GET /{provider}/callback` 쿼리
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct OAuthCallbackQuery {
    #[validate(length(min = 1, message = "Authorization code가 필요합니다"))]
    pub code: Option<String>,

    pub state: Option<String>,

    pub error: Option<String>,
    pub error_reason: Option<String>,
    pub error_description: Option<String>,
}

impl OAuthCallbackQuery {
    /// 프로바이더가 돌려준 거부 사유
    pub fn failure_reason(&self) -> Option<&str> {
        self.error_reason
            .as_deref()
            .or(self.error_description.as_deref())
            .or(self.error.as_deref())
    }
}

/// `GET /instagram/recent` 쿼리
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RecentMediaQuery {
    #[serde(default, rename = "userId")]
    #[validate(length(min = 1, message = "userId가 필요합니다"))]
    pub user_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_request_without_token() {
        let request: LoginRequest = serde_json::from_value(json!({})).unwrap();
        assert!(request.access_token.is_none());

        let request: LoginRequest = serde_json::from_value(json!({ "access_token": "  " })).unwrap();
        assert!(request.access_token.is_none());
    }

    #[test]
    fn test_link_request_field_names() {
        let request: LinkRequest = serde_json::from_value(json!({
            "access_token": "tok",
            "userId": "u1",
            "expiration_date": "2030-01-01"
        }))
        .unwrap();

        assert_eq!(request.user_id.as_deref(), Some("u1"));
        assert_eq!(request.username, None);
        assert_eq!(request.expiration_date, Some(json!("2030-01-01")));
    }

    #[test]
    fn test_auth_start_query_validation() {
        let query = AuthStartQuery {
            callback: Some("https://app.example.com/done".to_string()),
            host: None,
        };
        assert!(query.validate().is_ok());

        let query = AuthStartQuery {
            callback: Some("not a url".to_string()),
            host: None,
        };
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_recent_media_query_rejects_empty_user_id() {
        let query: RecentMediaQuery = serde_json::from_value(json!({ "userId": "" })).unwrap();
        assert!(query.validate().is_err());

        let query: RecentMediaQuery = serde_json::from_value(json!({ "userId": "u1" })).unwrap();
        assert!(query.validate().is_ok());
        assert!(RecentMediaQuery::default().validate().is_ok());
    }

    #[test]
    fn test_callback_failure_reason() {
        let query = OAuthCallbackQuery {
            error: Some("access_denied".to_string()),
            error_reason: Some("user_denied".to_string()),
            ..Default::default()
        };
        assert_eq!(query.failure_reason(), Some("user_denied"));

        let query = OAuthCallbackQuery {
            code: Some(String::new()),
            ..Default::default()
        };
        assert!(query.validate().is_err());
    }
}
