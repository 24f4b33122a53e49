//! Parse User Entity
//!
//! 백엔드 `_User` 레코드의 표현입니다. 이 서비스가 알고 있는 필드만
//! 타입으로 꺼내고, 나머지(`createdAt`, 커스텀 컬럼 등)는 `extra`에 그대로 보존하여
//! 응답으로 되돌려줄 때 손실이 없도록 합니다.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::config::AuthProvider;

/// 프로바이더 태그 → authData 항목
///
/// 다른 프로바이더가 남긴 항목은 형태를 알 수 없으므로 `Value` 그대로 다룹니다.
pub type AuthDataMap = BTreeMap<String, Value>;

/// 한 프로바이더의 authData 항목
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthDataEntry {
    pub id: String,
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<Value>,
}

impl AuthDataEntry {
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// 프로필 이미지 (`{ "url": ... }`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileImage {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseUser {
    #[serde(default)]
    pub object_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_profile: Option<Value>,
    /// 백엔드에 따라 `{url}` 또는 Parse File 객체이므로 원형을 유지합니다.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_data: Option<AuthDataMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_banned: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ParseUser {
    pub fn is_banned(&self) -> bool {
        self.is_banned.unwrap_or(false)
    }

    /// 기존 authData에 한 프로바이더 항목을 덮어쓴 새 맵을 만듭니다.
    ///
    /// 다른 프로바이더 항목은 그대로 유지됩니다.
    pub fn merged_auth_data(&self, provider: AuthProvider, entry: &AuthDataEntry) -> AuthDataMap {
        let mut merged = self.auth_data.clone().unwrap_or_default();
        merged.insert(provider.as_str().to_string(), entry.to_value());
        merged
    }

    /// 저장된 프로바이더 access_token
    pub fn provider_token(&self, provider: AuthProvider) -> Option<String> {
        self.auth_data
            .as_ref()?
            .get(provider.as_str())?
            .get("access_token")?
            .as_str()
            .filter(|token| !token.is_empty())
            .map(str::to_string)
    }

    pub fn profile_image_url(&self) -> Option<&str> {
        self.profile_image.as_ref()?.get("url")?.as_str()
    }

    /// 방금 저장한 필드를 덮어씁니다. 키가 없던 필드는 `extra`에 들어갑니다.
    pub fn apply_fields(&mut self, fields: &Map<String, Value>) {
        let mut current = match serde_json::to_value(&*self) {
            Ok(Value::Object(map)) => map,
            _ => return,
        };
        for (key, value) in fields {
            current.insert(key.clone(), value.clone());
        }
        if let Ok(updated) = serde_json::from_value::<ParseUser>(Value::Object(current)) {
            *self = updated;
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// 신규 사용자 생성 요청 본문 (`POST /users`)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewParseUser {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub social_type: String,
    pub social_profile: Value,
    pub profile_image: ProfileImage,
    pub auth_data: AuthDataMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_count: Option<i64>,
}

/// `POST /users` 응답
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedUser {
    pub object_id: String,
    pub session_token: String,
}
