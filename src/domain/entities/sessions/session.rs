//! Parse Session Entity

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseSession {
    #[serde(default)]
    pub object_id: String,
    pub session_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `_Session.user` 조회 조건에 쓰는 사용자 포인터
pub fn user_pointer(object_id: &str) -> Value {
    json!({
        "__type": "Pointer",
        "className": "_User",
        "objectId": object_id
    })
}
