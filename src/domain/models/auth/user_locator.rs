use crate::core::errors::{AppError, AppResult};
use crate::utils::string_utils::clean_optional_string;

/// 연결 대상 사용자를 찾는 방법
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserLocator {
    Id(String),
    Username(String),
}

impl UserLocator {
    /// 둘 다 주어지면 ID가 우선합니다.
    pub fn from_parts(user_id: Option<String>, username: Option<String>) -> AppResult<Self> {
        match (clean_optional_string(user_id), clean_optional_string(username)) {
            (Some(id), _) => Ok(UserLocator::Id(id)),
            (None, Some(username)) => Ok(UserLocator::Username(username)),
            (None, None) => Err(AppError::InvalidParameter("userId or username".to_string())),
        }
    }
}
