//! # Domain Entities Module
//!
//! Parse Server에 저장되는 레코드를 Rust 구조체로 표현합니다.
//!
//! ## 구성
//!
//! ```text
//! entities/
//! ├── users/      ← `_User` 레코드, authData 맵, 신규 사용자 본문
//! └── sessions/   ← `_Session` 레코드, 사용자 포인터
//! ```
//!
//! ## 필드 보존
//!
//! 백엔드 레코드에는 이 서비스가 모르는 컬럼이 얼마든지 있을 수 있습니다.
//! 모든 엔티티는 `#[serde(flatten)] extra`로 나머지 필드를 보관하고,
//! 호출자에게 돌려줄 때 그대로 직렬화합니다.
//!
//! ```rust,ignore
//! let user: ParseUser = serde_json::from_value(value)?;
//! if user.is_banned() {
//!     return Err(AppError::UserBanned);
//! }
//! let merged = user.merged_auth_data(AuthProvider::Google, &entry);
//! ```

pub mod users;
pub mod sessions;
