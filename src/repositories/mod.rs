//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 모든 리포지토리는 공유된 [`ParseRest`](crate::db::ParseRest) 클라이언트 위에서 동작하며,
//! 애플리케이션 시작 시 한 번 생성되어 `Arc`로 공유됩니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::{users::user_repo::UserRepository, sessions::session_repo::SessionRepository};
//!
//! let users = UserRepository::new(rest.clone());
//! let sessions = SessionRepository::new(rest.clone());
//! let session = sessions.find_by_user("u1").await?;
//! ```

pub mod users;
pub mod sessions;
