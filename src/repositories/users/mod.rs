//! 사용자 데이터 액세스 계층
//!
//! [`UserRepository`](user_repo::UserRepository)를 통해 Parse `_User` 레코드를 조회/생성/갱신합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::user_repo::UserRepository;
//!
//! let user_repo = UserRepository::new(rest.clone());
//! let user = user_repo.find_by_username("user@example.com").await?;
//! ```

pub mod user_repo;
