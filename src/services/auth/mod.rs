//! 인증 서비스 모듈
//!
//! 소셜 로그인의 두 축을 담당합니다.
//!
//! - 식별 파이프라인: access token → 백엔드 사용자 + 세션 토큰
//! - 인가 코드 플로우: 인가 페이지 리다이렉트 → 코드 교환 → 클라이언트 콜백
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::IdentityService;
//!
//! let identity = ServiceLocator::resolve::<IdentityService>()?;
//! let user = identity
//!     .pipeline(AuthProvider::Google)?
//!     .login(&context, request)
//!     .await?;
//! ```

pub mod identity_service;
pub mod user_handler;
pub mod oauth_client;
pub mod oauth_flow_service;

pub use identity_service::*;
pub use user_handler::*;
pub use oauth_flow_service::*;
