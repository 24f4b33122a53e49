//! # Core Module
//!
//! 서비스 전반에서 공유하는 핵심 기반 기능입니다.
//!
//! - [`errors`] - `AppError` 에러 분류 체계와 Actix-Web 응답 변환
//! - [`registry`] - 시작 시 구성된 컴포넌트를 보관하는 `ServiceLocator`
//!
//! ## 핸들러에서의 사용
//!
//! ```rust,ignore
//! use crate::core::{AppError, ServiceLocator};
//!
//! #[post("/{provider}/login")]
//! async fn login(path: web::Path<String>) -> Result<HttpResponse, AppError> {
//!     let identity = ServiceLocator::resolve::<IdentityService>()?;
//!     // ...
//! }
//! ```

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
