//! Parse Server 소셜 OAuth 연동 서비스
//!
//! Facebook, Google, Instagram, Naver, Daum, Kakao 계정을 Parse Server의
//! `_User`에 연결합니다. 클라이언트가 넘긴 프로바이더 access token으로 프로필을
//! 조회하고, 같은 식별자의 사용자가 있으면 세션을 돌려주고 없으면 가입시킵니다.
//!
//! # Features
//!
//! - **로그인/가입**: `POST /{provider}/login` 하나로 처리
//! - **계정 연결**: 기존 사용자에 다른 프로바이더 `authData` 추가
//! - **인가 코드 플로우**: 프로바이더 인가 페이지 리다이렉트와 콜백 토큰 교환
//! - **Parse REST 클라이언트**: 마스터 키/세션 토큰 헤더, `where` 쿼리 인코딩
//! - **Redis**: 인가 플로우 컨텍스트(state) 보관
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← /{provider}/auth|callback|login|link
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 프로필 조회, 신원 해석 파이프라인
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← _User / _Session 접근
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ Parse REST API  │ ← 저장소 (+ Redis)
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use parse_social_oauth::config::AuthProvider;
//! use parse_social_oauth::core::registry::ServiceLocator;
//! use parse_social_oauth::services::auth::IdentityService;
//!
//! let identity = ServiceLocator::resolve::<IdentityService>()?;
//! let user = identity
//!     .pipeline(AuthProvider::Google)?
//!     .login(&context, request)
//!     .await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod handlers;
pub mod routes;
pub mod utils;
