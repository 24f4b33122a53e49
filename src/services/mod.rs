//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 `main`에서 한 번 생성되어 [`ServiceLocator`](crate::core::registry::ServiceLocator)에 등록되고,
//! 핸들러는 요청마다 `Arc`로 꺼내 씁니다.
//!
//! # Features
//!
//! - 프로바이더 프로필 조회 및 정규화 (`providers`)
//! - 사용자 식별/생성/연결과 세션 확보 (`auth`)
//! - OAuth 2.0 인가 코드 플로우 (`auth`)
//! - Instagram 최근 미디어 조회 (`media`)

pub mod providers;
pub mod auth;
pub mod media;
