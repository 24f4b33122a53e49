//! # Domain Layer Module
//!
//! 소셜 로그인 서비스의 데이터 구조를 정의합니다.
//!
//! ## 아키텍처 개요
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities   - Parse Server 레코드 (_User, _Session)
//! ├── dto        - HTTP 요청/응답 본문
//! └── models     - 외부 프로필, 자격 증명, 요청 컨텍스트
//!      │
//!      ▼
//! Application Layer (services)
//!      │
//!      ▼
//! Infrastructure Layer (repositories, db)
//! ```
//!
//! 도메인 계층은 다른 계층에 의존하지 않습니다. 예외는 설정의 `AuthProvider`와
//! 공통 에러 타입뿐입니다.

pub mod entities;
pub mod dto;
pub mod models;
