//! # Domain Models Module
//!
//! 저장되지 않는 도메인 값 객체를 정의합니다.
//!
//! ## Entities vs Models
//!
//! - `entities/` - Parse Server에 저장되는 레코드 (`ParseUser`, `ParseSession`)
//! - `models/` - 요청 처리 중에만 존재하는 값 (이 모듈)
//!
//! ## 구성
//!
//! - [`oauth`] - 프로바이더 자격 증명과 정규화된 외부 프로필
//! - [`auth`] - 요청 컨텍스트, 로그인 결과, 연결 대상 지정자

pub mod auth;
pub mod oauth;
