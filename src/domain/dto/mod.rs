//! # Data Transfer Objects
//!
//! HTTP 경계에서 주고받는 요청/응답 구조체입니다.
//!
//! - 요청 DTO는 `serde::Deserialize` + 필요한 경우 `validator::Validate`
//! - 응답 DTO는 `serde::Serialize`
//!
//! 로그인 결과는 백엔드 사용자 레코드를 그대로 돌려주므로 별도의 응답 DTO가 없습니다.

pub mod oauth;
