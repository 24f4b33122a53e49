//! HTTP 요청 핸들러 모듈
//!
//! 핸들러는 요청을 DTO로 받아 [`ServiceLocator`](crate::core::registry::ServiceLocator)에서
//! 꺼낸 서비스에 위임하고, 결과를 JSON 또는 리다이렉트로 변환하는 역할만 합니다.
//! 에러는 `AppError`의 `ResponseError` 구현이 `{code, error}` 본문으로 바꿉니다.

pub mod oauth;
