//! OAuth 프로바이더 연동 모델

pub mod external_profile;

pub use external_profile::*;
