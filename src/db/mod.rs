//! Parse Server Access Module
//!
//! 사용자/세션 데이터는 모두 Parse Server REST API를 통해 읽고 씁니다.
//! 이 모듈은 요청 구성(헤더, URL, 본문)과 응답 해석을 한곳에 모읍니다.
//!
//! # 환경 변수 설정
//!
//! ```bash
//! export SERVER_URL="http://localhost:1337/parse"
//! export APP_ID="myAppId"
//! export MASTER_KEY="myMasterKey"
//! ```
//!
//! # 기본 사용법
//!
//! ```rust,ignore
//! use crate::db::ParseRest;
//! use crate::core::registry::ServiceLocator;
//!
//! let rest = ParseRest::new(ParseConfig::from_env()?)?;
//! ServiceLocator::set(Arc::new(rest));
//! ```

pub mod query;
pub mod parse_rest;

pub use query::{make_url, Query};
pub use parse_rest::{FileUpload, ParseRest, Payload, RequestOptions};
