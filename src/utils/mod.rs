//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 리터럴 쿼리 문자열, 비밀번호 자리표시자, 문자열 정리
//! - [`display_terminal`] - 부팅 과정 터미널 출력
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::utils::string_utils::{append_query, qs_stringify_literal};
//! use crate::utils::display_terminal::print_boxed_title;
//!
//! let url = append_query("https://app/cb", &qs_stringify_literal(&payload));
//! print_boxed_title("PARSE SOCIAL OAUTH");
//! ```

pub mod string_utils;
pub mod display_terminal;
