//! # Configuration Module
//!
//! 환경 변수 기반 설정을 중앙에서 관리합니다. 모든 값은 시작 시 한 번 읽고
//! 이후에는 불변으로 공유합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - Parse 백엔드 연결, 서버 바인딩, 실행 환경
//! - [`auth_config`] - 프로바이더 목록, OAuth2 엔드포인트/자격 증명, 로그인 정책
//!
//! ## 환경 변수 예시
//!
//! ```bash
//! SERVER_URL=http://localhost:1337/parse
//! APP_ID=myAppId
//! MASTER_KEY=myMasterKey
//! FB_APPIDS=["1360181184056097"]
//! FB_SECRETS=["..."]
//! KAKAO_RESTKEY=["..."]
//! SESSION_POLICY=relogin
//! TRACK_LOGIN_COUNT=true
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
