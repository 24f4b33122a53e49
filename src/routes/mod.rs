//! # Route Configuration
//!
//! 모든 HTTP 라우트를 애플리케이션에 등록합니다.
//!
//! ```text
//! /health
//! {OAUTH_BASE_PATH}                 (기본값 /oauth2)
//! ├── GET  /instagram/recent
//! ├── GET  /{provider}/auth
//! ├── GET  /{provider}/callback
//! ├── POST /{provider}/login
//! └── POST /{provider}/link
//! ```

use actix_web::{web, HttpResponse};
use crate::config::{AuthProvider, ServerConfig};
use crate::domain::dto::oauth::HealthResponse;
use crate::handlers;

/// 모든 라우트를 설정합니다
///
/// # Examples
///
/// ```rust,ignore
/// use actix_web::{web, App};
///
/// let app = App::new().configure(configure_all_routes);
/// ```
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);
    configure_oauth_routes(cfg, &ServerConfig::base_path());
}

/// OAuth 라우트를 지정한 스코프 아래에 등록합니다.
///
/// `/instagram/recent`는 `/{provider}/..` 패턴보다 먼저 등록해야 합니다.
///
/// ```bash
/// # 로그인
/// curl -X POST http://localhost:8080/oauth2/google/login \
///   -H "Content-Type: application/json" \
///   -d '{"access_token":"ya29...","expiration_date":3599}'
///
/// # 기존 사용자에 Instagram 연결
/// curl -X POST http://localhost:8080/oauth2/instagram/link \
///   -H "Content-Type: application/json" \
///   -d '{"access_token":"IGQV...","userId":"Ab12Cd34"}'
/// ```
pub fn configure_oauth_routes(cfg: &mut web::ServiceConfig, base_path: &str) {
    cfg.service(
        web::scope(base_path)
            .service(handlers::oauth::instagram_recent)
            .service(handlers::oauth::authorize)
            .service(handlers::oauth::callback)
            .service(handlers::oauth::login)
            .service(handlers::oauth::link),
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
#[actix_web::get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy",
        timestamp: chrono::Utc::now().to_rfc3339(),
        providers: AuthProvider::ALL.iter().map(AuthProvider::as_str).collect(),
    })
}
