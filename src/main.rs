//! Parse 소셜 OAuth 서비스 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 모든 서비스를 초기화합니다.
//! Parse REST 클라이언트와 프로바이더별 식별 파이프라인을 구성하고,
//! 인가 플로우 컨텍스트 저장소(Redis 또는 메모리)를 연결합니다.

use std::io;
use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};
use parse_social_oauth::caching::redis::RedisClient;
use parse_social_oauth::caching::{InMemoryOAuthContextStore, OAuthContextStore, RedisOAuthContextStore};
use parse_social_oauth::config::{
    AuthProvider, InstagramConfig, LoginPolicy, OAuthConfig, ParseConfig, ProviderOAuthConfig, ServerConfig,
};
use parse_social_oauth::core::errors::AppError;
use parse_social_oauth::core::registry::ServiceLocator;
use parse_social_oauth::db::ParseRest;
use parse_social_oauth::repositories::sessions::session_repo::SessionRepository;
use parse_social_oauth::repositories::users::user_repo::UserRepository;
use parse_social_oauth::routes::configure_all_routes;
use parse_social_oauth::services::auth::{DefaultUserHandler, IdentityService, OAuthFlowService};
use parse_social_oauth::services::media::instagram_media_service::InstagramMediaService;
use parse_social_oauth::services::providers::{provider_http_client, HttpProfileFetcher, ProfileFetcher};
use parse_social_oauth::utils::display_terminal::{
    print_boxed_title, print_final_summary, print_provider_status, print_step_complete, print_step_start,
};

/// Rate Limiting 설정 구조체
#[derive(Debug)]
struct RateLimitConfig {
    per_second: u64,
    burst_size: u32,
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    print_boxed_title("PARSE SOCIAL OAUTH");
    info!("🚀 소셜 OAuth 서비스 시작중...");

    register_services().await.map_err(to_io_error)?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    // HTTP 서버 시작
    start_http_server().await
}

fn to_io_error(e: AppError) -> io::Error {
    error!("❌ 서비스 초기화 실패: {}", e);
    io::Error::other(e.to_string())
}

/// 서비스 그래프를 구성해 `ServiceLocator`에 등록합니다
///
/// ```text
/// ParseRest ─┬─ UserRepository ──┬─ IdentityService (프로바이더 × 6)
///            │                   └─ InstagramMediaService
///            └─ SessionRepository ┘
/// OAuthContextStore ─── OAuthFlowService
/// ```
///
/// # Errors
///
/// * `ConfigError` - `SERVER_URL` 누락, `SESSION_POLICY` 값 오류 또는 HTTP 클라이언트 생성 실패
/// * `CacheError` - `REDIS_URL`이 지정되었지만 연결할 수 없음
async fn register_services() -> Result<(), AppError> {
    print_step_start(1, "Parse Server 설정 로드");
    let parse_config = ParseConfig::from_env()?;
    info!("📡 Parse Server: {}", parse_config.server_url);

    let rest = Arc::new(ParseRest::new(parse_config)?);
    let users = Arc::new(UserRepository::new(rest.clone()));
    let sessions = Arc::new(SessionRepository::new(rest.clone()));
    print_step_complete(1, "Parse REST client ready", 3);

    print_step_start(2, "프로바이더 파이프라인 구성");
    let http_client = provider_http_client(OAuthConfig::provider_timeout())?;
    let provider_configs: Vec<ProviderOAuthConfig> = AuthProvider::ALL
        .iter()
        .map(|provider| ProviderOAuthConfig::from_env(*provider))
        .collect();

    let fetchers: Vec<Arc<dyn ProfileFetcher>> = provider_configs
        .iter()
        .map(|config| {
            print_provider_status(config.provider.as_str(), config.ensure_client().is_ok());
            Arc::new(HttpProfileFetcher::from_config(config, http_client.clone())) as Arc<dyn ProfileFetcher>
        })
        .collect();

    let policy = LoginPolicy::from_env()?;
    info!("🔐 로그인 정책: {:?}", policy);

    let identity = IdentityService::build(
        fetchers,
        users.clone(),
        sessions,
        Arc::new(DefaultUserHandler),
        policy,
    );
    let provider_count = identity.providers().len();
    print_step_complete(2, "Identity pipelines registered", provider_count);

    print_step_start(3, "인가 플로우 컨텍스트 저장소 연결");
    let store = initialize_context_store().await?;
    let context_ttl_seconds = (OAuthConfig::session_timeout_minutes().max(1) * 60) as u64;
    let flow = OAuthFlowService::new(
        provider_configs,
        http_client.clone(),
        store,
        ServerConfig::base_path(),
        context_ttl_seconds,
    );
    let media = InstagramMediaService::new(users, http_client, InstagramConfig::recent_media_url());
    print_step_complete(3, "OAuth flow ready", 1);

    ServiceLocator::set(rest);
    ServiceLocator::set(Arc::new(identity));
    ServiceLocator::set(Arc::new(flow));
    ServiceLocator::set(Arc::new(media));

    print_final_summary(provider_count, ServiceLocator::registered().len());
    Ok(())
}

/// 인가 플로우 컨텍스트 저장소를 선택합니다
///
/// `REDIS_URL`이 있으면 Redis를, 없으면 단일 프로세스용 메모리 저장소를 사용합니다.
async fn initialize_context_store() -> Result<Arc<dyn OAuthContextStore>, AppError> {
    if std::env::var("REDIS_URL").is_err() {
        warn!("⚠️ REDIS_URL 미설정: 인가 플로우 컨텍스트를 메모리에 보관합니다");
        return Ok(Arc::new(InMemoryOAuthContextStore::new()));
    }

    let redis_client = Arc::new(RedisClient::from_env().await?);
    info!("✅ Redis 연결 성공");

    ServiceLocator::set(redis_client.clone());
    Ok(Arc::new(RedisOAuthContextStore::new(redis_client)))
}

/// HTTP 서버를 구성하고 실행합니다
///
/// CORS, 로깅, 경로 정규화, Rate Limiting 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패, Rate Limiting 설정 오류 또는 서버 실행 오류
async fn start_http_server() -> io::Result<()> {
    let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());
    let base_path = ServerConfig::base_path();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 OAuth API: http://{}{}/{{provider}}/login", bind_address, base_path);

    // Rate Limiting 설정
    let rate_limit_config = load_rate_limit_config();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    HttpServer::new(move || {
        let cors = configure_cors();

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .workers(4)
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=debug")
///
/// ```bash
/// # Parse REST 요청 로그 보기 (프로덕션이 아닌 환경)
/// ENVIRONMENT=development RUST_LOG=parse_social_oauth::db=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// CORS 설정을 구성합니다
///
/// `CORS_ALLOWED_ORIGINS`(쉼표 구분)가 없으면 로컬 개발 서버만 허용합니다.
fn configure_cors() -> Cors {
    let origins = std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| {
        "http://localhost:3000,http://127.0.0.1:3000,http://localhost:8080,http://127.0.0.1:8080".to_string()
    });

    let cors = origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin));

    cors.allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-parse-session-token"),
        ])
        .supports_credentials()
        .max_age(3600)
}

/// 환경변수에서 Rate Limiting 설정을 로드합니다
///
/// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
/// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
fn load_rate_limit_config() -> RateLimitConfig {
    let per_second = std::env::var("RATE_LIMIT_PER_SECOND")
        .unwrap_or_else(|_| "100".to_string())
        .parse::<u64>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
            100
        });

    let burst_size = std::env::var("RATE_LIMIT_BURST_SIZE")
        .unwrap_or_else(|_| "200".to_string())
        .parse::<u32>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
            200
        });

    let config = RateLimitConfig {
        per_second,
        burst_size,
    };

    info!("Rate Limiting 설정 로드됨: {:?}", config);
    config
}
