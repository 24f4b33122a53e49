//! Social OAuth HTTP Handlers
//!
//! 프로바이더별 인가/콜백/로그인/연결 엔드포인트를 처리합니다.
//! 모든 엔드포인트는 `{provider}` 경로 세그먼트 하나로 여섯 프로바이더를 처리하며,
//! 알 수 없는 프로바이더는 `404 {"code":101,"error":"api not found: .."}`로 응답합니다.
//!
//! # Endpoints
//!
//! - `GET /{provider}/auth` - 프로바이더 인가 페이지로 리다이렉트
//! - `GET /{provider}/callback` - 인가 코드 교환 후 클라이언트 콜백/JSON
//! - `POST /{provider}/login` - access token으로 로그인 (없으면 가입)
//! - `POST /{provider}/link` - 기존 사용자에 프로바이더 연결
//! - `GET /instagram/recent` - Instagram 최근 미디어

use actix_web::http::header;
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use validator::Validate;
use crate::config::AuthProvider;
use crate::core::errors::AppError;
use crate::core::registry::ServiceLocator;
use crate::domain::dto::oauth::{AuthStartQuery, LinkRequest, LoginRequest, OAuthCallbackQuery, RecentMediaQuery};
use crate::domain::models::auth::RequestContext;
use crate::services::auth::{CallbackResult, IdentityService, OAuthFlowService};
use crate::services::media::instagram_media_service::InstagramMediaService;

fn parse_provider(path: &web::Path<String>) -> Result<AuthProvider, AppError> {
    path.as_str().parse()
}

fn found(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

#[get("/instagram/recent")]
pub async fn instagram_recent(query: web::Query<RecentMediaQuery>) -> Result<HttpResponse, AppError> {
    query
        .validate()
        .map_err(|e| AppError::InvalidParameter(e.to_string()))?;

    let media_service = ServiceLocator::resolve::<InstagramMediaService>()?;
    let media = media_service.recent_media(query.user_id.as_deref()).await?;

    Ok(HttpResponse::Ok().json(media))
}

#[get("/{provider}/auth")]
pub async fn authorize(
    path: web::Path<String>,
    query: web::Query<AuthStartQuery>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let provider = parse_provider(&path)?;
    let flow = ServiceLocator::resolve::<OAuthFlowService>()?;

    let (scheme, host) = {
        let info = req.connection_info();
        (info.scheme().to_string(), info.host().to_string())
    };

    let location = flow
        .authorize_redirect(provider, query.into_inner(), &scheme, &host)
        .await?;

    Ok(found(&location))
}

#[get("/{provider}/callback")]
pub async fn callback(
    path: web::Path<String>,
    query: web::Query<OAuthCallbackQuery>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let provider = parse_provider(&path)?;
    let flow = ServiceLocator::resolve::<OAuthFlowService>()?;

    let (scheme, host) = {
        let info = req.connection_info();
        (info.scheme().to_string(), info.host().to_string())
    };

    match flow.complete(provider, query.into_inner(), &scheme, &host).await? {
        CallbackResult::Redirect(location) => Ok(found(&location)),
        CallbackResult::Json(payload) => Ok(HttpResponse::Ok().json(payload)),
    }
}

#[post("/{provider}/login")]
pub async fn login(
    path: web::Path<String>,
    context: RequestContext,
    payload: Option<web::Json<LoginRequest>>,
) -> Result<HttpResponse, AppError> {
    let provider = parse_provider(&path)?;
    let identity = ServiceLocator::resolve::<IdentityService>()?;

    let request = payload.map(web::Json::into_inner).unwrap_or_default();
    let user = identity.pipeline(provider)?.login(&context, request).await?;

    Ok(HttpResponse::Ok().json(user))
}

#[post("/{provider}/link")]
pub async fn link(
    path: web::Path<String>,
    context: RequestContext,
    payload: Option<web::Json<LinkRequest>>,
) -> Result<HttpResponse, AppError> {
    let provider = parse_provider(&path)?;
    let identity = ServiceLocator::resolve::<IdentityService>()?;

    let request = payload.map(web::Json::into_inner).unwrap_or_default();
    let user = identity.pipeline(provider)?.link(&context, request).await?;

    Ok(HttpResponse::Ok().json(user))
}
