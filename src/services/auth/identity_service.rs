//! # 식별 파이프라인
//!
//! 검증된 외부 프로필을 백엔드 사용자에 연결하고 세션 토큰을 확보합니다.
//! 프로바이더마다 [`ProfileFetcher`] 하나로 매개변수화된 파이프라인이 하나씩 만들어집니다.
//!
//! ## 로그인 플로우
//!
//! ```text
//! access_token ──► 프로필 조회 ──► 식별 키 확인 ──► GET /users?where={username}
//!                                                       │
//!                     ┌─────────────────────────────────┴──────────────┐
//!                     ▼ 기존 사용자                                     ▼ 신규 사용자
//!              차단 여부 확인                                   POST /users
//!              PUT /users/{id} {socialType, authData}          GET /users/me
//!              GET /sessions?where={user}
//!                 ├─ 세션 있음: 저장한 필드 + 세션 토큰
//!                 └─ 세션 없음: SessionPolicy
//!                       Relogin: PUT {password} → GET /login → GET /users/me
//!                       Fail: SessionResolutionFailed
//! ```
//!
//! 각 단계는 이전 단계의 결과에 의존하므로 순차적으로 실행됩니다.
//! 어느 단계든 실패하면 즉시 중단되며, 이미 저장된 변경은 되돌리지 않습니다.
//!
//! 같은 신규 식별 키로 동시에 첫 로그인이 들어오면 둘 다 "없음"을 보고 각각 사용자를 만들 수 있습니다.
//! 백엔드의 `username` 유일성 제약이 두 번째 생성을 막는 경우 그 에러가 그대로 전달됩니다.

use std::collections::HashMap;
use std::sync::Arc;
use log::{info, warn};
use serde_json::{json, Map, Value};
use crate::config::{AuthProvider, LoginPolicy, SessionPolicy};
use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::oauth::{LinkRequest, LoginRequest};
use crate::domain::entities::users::{AuthDataMap, NewParseUser, ParseUser, ProfileImage};
use crate::domain::models::auth::{LoginOutcome, RequestContext, UserLocator};
use crate::domain::models::oauth::{AccessCredential, ExternalProfile};
use crate::repositories::sessions::session_repo::SessionRepository;
use crate::repositories::users::user_repo::UserRepository;
use crate::services::auth::user_handler::UserHandler;
use crate::services::providers::ProfileFetcher;
use crate::utils::string_utils::password_placeholder;

pub struct IdentityPipeline {
    fetcher: Arc<dyn ProfileFetcher>,
    users: Arc<UserRepository>,
    sessions: Arc<SessionRepository>,
    user_handler: Arc<dyn UserHandler>,
    policy: LoginPolicy,
}

impl IdentityPipeline {
    pub fn new(
        fetcher: Arc<dyn ProfileFetcher>,
        users: Arc<UserRepository>,
        sessions: Arc<SessionRepository>,
        user_handler: Arc<dyn UserHandler>,
        policy: LoginPolicy,
    ) -> Self {
        Self {
            fetcher,
            users,
            sessions,
            user_handler,
            policy,
        }
    }

    pub fn provider(&self) -> AuthProvider {
        self.fetcher.provider()
    }

    /// 소셜 로그인 (`POST /{provider}/login`)
    pub async fn login(&self, context: &RequestContext, request: LoginRequest) -> AppResult<Value> {
        let credential = AccessCredential::require(self.provider(), request.access_token, request.expiration_date)?;
        let outcome = self.resolve(&credential).await?;
        self.user_handler.handle(context, outcome).await
    }

    /// 기존 사용자에 프로바이더 연결 (`POST /{provider}/link`)
    pub async fn link(&self, context: &RequestContext, request: LinkRequest) -> AppResult<Value> {
        let credential = AccessCredential::require(self.provider(), request.access_token, request.expiration_date)?;
        let locator = UserLocator::from_parts(request.user_id, request.username)?;
        let outcome = self.resolve_link(&credential, locator).await?;
        self.user_handler.handle(context, outcome).await
    }

    /// 프로필로 사용자를 찾거나 만들고 세션을 확보합니다.
    pub async fn resolve(&self, credential: &AccessCredential) -> AppResult<LoginOutcome> {
        let provider = self.provider();
        let profile = self.fetcher.fetch_profile(credential).await?;
        let identity_key = profile.require_identity_key()?.to_string();

        match self.users.find_by_username(&identity_key).await? {
            Some(user) => {
                info!("👤 기존 {} 사용자 로그인: {}", provider, identity_key);
                self.login_existing(user, &profile, credential).await
            }
            None => {
                info!("🆕 신규 {} 사용자 등록: {}", provider, identity_key);
                self.register(&identity_key, &profile, credential).await
            }
        }
    }

    /// 지정한 기존 사용자에 프로바이더 authData를 병합합니다. 계정을 새로 만들지 않습니다.
    pub async fn resolve_link(&self, credential: &AccessCredential, locator: UserLocator) -> AppResult<LoginOutcome> {
        let provider = self.provider();
        let profile = self.fetcher.fetch_profile(credential).await?;

        let user = match &locator {
            UserLocator::Id(id) => self.users.find_by_id(id).await?,
            UserLocator::Username(username) => self.users.find_by_username(username).await?,
        }
        .ok_or(AppError::UserNotFound)?;

        ensure_not_banned(&user)?;

        let entry = profile.auth_data_entry(credential);
        let mut fields = Map::new();
        fields.insert("authData".to_string(), json!(user.merged_auth_data(provider, &entry)));

        self.users.update(&user.object_id, &fields).await?;
        info!("🔗 {} 계정 연결: user={}", provider, user.object_id);

        self.resolve_session(user, fields, &profile).await
    }

    async fn login_existing(
        &self,
        user: ParseUser,
        profile: &ExternalProfile,
        credential: &AccessCredential,
    ) -> AppResult<LoginOutcome> {
        let provider = self.provider();
        ensure_not_banned(&user)?;

        let entry = profile.auth_data_entry(credential);
        let mut fields = Map::new();
        fields.insert("socialType".to_string(), json!(provider.as_str()));
        fields.insert("authData".to_string(), json!(user.merged_auth_data(provider, &entry)));

        let mut written = fields.clone();
        if self.policy.track_login_count {
            fields.insert("loginCount".to_string(), json!({ "__op": "Increment", "amount": 1 }));
            written.insert("loginCount".to_string(), json!(user.login_count.unwrap_or(0) + 1));
        }

        self.users.update(&user.object_id, &fields).await?;
        self.resolve_session(user, written, profile).await
    }

    /// 기존 세션을 재사용하거나 정책에 따라 새 세션을 발급합니다.
    async fn resolve_session(
        &self,
        mut user: ParseUser,
        written: Map<String, Value>,
        profile: &ExternalProfile,
    ) -> AppResult<LoginOutcome> {
        if let Some(session) = self.sessions.find_by_user(&user.object_id).await? {
            info!("♻️ 기존 세션 재사용: user={}", user.object_id);
            user.apply_fields(&written);
            return Ok(LoginOutcome::new(session.session_token, user));
        }

        match self.policy.session_policy {
            SessionPolicy::Fail => Err(AppError::SessionResolutionFailed(user.object_id)),
            SessionPolicy::Relogin => {
                let username = user
                    .username
                    .clone()
                    .ok_or_else(|| AppError::SessionResolutionFailed(user.object_id.clone()))?;
                let password = password_placeholder(&profile.external_id);

                let mut reset = Map::new();
                reset.insert("password".to_string(), json!(password));
                self.users.update(&user.object_id, &reset).await?;

                let token = self.sessions.login(&username, &password).await?;
                info!("🔑 새 세션 발급: user={}", user.object_id);

                let reloaded = self.users.find_by_session_token(&token).await?;
                Ok(LoginOutcome::new(token, reloaded))
            }
        }
    }

    async fn register(
        &self,
        identity_key: &str,
        profile: &ExternalProfile,
        credential: &AccessCredential,
    ) -> AppResult<LoginOutcome> {
        let provider = self.provider();
        let mut auth_data = AuthDataMap::new();
        auth_data.insert(provider.as_str().to_string(), profile.auth_data_entry(credential).to_value());

        let new_user = NewParseUser {
            username: identity_key.to_string(),
            password: password_placeholder(&profile.external_id),
            name: profile.display_name.clone(),
            email: profile.email.clone(),
            social_type: provider.as_str().to_string(),
            social_profile: profile.raw.clone(),
            profile_image: ProfileImage { url: profile.avatar_url.clone() },
            auth_data,
            login_count: self.policy.track_login_count.then_some(1),
        };

        let created = self.users.create(&new_user).await?;
        let reloaded = self.users.find_by_session_token(&created.session_token).await?;
        Ok(LoginOutcome::new(created.session_token, reloaded))
    }
}

fn ensure_not_banned(user: &ParseUser) -> AppResult<()> {
    if user.is_banned() {
        warn!("🚫 차단된 사용자의 로그인 시도: {}", user.object_id);
        return Err(AppError::UserBanned);
    }
    Ok(())
}

/// 프로바이더별 파이프라인 모음
pub struct IdentityService {
    pipelines: HashMap<AuthProvider, Arc<IdentityPipeline>>,
}

impl IdentityService {
    pub fn new(pipelines: Vec<IdentityPipeline>) -> Self {
        Self {
            pipelines: pipelines
                .into_iter()
                .map(|pipeline| (pipeline.provider(), Arc::new(pipeline)))
                .collect(),
        }
    }

    /// 같은 저장소/정책을 공유하는 파이프라인을 프로바이더마다 하나씩 만듭니다.
    pub fn build(
        fetchers: Vec<Arc<dyn ProfileFetcher>>,
        users: Arc<UserRepository>,
        sessions: Arc<SessionRepository>,
        user_handler: Arc<dyn UserHandler>,
        policy: LoginPolicy,
    ) -> Self {
        Self::new(
            fetchers
                .into_iter()
                .map(|fetcher| {
                    IdentityPipeline::new(fetcher, users.clone(), sessions.clone(), user_handler.clone(), policy)
                })
                .collect(),
        )
    }

    pub fn pipeline(&self, provider: AuthProvider) -> AppResult<Arc<IdentityPipeline>> {
        self.pipelines
            .get(&provider)
            .cloned()
            .ok_or_else(|| AppError::UnsupportedProvider(provider.as_str().to_string()))
    }

    pub fn providers(&self) -> Vec<AuthProvider> {
        let mut providers: Vec<_> = self.pipelines.keys().copied().collect();
        providers.sort();
        providers
    }
}
