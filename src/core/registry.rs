//! # Service Registry - 싱글톤 컴포넌트 저장소
//!
//! 애플리케이션 시작 시 한 번 구성되는 컴포넌트(설정, REST 어댑터,
//! 리포지토리, 파이프라인 서비스)를 타입별로 보관하는 전역 컨테이너입니다.
//!
//! 컴포넌트는 `main`에서 명시적으로 생성자 주입을 거쳐 만들어진 뒤
//! [`ServiceLocator::set`]으로 등록되고, HTTP 핸들러는
//! [`ServiceLocator::resolve`]로 꺼내 씁니다. 등록 이후에는 읽기 전용으로 취급합니다.
//!
//! ```text
//! main
//!  ├─ ParseRest::new(config)              ─┐
//!  ├─ UserRepository::new(rest)            │  생성자 주입
//!  ├─ IdentityService::new(...)           ─┘
//!  └─ ServiceLocator::set(Arc<T>)          ← 타입별 등록
//!
//! handler
//!  └─ ServiceLocator::resolve::<T>()?      ← Arc<T> 조회
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use once_cell::sync::Lazy;
use crate::core::errors::{AppError, AppResult};

/// 타입별 싱글톤 인스턴스 컨테이너
pub struct ServiceLocator {
    /// `TypeId`를 키로 하는 인스턴스 캐시
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    /// 등록 순서대로 기록한 타입 이름 (부트스트랩 요약 출력용)
    names: RwLock<Vec<String>>,
}

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            names: RwLock::new(Vec::new()),
        }
    }

    /// 인스턴스를 등록합니다. 같은 타입이 이미 있으면 교체합니다.
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let type_id = TypeId::of::<T>();
        let clean_name = Self::extract_clean_type_name(std::any::type_name::<T>());

        log::debug!("📦 Registering: {}", clean_name);

        let mut instances = LOCATOR.instances.write().unwrap_or_else(PoisonError::into_inner);
        if instances.insert(type_id, instance as Arc<dyn Any + Send + Sync>).is_none() {
            LOCATOR
                .names
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .push(clean_name);
        }
    }

    /// 등록된 인스턴스를 조회합니다.
    pub fn try_get<T: 'static + Send + Sync>() -> Option<Arc<T>> {
        let instances = LOCATOR.instances.read().unwrap_or_else(PoisonError::into_inner);
        instances
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|instance| instance.downcast::<T>().ok())
    }

    /// 등록된 인스턴스를 조회하고, 없으면 [`AppError::InternalError`]를 반환합니다.
    pub fn resolve<T: 'static + Send + Sync>() -> AppResult<Arc<T>> {
        Self::try_get::<T>().ok_or_else(|| {
            AppError::InternalError(format!(
                "{} is not registered. Register it with ServiceLocator::set() during startup",
                Self::extract_clean_type_name(std::any::type_name::<T>())
            ))
        })
    }

    /// 등록된 컴포넌트 이름 목록 (등록 순)
    pub fn registered() -> Vec<String> {
        LOCATOR
            .names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// `a::b::UserRepository` → `UserRepository`
    fn extract_clean_type_name(type_name: &str) -> String {
        match type_name.rfind("::") {
            Some(pos) => type_name[pos + 2..].to_string(),
            None => type_name.to_string(),
        }
    }
}

/// 전역 서비스 로케이터 인스턴스
static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);
