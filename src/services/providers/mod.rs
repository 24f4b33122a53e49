//! 프로바이더 프로필 조회와 응답 정규화

pub mod normalize;
pub mod profile_fetcher;

pub use normalize::normalize_profile;
pub use profile_fetcher::{authorized_get, provider_http_client, HttpProfileFetcher, ProfileFetcher};
