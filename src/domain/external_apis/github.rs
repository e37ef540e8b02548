use crate::domain::models::activity::{ActivityEvent, Follower};
use crate::domain::models::profile::Profile;
use crate::domain::models::repository::Repository;
use async_trait::async_trait;

/// Largest page the repositories endpoint serves in one request.
pub const MAX_REPOSITORIES_PER_PAGE: u8 = 100;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request for {resource} failed: {message}")]
    Transport { resource: String, message: String },

    #[error("{resource} returned status {status}")]
    Status { resource: String, status: u16 },

    #[error("failed to decode {resource}: {message}")]
    Decode { resource: String, message: String },
}

/// Result of a fetch after the fallback policy was applied.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Live(T),
    Fallback(T),
}

impl<T> FetchOutcome<T> {
    /// Runs `fetched` through the fallback policy: any error becomes `fallback()`.
    pub fn from_result<E>(fetched: Result<T, E>, fallback: impl FnOnce() -> T) -> Self {
        match fetched {
            Ok(value) => FetchOutcome::Live(value),
            Err(_) => FetchOutcome::Fallback(fallback()),
        }
    }

    pub fn value(&self) -> &T {
        match self {
            FetchOutcome::Live(value) | FetchOutcome::Fallback(value) => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            FetchOutcome::Live(value) | FetchOutcome::Fallback(value) => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, FetchOutcome::Fallback(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchOutcome<U> {
        match self {
            FetchOutcome::Live(value) => FetchOutcome::Live(f(value)),
            FetchOutcome::Fallback(value) => FetchOutcome::Fallback(f(value)),
        }
    }
}

#[async_trait]
pub trait GitHubApi {
    async fn fetch_profile(&self, username: &str) -> Result<Profile, FetchError>;
    async fn fetch_repositories(
        &self,
        username: &str,
        count: u8,
    ) -> Result<Vec<Repository>, FetchError>;
    async fn fetch_events(&self, username: &str) -> Result<Vec<ActivityEvent>, FetchError>;
    async fn fetch_followers(&self, username: &str) -> Result<Vec<Follower>, FetchError>;
}
