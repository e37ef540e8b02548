//! In-memory `GitHubApi` used by use-case and session tests.

use crate::domain::external_apis::github::{FetchError, GitHubApi};
use crate::domain::models::activity::{ActivityEvent, Follower};
use crate::domain::models::profile::Profile;
use crate::domain::models::repository::Repository;
use crate::domain::models::repository::fixtures::repository;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct FakeGitHubApi {
    profile: Option<Profile>,
    repositories: Option<Vec<Repository>>,
    events: Option<Vec<ActivityEvent>>,
    followers: Option<Vec<Follower>>,
    requested_repository_count: Mutex<Option<u8>>,
}

fn unavailable(resource: &str) -> FetchError {
    FetchError::Status {
        resource: resource.to_string(),
        status: 503,
    }
}

impl FakeGitHubApi {
    /// Every endpoint fails.
    pub fn failing() -> Self {
        Self::default()
    }

    /// Live profile plus `count` repositories, updated one per day ending at `now`.
    pub fn with_repositories(now: DateTime<Utc>, count: usize) -> Self {
        let repositories = (0..count)
            .map(|i| {
                let mut repo = repository(&format!("repo-{i}"), now - Duration::days(i as i64));
                repo.stargazers_count = i as u64;
                repo
            })
            .collect();

        let mut profile = Profile::fallback("octocat");
        profile.name = Some("The Octocat".to_string());
        profile.bio = None;
        profile.location = None;

        Self {
            profile: Some(profile),
            repositories: Some(repositories),
            ..Self::default()
        }
    }

    pub fn without_profile(mut self) -> Self {
        self.profile = None;
        self
    }

    /// One push event per day for `days` days ending at `now`.
    pub fn with_push_events(mut self, now: DateTime<Utc>, days: i64) -> Self {
        self.events = Some(
            (0..days)
                .map(|d| ActivityEvent {
                    kind: "PushEvent".to_string(),
                    created_at: now - Duration::days(d),
                })
                .collect(),
        );
        self
    }

    pub fn with_followers(mut self, logins: &[&str]) -> Self {
        self.followers = Some(
            logins
                .iter()
                .map(|login| Follower {
                    login: (*login).to_string(),
                    avatar_url: format!("https://avatars.example/{login}"),
                    html_url: format!("https://github.com/{login}"),
                })
                .collect(),
        );
        self
    }

    pub fn repositories(&self) -> Vec<Repository> {
        self.repositories.clone().unwrap_or_default()
    }

    pub fn requested_repository_count(&self) -> Option<u8> {
        self.requested_repository_count
            .lock()
            .map(|count| *count)
            .unwrap_or_default()
    }
}

#[async_trait]
impl GitHubApi for FakeGitHubApi {
    async fn fetch_profile(&self, _username: &str) -> Result<Profile, FetchError> {
        self.profile.clone().ok_or_else(|| unavailable("profile"))
    }

    async fn fetch_repositories(
        &self,
        _username: &str,
        count: u8,
    ) -> Result<Vec<Repository>, FetchError> {
        if let Ok(mut requested) = self.requested_repository_count.lock() {
            *requested = Some(count);
        }
        self.repositories
            .clone()
            .ok_or_else(|| unavailable("repositories"))
    }

    async fn fetch_events(&self, _username: &str) -> Result<Vec<ActivityEvent>, FetchError> {
        self.events.clone().ok_or_else(|| unavailable("events"))
    }

    async fn fetch_followers(&self, _username: &str) -> Result<Vec<Follower>, FetchError> {
        self.followers.clone().ok_or_else(|| unavailable("followers"))
    }
}
