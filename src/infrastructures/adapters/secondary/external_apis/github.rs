use crate::domain::external_apis::github::{FetchError, GitHubApi};
use crate::domain::models::activity::{ActivityEvent, Follower};
use crate::domain::models::profile::{Profile, default_avatar_url, profile_url};
use crate::domain::models::repository::Repository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

const USER_AGENT: &str = "profile-dashboard-rust-app";

#[derive(Deserialize, Debug, Clone)]
struct GitHubUserResponse {
    login: String,
    name: Option<String>,
    avatar_url: Option<String>,
    html_url: Option<String>,
    bio: Option<String>,
    location: Option<String>,
    blog: Option<String>,
    created_at: Option<String>, // ISO 8601 format, parse during domain model conversion
    #[serde(default)]
    public_repos: u64,
    #[serde(default)]
    followers: u64,
}

#[derive(Deserialize, Debug, Clone)]
struct GitHubLicenseResponse {
    name: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
struct GitHubRepositoryResponse {
    name: String,
    description: Option<String>,
    language: Option<String>,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    forks_count: u64,
    #[serde(default)]
    watchers_count: u64,
    #[serde(default)]
    open_issues_count: u64,
    #[serde(default)]
    size: u64,
    created_at: String,
    updated_at: String,
    license: Option<GitHubLicenseResponse>,
    #[serde(default)]
    topics: Vec<String>,
    #[serde(default)]
    private: bool,
    #[serde(default)]
    archived: bool,
    #[serde(default)]
    fork: bool,
    homepage: Option<String>,
    default_branch: Option<String>,
    html_url: String,
}

#[derive(Deserialize, Debug, Clone)]
struct GitHubEventResponse {
    #[serde(rename = "type")]
    kind: String,
    created_at: String,
}

#[derive(Deserialize, Debug, Clone)]
struct GitHubFollowerResponse {
    login: String,
    avatar_url: Option<String>,
    html_url: Option<String>,
}

fn parse_timestamp(resource: &str, field: &str, value: &str) -> Result<DateTime<Utc>, FetchError> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|e| FetchError::Decode {
            resource: resource.to_string(),
            message: format!("invalid {field} {value:?}: {e}"),
        })
}

/// Empty strings from the API mean "not set".
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl GitHubUserResponse {
    fn into_profile(self, resource: &str) -> Result<Profile, FetchError> {
        let created_at = self
            .created_at
            .as_deref()
            .map(|value| parse_timestamp(resource, "created_at", value))
            .transpose()?;

        Ok(Profile {
            avatar_url: non_empty(self.avatar_url).unwrap_or_else(|| default_avatar_url(&self.login)),
            html_url: non_empty(self.html_url).unwrap_or_else(|| profile_url(&self.login)),
            name: non_empty(self.name),
            bio: non_empty(self.bio),
            location: non_empty(self.location),
            blog: non_empty(self.blog),
            created_at,
            public_repos: self.public_repos,
            followers: self.followers,
            login: self.login,
        })
    }
}

impl GitHubRepositoryResponse {
    fn into_repository(self, resource: &str) -> Result<Repository, FetchError> {
        let created_at = parse_timestamp(resource, "created_at", &self.created_at)?;
        let updated_at = parse_timestamp(resource, "updated_at", &self.updated_at)?;

        Ok(Repository {
            name: self.name,
            description: non_empty(self.description),
            language: non_empty(self.language),
            stargazers_count: self.stargazers_count,
            forks_count: self.forks_count,
            watchers_count: self.watchers_count,
            open_issues_count: self.open_issues_count,
            size: self.size,
            created_at,
            updated_at,
            license: self.license.and_then(|license| non_empty(license.name)),
            topics: self.topics,
            private: self.private,
            archived: self.archived,
            fork: self.fork,
            homepage: non_empty(self.homepage),
            default_branch: non_empty(self.default_branch),
            html_url: self.html_url,
        })
    }
}

pub struct GitHubApiAdapter {
    client: Client,
    base_url: String,
}

impl GitHubApiAdapter {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// One GET, no retries. Non-2xx statuses and undecodable bodies are errors.
    async fn get_json<T>(&self, path: &str) -> Result<T, FetchError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github.v3+json")
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                resource: path.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                resource: path.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|e| FetchError::Decode {
            resource: path.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl GitHubApi for GitHubApiAdapter {
    #[tracing::instrument(name = "GitHubApiAdapter::fetch_profile", skip(self))]
    async fn fetch_profile(&self, username: &str) -> Result<Profile, FetchError> {
        let path = format!("/users/{username}");
        let response: GitHubUserResponse = self.get_json(&path).await?;
        response.into_profile(&path)
    }

    #[tracing::instrument(name = "GitHubApiAdapter::fetch_repositories", skip(self))]
    async fn fetch_repositories(
        &self,
        username: &str,
        count: u8,
    ) -> Result<Vec<Repository>, FetchError> {
        let path = format!("/users/{username}/repos?sort=updated&per_page={count}");
        let response_items: Vec<GitHubRepositoryResponse> = self.get_json(&path).await?;

        response_items
            .into_iter()
            .map(|repo_res| repo_res.into_repository(&path))
            .collect::<Result<Vec<Repository>, FetchError>>() // Early return if an error occurs
    }

    #[tracing::instrument(name = "GitHubApiAdapter::fetch_events", skip(self))]
    async fn fetch_events(&self, username: &str) -> Result<Vec<ActivityEvent>, FetchError> {
        let path = format!("/users/{username}/events");
        let response_items: Vec<GitHubEventResponse> = self.get_json(&path).await?;

        response_items
            .into_iter()
            .map(|event_res| {
                Ok(ActivityEvent {
                    created_at: parse_timestamp(&path, "created_at", &event_res.created_at)?,
                    kind: event_res.kind,
                })
            })
            .collect()
    }

    #[tracing::instrument(name = "GitHubApiAdapter::fetch_followers", skip(self))]
    async fn fetch_followers(&self, username: &str) -> Result<Vec<Follower>, FetchError> {
        let path = format!("/users/{username}/followers");
        let response_items: Vec<GitHubFollowerResponse> = self.get_json(&path).await?;

        Ok(response_items
            .into_iter()
            .map(|follower_res| Follower {
                avatar_url: non_empty(follower_res.avatar_url)
                    .unwrap_or_else(|| default_avatar_url(&follower_res.login)),
                html_url: non_empty(follower_res.html_url)
                    .unwrap_or_else(|| profile_url(&follower_res.login)),
                login: follower_res.login,
            })
            .collect())
    }
}
