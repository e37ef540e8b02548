use crate::domain::external_apis::github::{FetchOutcome, GitHubApi};
use crate::domain::models::activity::Follower;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait ListFollowersUseCase {
    async fn execute(&self) -> FetchOutcome<Vec<Follower>>;
}

pub struct ListFollowersInteractor<G: GitHubApi + Send + Sync + 'static> {
    github_api: Arc<G>,
    username: String,
}

impl<G: GitHubApi + Send + Sync + 'static> ListFollowersInteractor<G> {
    pub fn new(github_api: Arc<G>, username: String) -> Self {
        Self {
            github_api,
            username,
        }
    }
}

#[async_trait]
impl<G: GitHubApi + Send + Sync + 'static> ListFollowersUseCase for ListFollowersInteractor<G> {
    #[tracing::instrument(name = "ListFollowersInteractor::execute", skip(self), fields(username = %self.username))]
    async fn execute(&self) -> FetchOutcome<Vec<Follower>> {
        let followers = self.github_api.fetch_followers(&self.username).await;
        match &followers {
            Ok(list) => tracing::info!("Fetched {} followers", list.len()),
            Err(e) => tracing::warn!("Failed to fetch followers: {}", e),
        }
        FetchOutcome::from_result(followers, Vec::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::FakeGitHubApi;
    use chrono::Utc;

    #[tokio::test]
    async fn test_lists_followers() {
        let api = FakeGitHubApi::with_repositories(Utc::now(), 0).with_followers(&["ada", "linus"]);
        let interactor = ListFollowersInteractor::new(Arc::new(api), "octocat".to_string());

        let followers = interactor.execute().await;

        assert!(!followers.is_fallback());
        let logins: Vec<&str> = followers.value().iter().map(|f| f.login.as_str()).collect();
        assert_eq!(logins, ["ada", "linus"]);
    }

    #[tokio::test]
    async fn test_failure_is_tagged_fallback() {
        let interactor =
            ListFollowersInteractor::new(Arc::new(FakeGitHubApi::failing()), "octocat".to_string());

        let followers = interactor.execute().await;

        assert!(followers.is_fallback());
        assert!(followers.value().is_empty());
    }
}
