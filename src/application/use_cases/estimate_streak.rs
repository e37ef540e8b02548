use crate::domain::external_apis::github::GitHubApi;
use crate::domain::models::repository::Repository;
use crate::domain::services::streak::{
    Streak, StreakSource, streak_from_events, streak_from_repositories,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct EstimateStreakUseCaseInput {
    pub repositories: Arc<[Repository]>,
    pub now: DateTime<Utc>,
}

#[async_trait]
pub trait EstimateStreakUseCase {
    async fn execute(&self, input: EstimateStreakUseCaseInput) -> Streak;
}

pub struct EstimateStreakInteractor<G: GitHubApi + Send + Sync + 'static> {
    github_api: Arc<G>,
    username: String,
}

impl<G: GitHubApi + Send + Sync + 'static> EstimateStreakInteractor<G> {
    pub fn new(github_api: Arc<G>, username: String) -> Self {
        Self {
            github_api,
            username,
        }
    }
}

#[async_trait]
impl<G: GitHubApi + Send + Sync + 'static> EstimateStreakUseCase for EstimateStreakInteractor<G> {
    /// Events feed first; the repository heuristic when the feed fails or
    /// shows no current streak.
    #[tracing::instrument(name = "EstimateStreakInteractor::execute", skip(self, input), fields(username = %self.username))]
    async fn execute(&self, input: EstimateStreakUseCaseInput) -> Streak {
        match self.github_api.fetch_events(&self.username).await {
            Ok(events) => {
                let days = streak_from_events(&events, input.now);
                if days > 0 {
                    tracing::debug!("Events streak: {} days", days);
                    return Streak::new(days, StreakSource::Events);
                }
            }
            Err(e) => {
                tracing::warn!("Failed to fetch events, estimating streak from repositories: {}", e);
            }
        }

        let days = streak_from_repositories(&input.repositories, input.now);
        tracing::debug!("Repository streak: {} days", days);
        Streak::new(days, StreakSource::Repositories)
    }
}
