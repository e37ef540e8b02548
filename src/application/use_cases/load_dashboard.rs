use crate::domain::external_apis::github::{FetchOutcome, GitHubApi, MAX_REPOSITORIES_PER_PAGE};
use crate::domain::models::profile::Profile;
use crate::domain::models::repository::Repository;
use crate::domain::services::analytics::Analytics;
use crate::domain::services::metrics::StatsSummary;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct LoadDashboardUseCaseInput {
    pub now: DateTime<Utc>,
}

impl Default for LoadDashboardUseCaseInput {
    fn default() -> Self {
        Self { now: Utc::now() }
    }
}

/// Everything the first render needs. Profile and repositories are always
/// present, either live or as fallbacks.
#[derive(Debug, Clone)]
pub struct LoadDashboardUseCaseOutput {
    pub profile: FetchOutcome<Profile>,
    pub repositories: FetchOutcome<Arc<[Repository]>>,
    pub stats: StatsSummary,
    pub analytics: Analytics,
}

#[async_trait]
pub trait LoadDashboardUseCase {
    async fn execute(&self, input: LoadDashboardUseCaseInput) -> LoadDashboardUseCaseOutput;
}

pub struct LoadDashboardInteractor<G: GitHubApi + Send + Sync + 'static> {
    github_api: Arc<G>,
    username: String,
}

impl<G: GitHubApi + Send + Sync + 'static> LoadDashboardInteractor<G> {
    pub fn new(github_api: Arc<G>, username: String) -> Self {
        Self {
            github_api,
            username,
        }
    }
}

#[async_trait]
impl<G: GitHubApi + Send + Sync + 'static> LoadDashboardUseCase for LoadDashboardInteractor<G> {
    #[tracing::instrument(name = "LoadDashboardInteractor::execute", skip(self, input), fields(username = %self.username))]
    async fn execute(&self, input: LoadDashboardUseCaseInput) -> LoadDashboardUseCaseOutput {
        // Profile first, then repositories; neither failure stops the other.
        tracing::info!("Fetching profile...");
        let profile = self.github_api.fetch_profile(&self.username).await;
        if let Err(e) = &profile {
            tracing::warn!("Falling back to placeholder profile: {}", e);
        }
        let profile = FetchOutcome::from_result(profile, || Profile::fallback(&self.username));

        tracing::info!("Fetching repositories...");
        let repositories = self
            .github_api
            .fetch_repositories(&self.username, MAX_REPOSITORIES_PER_PAGE)
            .await;
        match &repositories {
            Ok(repos) => tracing::info!("Fetched {} repositories", repos.len()),
            Err(e) => tracing::warn!("Falling back to an empty repository list: {}", e),
        }
        let repositories =
            FetchOutcome::from_result(repositories, Vec::new).map(Arc::<[Repository]>::from);

        let stats = StatsSummary::compute(profile.value(), repositories.value(), input.now);
        let analytics = Analytics::compute(repositories.value());

        LoadDashboardUseCaseOutput {
            profile,
            repositories,
            stats,
            analytics,
        }
    }
}
