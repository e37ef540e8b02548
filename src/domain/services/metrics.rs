use crate::domain::models::profile::Profile;
use crate::domain::models::repository::Repository;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Repositories updated more recently than this count as active.
const ACTIVE_WINDOW_DAYS: i64 = 90;

/// Lowest contribution count ever reported.
pub const CONTRIBUTION_FLOOR: u64 = 42;

/// Estimated lines of code per API size unit.
const LINES_PER_SIZE_UNIT: u64 = 75;

/// Headline numbers shown in the stats row.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct StatsSummary {
    pub repositories: u64,
    pub followers: u64,
    pub stars: u64,
    pub contributions: u64,
    #[serde(rename = "linesOfCode")]
    pub lines_of_code: u64,
}

impl StatsSummary {
    pub fn compute(profile: &Profile, repositories: &[Repository], now: DateTime<Utc>) -> Self {
        let repository_count = if profile.public_repos > 0 {
            profile.public_repos
        } else {
            repositories.len() as u64
        };

        Self {
            repositories: repository_count,
            followers: profile.followers,
            stars: total_stars(repositories),
            contributions: approximate_contributions(repositories, now),
            lines_of_code: approximate_lines_of_code(repositories),
        }
    }
}

pub fn total_stars(repositories: &[Repository]) -> u64 {
    repositories.iter().map(|repo| repo.stargazers_count).sum()
}

/// Commit-count estimate from repository sizes. Not a measured value.
pub fn approximate_contributions(repositories: &[Repository], now: DateTime<Utc>) -> u64 {
    let total: u64 = repositories
        .iter()
        .map(|repo| {
            if repo.days_since_update(now) < ACTIVE_WINDOW_DAYS {
                repo.size / 100 + 5
            } else {
                repo.size / 500 + 1
            }
        })
        .sum();

    total.max(CONTRIBUTION_FLOOR)
}

pub fn approximate_lines_of_code(repositories: &[Repository]) -> u64 {
    repositories.iter().map(|repo| repo.size).sum::<u64>() * LINES_PER_SIZE_UNIT
}
