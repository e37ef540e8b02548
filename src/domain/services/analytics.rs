use crate::domain::models::repository::Repository;
use serde::Serialize;

/// Languages shown in the breakdown.
const TOP_LANGUAGES: usize = 5;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LanguageShare {
    pub language: String,
    pub repositories: usize,
    /// Share of all repositories, including those without a language.
    pub percentage: u32,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RepositoryStatistics {
    pub total: usize,
    #[serde(rename = "averageStars")]
    pub average_stars: f64,
    #[serde(rename = "averageForks")]
    pub average_forks: f64,
    #[serde(rename = "averageSize")]
    pub average_size: f64,
    #[serde(rename = "openIssues")]
    pub open_issues: u64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Analytics {
    pub languages: Vec<LanguageShare>,
    pub statistics: RepositoryStatistics,
}

impl Analytics {
    pub fn compute(repositories: &[Repository]) -> Self {
        Self {
            languages: language_breakdown(repositories),
            statistics: repository_statistics(repositories),
        }
    }
}

/// Most common primary languages, most frequent first. Ties keep first-seen order.
pub fn language_breakdown(repositories: &[Repository]) -> Vec<LanguageShare> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for language in repositories.iter().filter_map(|repo| repo.language.as_deref()) {
        match counts.iter_mut().find(|(seen, _)| *seen == language) {
            Some((_, count)) => *count += 1,
            None => counts.push((language, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let total = repositories.len() as f64;
    counts
        .into_iter()
        .take(TOP_LANGUAGES)
        .map(|(language, count)| LanguageShare {
            language: language.to_string(),
            repositories: count,
            percentage: (count as f64 / total * 100.0).round() as u32,
        })
        .collect()
}

pub fn repository_statistics(repositories: &[Repository]) -> RepositoryStatistics {
    let average = |value: fn(&Repository) -> u64| -> f64 {
        if repositories.is_empty() {
            0.0
        } else {
            repositories.iter().map(value).sum::<u64>() as f64 / repositories.len() as f64
        }
    };

    RepositoryStatistics {
        total: repositories.len(),
        average_stars: average(|repo| repo.stargazers_count),
        average_forks: average(|repo| repo.forks_count),
        average_size: average(|repo| repo.size),
        open_issues: repositories.iter().map(|repo| repo.open_issues_count).sum(),
    }
}
