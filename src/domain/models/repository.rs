use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(rename = "stargazersCount")]
    pub stargazers_count: u64,
    #[serde(rename = "forksCount")]
    pub forks_count: u64,
    #[serde(rename = "watchersCount")]
    pub watchers_count: u64,
    #[serde(rename = "openIssuesCount")]
    pub open_issues_count: u64,
    /// Size as reported by the API (kilobytes).
    pub size: u64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    pub license: Option<String>,
    pub topics: Vec<String>,
    pub private: bool,
    pub archived: bool,
    pub fork: bool,
    pub homepage: Option<String>,
    #[serde(rename = "defaultBranch")]
    pub default_branch: Option<String>,
    #[serde(rename = "htmlUrl")]
    pub html_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityLevel {
    High,
    Medium,
    Low,
}

impl ActivityLevel {
    pub fn label(self) -> &'static str {
        match self {
            ActivityLevel::High => "High",
            ActivityLevel::Medium => "Medium",
            ActivityLevel::Low => "Low",
        }
    }
}

impl Repository {
    /// Whole days elapsed since the last update. Future timestamps count as zero.
    pub fn days_since_update(&self, now: DateTime<Utc>) -> i64 {
        (now - self.updated_at).num_days().max(0)
    }

    pub fn activity_level(&self, now: DateTime<Utc>) -> ActivityLevel {
        match self.days_since_update(now) {
            days if days < 7 => ActivityLevel::High,
            days if days < 30 => ActivityLevel::Medium,
            _ => ActivityLevel::Low,
        }
    }

    /// Case-insensitive substring match on name, description and topics.
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|description| description.to_lowercase().contains(needle))
            || self
                .topics
                .iter()
                .any(|topic| topic.to_lowercase().contains(needle))
    }
}
