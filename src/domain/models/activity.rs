use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event kinds from the public events feed that count as a contribution day.
pub const CONTRIBUTION_EVENT_KINDS: [&str; 4] =
    ["PushEvent", "CreateEvent", "PullRequestEvent", "IssuesEvent"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub kind: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl ActivityEvent {
    pub fn is_contribution(&self) -> bool {
        CONTRIBUTION_EVENT_KINDS.contains(&self.kind.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Follower {
    pub login: String,
    #[serde(rename = "avatarUrl")]
    pub avatar_url: String,
    #[serde(rename = "htmlUrl")]
    pub html_url: String,
}
