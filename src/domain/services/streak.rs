use crate::domain::models::activity::ActivityEvent;
use crate::domain::models::repository::Repository;
use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::Serialize;
use std::collections::HashSet;

/// Lookback window for the events feed walk.
const EVENTS_LOOKBACK_DAYS: u32 = 365;

/// Lookback window for the repository timestamp walk.
const REPOSITORIES_LOOKBACK_DAYS: u32 = 30;

/// Only the most recently updated repositories feed the fallback walk.
const RECENT_REPOSITORIES: usize = 20;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StreakTier {
    Inactive,
    Light,
    Moderate,
    Strong,
}

impl StreakTier {
    pub fn for_days(days: u32) -> Self {
        match days {
            0 => StreakTier::Inactive,
            1..=2 => StreakTier::Light,
            3..=6 => StreakTier::Moderate,
            _ => StreakTier::Strong,
        }
    }
}

/// Where a streak estimate came from.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StreakSource {
    Events,
    Repositories,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Streak {
    pub days: u32,
    pub tier: StreakTier,
    pub source: StreakSource,
}

impl Streak {
    pub fn new(days: u32, source: StreakSource) -> Self {
        Self {
            days,
            tier: StreakTier::for_days(days),
            source,
        }
    }
}

/// Consecutive contribution days from the public events feed.
pub fn streak_from_events(events: &[ActivityEvent], now: DateTime<Utc>) -> u32 {
    let days: HashSet<NaiveDate> = events
        .iter()
        .filter(|event| event.is_contribution())
        .map(|event| event.created_at.date_naive())
        .collect();

    consecutive_days(&days, now.date_naive(), EVENTS_LOOKBACK_DAYS)
}

/// Consecutive days with a repository update, over the most recently updated repositories.
pub fn streak_from_repositories(repositories: &[Repository], now: DateTime<Utc>) -> u32 {
    let mut recent: Vec<&Repository> = repositories.iter().collect();
    recent.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

    let days: HashSet<NaiveDate> = recent
        .into_iter()
        .take(RECENT_REPOSITORIES)
        .map(|repo| repo.updated_at.date_naive())
        .collect();

    consecutive_days(&days, now.date_naive(), REPOSITORIES_LOOKBACK_DAYS)
}

/// Walks back from `today` counting days present in `days`, inspecting at
/// most `lookback` calendar days. A missing `today` does not end the streak.
fn consecutive_days(days: &HashSet<NaiveDate>, today: NaiveDate, lookback: u32) -> u32 {
    let mut streak = 0;

    for offset in 0..lookback {
        let Some(day) = today.checked_sub_days(Days::new(u64::from(offset))) else {
            break;
        };

        if days.contains(&day) {
            streak += 1;
        } else if offset > 0 {
            break;
        }
    }

    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::repository::fixtures::repository;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 18, 30, 0).single().unwrap_or_default()
    }

    fn event(kind: &str, days_ago: i64) -> ActivityEvent {
        ActivityEvent {
            kind: kind.to_string(),
            created_at: now() - Duration::days(days_ago),
        }
    }

    #[test]
    fn test_tiers() {
        assert_eq!(StreakTier::for_days(0), StreakTier::Inactive);
        assert_eq!(StreakTier::for_days(2), StreakTier::Light);
        assert_eq!(StreakTier::for_days(3), StreakTier::Moderate);
        assert_eq!(StreakTier::for_days(6), StreakTier::Moderate);
        assert_eq!(StreakTier::for_days(7), StreakTier::Strong);
    }

    #[test]
    fn test_events_streak_counts_consecutive_days_ending_today() {
        for k in 1..=10 {
            let events: Vec<ActivityEvent> = (0..k).map(|d| event("PushEvent", d)).collect();
            assert_eq!(streak_from_events(&events, now()), u32::try_from(k).unwrap_or(0));
        }
    }

    #[test]
    fn test_events_streak_zero_without_contributions() {
        assert_eq!(streak_from_events(&[], now()), 0);

        let events = vec![event("WatchEvent", 0), event("ForkEvent", 1)];
        assert_eq!(streak_from_events(&events, now()), 0);
    }

    #[test]
    fn test_events_streak_tolerates_quiet_today() {
        let events = vec![
            event("CreateEvent", 1),
            event("PullRequestEvent", 2),
            event("IssuesEvent", 3),
        ];
        assert_eq!(streak_from_events(&events, now()), 3);
    }

    #[test]
    fn test_events_streak_stops_at_gap() {
        let events = vec![
            event("PushEvent", 0),
            event("PushEvent", 0),
            event("PushEvent", 1),
            event("PushEvent", 3),
        ];
        assert_eq!(streak_from_events(&events, now()), 2);
    }

    #[test]
    fn test_repositories_streak_uses_recent_updates() {
        let repos: Vec<Repository> = (0..4)
            .map(|d| repository(&format!("r{d}"), now() - Duration::days(d)))
            .collect();
        assert_eq!(streak_from_repositories(&repos, now()), 4);
        assert_eq!(streak_from_repositories(&[], now()), 0);
    }

    #[test]
    fn test_repositories_streak_is_bounded_by_window() {
        let repos: Vec<Repository> = (0..20)
            .flat_map(|d| {
                let day = now() - Duration::days(d * 2);
                [repository("a", day), repository("b", day - Duration::days(1))]
            })
            .collect();
        // 40 consecutive days, but only 20 repositories are considered.
        assert_eq!(streak_from_repositories(&repos, now()), 20);
    }
}
