use super::format::{detail_size, escape, language_color, long_date};
use crate::domain::external_apis::github::FetchOutcome;
use crate::domain::models::activity::Follower;
use crate::domain::models::repository::{ActivityLevel, Repository};
use chrono::{DateTime, Utc};
use std::fmt::Write;

fn detail_item(icon: &str, label: &str, value: &str) -> String {
    format!(
        r#"<div class="repo-detail-item"><div class="repo-detail-label"><i class="fas {icon}"></i> {label}</div><div class="repo-detail-value">{value}</div></div>"#
    )
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        r#"<span class="warning">Yes</span>"#
    } else {
        r#"<span class="success">No</span>"#
    }
}

fn stat_item(value: u64, label: &str) -> String {
    format!(
        r#"<div class="repo-stat-item"><div class="repo-stat-value">{value}</div><div class="repo-stat-label">{label}</div></div>"#
    )
}

/// Body of the repository detail modal.
pub fn repository_detail(repository: &Repository, now: DateTime<Utc>) -> String {
    let activity = repository.activity_level(now);
    let activity_class = match activity {
        ActivityLevel::High => "success",
        ActivityLevel::Medium => "warning",
        ActivityLevel::Low => "muted",
    };

    let language = format!(
        r#"<span class="language-color" style="background-color: {}"></span>{}"#,
        language_color(repository.language.as_deref()),
        escape(repository.language.as_deref().unwrap_or("Not specified"))
    );

    let mut details = [
        detail_item("fa-code", "Primary Language", &language),
        detail_item("fa-database", "Size", &detail_size(repository.size)),
        detail_item("fa-calendar-plus", "Created", &long_date(repository.created_at)),
        detail_item("fa-calendar-check", "Last Updated", &long_date(repository.updated_at)),
    ]
    .concat();
    if let Some(license) = &repository.license {
        details.push_str(&detail_item("fa-balance-scale", "License", &escape(license)));
    }
    details.push_str(&detail_item(
        "fa-chart-line",
        "Activity Level",
        &format!(r#"<span class="{activity_class}">{}</span>"#, activity.label()),
    ));
    details.push_str(&detail_item(
        "fa-shield-alt",
        "Default Branch",
        &escape(repository.default_branch.as_deref().unwrap_or("main")),
    ));
    details.push_str(&detail_item("fa-archive", "Archived", yes_no(repository.archived)));
    details.push_str(&detail_item("fa-code-fork", "Fork", yes_no(repository.fork)));

    let mut extras = String::new();
    if !repository.topics.is_empty() {
        extras.push_str(r#"<div class="modal-topics"><div class="repo-detail-label"><i class="fas fa-tags"></i> Topics</div>"#);
        for topic in &repository.topics {
            let _ = write!(extras, r#"<span class="modal-topic">{}</span>"#, escape(topic));
        }
        extras.push_str("</div>");
    }
    if let Some(homepage) = &repository.homepage {
        let homepage = escape(homepage);
        let link = format!(r#"<a href="{homepage}" target="_blank" rel="noopener">{homepage}</a>"#);
        extras.push_str(&detail_item("fa-globe", "Homepage", &link));
    }

    format!(
        r#"<div class="repo-details-header">
<h2 class="repo-name-large">{name}</h2>
<span class="repo-visibility-large">{visibility} Repository</span>
</div>
<p class="repo-description">{description}</p>
<div class="repo-stats-grid">{stats}</div>
<div class="repo-details-grid">{details}</div>
{extras}
<div class="modal-actions"><a class="btn" href="{html_url}" target="_blank" rel="noopener"><i class="fab fa-github"></i> View on GitHub</a></div>"#,
        name = escape(&repository.name),
        visibility = if repository.private { "Private" } else { "Public" },
        description = escape(
            repository
                .description
                .as_deref()
                .unwrap_or("No description available for this repository.")
        ),
        stats = [
            stat_item(repository.stargazers_count, "Stars"),
            stat_item(repository.forks_count, "Forks"),
            stat_item(repository.watchers_count, "Watchers"),
            stat_item(repository.open_issues_count, "Open Issues"),
        ]
        .concat(),
        html_url = escape(&repository.html_url),
    )
}

pub fn followers_loading() -> String {
    r#"<div class="loading"><i class="fas fa-spinner fa-spin"></i><p>Loading followers...</p></div>"#
        .to_string()
}

pub fn followers_list(followers: &FetchOutcome<Vec<Follower>>) -> String {
    match followers {
        FetchOutcome::Fallback(_) => {
            r#"<div class="placeholder">Failed to load followers</div>"#.to_string()
        }
        FetchOutcome::Live(list) if list.is_empty() => {
            r#"<div class="placeholder">No followers yet</div>"#.to_string()
        }
        FetchOutcome::Live(list) => list
            .iter()
            .map(|follower| {
                let login = escape(&follower.login);
                format!(
                    r#"<div class="follower-item">
<div class="follower-avatar"><img src="{avatar}" alt="{login}"></div>
<div class="follower-info"><div class="follower-name">{login}</div><div class="follower-username">@{login}</div></div>
<a href="{html_url}" target="_blank" rel="noopener" class="follower-btn"><i class="fas fa-external-link-alt"></i> View</a>
</div>"#,
                    avatar = escape(&follower.avatar_url),
                    html_url = escape(&follower.html_url),
                )
            })
            .collect(),
    }
}
