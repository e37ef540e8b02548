use super::format::{card_size, escape, language_color, relative_updated, truncate_description};
use crate::domain::models::repository::Repository;
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Topics shown on a card before collapsing into `+N`.
const CARD_TOPICS: usize = 3;

fn topics(repository: &Repository) -> String {
    if repository.topics.is_empty() {
        return String::new();
    }

    let mut html = String::from(r#"<div class="repo-topics">"#);
    for topic in repository.topics.iter().take(CARD_TOPICS) {
        let _ = write!(html, r#"<span class="repo-topic">{}</span>"#, escape(topic));
    }
    if repository.topics.len() > CARD_TOPICS {
        let _ = write!(
            html,
            r#"<span class="repo-topic">+{}</span>"#,
            repository.topics.len() - CARD_TOPICS
        );
    }
    html.push_str("</div>");
    html
}

fn meta_item(title: &str, icon: &str, value: &str) -> String {
    format!(
        r#"<div class="repo-meta-item" title="{title}"><i class="fas {icon}"></i><span>{value}</span></div>"#
    )
}

/// One clickable card; `position` is its index in the filtered view.
pub fn repository_card(repository: &Repository, position: usize, now: DateTime<Utc>) -> String {
    let mut meta = meta_item(
        "Last Updated",
        "fa-calendar",
        &relative_updated(repository.updated_at, now),
    );
    meta.push_str(&meta_item("Repository Size", "fa-database", &card_size(repository.size)));
    if let Some(license) = &repository.license {
        meta.push_str(&meta_item("License", "fa-balance-scale", &escape(license)));
    }
    if repository.open_issues_count > 0 {
        meta.push_str(&meta_item(
            "Open Issues",
            "fa-exclamation-circle",
            &repository.open_issues_count.to_string(),
        ));
    }

    let language = match repository.language.as_deref() {
        Some(language) => format!(
            r#"<div class="language-color" style="background-color: {}"></div><span>{}</span>"#,
            language_color(Some(language)),
            escape(language)
        ),
        None => r#"<span class="muted">No language Specified</span>"#.to_string(),
    };

    format!(
        r#"<div class="repo-card" data-position="{position}">
<div class="repo-header"><div class="repo-name">{name}</div><span class="repo-visibility">{visibility}</span></div>
<p class="repo-desc">{description}</p>
{topics}
<div class="repo-meta">{meta}</div>
<div class="repo-footer">
<div class="repo-language">{language}</div>
<div class="repo-stats">
<div class="repo-stat" title="Stars"><i class="fas fa-star"></i><span>{stars}</span></div>
<div class="repo-stat" title="Forks"><i class="fas fa-code-branch"></i><span>{forks}</span></div>
<div class="repo-stat" title="Watchers"><i class="fas fa-eye"></i><span>{watchers}</span></div>
</div>
</div>
</div>"#,
        name = escape(&repository.name),
        visibility = if repository.private { "Private" } else { "Public" },
        description = escape(&truncate_description(repository.description.as_deref())),
        topics = topics(repository),
        stars = repository.stargazers_count,
        forks = repository.forks_count,
        watchers = repository.watchers_count,
    )
}

/// Cards for consecutive positions of the filtered view starting at `first_position`.
pub fn repository_cards(
    repositories: &[Repository],
    first_position: usize,
    now: DateTime<Utc>,
) -> String {
    repositories
        .iter()
        .enumerate()
        .map(|(offset, repository)| repository_card(repository, first_position + offset, now))
        .collect()
}

pub fn empty_state() -> String {
    r#"<div class="error-state">
<i class="fas fa-exclamation-triangle"></i>
<h3>No repositories found</h3>
<p>Could not load repositories</p>
<button class="retry-btn" data-action="reload"><i class="fas fa-redo"></i> Retry</button>
</div>"#
        .to_string()
}

pub fn error_state(message: &str) -> String {
    format!(
        r#"<div class="error-state">
<i class="fas fa-exclamation-triangle"></i>
<h3>Something went wrong</h3>
<p>{}</p>
<button class="retry-btn" data-action="reload"><i class="fas fa-redo"></i> Retry</button>
</div>"#,
        escape(message)
    )
}
