use super::format::{escape, group_thousands, month_year};
use crate::domain::models::profile::Profile;
use crate::domain::services::metrics::StatsSummary;
use crate::domain::services::streak::{Streak, StreakTier};

pub fn profile_card(profile: &Profile) -> String {
    let name = escape(profile.display_name());
    let login = escape(&profile.login);
    let bio = escape(profile.bio.as_deref().unwrap_or("No bio available"));
    let location = escape(profile.location.as_deref().unwrap_or("Location not set"));

    let website = match profile.website_url() {
        Some(url) => format!(
            r#"<i class="fas fa-link"></i><a href="{}" target="_blank" rel="noopener">Website</a>"#,
            escape(&url)
        ),
        None => r#"<i class="fas fa-link"></i><span>No website</span>"#.to_string(),
    };

    let joined = profile
        .created_at
        .map(|created| {
            format!(
                r#"<div class="profile-meta-item"><i class="fas fa-calendar-alt"></i><span>Joined {}</span></div>"#,
                month_year(created)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<div class="avatar"><img src="{avatar}" alt="{name}"></div>
<h1 class="profile-name">{name}</h1>
<div class="profile-username"><i class="fab fa-github"></i><span>@{login}</span></div>
<p class="profile-bio">{bio}</p>
<div class="profile-meta">
<div class="profile-meta-item"><i class="fas fa-map-marker-alt"></i><span>{location}</span></div>
<div class="profile-meta-item">{website}</div>
{joined}
</div>
<a class="follow-btn" href="{html_url}" target="_blank" rel="noopener"><i class="fab fa-github"></i> Follow</a>"#,
        avatar = escape(&profile.avatar_url),
        html_url = escape(&profile.html_url),
    )
}

fn stat(id: &str, icon: &str, value: &str, label: &str) -> String {
    format!(
        r#"<div class="stat" id="{id}"><i class="fas {icon}"></i><div class="stat-value">{value}</div><div class="stat-label">{label}</div></div>"#
    )
}

pub fn stats_row(stats: &StatsSummary) -> String {
    [
        stat("repos-stat", "fa-code-branch", &stats.repositories.to_string(), "Repositories"),
        stat("followers-stat", "fa-users", &stats.followers.to_string(), "Followers"),
        stat("stars-stat", "fa-star", &stats.stars.to_string(), "Total Stars"),
        stat(
            "contributions-stat",
            "fa-code-commit",
            &stats.contributions.to_string(),
            "Contributions",
        ),
        stat(
            "lines-stat",
            "fa-file-code",
            &group_thousands(stats.lines_of_code),
            "Lines of Code",
        ),
    ]
    .concat()
}

pub fn streak_badge(streak: &Streak) -> String {
    let days = streak.days;
    let (class, icon, text) = match streak.tier {
        StreakTier::Strong => ("strong", "fa-fire", format!("{days} day streak!")),
        StreakTier::Moderate => ("moderate", "fa-bolt", format!("{days} day streak")),
        StreakTier::Light => ("light", "fa-bolt", format!("{days} day streak")),
        StreakTier::Inactive => ("inactive", "fa-bolt", "Start coding!".to_string()),
    };

    format!(
        r#"<div class="streak-value">{days}</div><div class="streak-badge {class}"><i class="fas {icon}"></i><span>{text}</span></div>"#
    )
}
