use super::format::{escape, language_color, to_fixed};
use crate::domain::services::analytics::{LanguageShare, RepositoryStatistics};

pub fn language_list(languages: &[LanguageShare]) -> String {
    if languages.is_empty() {
        return r#"<div class="placeholder">No language data available</div>"#.to_string();
    }

    languages
        .iter()
        .map(|share| {
            let color = language_color(Some(&share.language));
            format!(
                r#"<div class="language-item">
<div class="language-name"><span class="language-color" style="background-color: {color}"></span><span>{language}</span></div>
<div class="language-bar"><div class="language-fill" style="width: {percentage}%; background: {color}"></div></div>
<span class="language-percentage">{percentage}%</span>
</div>"#,
                language = escape(&share.language),
                percentage = share.percentage,
            )
        })
        .collect()
}

fn statistic(icon: &str, label: &str, value: &str, wide: bool) -> String {
    let class = if wide { "repo-stat-card wide" } else { "repo-stat-card" };
    format!(
        r#"<div class="{class}"><div class="repo-stat-card-label"><i class="fas {icon}"></i><span>{label}</span></div><div class="repo-stat-card-value">{value}</div></div>"#
    )
}

pub fn repository_statistics(statistics: &RepositoryStatistics) -> String {
    // Averages of an empty account read as a bare 0.
    let fixed = |value: f64, digits: u8| {
        if statistics.total == 0 {
            "0".to_string()
        } else {
            to_fixed(value, digits)
        }
    };

    let cards = [
        statistic("fa-code-branch", "Total Repos", &statistics.total.to_string(), false),
        statistic(
            "fa-star",
            "Avg Stars",
            &fixed(statistics.average_stars, 1),
            false,
        ),
        statistic(
            "fa-code-branch",
            "Avg Forks",
            &fixed(statistics.average_forks, 1),
            false,
        ),
        statistic(
            "fa-database",
            "Avg Size",
            &format!("{} KB", fixed(statistics.average_size, 0)),
            false,
        ),
        statistic(
            "fa-exclamation-circle",
            "Total Open Issues",
            &statistics.open_issues.to_string(),
            true,
        ),
    ]
    .concat();

    format!(r#"<div class="repo-stat-cards">{cards}</div>"#)
}
