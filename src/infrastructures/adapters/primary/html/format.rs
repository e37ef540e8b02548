use chrono::{DateTime, Utc};

/// Color for repositories without a known language.
pub const FALLBACK_LANGUAGE_COLOR: &str = "#8b5cf6";

const LANGUAGE_COLORS: [(&str, &str); 15] = [
    ("JavaScript", "#f1e05a"),
    ("TypeScript", "#2b7489"),
    ("Python", "#3572A5"),
    ("Java", "#b07219"),
    ("C++", "#f34b7d"),
    ("C#", "#178600"),
    ("PHP", "#4F5D95"),
    ("Ruby", "#701516"),
    ("CSS", "#563d7c"),
    ("HTML", "#e34c26"),
    ("Go", "#00ADD8"),
    ("Shell", "#89e051"),
    ("Vue", "#2c3e50"),
    ("React", "#61dafb"),
    ("Swift", "#ffac45"),
];

const DESCRIPTION_LIMIT: usize = 120;

pub fn language_color(language: Option<&str>) -> &'static str {
    language
        .and_then(|language| {
            LANGUAGE_COLORS
                .iter()
                .find(|(name, _)| *name == language)
                .map(|(_, color)| *color)
        })
        .unwrap_or(FALLBACK_LANGUAGE_COLOR)
}

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// `1234567` → `1,234,567`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Rounds to one decimal and drops a trailing `.0`.
/// Formats `value` with exactly `digits` decimals, breaking ties upward
/// (`2.25` → `2.3`, `0.5` → `1`).
pub fn to_fixed(value: f64, digits: u8) -> String {
    let scale = 10f64.powi(i32::from(digits));
    let rounded = (value * scale).round() / scale;
    format!("{rounded:.precision$}", precision = usize::from(digits))
}

fn one_decimal(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

/// Update label for repository cards.
pub fn relative_updated(updated_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (now - updated_at).num_days().abs();
    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{days} days ago"),
        7..=29 => format!("{} weeks ago", days / 7),
        _ => short_date(updated_at),
    }
}

/// `Sep 7`
pub fn short_date(date: DateTime<Utc>) -> String {
    date.format("%b %-d").to_string()
}

/// `Monday, January 1, 2024`
pub fn long_date(date: DateTime<Utc>) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// `January 2020`
pub fn month_year(date: DateTime<Utc>) -> String {
    date.format("%B %Y").to_string()
}

/// Size shown on repository cards, from the API's kilobyte count.
pub fn card_size(size: u64) -> String {
    let kilobytes = ((size as f64 / 1024.0) * 10.0).round() / 10.0;
    if kilobytes > 1024.0 {
        format!("{} MB", one_decimal(kilobytes / 1024.0))
    } else {
        format!("{} KB", one_decimal(kilobytes))
    }
}

/// Size shown in the repository detail view.
pub fn detail_size(size: u64) -> String {
    if size > 1024 {
        format!("{} MB", to_fixed(size as f64 / 1024.0, 2))
    } else {
        format!("{size} KB")
    }
}

pub fn truncate_description(description: Option<&str>) -> String {
    match description {
        Some(text) if text.chars().count() > DESCRIPTION_LIMIT => {
            let truncated: String = text.chars().take(DESCRIPTION_LIMIT).collect();
            format!("{truncated}...")
        }
        Some(text) => text.to_string(),
        None => "No description provided".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).single().unwrap_or_default()
    }

    #[test]
    fn test_relative_updated_buckets() {
        assert_eq!(relative_updated(now(), now()), "Today");
        assert_eq!(relative_updated(now() - Duration::hours(23), now()), "Today");
        assert_eq!(relative_updated(now() - Duration::days(1), now()), "Yesterday");
        assert_eq!(relative_updated(now() - Duration::days(5), now()), "5 days ago");
        assert_eq!(relative_updated(now() - Duration::days(10), now()), "1 weeks ago");
        assert_eq!(relative_updated(now() - Duration::days(29), now()), "4 weeks ago");
        assert_eq!(relative_updated(now() - Duration::days(40), now()), "May 6");
    }

    #[test]
    fn test_dates() {
        assert_eq!(long_date(now()), "Saturday, June 15, 2024");
        assert_eq!(month_year(now()), "June 2024");
        assert_eq!(short_date(now()), "Jun 15");
    }

    #[test]
    fn test_card_size() {
        assert_eq!(card_size(0), "0 KB");
        assert_eq!(card_size(512), "0.5 KB");
        assert_eq!(card_size(1024), "1 KB");
        assert_eq!(card_size(108), "0.1 KB");
        assert_eq!(card_size(2 * 1024 * 1024), "2 MB");
    }

    #[test]
    fn test_detail_size() {
        assert_eq!(detail_size(108), "108 KB");
        assert_eq!(detail_size(1024), "1024 KB");
        assert_eq!(detail_size(1536), "1.50 MB");
        assert_eq!(detail_size(1152), "1.13 MB");
    }

    #[test]
    fn test_to_fixed_rounds_ties_up() {
        assert_eq!(to_fixed(2.25, 1), "2.3");
        assert_eq!(to_fixed(0.5, 0), "1");
        assert_eq!(to_fixed(1.125, 2), "1.13");
        assert_eq!(to_fixed(2.24, 1), "2.2");
        assert_eq!(to_fixed(0.0, 1), "0.0");
        assert_eq!(to_fixed(1500.4, 0), "1500");
    }

    #[test]
    fn test_language_colors() {
        assert_eq!(language_color(Some("Go")), "#00ADD8");
        assert_eq!(language_color(Some("Rust")), FALLBACK_LANGUAGE_COLOR);
        assert_eq!(language_color(None), FALLBACK_LANGUAGE_COLOR);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(92_550), "92,550");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_escape_and_truncate() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
        assert_eq!(truncate_description(None), "No description provided");
        assert_eq!(truncate_description(Some("short")), "short");

        let long = "x".repeat(130);
        let truncated = truncate_description(Some(&long));
        assert_eq!(truncated.len(), 123);
        assert!(truncated.ends_with("..."));
    }
}
