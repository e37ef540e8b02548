use super::format::escape;
use super::repositories::error_state;
use chrono::{DateTime, Datelike, Utc};

const SHELL: &str = include_str!("../../../../../assets/index.html");

/// Static page shell. The session socket fills it in after load.
pub fn shell(username: &str, now: DateTime<Utc>) -> String {
    SHELL
        .replace("{{username}}", &escape(username))
        .replace("{{year}}", &now.year().to_string())
        .replace(
            "{{connection_error}}",
            &error_state("Failed to load data. Please check your connection."),
        )
}
