use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display name used when the profile could not be fetched.
pub const FALLBACK_NAME: &str = "Musfiqur Jahin";

/// Bio used when the profile could not be fetched.
pub const FALLBACK_BIO: &str = "Software Developer | GitHub Enthusiast | Passionate about creating impactful solutions with modern technologies";

/// Location used when the profile could not be fetched.
pub const FALLBACK_LOCATION: &str = "Bangladesh";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub login: String,
    pub name: Option<String>,
    #[serde(rename = "avatarUrl")]
    pub avatar_url: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub blog: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "publicRepos")]
    pub public_repos: u64,
    pub followers: u64,
    #[serde(rename = "htmlUrl")]
    pub html_url: String,
}

impl Profile {
    /// Static stand-in rendered when `/users/{login}` fails.
    pub fn fallback(login: &str) -> Self {
        Self {
            login: login.to_string(),
            name: Some(FALLBACK_NAME.to_string()),
            avatar_url: default_avatar_url(login),
            bio: Some(FALLBACK_BIO.to_string()),
            location: Some(FALLBACK_LOCATION.to_string()),
            blog: None,
            created_at: DateTime::parse_from_rfc3339("2020-01-01T00:00:00Z")
                .ok()
                .map(|created| created.with_timezone(&Utc)),
            public_repos: 0,
            followers: 0,
            html_url: profile_url(login),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.login)
    }

    /// Website link with a scheme, if the user set one.
    pub fn website_url(&self) -> Option<String> {
        let blog = self.blog.as_deref().map(str::trim).filter(|b| !b.is_empty())?;
        if blog.starts_with("http") {
            Some(blog.to_string())
        } else {
            Some(format!("https://{blog}"))
        }
    }
}

pub fn default_avatar_url(login: &str) -> String {
    format!("https://github.com/{login}.png")
}

pub fn profile_url(login: &str) -> String {
    format!("https://github.com/{login}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_uses_placeholder_fields() {
        let profile = Profile::fallback("octocat");

        assert_eq!(profile.login, "octocat");
        assert_eq!(profile.display_name(), FALLBACK_NAME);
        assert_eq!(profile.bio.as_deref(), Some(FALLBACK_BIO));
        assert_eq!(profile.location.as_deref(), Some(FALLBACK_LOCATION));
        assert_eq!(profile.avatar_url, "https://github.com/octocat.png");
        assert_eq!(profile.public_repos, 0);
        assert!(profile.created_at.is_some());
    }

    #[test]
    fn test_display_name_falls_back_to_login() {
        let mut profile = Profile::fallback("octocat");
        profile.name = None;
        assert_eq!(profile.display_name(), "octocat");

        profile.name = Some(String::new());
        assert_eq!(profile.display_name(), "octocat");
    }

    #[test]
    fn test_website_url_gets_a_scheme() {
        let mut profile = Profile::fallback("octocat");
        assert_eq!(profile.website_url(), None);

        profile.blog = Some("example.dev".to_string());
        assert_eq!(profile.website_url().as_deref(), Some("https://example.dev"));

        profile.blog = Some("http://example.dev".to_string());
        assert_eq!(profile.website_url().as_deref(), Some("http://example.dev"));
    }
}
