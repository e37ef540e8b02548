use std::net::SocketAddr;

const DEFAULT_USERNAME: &str = "musfiqurjahin";
const DEFAULT_API_URL: &str = "https://api.github.com";
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must not be empty")]
    Empty { name: &'static str },

    #[error("{name} is not a valid socket address: {value}")]
    InvalidAddress { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// GitHub login the dashboard shows.
    pub username: String,
    pub github_api_url: String,
    pub listen_addr: SocketAddr,
    /// OTLP collector endpoint; span export is off when unset.
    pub otlp_endpoint: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let username = lookup("DASHBOARD_USER").unwrap_or_else(|| DEFAULT_USERNAME.to_string());
        if username.trim().is_empty() {
            return Err(ConfigError::Empty {
                name: "DASHBOARD_USER",
            });
        }

        let github_api_url = lookup("GITHUB_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if github_api_url.trim().is_empty() {
            return Err(ConfigError::Empty {
                name: "GITHUB_API_URL",
            });
        }

        let addr = lookup("DASHBOARD_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let listen_addr = addr
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidAddress {
                name: "DASHBOARD_ADDR",
                value: addr.clone(),
            })?;

        let otlp_endpoint = lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|v| !v.trim().is_empty());

        Ok(Self {
            username: username.trim().to_string(),
            github_api_url,
            listen_addr,
            otlp_endpoint,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() -> Result<(), ConfigError> {
        let config = Config::from_lookup(lookup(&[]))?;

        assert_eq!(config.username, "musfiqurjahin");
        assert_eq!(config.github_api_url, "https://api.github.com");
        assert_eq!(config.listen_addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert_eq!(config.otlp_endpoint, None);
        Ok(())
    }

    #[test]
    fn test_overrides() -> Result<(), ConfigError> {
        let config = Config::from_lookup(lookup(&[
            ("DASHBOARD_USER", " octocat "),
            ("GITHUB_API_URL", "http://localhost:8080"),
            ("DASHBOARD_ADDR", "0.0.0.0:8000"),
            ("OTEL_EXPORTER_OTLP_ENDPOINT", "http://collector:4317"),
        ]))?;

        assert_eq!(config.username, "octocat");
        assert_eq!(config.github_api_url, "http://localhost:8080");
        assert_eq!(config.listen_addr.port(), 8000);
        assert_eq!(config.otlp_endpoint.as_deref(), Some("http://collector:4317"));
        Ok(())
    }

    #[test]
    fn test_invalid_values() {
        let result = Config::from_lookup(lookup(&[("DASHBOARD_ADDR", "not-an-address")]));
        assert!(matches!(result, Err(ConfigError::InvalidAddress { .. })));

        let result = Config::from_lookup(lookup(&[("DASHBOARD_USER", "  ")]));
        assert!(matches!(result, Err(ConfigError::Empty { name: "DASHBOARD_USER" })));
    }
}
