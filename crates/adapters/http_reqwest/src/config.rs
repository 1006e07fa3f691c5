//! Backend connection configuration.

use serde::Deserialize;

/// Where the backend lives.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Base URL of the backend API, e.g. `https://garden.example.com`.
    /// A path prefix is kept: `https://host/api` resolves `schedule/` to
    /// `https://host/api/schedule/`.
    pub base_url: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_local_backend() {
        assert_eq!(HttpConfig::default().base_url, "http://localhost:8000");
    }

    #[test]
    fn should_deserialize_from_toml() {
        let config: HttpConfig = toml::from_str(r#"base_url = "https://garden.example.com""#).unwrap();
        assert_eq!(config.base_url, "https://garden.example.com");
    }

    #[test]
    fn should_use_defaults_for_missing_fields() {
        let config: HttpConfig = toml::from_str("").unwrap();
        assert_eq!(config.base_url, "http://localhost:8000");
    }
}
