//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP and retry behavior settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Keyword and recency settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Per-source enable switches
    #[serde(default)]
    pub sources: SourcesConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.http.max_retries == 0 {
            return Err(AppError::validation("http.max_retries must be > 0"));
        }
        if self.search.keywords.is_empty() {
            return Err(AppError::validation("No keywords defined"));
        }
        if self.search.lookback_hours <= 0 {
            return Err(AppError::validation("search.lookback_hours must be > 0"));
        }
        Ok(())
    }
}

/// HTTP client and retry behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Maximum attempts per request
    #[serde(default = "defaults::max_retries")]
    pub max_retries: u32,

    /// Backoff sleep before the first attempt, in milliseconds
    #[serde(default = "defaults::backoff_base")]
    pub backoff_base_ms: u64,

    /// Additional backoff per subsequent attempt, in milliseconds
    #[serde(default = "defaults::backoff_step")]
    pub backoff_step_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_retries: defaults::max_retries(),
            backoff_base_ms: defaults::backoff_base(),
            backoff_step_ms: defaults::backoff_step(),
        }
    }
}

/// Keyword matching and recency window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Keywords matched (case-insensitively) against titles and descriptions
    #[serde(default = "defaults::keywords")]
    pub keywords: Vec<String>,

    /// Location hints passed to sources that support them
    #[serde(default = "defaults::locations")]
    pub locations: Vec<String>,

    /// Trailing window within which a posting must fall, in hours
    #[serde(default = "defaults::lookback_hours")]
    pub lookback_hours: i64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            keywords: defaults::keywords(),
            locations: defaults::locations(),
            lookback_hours: defaults::lookback_hours(),
        }
    }
}

/// Per-source enable switches. Sources that need an API key are also
/// skipped when the key is missing from the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "defaults::enabled")]
    pub weworkremotely: bool,

    #[serde(default = "defaults::enabled")]
    pub remotive: bool,

    #[serde(default = "defaults::enabled")]
    pub arbeitnow: bool,

    #[serde(default = "defaults::enabled")]
    pub reed: bool,

    #[serde(default = "defaults::enabled")]
    pub jooble: bool,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            weworkremotely: true,
            remotive: true,
            arbeitnow: true,
            reed: true,
            jooble: true,
        }
    }
}

mod defaults {
    // Http defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/127.0.0.0 Safari/537.36"
            .into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_retries() -> u32 {
        3
    }
    pub fn backoff_base() -> u64 {
        800
    }
    pub fn backoff_step() -> u64 {
        500
    }

    // Search defaults
    pub fn keywords() -> Vec<String> {
        vec![
            "data analyst".into(),
            "data entry".into(),
            "Python".into(),
            "Excel".into(),
            "Power BI".into(),
            "SQL".into(),
            "junior data analyst".into(),
            "junior data science".into(),
            "data science trainee".into(),
        ]
    }
    pub fn locations() -> Vec<String> {
        vec!["London".into(), "Remote".into()]
    }
    pub fn lookback_hours() -> i64 {
        72
    }

    pub fn enabled() -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.http.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_keywords() {
        let mut config = Config::default();
        config.search.keywords.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_lookback() {
        let mut config = Config::default();
        config.search.lookback_hours = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn parse_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [search]
            keywords = ["rust"]
            lookback_hours = 24

            [sources]
            jooble = false
            "#,
        )
        .unwrap();

        assert_eq!(config.search.keywords, vec!["rust".to_string()]);
        assert_eq!(config.search.lookback_hours, 24);
        assert!(!config.sources.jooble);
        assert!(config.sources.remotive);
        assert_eq!(config.http.max_retries, 3);
    }
}
