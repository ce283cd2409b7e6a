//! Configuration management for routefind.
//!
//! Settings come from an optional TOML file, then environment overrides,
//! then (in the CLI) command-line flags.
//!
//! ## Configuration Sources
//!
//! 1. **Config file**: `$ROUTEFIND_CONFIG`, or `config.toml` in the platform
//!    config directory (for example `~/.config/routefind/config.toml` on Linux).
//!    A missing file means defaults.
//! 2. **Environment variables**: `ROUTEFIND_API_KEY` (falling back to
//!    `SCRAPINGBEE_API_KEY`) and `ROUTEFIND_SEARCH_ENDPOINT`.
//!
//! ## Example Configuration File
//!
//! ```toml
//! api_key = "YOUR_KEY"
//!
//! [search]
//! endpoint = "https://app.scrapingbee.com/api/v1/store/google"
//! num_results = 30
//! language = "en"
//! timeout_secs = 30
//!
//! [display]
//! page_size = 10
//! theme = "system"
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Default provider endpoint (ScrapingBee's Google search store).
pub const DEFAULT_ENDPOINT: &str = "https://app.scrapingbee.com/api/v1/store/google";
/// Default number of results requested per search.
pub const DEFAULT_NUM_RESULTS: u32 = 30;
/// Largest result count the provider accepts per request.
pub const MAX_NUM_RESULTS: u32 = 100;
/// Default result language.
pub const DEFAULT_LANGUAGE: &str = "en";
/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Default number of route cards per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "ROUTEFIND_CONFIG";
/// Primary API key variable.
pub const API_KEY_ENV: &str = "ROUTEFIND_API_KEY";
/// Fallback API key variable, matching the provider's own naming.
pub const FALLBACK_API_KEY_ENV: &str = "SCRAPINGBEE_API_KEY";
/// Endpoint override, mainly for pointing at a mock provider.
pub const ENDPOINT_ENV: &str = "ROUTEFIND_SEARCH_ENDPOINT";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Provider API key. Absence is only an error once a search is submitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Search provider settings.
    pub search: SearchConfig,
    /// Presentation settings.
    pub display: DisplayConfig,
}

/// Search provider settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Provider endpoint URL.
    pub endpoint: String,
    /// Results requested per search.
    pub num_results: u32,
    /// Result language code.
    pub language: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            num_results: DEFAULT_NUM_RESULTS,
            language: DEFAULT_LANGUAGE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl SearchConfig {
    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Presentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Route cards per page.
    pub page_size: usize,
    /// Color theme.
    pub theme: Theme,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            theme: Theme::System,
        }
    }
}

/// Color theme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Palette tuned for light terminal backgrounds.
    Light,
    /// Palette tuned for dark terminal backgrounds.
    Dark,
    /// Follow the terminal's reported background.
    #[default]
    System,
}

impl Theme {
    /// Resolve `System` against a `COLORFGBG`-style value (`"15;0"`).
    ///
    /// The last field is the background color index; 7 and 15 are the light
    /// greys/white, everything else counts as dark. Without a hint the
    /// result is `Dark`.
    #[must_use]
    pub fn resolve(self, colorfgbg: Option<&str>) -> Self {
        match self {
            Self::Light | Self::Dark => self,
            Self::System => {
                let background = colorfgbg
                    .and_then(|v| v.rsplit(';').next())
                    .and_then(|bg| bg.trim().parse::<u8>().ok());
                match background {
                    Some(7 | 15) => Self::Light,
                    _ => Self::Dark,
                }
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        })
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" | "auto" => Ok(Self::System),
            other => Err(Error::Config(format!(
                "unknown theme '{other}' (expected light, dark or system)"
            ))),
        }
    }
}

impl Config {
    /// Load configuration from the default location plus process environment.
    pub fn load() -> Result<Self> {
        let path = match std::env::var_os(CONFIG_ENV) {
            Some(explicit) => Some(PathBuf::from(explicit)),
            None => Self::default_path(),
        };
        let mut config = match path {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Platform config file path, if the platform has a config directory.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "routefind", "routefind")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Read and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read config '{}': {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            Error::Config(format!("failed to parse config '{}': {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides using the provided lookup.
    ///
    /// Blank values are ignored so an exported-but-empty variable does not
    /// wipe a key from the config file.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_blank(API_KEY_ENV).or_else(|| non_blank(FALLBACK_API_KEY_ENV)) {
            self.api_key = Some(key.trim().to_string());
        }
        if let Some(endpoint) = non_blank(ENDPOINT_ENV) {
            self.search.endpoint = endpoint.trim().to_string();
        }
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        let search = &self.search;
        if search.num_results == 0 || search.num_results > MAX_NUM_RESULTS {
            return Err(Error::Config(format!(
                "search.num_results must be between 1 and {MAX_NUM_RESULTS}, got {}",
                search.num_results
            )));
        }
        if search.timeout_secs == 0 {
            return Err(Error::Config(
                "search.timeout_secs must be at least 1".to_string(),
            ));
        }
        if search.language.trim().is_empty() {
            return Err(Error::Config("search.language must not be empty".to_string()));
        }
        if url::Url::parse(&search.endpoint).is_err() {
            return Err(Error::Config(format!(
                "search.endpoint is not a valid URL: '{}'",
                search.endpoint
            )));
        }
        if self.display.page_size == 0 {
            return Err(Error::Config("display.page_size must be at least 1".to_string()));
        }
        Ok(())
    }

    /// The API key, if one is configured and non-blank.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_key, None);
        assert_eq!(config.search.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.search.num_results, 30);
        assert_eq!(config.search.language, "en");
        assert_eq!(config.search.timeout(), Duration::from_secs(30));
        assert_eq!(config.display.page_size, 10);
        assert_eq!(config.display.theme, Theme::System);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_partial_sections_use_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "api_key = \"file-key\"\n[search]\nnum_results = 50\n[display]\ntheme = \"light\"\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.api_key(), Some("file-key"));
        assert_eq!(config.search.num_results, 50);
        assert_eq!(config.search.language, "en");
        assert_eq!(config.display.theme, Theme::Light);
        assert_eq!(config.display.page_size, 10);
    }

    #[test]
    fn test_from_file_rejects_invalid_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[search]\nnum_results = 0\n").unwrap();
        let err = Config::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("num_results"));

        fs::write(&path, "[search\n").unwrap();
        let err = Config::from_file(&path).unwrap_err();
        assert_eq!(err.category(), "config");
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config {
            api_key: Some("file-key".into()),
            ..Config::default()
        };
        config.apply_env(env_of(&[
            (API_KEY_ENV, " env-key "),
            (FALLBACK_API_KEY_ENV, "fallback"),
            (ENDPOINT_ENV, "http://127.0.0.1:9999/search"),
        ]));
        assert_eq!(config.api_key(), Some("env-key"));
        assert_eq!(config.search.endpoint, "http://127.0.0.1:9999/search");
    }

    #[test]
    fn test_env_fallback_key_and_blank_values() {
        let mut config = Config::default();
        config.apply_env(env_of(&[(API_KEY_ENV, "  "), (FALLBACK_API_KEY_ENV, "bee")]));
        assert_eq!(config.api_key(), Some("bee"));

        let mut config = Config {
            api_key: Some("kept".into()),
            ..Config::default()
        };
        config.apply_env(env_of(&[(API_KEY_ENV, "")]));
        assert_eq!(config.api_key(), Some("kept"));
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let config = Config {
            api_key: Some("   ".into()),
            ..Config::default()
        };
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn test_validate_ranges() {
        let mut config = Config::default();
        config.search.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.display.page_size = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.search.endpoint = "not a url".into();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.search.num_results = MAX_NUM_RESULTS + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_theme_parse_and_resolve() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("auto".parse::<Theme>().unwrap(), Theme::System);
        assert!("sepia".parse::<Theme>().is_err());

        assert_eq!(Theme::System.resolve(Some("0;15")), Theme::Light);
        assert_eq!(Theme::System.resolve(Some("15;0")), Theme::Dark);
        assert_eq!(Theme::System.resolve(Some("garbage")), Theme::Dark);
        assert_eq!(Theme::System.resolve(None), Theme::Dark);
        assert_eq!(Theme::Light.resolve(Some("15;0")), Theme::Light);
    }

    #[test]
    fn test_config_roundtrips_through_toml() {
        let config = Config {
            api_key: Some("k".into()),
            ..Config::default()
        };
        let text = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
