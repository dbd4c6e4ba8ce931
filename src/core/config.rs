use crate::providers::util::RetryPolicy;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: "0.0.0.0:8000".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct FrankfurterProviderConfig {
    pub base_url: String,
    /// Per-attempt timeout for time-series requests.
    pub timeout_secs: u64,
    pub probe_timeout_secs: u64,
}

impl Default for FrankfurterProviderConfig {
    fn default() -> Self {
        FrankfurterProviderConfig {
            base_url: crate::providers::frankfurter::DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            probe_timeout_secs: 5,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub frankfurter: FrankfurterProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub retry: RetryPolicy,
    /// Overrides the dataset compiled into the binary.
    pub fallback_path: Option<String>,
}

impl AppConfig {
    /// Loads the config from the default location, or defaults if absent.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("app", "fxsummary", "fxsummary")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
server:
  bind: "127.0.0.1:9000"
providers:
  frankfurter:
    base_url: "http://example.com/frankfurter"
    timeout_secs: 3
retry:
  max_attempts: 5
  base_delay_ms: 250
fallback_path: "/srv/fx/rates.json"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.server.bind, "127.0.0.1:9000");
        assert_eq!(
            config.providers.frankfurter.base_url,
            "http://example.com/frankfurter"
        );
        assert_eq!(config.providers.frankfurter.timeout_secs, 3);
        // Unset fields within a section keep their defaults.
        assert_eq!(config.providers.frankfurter.probe_timeout_secs, 5);
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.base_delay_ms, 250);
        assert_eq!(config.fallback_path.as_deref(), Some("/srv/fx/rates.json"));
    }

    #[test]
    fn test_empty_sections_use_defaults() {
        let config: AppConfig = serde_yaml::from_str("fallback_path: null\n").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server.bind, "0.0.0.0:8000");
        assert_eq!(
            config.providers.frankfurter.base_url,
            "https://api.frankfurter.app"
        );
        assert_eq!(config.retry, RetryPolicy::default());
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let result = AppConfig::load_from_path("/nonexistent/fxsummary/config.yaml");
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }
}
