use crate::constants::{DEFAULT_BACKEND_URL, DEFAULT_HOLD_MS, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Runtime settings, read from `~/.sazyar/config.yaml` and the environment
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend_url: String,
    pub api_key: Option<String>,
    pub request_timeout_secs: u64,
    pub hold_duration_ms: u64,
    pub log_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            api_key: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            hold_duration_ms: DEFAULT_HOLD_MS,
            log_file: String::from("sazyar.log"),
        }
    }
}

impl AppConfig {
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".sazyar")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Load from the default location, then apply environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Missing file means defaults
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Ok(AppConfig::default());
        }

        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// `SAZYAR_BACKEND_URL` and `SAZYAR_API_KEY` win over the file
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("SAZYAR_BACKEND_URL") {
            self.backend_url = url;
        }
        if let Some(key) = lookup("SAZYAR_API_KEY") {
            self.api_key = Some(key).filter(|k| !k.is_empty());
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend_url.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "backend_url must not be empty".to_string(),
            });
        }
        if self.hold_duration_ms == 0 {
            return Err(ConfigError::ValidationError {
                message: "hold_duration_ms must be positive".to_string(),
            });
        }
        Ok(())
    }

    pub fn hold_duration(&self) -> Duration {
        Duration::from_millis(self.hold_duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.yaml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.hold_duration(), Duration::from_millis(3000));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "backend_url: https://api.example.ir\nhold_duration_ms: 1500\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.backend_url, "https://api.example.ir");
        assert_eq!(config.hold_duration_ms, 1500);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "hold_duration_ms: [not, a, number]\n").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_environment_overrides() {
        let env: HashMap<&str, &str> = [
            ("SAZYAR_BACKEND_URL", "https://staging.example.ir"),
            ("SAZYAR_API_KEY", "anon-key"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.backend_url, "https://staging.example.ir");
        assert_eq!(config.api_key.as_deref(), Some("anon-key"));
    }

    #[test]
    fn test_zero_hold_rejected() {
        let config = AppConfig {
            hold_duration_ms: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
