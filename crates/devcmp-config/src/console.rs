//! Console connection and comparison settings

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Settings shared by the client, the comparison session and the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Base URL of the console API
    pub base_url: String,
    /// Bearer token, if the console requires one
    pub token: Option<String>,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Only devices of this vendor are offered for object comparison
    pub vendor: String,
    /// Fail a comparison when a list repeats a name
    pub reject_duplicate_names: bool,
    /// Width of the text render surface, in columns
    pub viewport_width: u16,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            token: None,
            request_timeout_secs: 30,
            vendor: "paloalto".to_string(),
            reject_duplicate_names: true,
            viewport_width: 120,
        }
    }
}

impl ConsoleConfig {
    /// Load from `path`, then apply environment overrides
    ///
    /// A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            debug!("Loading config file: {:?}", path);
            let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
                path: path.to_path_buf(),
                source: e,
            })?;
            Self::from_yaml(&content, path)?
        } else {
            debug!("Config file {:?} not found, using defaults", path);
            Self::default()
        };

        config.apply_overrides(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus environment overrides
    pub fn from_env() -> ConfigResult<Self> {
        let mut config = Self::default();
        config.apply_overrides(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_yaml(content: &str, path: &Path) -> ConfigResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| ConfigError::ParseYaml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Apply overrides from a variable lookup such as `std::env::var`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DEVCMP_BASE_URL") {
            self.base_url = url;
        }
        if let Some(token) = lookup("DEVCMP_TOKEN") {
            self.token = Some(token).filter(|t| !t.is_empty());
        }
        if let Some(secs) = lookup("DEVCMP_TIMEOUT_SECS") {
            self.request_timeout_secs = secs.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "DEVCMP_TIMEOUT_SECS".to_string(),
                reason: format!("'{}' is not a whole number of seconds", secs),
            })?;
        }
        if let Some(vendor) = lookup("DEVCMP_VENDOR") {
            self.vendor = vendor;
        }
        Ok(())
    }

    /// Check value ranges
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                key: "base_url".to_string(),
                reason: format!("'{}' must start with http:// or https://", self.base_url),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "request_timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.viewport_width < 20 {
            return Err(ConfigError::InvalidValue {
                key: "viewport_width".to_string(),
                reason: "must be at least 20 columns".to_string(),
            });
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ConsoleConfig::default();
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.reject_duplicate_names);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "base_url: https://console.example.net").unwrap();
        writeln!(file, "vendor: paloalto").unwrap();
        writeln!(file, "request_timeout_secs: 5").unwrap();

        let config = ConsoleConfig::from_yaml(
            &std::fs::read_to_string(file.path()).unwrap(),
            file.path(),
        )
        .unwrap();

        assert_eq!(config.base_url, "https://console.example.net");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.viewport_width, 120);
        assert_eq!(config.token, None);
    }

    #[test]
    fn test_empty_yaml() {
        let config = ConsoleConfig::from_yaml("  \n", Path::new("empty.yaml")).unwrap();
        assert_eq!(config, ConsoleConfig::default());
    }

    #[test]
    fn test_bad_yaml() {
        let err = ConsoleConfig::from_yaml("request_timeout_secs: [1", Path::new("bad.yaml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::ParseYaml { .. }));
    }

    #[test]
    fn test_overrides() {
        let mut config = ConsoleConfig::default();
        config
            .apply_overrides(lookup(&[
                ("DEVCMP_BASE_URL", "http://10.1.1.1:8080"),
                ("DEVCMP_TOKEN", "secret"),
                ("DEVCMP_TIMEOUT_SECS", " 12 "),
                ("DEVCMP_VENDOR", "juniper"),
            ]))
            .unwrap();

        assert_eq!(config.base_url, "http://10.1.1.1:8080");
        assert_eq!(config.token.as_deref(), Some("secret"));
        assert_eq!(config.request_timeout_secs, 12);
        assert_eq!(config.vendor, "juniper");
    }

    #[test]
    fn test_empty_token_override_clears() {
        let mut config = ConsoleConfig {
            token: Some("old".to_string()),
            ..ConsoleConfig::default()
        };
        config
            .apply_overrides(lookup(&[("DEVCMP_TOKEN", "")]))
            .unwrap();
        assert_eq!(config.token, None);
    }

    #[test]
    fn test_bad_timeout_override() {
        let mut config = ConsoleConfig::default();
        let err = config
            .apply_overrides(lookup(&[("DEVCMP_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("DEVCMP_TIMEOUT_SECS"));
    }

    #[test]
    fn test_validate() {
        let bad_url = ConsoleConfig {
            base_url: "console.local".to_string(),
            ..ConsoleConfig::default()
        };
        assert!(bad_url.validate().is_err());

        let zero_timeout = ConsoleConfig {
            request_timeout_secs: 0,
            ..ConsoleConfig::default()
        };
        assert!(zero_timeout.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConsoleConfig::load(dir.path().join("absent.yaml")).unwrap();
        assert!(config.request_timeout_secs > 0);
    }

    #[test]
    fn test_load_rejects_invalid_file_values() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "viewport_width: 5").unwrap();

        let err = ConsoleConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "viewport_width"));
    }
}
