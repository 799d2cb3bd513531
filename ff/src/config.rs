//! FlowForge configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main FlowForge configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Planning service connection
    pub planner: PlannerConfig,

    /// TUI behavior
    pub tui: TuiConfig,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Call this early in startup to fail fast with clear error messages.
    pub fn validate(&self) -> Result<()> {
        if !self.planner.base_url.starts_with("http://") && !self.planner.base_url.starts_with("https://") {
            return Err(eyre::eyre!(
                "planner.base-url must be an http(s) URL, got '{}'",
                self.planner.base_url
            ));
        }
        if self.planner.timeout_ms == 0 {
            return Err(eyre::eyre!("planner.timeout-ms must be greater than zero"));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .flowforge.yml
        let local_config = PathBuf::from(".flowforge.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/flowforge/flowforge.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("flowforge").join("flowforge.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Planning service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Service base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    ///
    /// Bounds both operations; plan confirmation can take a while since
    /// the service generates the full workflow document.
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_ms: 120_000,
        }
    }
}

/// TUI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Event poll interval in milliseconds
    #[serde(rename = "tick-rate-ms")]
    pub tick_rate_ms: u64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self { tick_rate_ms: 33 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.planner.base_url, "http://localhost:8000");
        assert_eq!(config.planner.timeout_ms, 120_000);
        assert_eq!(config.tui.tick_rate_ms, 33);
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let mut config = Config::default();
        config.planner.base_url = "localhost:8000".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("base-url"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.planner.timeout_ms = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "planner:\n  base-url: http://planner.internal:9000\n  timeout-ms: 5000\ntui:\n  tick-rate-ms: 50"
        )
        .unwrap();

        let config = Config::load(Some(&file.path().to_path_buf())).unwrap();

        assert_eq!(config.planner.base_url, "http://planner.internal:9000");
        assert_eq!(config.planner.timeout_ms, 5000);
        assert_eq!(config.tui.tick_rate_ms, 50);
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "planner:\n  base-url: http://example.test").unwrap();

        let config = Config::load(Some(&file.path().to_path_buf())).unwrap();

        assert_eq!(config.planner.base_url, "http://example.test");
        assert_eq!(config.planner.timeout_ms, 120_000);
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let path = PathBuf::from("/nonexistent/flowforge.yml");
        assert!(Config::load(Some(&path)).is_err());
    }
}
