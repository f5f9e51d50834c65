//! Configuration module
//!
//! Built once at startup and passed by reference to every component.
//! Layering (later wins): built-in defaults -> JSON config file -> environment.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants::{
    APP_NAME, CONFIG_FILE_NAME, DEFAULT_MODEL_PATH, ENV_CONFIG_FILE, ENV_MODEL_PATH,
    ENV_THRESHOLD, IDENTIFIER_ALIASES, IDENTIFIER_COLUMN,
};
use crate::logic::error::{GateError, GateResult};
use crate::logic::features::default_feature_columns;
use crate::logic::model::RiskThreshold;

/// Gate configuration
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Ordered feature columns fed to the classifier
    pub feature_columns: Vec<String>,

    /// Canonical identifier column
    pub identifier_column: String,

    /// Accepted alternate names for the identifier column
    pub identifier_aliases: Vec<String>,

    /// Model artifact path
    pub model_path: PathBuf,

    /// High-risk threshold
    pub risk_threshold: RiskThreshold,
}

/// Keys accepted in the JSON config file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    model_path: Option<PathBuf>,
    risk_threshold: Option<RiskThreshold>,
    feature_columns: Option<Vec<String>>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            feature_columns: default_feature_columns(),
            identifier_column: IDENTIFIER_COLUMN.to_string(),
            identifier_aliases: IDENTIFIER_ALIASES.iter().map(|s| s.to_string()).collect(),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            risk_threshold: RiskThreshold::default(),
        }
    }
}

impl GateConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> GateResult<Self> {
        let config_file = std::env::var(ENV_CONFIG_FILE)
            .ok()
            .map(PathBuf::from)
            .or_else(default_config_file);

        Self::from_sources(config_file.as_deref(), |key| std::env::var(key).ok())
    }

    /// Build from an optional config file plus an environment lookup
    pub fn from_sources<F>(config_file: Option<&Path>, env: F) -> GateResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = config_file {
            config.apply_file(path)?;
        }

        if let Some(model_path) = env(ENV_MODEL_PATH).filter(|v| !v.trim().is_empty()) {
            config.model_path = PathBuf::from(model_path.trim());
        }

        if let Some(raw) = env(ENV_THRESHOLD).filter(|v| !v.trim().is_empty()) {
            let value: f64 = raw.trim().parse().map_err(|_| {
                GateError::Config(format!("{} is not a number: {:?}", ENV_THRESHOLD, raw))
            })?;
            config.risk_threshold = RiskThreshold::new(value)?;
        }

        Ok(config)
    }

    fn apply_file(&mut self, path: &Path) -> GateResult<()> {
        let content = fs::read_to_string(path).map_err(|e| {
            GateError::Config(format!("cannot read config file {}: {}", path.display(), e))
        })?;
        let file: ConfigFile = serde_json::from_str(&content).map_err(|e| {
            GateError::Config(format!("invalid config file {}: {}", path.display(), e))
        })?;

        if let Some(model_path) = file.model_path {
            self.model_path = model_path;
        }
        if let Some(threshold) = file.risk_threshold {
            self.risk_threshold = threshold;
        }
        if let Some(columns) = file.feature_columns {
            if columns.is_empty() {
                return Err(GateError::Config("feature_columns must not be empty".to_string()));
            }
            self.feature_columns = columns;
        }

        log::info!("Loaded configuration overrides from {}", path.display());
        Ok(())
    }

    /// Feature columns plus the identifier column
    pub fn required_columns(&self) -> Vec<String> {
        let mut required = self.feature_columns.clone();
        required.push(self.identifier_column.clone());
        required
    }
}

/// `<config dir>/patch-risk-gate/config.json`, only if it exists
fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_NAME).join(CONFIG_FILE_NAME))
        .filter(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = GateConfig::from_sources(None, env_from(&[])).unwrap();
        assert_eq!(config.feature_columns.len(), 5);
        assert_eq!(config.identifier_column, "firmware_version");
        assert_eq!(config.identifier_aliases, vec!["version".to_string()]);
        assert_eq!(config.model_path, PathBuf::from("models/catboost_classifier_v002.onnx"));
        assert_eq!(config.risk_threshold.value(), 0.50);
    }

    #[test]
    fn test_required_columns_include_identifier() {
        let required = GateConfig::default().required_columns();
        assert_eq!(required.len(), 6);
        assert_eq!(required.last().map(String::as_str), Some("firmware_version"));
    }

    #[test]
    fn test_env_overrides_defaults() {
        let config = GateConfig::from_sources(
            None,
            env_from(&[
                ("RISK_GATE_THRESHOLD", "0.7"),
                ("RISK_GATE_MODEL_PATH", "/opt/models/v003.onnx"),
            ]),
        )
        .unwrap();
        assert_eq!(config.risk_threshold.value(), 0.7);
        assert_eq!(config.model_path, PathBuf::from("/opt/models/v003.onnx"));
    }

    #[test]
    fn test_env_supersedes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"risk_threshold": 0.3, "model_path": "from_file.onnx"}"#).unwrap();

        let config =
            GateConfig::from_sources(Some(&path), env_from(&[("RISK_GATE_THRESHOLD", "0.9")]))
                .unwrap();
        assert_eq!(config.risk_threshold.value(), 0.9);
        assert_eq!(config.model_path, PathBuf::from("from_file.onnx"));
    }

    #[test]
    fn test_file_feature_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"feature_columns": ["a", "b"]}"#).unwrap();

        let config = GateConfig::from_sources(Some(&path), env_from(&[])).unwrap();
        assert_eq!(config.feature_columns, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_invalid_overrides_rejected() {
        let err = GateConfig::from_sources(None, env_from(&[("RISK_GATE_THRESHOLD", "high")]))
            .unwrap_err();
        assert!(matches!(err, GateError::Config(_)));

        let err = GateConfig::from_sources(None, env_from(&[("RISK_GATE_THRESHOLD", "1.5")]))
            .unwrap_err();
        assert!(matches!(err, GateError::Config(_)));

        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"feature_columns": []}"#).unwrap();
        assert!(GateConfig::from_sources(Some(&path), env_from(&[])).is_err());

        fs::write(&path, r#"{"threshold": 0.5}"#).unwrap();
        assert!(GateConfig::from_sources(Some(&path), env_from(&[])).is_err());
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(GateConfig::from_sources(Some(&path), env_from(&[])).is_err());
    }
}
