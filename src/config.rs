use chrono::Duration;
use serde::Deserialize;
use thiserror::Error;

use crate::health::RecoveryPolicy;
use crate::iqt;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid duration '{value}': {message}")]
    InvalidDuration { value: String, message: String },
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub iqt: IqtConfig,
    #[serde(default)]
    pub health: HealthConfig,
    #[serde(default)]
    pub gps_driver: GpsDriverConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IqtConfig {
    #[serde(default = "default_smoothing_window")]
    pub smoothing_window: usize,
}

impl Default for IqtConfig {
    fn default() -> Self {
        Self {
            smoothing_window: default_smoothing_window(),
        }
    }
}

fn default_smoothing_window() -> usize {
    iqt::DEFAULT_WINDOW
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthConfig {
    #[serde(default = "default_poor_threshold")]
    pub poor_threshold: f64,
    #[serde(default = "default_suspect_cycles")]
    pub suspect_cycles: u32,
    #[serde(default = "default_restart_cycles")]
    pub restart_cycles: u32,
    #[serde(default = "default_restart_cooldown")]
    pub restart_cooldown: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            poor_threshold: default_poor_threshold(),
            suspect_cycles: default_suspect_cycles(),
            restart_cycles: default_restart_cycles(),
            restart_cooldown: default_restart_cooldown(),
        }
    }
}

fn default_poor_threshold() -> f64 {
    20.0
}

fn default_suspect_cycles() -> u32 {
    2
}

fn default_restart_cycles() -> u32 {
    3
}

fn default_restart_cooldown() -> String {
    "5m".to_string()
}

impl HealthConfig {
    pub fn recovery_policy(&self) -> Result<RecoveryPolicy, ConfigError> {
        Ok(RecoveryPolicy {
            poor_threshold: self.poor_threshold,
            suspect_cycles: self.suspect_cycles,
            restart_cycles: self.restart_cycles,
            restart_cooldown: parse_duration(&self.restart_cooldown)?,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GpsDriverConfig {
    #[serde(default = "default_markers")]
    pub markers: Vec<String>,
}

impl Default for GpsDriverConfig {
    fn default() -> Self {
        Self {
            markers: default_markers(),
        }
    }
}

fn default_markers() -> Vec<String> {
    vec!["127.127.20.".to_string(), ".GPS.".to_string()]
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to an empty mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(yaml)?;
        config.health.recovery_policy()?;
        Ok(config)
    }
}

pub fn parse_duration(s: &str) -> Result<Duration, ConfigError> {
    let err = |message: String| ConfigError::InvalidDuration {
        value: s.to_string(),
        message,
    };
    humantime::parse_duration(s.trim())
        .map_err(|e| err(e.to_string()))
        .and_then(|d| Duration::from_std(d).map_err(|e| err(e.to_string())))
}
