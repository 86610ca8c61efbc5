//! Configuration management for blurmill.
//!
//! Configuration is loaded from a TOML file with sensible defaults. The
//! defaults reproduce the reference setup: one producer, ten workers, an
//! eleven-slot queue, and a 5x5 blur kernel.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure for blurmill.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pipeline sizing: producers, workers, queue capacity
    pub pipeline: PipelineConfig,

    /// Blur filter settings
    pub filter: FilterConfig,

    /// Input discovery settings
    pub processing: ProcessingConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pipeline.producer_count == 0 {
            return Err(ConfigError::ValidationError(
                "producer_count must be at least 1".to_string(),
            ));
        }
        if self.pipeline.worker_count == 0 {
            return Err(ConfigError::ValidationError(
                "worker_count must be at least 1".to_string(),
            ));
        }
        if self.pipeline.queue_capacity == 0 {
            return Err(ConfigError::ValidationError(
                "queue_capacity must be at least 1".to_string(),
            ));
        }
        if self.filter.filter_size == 0 || self.filter.filter_size % 2 == 0 {
            return Err(ConfigError::ValidationError(format!(
                "filter_size must be odd and at least 1, got {}",
                self.filter.filter_size
            )));
        }
        Ok(())
    }
}

/// Pipeline sizing. The queue capacity is deliberately small so a fast
/// producer feels real backpressure instead of building an unbounded backlog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Number of producer threads enumerating work
    pub producer_count: usize,

    /// Number of worker threads consuming work
    pub worker_count: usize,

    /// Work items buffered between producer and workers
    pub queue_capacity: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            producer_count: 1,
            worker_count: 10,
            queue_capacity: 11,
        }
    }
}

/// Blur filter settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Side length of the averaging window; must be odd
    pub filter_size: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self { filter_size: 5 }
    }
}

/// Input discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// File extensions treated as input images
    pub supported_formats: Vec<String>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            supported_formats: vec![
                "jpg".to_string(),
                "jpeg".to_string(),
                "png".to_string(),
                "bmp".to_string(),
                "tiff".to_string(),
            ],
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
