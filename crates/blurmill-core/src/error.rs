//! Error types for the blurmill processing pipeline.
//!
//! Errors are organized by stage so messages carry the context an operator
//! needs (file paths, the failing stage, the specific issue).

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for blurmill operations.
#[derive(Error, Debug)]
pub enum BlurmillError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// Input root does not exist or is not a directory
    #[error("Input root is not a readable directory: {0}")]
    InputRootInvalid(PathBuf),

    /// Output root is occupied by something that is not a directory
    #[error("Output root exists but is not a directory: {0}")]
    OutputRootNotDirectory(PathBuf),

    /// Output root could not be created
    #[error("Cannot create output root {path}: {message}")]
    OutputRootUncreatable { path: PathBuf, message: String },
}

/// Per-item pipeline errors, organized by stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Image decoding failed
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Image encoding failed
    #[error("Encode error for {path}: {message}")]
    Encode { path: PathBuf, message: String },

    /// Unsupported image format
    #[error("Unsupported format for {path}: {format}")]
    UnsupportedFormat { path: PathBuf, format: String },

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Output path could not be derived or prepared
    #[error("Output path error for {path}: {message}")]
    OutputPath { path: PathBuf, message: String },
}

/// Convenience type alias for blurmill results.
pub type Result<T> = std::result::Result<T, BlurmillError>;

/// Convenience type alias for per-item pipeline results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
