//! Error types surfaced to callers.
//!
//! An unknown style guide or an out-of-range answer fails a synthesis run.
//! Scan irregularities are reported as `FileParseWarning` values and never
//! become errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by `synth::synthesize`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SynthesisError {
    #[error("unsupported style guide '{name}' (expected one of: google, airbnb, standard)")]
    UnsupportedStyleGuide { name: String },

    #[error(transparent)]
    InvalidAnswer(#[from] InvalidAnswer),
}

/// An answer outside its accepted range or vocabulary.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid value '{value}' for {field} (expected {expected})")]
pub struct InvalidAnswer {
    pub field: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Errors raised while loading or validating answers.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path} is not valid TOML: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("{path} is not valid YAML: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    InvalidAnswer(#[from] InvalidAnswer),
}

/// A file that could not be analysed during a scan. Recorded, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileParseWarning {
    pub path: PathBuf,
    pub reason: String,
}

impl std::fmt::Display for FileParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.reason)
    }
}

/// Errors raised while rendering a configuration for writing.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to render YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
