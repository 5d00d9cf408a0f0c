//! Lintinit core library.
//!
//! Synthesizes ESLint configurations from explicit style answers, from a
//! named style guide, or from statistics gathered over existing sources.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Answer file discovery and effective answer resolution.
//! - `models`: Answer record, configuration fragments, style statistics.
//! - `style_guide`: Closed registry of supported style guides.
//! - `mapping`: Answer-to-rule mapping for the prompt path.
//! - `scan`: Source statistics collector for the auto path.
//! - `resolve`: Majority/ambiguity policy turning statistics into rules.
//! - `synth`: Top-level entry point dispatching between the paths.
//! - `progress`: Progress reporter capability (no-op and terminal bar).
//! - `output`: Rendering (json/yaml/js) and human summaries.
//! - `error`: Error and warning types.
pub mod cli;
pub mod config;
pub mod error;
pub mod mapping;
pub mod models;
pub mod output;
pub mod progress;
pub mod resolve;
pub mod scan;
pub mod style_guide;
pub mod synth;

pub use error::{ConfigError, FileParseWarning, InvalidAnswer, SynthesisError};
pub use models::{AnswerRecord, ConfigFragment, FinalConfig};
pub use synth::{required_packages, synthesize, synthesize_report};
