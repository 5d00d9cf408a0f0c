//! Shared data models: the answer record, configuration fragments, and
//! per-corpus style statistics.

pub mod fragment;
pub mod stats;

use crate::error::InvalidAnswer;
use regex::Regex;
use std::sync::LazyLock;

pub use fragment::{ConfigFragment, FinalConfig, ParserOptions, RuleSetting, Severity};
pub use stats::{Semicolons, StyleStatistic, Tally};

/// Accepted `indentSize` values.
pub const INDENT_SIZES: std::ops::RangeInclusive<u8> = 1..=16;

static ENV_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("valid env name regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Where style rules come from: explicit answers or an existing code base.
pub enum Source {
    #[default]
    Prompt,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum QuoteStyle {
    #[default]
    Single,
    Double,
}

impl QuoteStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            QuoteStyle::Single => "single",
            QuoteStyle::Double => "double",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
/// Line terminator convention, named the way `linebreak-style` expects.
pub enum LineBreak {
    #[default]
    Unix,
    Windows,
}

impl LineBreak {
    pub fn as_str(self) -> &'static str {
        match self {
            LineBreak::Unix => "unix",
            LineBreak::Windows => "windows",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Indentation unit: a number of spaces or a hard tab.
pub enum IndentUnit {
    Spaces(u8),
    Tab,
}

impl IndentUnit {
    /// Option value for the `indent` rule (`4` or `"tab"`).
    pub fn to_option(self) -> serde_json::Value {
        match self {
            IndentUnit::Spaces(n) => serde_json::Value::from(n),
            IndentUnit::Tab => serde_json::Value::from("tab"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Serialization hint for the external writer. Never affects synthesis.
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Js,
}

impl OutputFormat {
    /// Conventional file name for a configuration in this format.
    pub fn file_name(self) -> &'static str {
        match self {
            OutputFormat::Json => ".eslintrc.json",
            OutputFormat::Yaml => ".eslintrc.yml",
            OutputFormat::Js => ".eslintrc.js",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Validated answers for one synthesis run.
///
/// Built once by the config layer (CLI flags over `lintinit.toml` over
/// defaults) and read-only afterwards.
pub struct AnswerRecord {
    pub source: Source,
    /// Raw style guide name; resolved (and possibly rejected) at synthesis.
    pub style_guide: Option<String>,
    pub indent_size: u8,
    pub quote_style: QuoteStyle,
    pub line_break: LineBreak,
    pub require_semicolons: bool,
    pub ecma_version_modern: bool,
    pub environments: Vec<String>,
    pub enable_jsx: bool,
    pub enable_react: bool,
    pub module_system: bool,
    pub file_patterns: Vec<String>,
    pub output_format: OutputFormat,
}

impl Default for AnswerRecord {
    fn default() -> Self {
        AnswerRecord {
            source: Source::Prompt,
            style_guide: None,
            indent_size: 4,
            quote_style: QuoteStyle::Single,
            line_break: LineBreak::Unix,
            require_semicolons: true,
            ecma_version_modern: false,
            environments: Vec::new(),
            enable_jsx: false,
            enable_react: false,
            module_system: false,
            file_patterns: Vec::new(),
            output_format: OutputFormat::Json,
        }
    }
}

impl AnswerRecord {
    /// Check range-limited answers. Called by `config::resolve_effective`
    /// and again by `synth::synthesize_report`.
    pub fn validate(&self) -> Result<(), InvalidAnswer> {
        if !INDENT_SIZES.contains(&self.indent_size) {
            return Err(InvalidAnswer {
                field: "indentSize",
                value: self.indent_size.to_string(),
                expected: "an integer from 1 to 16",
            });
        }
        if let Some(bad) = self.environments.iter().find(|e| !ENV_NAME.is_match(e)) {
            return Err(InvalidAnswer {
                field: "environments",
                value: bad.clone(),
                expected: "an environment name such as browser or node",
            });
        }
        Ok(())
    }
}
