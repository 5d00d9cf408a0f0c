//! Answer discovery and effective answer resolution.
//!
//! Lintinit reads `lintinit.toml|yaml|yml` from the project root (or closest
//! ancestor) and merges it with CLI flags to produce a validated
//! `AnswerRecord`.
//! Defaults:
//! - `source`: `prompt`
//! - `indentSize`: 4, `quoteStyle`: `single`, `lineBreak`: `unix`
//! - `requireSemicolons`: true
//! - `ecmaVersionModern`, `enableJsx`, `enableReact`, `moduleSystem`: false
//! - `environments`, `filePatterns`: empty
//! - `outputFormat`: `json`
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::{ConfigError, InvalidAnswer};
use crate::models::{AnswerRecord, LineBreak, OutputFormat, QuoteStyle, Source};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILES: [&str; 3] = ["lintinit.toml", "lintinit.yaml", "lintinit.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
/// Root configuration loaded from `lintinit.toml|yaml`.
pub struct LintinitConfig {
    pub source: Option<String>,
    pub style_guide: Option<String>,
    pub indent_size: Option<u8>,
    pub quote_style: Option<String>,
    pub line_break: Option<String>,
    pub require_semicolons: Option<bool>,
    pub ecma_version_modern: Option<bool>,
    #[serde(default)]
    pub environments: Option<Vec<String>>,
    pub enable_jsx: Option<bool>,
    pub enable_react: Option<bool>,
    pub module_system: Option<bool>,
    #[serde(default)]
    pub file_patterns: Option<Vec<String>>,
    pub output_format: Option<String>,
}

#[derive(Debug, Default, Clone)]
/// Answers supplied on the command line. `None` defers to the config file.
pub struct CliAnswers {
    pub root: Option<String>,
    pub source: Option<String>,
    pub style_guide: Option<String>,
    pub indent_size: Option<u8>,
    pub quote_style: Option<String>,
    pub line_break: Option<String>,
    pub require_semicolons: Option<bool>,
    pub ecma_version_modern: Option<bool>,
    pub environments: Vec<String>,
    pub enable_jsx: Option<bool>,
    pub enable_react: Option<bool>,
    pub module_system: Option<bool>,
    pub file_patterns: Vec<String>,
    pub output_format: Option<String>,
}

#[derive(Debug, Clone)]
/// Fully-resolved answers plus where they were resolved.
pub struct Effective {
    pub root: PathBuf,
    pub config_path: Option<PathBuf>,
    pub answers: AnswerRecord,
}

/// Walk upward from `start` to detect the project root.
///
/// Stops when a `lintinit.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_FILES.iter().any(|f| cur.join(f).exists()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `LintinitConfig` from `lintinit.toml` or `lintinit.yaml|yml` if present.
pub fn load_config(root: &Path) -> Result<Option<(PathBuf, LintinitConfig)>, ConfigError> {
    for name in CONFIG_FILES {
        let path = root.join(name);
        if !path.exists() {
            continue;
        }
        let s = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let cfg: LintinitConfig = if name.ends_with(".toml") {
            toml::from_str(&s).map_err(|source| ConfigError::Toml {
                path: path.clone(),
                source,
            })?
        } else {
            serde_yaml::from_str(&s).map_err(|source| ConfigError::Yaml {
                path: path.clone(),
                source,
            })?
        };
        return Ok(Some((path, cfg)));
    }
    Ok(None)
}

/// Resolve `Effective` by merging CLI answers, discovered config, and defaults.
pub fn resolve_effective(cli: &CliAnswers) -> Result<Effective, ConfigError> {
    let start = PathBuf::from(cli.root.as_deref().unwrap_or("."));
    let root = detect_root(&start);
    let (config_path, cfg) = match load_config(&root)? {
        Some((p, c)) => (Some(p), c),
        None => (None, LintinitConfig::default()),
    };
    let defaults = AnswerRecord::default();

    let source = match cli.source.as_deref().or(cfg.source.as_deref()) {
        Some(s) => parse_source(s)?,
        None => defaults.source,
    };
    let style_guide = cli
        .style_guide
        .clone()
        .or(cfg.style_guide)
        .filter(|s| !s.trim().is_empty());
    let indent_size = cli
        .indent_size
        .or(cfg.indent_size)
        .unwrap_or(defaults.indent_size);
    let quote_style = match cli.quote_style.as_deref().or(cfg.quote_style.as_deref()) {
        Some(s) => parse_quote_style(s)?,
        None => defaults.quote_style,
    };
    let line_break = match cli.line_break.as_deref().or(cfg.line_break.as_deref()) {
        Some(s) => parse_line_break(s)?,
        None => defaults.line_break,
    };
    let output_format = match cli.output_format.as_deref().or(cfg.output_format.as_deref()) {
        Some(s) => parse_output_format(s)?,
        None => defaults.output_format,
    };

    let environments = if cli.environments.is_empty() {
        cfg.environments.unwrap_or_default()
    } else {
        cli.environments.clone()
    };
    let environments = normalize_environments(environments);
    let file_patterns = if cli.file_patterns.is_empty() {
        cfg.file_patterns.unwrap_or_default()
    } else {
        cli.file_patterns.clone()
    };

    let answers = AnswerRecord {
        source,
        style_guide,
        indent_size,
        quote_style,
        line_break,
        require_semicolons: cli
            .require_semicolons
            .or(cfg.require_semicolons)
            .unwrap_or(defaults.require_semicolons),
        ecma_version_modern: cli
            .ecma_version_modern
            .or(cfg.ecma_version_modern)
            .unwrap_or(defaults.ecma_version_modern),
        environments,
        enable_jsx: cli
            .enable_jsx
            .or(cfg.enable_jsx)
            .unwrap_or(defaults.enable_jsx),
        enable_react: cli
            .enable_react
            .or(cfg.enable_react)
            .unwrap_or(defaults.enable_react),
        module_system: cli
            .module_system
            .or(cfg.module_system)
            .unwrap_or(defaults.module_system),
        file_patterns,
        output_format,
    };
    answers.validate()?;

    Ok(Effective {
        root,
        config_path,
        answers,
    })
}

/// Split comma-separated entries, drop blanks and duplicates.
fn normalize_environments(raw: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in raw.iter().flat_map(|s| s.split(',')) {
        let name = item.trim();
        if !name.is_empty() && !out.iter().any(|e| e == name) {
            out.push(name.to_string());
        }
    }
    out
}

pub fn parse_source(s: &str) -> Result<Source, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "prompt" => Ok(Source::Prompt),
        "auto" => Ok(Source::Auto),
        _ => Err(invalid("source", s, "prompt|auto")),
    }
}

pub fn parse_quote_style(s: &str) -> Result<QuoteStyle, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "single" => Ok(QuoteStyle::Single),
        "double" => Ok(QuoteStyle::Double),
        _ => Err(invalid("quoteStyle", s, "single|double")),
    }
}

pub fn parse_line_break(s: &str) -> Result<LineBreak, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "unix" => Ok(LineBreak::Unix),
        "windows" => Ok(LineBreak::Windows),
        _ => Err(invalid("lineBreak", s, "unix|windows")),
    }
}

pub fn parse_output_format(s: &str) -> Result<OutputFormat, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "json" => Ok(OutputFormat::Json),
        "yaml" | "yml" => Ok(OutputFormat::Yaml),
        "js" | "javascript" => Ok(OutputFormat::Js),
        _ => Err(invalid("outputFormat", s, "json|yaml|js")),
    }
}

fn invalid(field: &'static str, value: &str, expected: &'static str) -> ConfigError {
    InvalidAnswer {
        field,
        value: value.to_string(),
        expected,
    }
    .into()
}
