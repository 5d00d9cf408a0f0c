//! Synthesis entry point.
//!
//! The record is validated first. Dispatch order:
//! 1. A requested style guide short-circuits everything else.
//! 2. `source = prompt` maps the answers directly.
//! 3. `source = auto` scans the file patterns, infers style rules, then
//!    layers the answered environment/JSX/module facts on top.
//!
//! `output_format` is carried for the writer and ignored here.

use crate::error::{FileParseWarning, SynthesisError};
use crate::mapping::{map_answers, map_platform};
use crate::models::{AnswerRecord, ConfigFragment, FinalConfig, Source};
use crate::progress::ProgressReporter;
use crate::{resolve, scan, style_guide};
use std::path::Path;
use tracing::info;

/// A synthesized configuration plus the files the scan had to skip.
#[derive(Debug)]
pub struct Synthesis {
    pub config: FinalConfig,
    pub warnings: Vec<FileParseWarning>,
}

/// Produce the configuration for `record`.
///
/// File patterns are resolved relative to `root`. The reporter is only
/// advanced (once per scanned file), never completed.
pub fn synthesize(
    record: &AnswerRecord,
    root: &Path,
    reporter: &dyn ProgressReporter,
) -> Result<FinalConfig, SynthesisError> {
    synthesize_report(record, root, reporter).map(|s| s.config)
}

/// Like `synthesize`, also returning per-file scan warnings.
pub fn synthesize_report(
    record: &AnswerRecord,
    root: &Path,
    reporter: &dyn ProgressReporter,
) -> Result<Synthesis, SynthesisError> {
    record.validate()?;
    if let Some(name) = record.style_guide.as_deref() {
        info!(guide = name, "using style guide");
        return Ok(Synthesis {
            config: style_guide::resolve(name)?,
            warnings: Vec::new(),
        });
    }
    match record.source {
        Source::Prompt => Ok(Synthesis {
            config: map_answers(record),
            warnings: Vec::new(),
        }),
        Source::Auto => {
            let report = scan::scan(root, &record.file_patterns, reporter);
            Ok(Synthesis {
                config: infer(&report.statistics, record),
                warnings: report.warnings,
            })
        }
    }
}

fn infer(stats: &crate::models::StyleStatistic, record: &AnswerRecord) -> ConfigFragment {
    resolve::resolve(stats).merge(map_platform(record))
}

/// npm packages a configuration relies on: shareable configs named by
/// `extends` and every plugin.
pub fn required_packages(config: &FinalConfig) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(ext) = config.extends.as_deref() {
        if !ext.starts_with("eslint:") {
            out.push(format!("eslint-config-{}", ext));
        }
    }
    for p in &config.plugins {
        out.push(format!("eslint-plugin-{}", p));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidAnswer;
    use crate::models::{QuoteStyle, RuleSetting, Severity};
    use crate::progress::{NoopReporter, ProgressReporter};
    use serde_json::json;
    use std::fs;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tempfile::tempdir;

    fn auto(patterns: &[&str]) -> AnswerRecord {
        AnswerRecord {
            source: Source::Auto,
            file_patterns: patterns.iter().map(|s| s.to_string()).collect(),
            ..AnswerRecord::default()
        }
    }

    #[test]
    fn test_prompt_path_extends_recommended() {
        let rec = AnswerRecord::default();
        let cfg = synthesize(&rec, Path::new("."), &NoopReporter).unwrap();
        assert_eq!(cfg.extends.as_deref(), Some("eslint:recommended"));
        assert_eq!(cfg.rules["semi"], RuleSetting::error("always"));
    }

    #[test]
    fn test_style_guide_short_circuits() {
        let rec = AnswerRecord {
            style_guide: Some("airbnb".into()),
            source: Source::Auto,
            enable_jsx: true,
            ..AnswerRecord::default()
        };
        let cfg = synthesize(&rec, Path::new("."), &NoopReporter).unwrap();
        assert_eq!(
            serde_json::to_value(&cfg).unwrap(),
            json!({"extends": "airbnb", "plugins": ["react"]})
        );
    }

    #[test]
    fn test_unknown_style_guide_fails() {
        let rec = AnswerRecord {
            style_guide: Some("non-standard".into()),
            ..AnswerRecord::default()
        };
        let err = synthesize(&rec, Path::new("."), &NoopReporter).unwrap_err();
        assert!(matches!(err, SynthesisError::UnsupportedStyleGuide { name } if name == "non-standard"));
    }

    #[test]
    fn test_out_of_range_indent_rejected_before_mapping() {
        let rec = AnswerRecord {
            indent_size: 0,
            ..AnswerRecord::default()
        };
        let err = synthesize(&rec, Path::new("."), &NoopReporter).unwrap_err();
        assert!(matches!(
            err,
            SynthesisError::InvalidAnswer(InvalidAnswer { field: "indentSize", ref value, .. }) if value == "0"
        ));

        // a style guide does not bypass validation
        let rec = AnswerRecord {
            indent_size: 17,
            style_guide: Some("google".into()),
            ..AnswerRecord::default()
        };
        assert!(synthesize(&rec, Path::new("."), &NoopReporter).is_err());
    }

    #[test]
    fn test_auto_infers_quotes_and_disables_mixed_semicolons() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(
            root.join("src/a.js"),
            "var a = \"one\";\nvar b = \"two\"\nvar c = \"three\";\n",
        )
        .unwrap();
        fs::write(root.join("src/b.js"), "var d = \"four\"\nvar e = 'five'\nf();\n").unwrap();

        let mut rec = auto(&["src"]);
        rec.environments = vec!["node".into()];
        rec.module_system = true;
        let cfg = synthesize(&rec, root, &NoopReporter).unwrap();

        assert_eq!(cfg.extends.as_deref(), Some("eslint:recommended"));
        assert_eq!(cfg.rules["quotes"], RuleSetting::error(QuoteStyle::Double.as_str()));
        assert_eq!(cfg.rules["semi"].severity(), Severity::Off);
        assert_eq!(cfg.env.get("node"), Some(&true));
        assert_eq!(cfg.env.get("commonjs"), Some(&true));
        assert!(!cfg.env.contains_key("es6"));
        assert!(!cfg.rules.contains_key("no-console"));
    }

    #[test]
    fn test_report_carries_skipped_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("ok.js"), "a();\n").unwrap();
        fs::write(dir.path().join("bad.js"), "a(;\n").unwrap();
        let out = synthesize_report(&auto(&["*.js"]), dir.path(), &NoopReporter).unwrap();
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.config.rules["semi"], RuleSetting::error("always"));
    }

    #[test]
    fn test_auto_is_idempotent() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        for (i, body) in ["a();\n", "b()\n", "if (x) {\n  y();\n}\n"].iter().enumerate() {
            fs::write(root.join(format!("f{}.js", i)), body).unwrap();
        }
        let rec = auto(&["*.js"]);
        let first = synthesize(&rec, root, &NoopReporter).unwrap();
        let second = synthesize(&rec, root, &NoopReporter).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_auto_with_empty_corpus_is_all_off() {
        let dir = tempdir().unwrap();
        let cfg = synthesize(&auto(&["missing/*.js"]), dir.path(), &NoopReporter).unwrap();
        assert!(cfg.rules.values().all(|r| r.severity() == Severity::Off));
        assert_eq!(cfg.rules.len(), 4);
    }

    #[test]
    fn test_auto_honours_jsx_and_react_answers() {
        let dir = tempdir().unwrap();
        let mut rec = auto(&[]);
        rec.enable_jsx = true;
        rec.enable_react = true;
        let v = serde_json::to_value(synthesize(&rec, dir.path(), &NoopReporter).unwrap()).unwrap();
        assert_eq!(v["parserOptions"]["ecmaFeatures"]["jsx"], json!(true));
        assert_eq!(v["plugins"], json!(["react"]));
    }

    #[test]
    fn test_reporter_never_completed() {
        struct Flag(AtomicBool);
        impl ProgressReporter for Flag {
            fn advance(&self) {}
            fn complete(&self) {
                self.0.store(true, Ordering::SeqCst);
            }
        }
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.js"), "a();\n").unwrap();
        let flag = Flag(AtomicBool::new(false));
        synthesize(&auto(&["*.js"]), dir.path(), &flag).unwrap();
        assert!(!flag.0.load(Ordering::SeqCst));
    }

    #[test]
    fn test_required_packages() {
        let cfg = style_guide::resolve("standard").unwrap();
        assert_eq!(
            required_packages(&cfg),
            vec!["eslint-config-standard", "eslint-plugin-standard"]
        );
        let mut rec = AnswerRecord::default();
        rec.enable_jsx = true;
        rec.enable_react = true;
        assert_eq!(required_packages(&map_answers(&rec)), vec!["eslint-plugin-react"]);
    }
}
