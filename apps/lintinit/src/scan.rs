//! Source statistics collector for the auto path.
//!
//! Patterns are expanded to concrete files, each file is parsed with
//! tree-sitter and classified independently (in parallel), and the per-file
//! partial statistics are reduced into one `StyleStatistic`.
//!
//! Classification covers:
//! - quote delimiter of each string literal (JSX attribute values excluded),
//! - trailing `;` on each statement kind governed by the `semi` rule,
//!   including class fields (for-loop heads are not counted),
//! - indentation increase between consecutive code lines,
//! - the file's dominant line terminator.
//!
//! A file that cannot be read or parsed becomes a `FileParseWarning` and
//! contributes nothing; the scan itself never fails.

use crate::error::FileParseWarning;
use crate::models::{IndentUnit, LineBreak, QuoteStyle, Semicolons, StyleStatistic};
use crate::progress::ProgressReporter;
use glob::glob;
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tree_sitter::{Node, Parser};

/// Extensions picked up when a pattern names a directory.
const SOURCE_EXTENSIONS: [&str; 4] = ["js", "jsx", "mjs", "cjs"];

/// Statement kinds whose terminator the `semi` rule governs.
const SEMI_STATEMENTS: [&str; 10] = [
    "expression_statement",
    "variable_declaration",
    "lexical_declaration",
    "return_statement",
    "throw_statement",
    "break_statement",
    "continue_statement",
    "do_statement",
    "debugger_statement",
    "import_statement",
];

/// Largest indentation step counted as an indent unit. Wider steps are
/// usually continuation alignment.
const MAX_INDENT_STEP: usize = 8;

/// Result of scanning a corpus.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub statistics: StyleStatistic,
    pub warnings: Vec<FileParseWarning>,
    /// Every resolved file, parsed or not, in scan order.
    pub files: Vec<PathBuf>,
}

/// Expand patterns (relative to `root`) into a sorted, deduplicated file list.
///
/// A pattern naming a directory expands to every JavaScript source below it,
/// skipping `node_modules`. Invalid patterns are logged and ignored.
pub fn expand_patterns(root: &Path, patterns: &[String]) -> Vec<PathBuf> {
    let mut files: BTreeSet<PathBuf> = BTreeSet::new();
    for pat in patterns {
        let abs = root.join(pat);
        let globs: Vec<String> = if abs.is_dir() {
            let dir = glob::Pattern::escape(&abs.to_string_lossy());
            SOURCE_EXTENSIONS
                .iter()
                .map(|ext| format!("{}/**/*.{}", dir.trim_end_matches('/'), ext))
                .collect()
        } else if Path::new(pat).is_absolute() {
            vec![pat.clone()]
        } else {
            // the root is literal text; only `pat` carries glob syntax
            let base = glob::Pattern::escape(&root.to_string_lossy());
            vec![format!("{}/{}", base.trim_end_matches('/'), pat)]
        };
        for g in globs {
            let entries = match glob(&g) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(pattern = %pat, error = %e, "ignoring invalid file pattern");
                    continue;
                }
            };
            for p in entries.flatten() {
                let below_root = p.strip_prefix(root).unwrap_or(&p);
                if p.is_file() && !in_node_modules(below_root) {
                    files.insert(p);
                }
            }
        }
    }
    files.into_iter().collect()
}

fn in_node_modules(path: &Path) -> bool {
    path.components()
        .any(|c| c.as_os_str() == "node_modules")
}

/// Expand `patterns` under `root` and scan the resulting files.
pub fn scan(root: &Path, patterns: &[String], reporter: &dyn ProgressReporter) -> ScanReport {
    let files = expand_patterns(root, patterns);
    scan_files(files, reporter)
}

/// Scan an explicit list of files. `reporter.advance()` is called once per file.
pub fn scan_files(files: Vec<PathBuf>, reporter: &dyn ProgressReporter) -> ScanReport {
    info!(files = files.len(), "scanning source files");
    let outcomes: Vec<Result<StyleStatistic, String>> = files
        .par_iter()
        .map_init(new_parser, |parser, path| {
            let res = match parser {
                Ok(p) => analyze_file(p, path),
                Err(e) => Err(e.clone()),
            };
            reporter.advance();
            res
        })
        .collect();

    let mut statistics = StyleStatistic::default();
    let mut warnings = Vec::new();
    for (path, outcome) in files.iter().zip(outcomes) {
        match outcome {
            Ok(partial) => statistics = statistics.merge(partial),
            Err(reason) => {
                warn!(path = %path.display(), reason = %reason, "skipping unparseable file");
                warnings.push(FileParseWarning {
                    path: path.clone(),
                    reason,
                });
            }
        }
    }
    if statistics.files == 0 {
        debug!("no parseable files; every style dimension is ambiguous");
    }
    info!(
        parsed = statistics.files,
        skipped = warnings.len(),
        "scan finished"
    );
    ScanReport {
        statistics,
        warnings,
        files,
    }
}

fn new_parser() -> Result<Parser, String> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_javascript::LANGUAGE.into())
        .map_err(|e| format!("failed to load JavaScript grammar: {}", e))?;
    Ok(parser)
}

fn analyze_file(parser: &mut Parser, path: &Path) -> Result<StyleStatistic, String> {
    let bytes = fs::read(path).map_err(|e| format!("failed to read: {}", e))?;
    let text = String::from_utf8(bytes).map_err(|_| "not valid UTF-8".to_string())?;
    analyze_source(parser, &text)
}

/// Classify one file's text into a single-file `StyleStatistic`.
pub fn analyze_source(parser: &mut Parser, text: &str) -> Result<StyleStatistic, String> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let tree = parser
        .parse(text, None)
        .ok_or_else(|| "parser produced no syntax tree".to_string())?;
    let root = tree.root_node();
    if root.has_error() {
        let line = first_error_line(root).unwrap_or(1);
        return Err(format!("syntax error near line {}", line));
    }

    let src = text.as_bytes();
    let mut stats = StyleStatistic {
        files: 1,
        ..Default::default()
    };
    // Byte ranges whose lines are not code: comments and template literals.
    let mut opaque: Vec<(usize, usize)> = Vec::new();

    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        match node.kind() {
            "string" => {
                if !parent_is(node, "jsx_attribute") {
                    match src.get(node.start_byte()) {
                        Some(b'"') => stats.quotes.record(QuoteStyle::Double),
                        Some(b'\'') => stats.quotes.record(QuoteStyle::Single),
                        _ => {}
                    }
                }
            }
            "comment" | "template_string" => opaque.push((node.start_byte(), node.end_byte())),
            "export_statement" => {
                // `export default function () {}` needs no terminator either
                let bare_value = node
                    .child_by_field_name("value")
                    .map(|v| matches!(v.kind(), "function_expression" | "function" | "class"))
                    .unwrap_or(false);
                if node.child_by_field_name("declaration").is_none() && !bare_value {
                    stats.semicolons.record(terminator(node));
                }
            }
            "field_definition" => stats.semicolons.record(field_terminator(node)),
            kind if SEMI_STATEMENTS.contains(&kind) => {
                // for-loop heads always carry `;` and are not governed by `semi`
                if !in_for_head(node) {
                    stats.semicolons.record(terminator(node));
                }
            }
            _ => {}
        }
        let mut cursor = node.walk();
        stack.extend(node.children(&mut cursor));
    }

    classify_lines(text, &opaque, &mut stats);
    Ok(stats)
}

fn parent_is(node: Node<'_>, kind: &str) -> bool {
    node.parent().map(|p| p.kind() == kind).unwrap_or(false)
}

fn in_for_head(node: Node<'_>) -> bool {
    match node.parent() {
        Some(p) if p.kind() == "for_statement" => p.child_by_field_name("body") != Some(node),
        _ => false,
    }
}

fn terminator(node: Node<'_>) -> Semicolons {
    let mut cursor = node.walk();
    let last = node.children(&mut cursor).last();
    match last {
        Some(n) if n.kind() == ";" && !n.is_missing() => Semicolons::Always,
        _ => Semicolons::Never,
    }
}

/// A class field's `;` belongs to the enclosing class body, right after it.
fn field_terminator(node: Node<'_>) -> Semicolons {
    let next_is_semi = node
        .next_sibling()
        .map(|n| n.kind() == ";" && !n.is_missing())
        .unwrap_or(false);
    if next_is_semi {
        Semicolons::Always
    } else {
        terminator(node)
    }
}

fn first_error_line(root: Node<'_>) -> Option<usize> {
    let mut stack = vec![root];
    let mut best: Option<usize> = None;
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            let row = node.start_position().row + 1;
            best = Some(best.map_or(row, |b| b.min(row)));
            continue;
        }
        if node.has_error() {
            let mut cursor = node.walk();
            stack.extend(node.children(&mut cursor));
        }
    }
    best
}

/// Line-level dimensions: indentation steps and the file's line terminator.
fn classify_lines(text: &str, opaque: &[(usize, usize)], stats: &mut StyleStatistic) {
    let lf = text.matches('\n').count();
    if lf > 0 {
        let crlf = text.matches("\r\n").count();
        let style = if crlf > lf - crlf {
            LineBreak::Windows
        } else {
            LineBreak::Unix
        };
        stats.line_breaks.record(style);
    }

    let mut prev_tabs = 0usize;
    let mut prev_spaces = 0usize;
    let mut offset = 0usize;
    for raw in text.split('\n') {
        let start = offset;
        offset += raw.len() + 1;
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if line.trim().is_empty() {
            continue;
        }
        if opaque.iter().any(|(s, e)| *s < start && start < *e) {
            continue;
        }
        let tabs = line.bytes().take_while(|b| *b == b'\t').count();
        let spaces = if tabs > 0 {
            0
        } else {
            line.bytes().take_while(|b| *b == b' ').count()
        };
        if tabs > prev_tabs {
            stats.indent.record(IndentUnit::Tab);
        } else if tabs == 0 && spaces > prev_spaces {
            let step = spaces - prev_spaces;
            if step <= MAX_INDENT_STEP {
                stats.indent.record(IndentUnit::Spaces(step as u8));
            }
        }
        prev_tabs = tabs;
        prev_spaces = spaces;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NoopReporter;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    fn analyze(text: &str) -> StyleStatistic {
        let mut parser = new_parser().unwrap();
        analyze_source(&mut parser, text).unwrap()
    }

    #[test]
    fn test_quotes_counted_per_literal() {
        let s = analyze("var a = \"x\";\nvar b = \"y\";\nvar c = 'z';\n");
        assert_eq!(s.quotes.count(QuoteStyle::Double), 2);
        assert_eq!(s.quotes.count(QuoteStyle::Single), 1);
    }

    #[test]
    fn test_template_literals_are_not_quotes() {
        let s = analyze("const a = `x`;\n");
        assert!(s.quotes.is_empty());
    }

    #[test]
    fn test_semicolons_present_and_missing() {
        let s = analyze("var a = 1;\nvar b = 2\nfoo();\nbar()\nreturn_();\n");
        assert_eq!(s.semicolons.count(Semicolons::Always), 3);
        assert_eq!(s.semicolons.count(Semicolons::Never), 2);
    }

    #[test]
    fn test_for_loop_heads_ignored() {
        let s = analyze("for (let i = 0; i < 3; i++) {\n  f(i)\n}\n");
        assert_eq!(s.semicolons.count(Semicolons::Always), 0);
        assert_eq!(s.semicolons.count(Semicolons::Never), 1);
    }

    #[test]
    fn test_for_loop_body_without_braces_counted() {
        let s = analyze("for (var i = 0; i < 3; i++) f(i);\n");
        assert_eq!(s.semicolons.count(Semicolons::Always), 1);
    }

    #[test]
    fn test_class_fields_counted() {
        let s = analyze("class A {\n  x = 1;\n  y = 2\n}\n");
        assert_eq!(s.semicolons.count(Semicolons::Always), 1);
        assert_eq!(s.semicolons.count(Semicolons::Never), 1);
    }

    #[test]
    fn test_exports_without_inline_declaration_counted() {
        let s = analyze(
            "export { a };\nexport default b\nexport function f() {}\nexport class K {}\nexport default function () {}\n",
        );
        assert_eq!(s.semicolons.count(Semicolons::Always), 1);
        assert_eq!(s.semicolons.count(Semicolons::Never), 1);
    }

    #[test]
    fn test_jsx_attribute_strings_excluded() {
        let s = analyze("const el = <div className=\"x\" id='y'>{'z'}</div>;\n");
        assert_eq!(s.quotes.count(QuoteStyle::Double), 0);
        assert_eq!(s.quotes.count(QuoteStyle::Single), 1);
    }

    #[test]
    fn test_leading_bom_is_stripped() {
        let s = analyze("\u{feff}var a = 'x';\n");
        assert_eq!(s.quotes.count(QuoteStyle::Single), 1);
        assert_eq!(s.semicolons.count(Semicolons::Always), 1);
    }

    #[test]
    fn test_indentation_steps() {
        let s = analyze("function f() {\n  if (x) {\n    g();\n  }\n}\n");
        assert_eq!(s.indent.count(IndentUnit::Spaces(2)), 2);
        let t = analyze("function f() {\n\tg();\n}\n");
        assert_eq!(t.indent.count(IndentUnit::Tab), 1);
    }

    #[test]
    fn test_comment_body_lines_not_counted_as_indent() {
        let s = analyze("/**\n * doc\n */\nfunction f() {\n    g();\n}\n");
        assert_eq!(s.indent.count(IndentUnit::Spaces(1)), 0);
        assert_eq!(s.indent.count(IndentUnit::Spaces(4)), 1);
    }

    #[test]
    fn test_line_endings() {
        let s = analyze("var a = 1;\r\nvar b = 2;\r\n");
        assert_eq!(s.line_breaks.dominant(), Some(LineBreak::Windows));
        let u = analyze("var a = 1;\nvar b = 2;\n");
        assert_eq!(u.line_breaks.dominant(), Some(LineBreak::Unix));
        let none = analyze("var a = 1;");
        assert!(none.line_breaks.is_empty());
    }

    #[test]
    fn test_syntax_error_is_rejected() {
        let mut parser = new_parser().unwrap();
        let err = analyze_source(&mut parser, "var = = ;\n").unwrap_err();
        assert!(err.contains("syntax error"));
    }

    #[test]
    fn test_scan_skips_bad_files_and_ticks_reporter() {
        struct Counting(AtomicUsize, AtomicUsize);
        impl ProgressReporter for Counting {
            fn advance(&self) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
            fn complete(&self) {
                self.1.fetch_add(1, Ordering::SeqCst);
            }
        }

        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("src/a.js"), "var a = \"x\";\n").unwrap();
        fs::write(root.join("src/b.js"), "function (\n").unwrap();
        let reporter = Counting(AtomicUsize::new(0), AtomicUsize::new(0));

        let report = scan(root, &["src/*.js".to_string()], &reporter);
        assert_eq!(report.files.len(), 2);
        assert_eq!(report.statistics.files, 1);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].path.ends_with("b.js"));
        assert_eq!(reporter.0.load(Ordering::SeqCst), 2);
        assert_eq!(reporter.1.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_directory_pattern_expands_recursively_without_node_modules() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("lib/nested")).unwrap();
        fs::create_dir_all(root.join("lib/node_modules/dep")).unwrap();
        fs::write(root.join("lib/a.js"), "a();\n").unwrap();
        fs::write(root.join("lib/nested/b.jsx"), "b();\n").unwrap();
        fs::write(root.join("lib/readme.md"), "# hi\n").unwrap();
        fs::write(root.join("lib/node_modules/dep/c.js"), "c();\n").unwrap();

        let files = expand_patterns(root, &["lib".to_string(), "lib/*.js".to_string()]);
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.js", "b.jsx"]);
    }

    #[test]
    fn test_non_utf8_file_becomes_warning() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("latin1.js"), [b'v', b'a', b'r', b' ', 0xff, 0xfe, b';']).unwrap();
        let report = scan(dir.path(), &["*.js".to_string()], &NoopReporter);
        assert_eq!(report.statistics.files, 0);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].reason, "not valid UTF-8");
    }

    #[test]
    fn test_root_below_node_modules_still_scanned() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("node_modules/pkg");
        fs::create_dir_all(root.join("src/node_modules/dep")).unwrap();
        fs::write(root.join("src/a.js"), "a();\n").unwrap();
        fs::write(root.join("src/node_modules/dep/b.js"), "b();\n").unwrap();

        let files = expand_patterns(&root, &["src".to_string(), "src/*.js".to_string()]);
        assert_eq!(files, vec![root.join("src/a.js")]);
    }

    #[test]
    fn test_root_with_glob_metacharacters() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("proj[1]*?");
        fs::create_dir_all(root.join("lib")).unwrap();
        fs::write(root.join("a.js"), "a();\n").unwrap();
        fs::write(root.join("lib/b.js"), "b();\n").unwrap();

        let globbed = expand_patterns(&root, &["*.js".to_string()]);
        assert_eq!(globbed, vec![root.join("a.js")]);
        let by_dir = expand_patterns(&root, &["lib".to_string()]);
        assert_eq!(by_dir, vec![root.join("lib/b.js")]);
    }

    #[test]
    fn test_invalid_pattern_and_empty_corpus() {
        let dir = tempdir().unwrap();
        let report = scan(dir.path(), &["[".to_string()], &NoopReporter);
        assert!(report.files.is_empty());
        assert!(report.statistics.is_empty());
        assert!(report.warnings.is_empty());
    }
}
