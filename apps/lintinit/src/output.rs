//! Rendering and printing of synthesized configurations.
//!
//! `render` produces file contents for `json`, `yaml` and `js` outputs.
//! The human summary goes to stderr so stdout can carry the configuration.

use crate::error::{FileParseWarning, RenderError};
use crate::models::{FinalConfig, OutputFormat};
use owo_colors::OwoColorize;
use std::path::Path;

fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Serialize `config` in the requested format, newline-terminated.
pub fn render(config: &FinalConfig, format: OutputFormat) -> Result<String, RenderError> {
    let mut out = match format {
        OutputFormat::Json => serde_json::to_string_pretty(config)?,
        OutputFormat::Yaml => serde_yaml::to_string(config)?,
        OutputFormat::Js => format!(
            "module.exports = {};",
            serde_json::to_string_pretty(config)?
        ),
    };
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

/// Print the outcome of `init`: written file, skipped sources and packages
/// the configuration needs.
pub fn print_summary(
    written: Option<&Path>,
    root: &Path,
    warnings: &[FileParseWarning],
    packages: &[String],
) {
    let color = use_colors();
    for w in warnings {
        let rel = pathdiff::diff_paths(&w.path, root).unwrap_or_else(|| w.path.clone());
        if color {
            eprintln!(
                "{} {} {}",
                "▲ skipped:".yellow().bold(),
                rel.display().bold(),
                w.reason
            );
        } else {
            eprintln!("▲ skipped: {} {}", rel.display(), w.reason);
        }
    }
    if let Some(path) = written {
        let rel = pathdiff::diff_paths(path, root).unwrap_or_else(|| path.to_path_buf());
        if color {
            eprintln!("{} {}", "✔ wrote:".green().bold(), rel.display().bold());
        } else {
            eprintln!("✔ wrote: {}", rel.display());
        }
    }
    if !packages.is_empty() {
        let joined = packages.join(" ");
        if color {
            eprintln!(
                "{} {}",
                "◆ requires:".blue().bold(),
                joined.bright_black()
            );
        } else {
            eprintln!("◆ requires: {}", joined);
        }
    }
}

pub fn error_prefix() -> String {
    if use_colors() {
        "✖ error:".red().bold().to_string()
    } else {
        "✖ error:".to_string()
    }
}
