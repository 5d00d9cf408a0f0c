//! CLI argument parsing via `clap`.

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "lintinit",
    version,
    about = "Generate an ESLint configuration from answers or existing sources",
    long_about = "Lintinit builds an ESLint configuration either from explicit style answers, from a popular style guide, or by inspecting existing JavaScript files.\n\nConfiguration precedence: CLI > lintinit.toml > defaults.",
    after_help = "Examples:\n  lintinit init --quotes double --no-semi --env browser\n  lintinit init --style-guide airbnb --format yaml\n  lintinit init --source auto --pattern src --pattern 'lib/*.js' --stdout",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current lintinit version.")]
    Version,
    /// List supported style guides
    #[command(
        about = "List style guides",
        long_about = "Print the style guides accepted by --style-guide and the packages each one needs."
    )]
    Guides,
    /// Synthesize a configuration
    #[command(
        about = "Create a configuration",
        long_about = "Synthesize an ESLint configuration and write it next to the project root. Style rules come from answers (source=prompt), a style guide, or detected usage (source=auto).",
        after_help = "Examples:\n  lintinit init --indent 2 --quotes single --linebreak unix --semi\n  lintinit init --source auto --pattern src --env node --commonjs"
    )]
    Init(InitArgs),
}

#[derive(Args)]
pub struct InitArgs {
    #[arg(long, help = "Project root (default: current dir)")]
    pub root: Option<String>,
    #[arg(long, help = "Answer source: prompt|auto (default: prompt)")]
    pub source: Option<String>,
    #[arg(long, help = "Use a popular style guide: google|airbnb|standard")]
    pub style_guide: Option<String>,
    #[arg(long, help = "Indentation width in spaces (default: 4)")]
    pub indent: Option<u8>,
    #[arg(long, help = "Quote style: single|double (default: single)")]
    pub quotes: Option<String>,
    #[arg(long, help = "Line endings: unix|windows (default: unix)")]
    pub linebreak: Option<String>,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Require semicolons")]
    pub semi: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, conflicts_with = "semi", help = "Disallow semicolons")]
    pub no_semi: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Enable ES6 globals")]
    pub es6: bool,
    #[arg(long = "env", help = "Environment to enable (repeatable or comma separated)")]
    pub environments: Vec<String>,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Enable JSX parsing")]
    pub jsx: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Enable React support (requires --jsx)")]
    pub react: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Enable CommonJS globals")]
    pub commonjs: bool,
    #[arg(long = "pattern", help = "File or directory pattern to inspect (source=auto, repeatable)")]
    pub patterns: Vec<String>,
    #[arg(long, help = "Output format: json|yaml|js (default: json)")]
    pub format: Option<String>,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Print the configuration instead of writing a file")]
    pub stdout: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Overwrite an existing configuration file")]
    pub force: bool,
    #[arg(long, short, action = clap::ArgAction::SetTrue, help = "Log progress details to stderr")]
    pub verbose: bool,
}

impl InitArgs {
    /// Flags as answers; unset flags defer to the config file.
    pub fn answers(&self) -> crate::config::CliAnswers {
        let set = |b: bool| if b { Some(true) } else { None };
        crate::config::CliAnswers {
            root: self.root.clone(),
            source: self.source.clone(),
            style_guide: self.style_guide.clone(),
            indent_size: self.indent,
            quote_style: self.quotes.clone(),
            line_break: self.linebreak.clone(),
            require_semicolons: if self.no_semi {
                Some(false)
            } else {
                set(self.semi)
            },
            ecma_version_modern: set(self.es6),
            environments: self.environments.clone(),
            enable_jsx: set(self.jsx),
            enable_react: set(self.react),
            module_system: set(self.commonjs),
            file_patterns: self.patterns.clone(),
            output_format: self.format.clone(),
        }
    }
}
