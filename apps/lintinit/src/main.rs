//! Lintinit CLI binary entry point.
//! Resolves answers, synthesizes a configuration, and writes it.

use clap::Parser;
use lintinit::cli::{Cli, Commands, InitArgs};
use lintinit::models::Source;
use lintinit::output::error_prefix;
use lintinit::progress::{BarReporter, ProgressReporter};
use lintinit::style_guide::StyleGuide;
use lintinit::{config, output, scan, synth};
use std::fs;
use tracing::debug;

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Guides => {
            for g in StyleGuide::ALL {
                let pkgs = synth::required_packages(&g.fragment());
                println!("{} ({})", g, pkgs.join(", "));
            }
        }
        Commands::Init(args) => {
            init_logging(args.verbose);
            std::process::exit(run_init(&args));
        }
    }
}

/// Initialize tracing based on `--verbose`; `RUST_LOG` takes precedence.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
    debug!("logging initialized at level: {}", level);
}

fn run_init(args: &InitArgs) -> i32 {
    let eff = match config::resolve_effective(&args.answers()) {
        Ok(eff) => eff,
        Err(e) => {
            eprintln!("{} {}", error_prefix(), e);
            return 2;
        }
    };
    if let Some(p) = eff.config_path.as_ref() {
        debug!(path = %p.display(), "loaded answers file");
    }
    let answers = &eff.answers;
    let target = eff.root.join(answers.output_format.file_name());
    if !args.stdout && target.exists() && !args.force {
        eprintln!(
            "{} {} already exists (pass --force to overwrite)",
            error_prefix(),
            target.display()
        );
        return 2;
    }

    let reporter = if answers.source == Source::Auto && answers.style_guide.is_none() {
        let files = scan::expand_patterns(&eff.root, &answers.file_patterns);
        BarReporter::new(files.len() as u64)
    } else {
        BarReporter::hidden()
    };

    let result = match synth::synthesize_report(answers, &eff.root, &reporter) {
        Ok(r) => r,
        Err(e) => {
            reporter.complete();
            eprintln!("{} {}", error_prefix(), e);
            return 2;
        }
    };
    let rendered = match output::render(&result.config, answers.output_format) {
        Ok(s) => s,
        Err(e) => {
            reporter.complete();
            eprintln!("{} {}", error_prefix(), e);
            return 2;
        }
    };

    let written = if args.stdout {
        print!("{}", rendered);
        None
    } else if let Err(e) = fs::write(&target, &rendered) {
        reporter.complete();
        eprintln!(
            "{} failed to write {}: {}",
            error_prefix(),
            target.display(),
            e
        );
        return 2;
    } else {
        Some(target.as_path())
    };
    reporter.complete();

    let packages = synth::required_packages(&result.config);
    output::print_summary(written, &eff.root, &result.warnings, &packages);
    0
}
