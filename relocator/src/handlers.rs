use anyhow::{Context, anyhow};
use clap::ArgMatches;
use colored::Colorize;
use relocator_core::report::{ReportFormat, render_report, save_report};
use relocator_core::{ExtractionMode, RelocateOptions, Relocation, TieBreak, Weights, relocate};
use relocator_scanner::Document;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber. `RUST_LOG` takes precedence over the
/// verbosity count.
pub fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed (tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

/// Default weights, or the ones from a JSON file when given
pub fn load_weights(path: Option<&PathBuf>) -> anyhow::Result<Weights> {
    match path {
        Some(path) => {
            let path = expand_path(path);
            Weights::load(&path)
                .with_context(|| format!("Failed to load weights from {}", path.display()))
        }
        None => Ok(Weights::default()),
    }
}

/// Build relocation options from the `find` subcommand arguments
pub fn build_options(args: &ArgMatches) -> anyhow::Result<RelocateOptions> {
    let target_id = args
        .get_one::<String>("id")
        .cloned()
        .unwrap_or_else(|| relocator_core::DEFAULT_TARGET_ID.to_string());

    let weights = load_weights(args.get_one::<PathBuf>("weights"))?;

    let tie_break = match args.get_one::<String>("tie-break") {
        Some(value) => {
            TieBreak::from_str(value).ok_or_else(|| anyhow!("Unknown tie-break policy: {}", value))?
        }
        None => TieBreak::default(),
    };

    let extraction = match args.get_one::<String>("extraction") {
        Some(value) => ExtractionMode::from_str(value)
            .ok_or_else(|| anyhow!("Unknown extraction mode: {}", value))?,
        None => ExtractionMode::default(),
    };

    Ok(RelocateOptions {
        target_id,
        weights,
        tie_break,
        extraction,
    })
}

/// Load both documents and relocate the target element
pub fn run_find(origin: &Path, diff: &Path, options: &RelocateOptions) -> anyhow::Result<Relocation> {
    let origin_document = Document::load(origin)?;
    let diff_document = Document::load(diff)?;
    debug!(
        "Relocating #{} from {} into {}",
        options.target_id,
        origin.display(),
        diff.display()
    );

    Ok(relocate(&origin_document, &diff_document, options)?)
}

fn print_divider() {
    println!("{}", "═".repeat(60).bright_blue().bold());
}

fn fail(err: anyhow::Error) -> ! {
    eprintln!("{} {:#}", "✗".red().bold(), err);
    std::process::exit(1);
}

pub fn handle_find(args: &ArgMatches) {
    let quiet = args.get_flag("quiet");
    let origin = args
        .get_one::<PathBuf>("ORIGIN")
        .expect("clap enforces ORIGIN");
    let diff = args.get_one::<PathBuf>("DIFF").expect("clap enforces DIFF");
    let format = args
        .get_one::<String>("format")
        .and_then(|f| ReportFormat::from_str(f))
        .unwrap_or(ReportFormat::Text);
    let output = args.get_one::<PathBuf>("output");

    let options = build_options(args).unwrap_or_else(|e| fail(e));
    let relocation = run_find(origin, diff, &options).unwrap_or_else(|e| fail(e));

    let report = render_report(&relocation, format)
        .context("Failed to render report")
        .unwrap_or_else(|e| fail(e));

    if let Some(output) = output {
        save_report(&report, output)
            .with_context(|| format!("Failed to write report to {}", output.display()))
            .unwrap_or_else(|e| fail(e));
        if !quiet {
            println!(
                "{} Report saved to {}",
                "✓".green().bold(),
                output.display().to_string().bright_white()
            );
        }
        return;
    }

    if quiet {
        println!("{}", relocation.path);
        return;
    }

    if format == ReportFormat::Text {
        print_divider();
        println!("{}", "  RELOCATOR".bright_white().bold());
        print_divider();
        println!();
        print!("{}", report);
        println!();
        println!(
            "{} {}",
            "✓".green().bold(),
            relocation.path.bright_white().bold()
        );
    } else {
        println!("{}", report);
    }
}

pub fn handle_weights(args: &ArgMatches) {
    let weights = load_weights(args.get_one::<PathBuf>("weights")).unwrap_or_else(|e| fail(e));
    println!("{}", weights.to_json());
}
