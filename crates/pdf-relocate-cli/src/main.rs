mod commands;
mod logging;
mod progress;

use std::fs;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::Parser;
use colored::*;
use commands::Cli;
use dotenv::dotenv;
use pdf_relocate_core::config::{self, PartialConfig};
use pdf_relocate_core::{
    AppConfig, Error, ProgressReporter, RelocationEngine, RunOutcome, SilentReporter,
};
use progress::CliReporter;
use tracing::{error, info};

fn main() -> ExitCode {
    dotenv().ok();

    let args = Cli::parse();

    let partial = config::load_configuration();
    let log_settings = logging::LogSettings::resolve(
        args.log_file.clone(),
        partial.as_ref().ok().and_then(|p| p.log_file.clone()),
    );
    let _guard = logging::init_logger(&log_settings);

    let result = partial
        .context("Error loading configuration")
        .and_then(|partial| run(&args, partial));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Cli, partial: PartialConfig) -> anyhow::Result<()> {
    let config = resolve_config(args, partial)?;

    if args.print_config {
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    if args.create_dest && !config.dest_root.is_dir() {
        // Missing input trees stay fatal before anything is created.
        for root in [&config.source_root, &config.compare_root] {
            if !root.is_dir() {
                return Err(Error::NotFound { path: root.clone() }.into());
            }
        }
        config.check_destination()?;
        fs::create_dir_all(&config.dest_root).with_context(|| {
            format!(
                "Failed to create destination folder {}",
                config.dest_root.display()
            )
        })?;
        info!("Created destination folder {}", config.dest_root.display());
    }

    let reporter: Box<dyn ProgressReporter> =
        if !args.no_progress && console::Term::stderr().is_term() {
            Box::new(CliReporter::new())
        } else {
            Box::new(SilentReporter)
        };

    let report_path = config.report_path.clone();
    let engine = RelocationEngine::new(config);
    let outcome = engine.run_and_report(reporter.as_ref())?;

    print_summary(&outcome);
    info!(
        "Files have been moved. See {} for details.",
        report_path.display().to_string().cyan()
    );

    Ok(())
}

/// Arguments win over `PdfRelocate.toml` / environment values.
fn resolve_config(args: &Cli, partial: PartialConfig) -> anyhow::Result<AppConfig> {
    let Some(source_root) = args.source_folder.clone().or(partial.source_root) else {
        bail!("missing SOURCE_FOLDER (pass it as an argument or set source_root)");
    };
    let Some(compare_root) = args.compare_folder.clone().or(partial.compare_root) else {
        bail!("missing COMPARE_FOLDER (pass it as an argument or set compare_root)");
    };
    let Some(dest_root) = args.dest_folder.clone().or(partial.dest_root) else {
        bail!("missing DEST_FOLDER (pass it as an argument or set dest_root)");
    };

    let mut config = AppConfig::new(source_root, compare_root, dest_root);
    if let Some(report) = args.report.clone().or(partial.report_path) {
        config = config.with_report_path(report);
    }
    if let Some(policy) = args.on_collision.map(Into::into).or(partial.on_collision) {
        config = config.with_collision_policy(policy);
    }
    let ignore = if args.ignore.is_empty() {
        partial.ignore_patterns
    } else {
        args.ignore.clone()
    };
    Ok(config.with_ignore_patterns(ignore))
}

fn print_summary(outcome: &RunOutcome) {
    let stats = &outcome.stats;
    println!();
    info!(
        "Finished at {} in {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        format!("{:.2}s", outcome.elapsed.as_secs_f64()).green(),
    );
    info!(
        "{} relocated, {} without match, {} unverified of {} source files",
        format!("{}", stats.relocated).green(),
        format!("{}", stats.no_match).yellow(),
        format!("{}", stats.unverified).yellow(),
        stats.source_files,
    );
    if stats.move_failures > 0 || stats.collisions_skipped > 0 {
        info!(
            "{} move failures, {} skipped at destination",
            format!("{}", stats.move_failures).red(),
            format!("{}", stats.collisions_skipped).yellow(),
        );
    }
    if stats.duplicate_compare_keys > 0 {
        info!(
            "{} compare files shared a name with an earlier one; the later file was used",
            format!("{}", stats.duplicate_compare_keys).yellow(),
        );
    }
}
