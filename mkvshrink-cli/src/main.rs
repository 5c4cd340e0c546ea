//! mkvshrink binary entry point.
//!
//! Parses the command line, validates the resolution token before any file
//! is touched, runs the core pipeline, and maps the batch outcome to the
//! process exit code: 0 when every job completed or was skipped, 1 when
//! any job failed or a fatal error occurred, 2 for usage errors.

mod cli;

use clap::error::ErrorKind;
use clap::Parser;
use cli::Cli;
use colored::*;
use log::{error, info, warn};
use mkvshrink_core::{
    calculate_size_reduction, find_processable_files, format_bytes, format_duration,
    process_videos, CoreConfig, CoreError, CoreResult, JobReport, JobStatus, RemuxLog,
    Resolution, SystemCommandRunner,
};
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return;
        }
        Err(e) => {
            // Usage problems go to standard output so wrapper scripts see
            // them without redirecting stderr.
            println!("Usage: mkvshrink <resolution> <input_folder> <output_folder>");
            println!();
            println!("{e}");
            process::exit(2);
        }
    };

    match run(cli) {
        Ok(reports) => {
            print_summary(&reports);
            if reports.iter().any(|r| r.status.is_failure()) {
                process::exit(1);
            }
        }
        Err(e) => {
            error!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> CoreResult<Vec<JobReport>> {
    // Fail fast on a bad resolution token, before any file is processed.
    let resolution: Resolution = cli.resolution.parse()?;

    let mut config = CoreConfig::new(cli.input_folder, cli.output_folder, resolution);
    config.quality = cli.quality;
    config.preset = cli.preset;
    config.validate()?;

    std::fs::create_dir_all(&config.output_dir)?;

    info!("========================================");
    info!(
        "mkvshrink run started: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("Input folder:  {}", config.input_dir.display());
    info!("Output folder: {}", config.output_dir.display());
    info!(
        "Resolution:    {} (target height {})",
        config.resolution,
        config.resolution.height()
    );
    info!("Quality:       {} ({} preset)", config.quality, config.preset);
    info!("========================================");

    let files = match find_processable_files(&config.input_dir) {
        Ok(files) => files,
        Err(CoreError::NoFilesFound) => {
            warn!(
                "No processable video files found in {}",
                config.input_dir.display()
            );
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };
    info!("Found {} file(s) to process.", files.len());

    let remux_log = RemuxLog::in_dir(&config.output_dir);
    process_videos(&SystemCommandRunner, &config, &files, &remux_log)
}

fn print_summary(reports: &[JobReport]) {
    if reports.is_empty() {
        return;
    }

    let completed = reports.iter().filter(|r| r.status.is_completed()).count();
    let skipped = reports
        .iter()
        .filter(|r| r.status == JobStatus::Skipped)
        .count();
    let failed = reports.iter().filter(|r| r.status.is_failure()).count();

    info!("========================================");
    info!("Batch summary:");
    info!("========================================");
    for report in reports {
        match &report.status {
            JobStatus::Skipped => {
                info!("{}  {}", "[SKIP]".yellow(), report.filename);
            }
            JobStatus::Completed | JobStatus::CompletedWithWarnings => {
                let label = if report.status == JobStatus::CompletedWithWarnings {
                    "[WARN]".yellow().bold()
                } else {
                    "[OK]".green().bold()
                };
                info!("{}  {}", label, report.filename);
                info!(
                    "        Encode time: {}",
                    format_duration(report.elapsed.as_secs_f64())
                );
                info!("        Input size:  {}", format_bytes(report.input_size));
                info!("        Output size: {}", format_bytes(report.output_size));
                info!(
                    "        Reduced by:  {}%",
                    calculate_size_reduction(report.input_size, report.output_size)
                );
            }
            JobStatus::Failed { stage, message } => {
                info!(
                    "{}  {} ({} stage): {}",
                    "[FAIL]".red().bold(),
                    report.filename,
                    stage,
                    message
                );
            }
        }
    }
    info!("----------------------------------------");
    info!("{completed} completed, {skipped} skipped, {failed} failed.");
    info!(
        "mkvshrink run finished: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
}
