//! Main orchestration for the batch re-encode + remux pipeline.
//!
//! Files are processed strictly sequentially: one encode+remux pipeline
//! completes (or fails) before the next file begins. A per-job failure
//! aborts that job only; the batch continues with the next file.
//!
//! Per file the pipeline is:
//! 1. Check: final output exists -> Skipped
//! 2. Encode: video-only encode to the temp path
//! 3. Remux: inspect the original, combine encoded video with original
//!    audio/subtitles into the final output
//! 4. Cleanup: delete the temp artifact -> Completed

use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult};
use crate::external::handbrake::{run_encode, EncodeParams};
use crate::external::mkvmerge::{remux, RemuxOutcome};
use crate::external::{check_dependency, CommandRunner, HANDBRAKE_BIN, MKVMERGE_BIN};
use crate::remux_log::RemuxLog;
use crate::utils::{format_duration, get_file_size, get_filename_safe};

use colored::*;
use log::{error, info, warn};

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Pipeline stage in which a job failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Inspect,
    Encode,
    Remux,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Stage::Inspect => "inspection",
            Stage::Encode => "encode",
            Stage::Remux => "remux",
        })
    }
}

/// Terminal disposition of one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    /// Final output already existed; nothing was run.
    Skipped,
    Completed,
    /// Completed, but the remux exited with code 1; the warning was
    /// appended to the shared log.
    CompletedWithWarnings,
    Failed { stage: Stage, message: String },
}

impl JobStatus {
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, JobStatus::Failed { .. })
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::CompletedWithWarnings
        )
    }
}

/// Result of one job, collected for the end-of-run summary.
#[derive(Debug, Clone)]
pub struct JobReport {
    pub filename: String,
    pub status: JobStatus,
    pub elapsed: Duration,
    /// Input/output sizes in bytes; zero unless the job completed.
    pub input_size: u64,
    pub output_size: u64,
}

/// One unit of work: an input file and its derived output paths.
#[derive(Debug, Clone)]
pub struct Job {
    pub input: PathBuf,
    pub filename: String,
    /// Video-only intermediate, destroyed after a successful remux.
    pub temp_output: PathBuf,
    /// Final output; its existence is the idempotency signal.
    pub final_output: PathBuf,
}

impl Job {
    /// Derives the temp and final output paths for `input` inside
    /// `output_dir`. The stem is the original filename minus its
    /// extension; no other suffix is added.
    pub fn for_input(input: &Path, output_dir: &Path) -> CoreResult<Self> {
        let filename = get_filename_safe(input)?;
        let stem = input
            .file_stem()
            .ok_or_else(|| {
                CoreError::PathError(format!(
                    "Failed to get filename stem for {}",
                    input.display()
                ))
            })?
            .to_string_lossy();

        Ok(Self {
            input: input.to_path_buf(),
            filename,
            temp_output: output_dir.join(format!("temp_{stem}.mkv")),
            final_output: output_dir.join(format!("{stem}.mkv")),
        })
    }
}

/// Processes a list of video files according to the provided configuration.
///
/// Verifies that HandBrakeCLI and mkvmerge are invocable, then runs the
/// per-file pipeline sequentially. Per-job failures are reported in the
/// returned [`JobReport`]s; only pre-flight and path errors abort the
/// whole batch.
///
/// # Arguments
///
/// * `runner` - Implementation of [`CommandRunner`] executing the tools
/// * `config` - Batch configuration (paths, resolution, quality, preset)
/// * `files_to_process` - Input files, typically from `find_processable_files`
/// * `remux_log` - Shared append-only sink for mkvmerge diagnostics
pub fn process_videos<R: CommandRunner>(
    runner: &R,
    config: &CoreConfig,
    files_to_process: &[PathBuf],
    remux_log: &RemuxLog,
) -> CoreResult<Vec<JobReport>> {
    info!("{}", "Checking for required external commands...".cyan());
    check_dependency(runner, HANDBRAKE_BIN)?;
    info!("  {} {}", "[OK]".green().bold(), "HandBrakeCLI found.");
    check_dependency(runner, MKVMERGE_BIN)?;
    info!("  {} {}", "[OK]".green().bold(), "mkvmerge found.");

    let mut reports: Vec<JobReport> = Vec::new();

    for input_path in files_to_process {
        let job = Job::for_input(input_path, &config.output_dir)?;
        reports.push(process_one(runner, config, &job, remux_log));
        info!("----------------------------------------");
    }

    Ok(reports)
}

/// Runs the state machine for a single job. Never propagates per-job
/// failures; they end up in the report.
fn process_one<R: CommandRunner>(
    runner: &R,
    config: &CoreConfig,
    job: &Job,
    remux_log: &RemuxLog,
) -> JobReport {
    let start = Instant::now();

    // Check: skip entirely when the final output already exists.
    if job.final_output.exists() {
        info!(
            "Output file {} already exists. {}",
            job.final_output.display(),
            "Skipping...".yellow()
        );
        return JobReport {
            filename: job.filename.clone(),
            status: JobStatus::Skipped,
            elapsed: start.elapsed(),
            input_size: 0,
            output_size: 0,
        };
    }

    // Encode: video-only track to the temp path.
    info!(
        "{} {}",
        "Encoding video track of".cyan(),
        job.filename.yellow()
    );
    let params = EncodeParams::from_config(config, &job.input, &job.temp_output);
    if let Err(e) = run_encode(runner, &params) {
        error!("Encode failed for {}: {}", job.filename, e);
        return failed_report(job, start, Stage::Encode, e);
    }

    // Remux: combine the fresh video with the original's other tracks.
    info!(
        "{} {}",
        "Merging encoded video with original audio/subtitles from".cyan(),
        job.filename.yellow()
    );
    let outcome = match remux(
        runner,
        &job.temp_output,
        &job.input,
        &job.final_output,
        remux_log,
    ) {
        Ok(outcome) => outcome,
        Err(e) => {
            let stage = match &e {
                CoreError::Inspection { .. } => Stage::Inspect,
                _ => Stage::Remux,
            };
            error!("{} failed for {}: {}", stage, job.filename, e);
            return failed_report(job, start, stage, e);
        }
    };

    if let RemuxOutcome::Warnings(_) = &outcome {
        warn!(
            "mkvmerge reported warnings for {}; see {}",
            job.filename,
            remux_log.path().display()
        );
    }

    // Cleanup: the temp artifact is only needed until the remux succeeds.
    if let Err(e) = std::fs::remove_file(&job.temp_output) {
        warn!(
            "Failed to remove temp file {}: {}",
            job.temp_output.display(),
            e
        );
    }

    let elapsed = start.elapsed();
    info!(
        "Finished processing {} in {}.",
        job.filename.green(),
        format_duration(elapsed.as_secs_f64())
    );

    let input_size = get_file_size(&job.input).unwrap_or(0);
    let output_size = get_file_size(&job.final_output).unwrap_or(0);

    JobReport {
        filename: job.filename.clone(),
        status: match outcome {
            RemuxOutcome::Clean => JobStatus::Completed,
            RemuxOutcome::Warnings(_) => JobStatus::CompletedWithWarnings,
        },
        elapsed,
        input_size,
        output_size,
    }
}

fn failed_report(job: &Job, start: Instant, stage: Stage, error: CoreError) -> JobReport {
    JobReport {
        filename: job.filename.clone(),
        status: JobStatus::Failed {
            stage,
            message: error.to_string(),
        },
        elapsed: start.elapsed(),
        input_size: 0,
        output_size: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_paths_derive_from_the_filename_stem() {
        let job = Job::for_input(
            Path::new("/videos/Show S01E01.mp4"),
            Path::new("/out"),
        )
        .unwrap();
        assert_eq!(job.filename, "Show S01E01.mp4");
        assert_eq!(job.temp_output, Path::new("/out/temp_Show S01E01.mkv"));
        assert_eq!(job.final_output, Path::new("/out/Show S01E01.mkv"));
    }

    #[test]
    fn job_final_output_keeps_stem_for_mkv_inputs() {
        let job = Job::for_input(Path::new("show.mkv"), Path::new("out")).unwrap();
        assert_eq!(job.final_output, Path::new("out/show.mkv"));
        assert_eq!(job.temp_output, Path::new("out/temp_show.mkv"));
    }

    #[test]
    fn failed_status_reports_stage() {
        let status = JobStatus::Failed {
            stage: Stage::Remux,
            message: "boom".to_string(),
        };
        assert!(status.is_failure());
        assert!(!status.is_completed());
        assert_eq!(Stage::Remux.to_string(), "remux");
    }
}
