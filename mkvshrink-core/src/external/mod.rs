//! Interactions with external CLI tools.
//!
//! This module encapsulates the two external collaborators, HandBrakeCLI
//! (video encode) and mkvmerge (track inspection and remux). All
//! subprocess execution goes through the [`CommandRunner`] trait so that
//! consumers can inject test doubles that simulate tool behavior without
//! invoking real binaries.

use crate::error::{CoreError, CoreResult};

use std::io;
use std::process::Command;

/// HandBrakeCLI encode argument building and execution
pub mod handbrake;

/// mkvmerge track inspection and remux
pub mod mkvmerge;

pub use handbrake::{build_encode_args, run_encode, EncodeParams};
pub use mkvmerge::{build_remux_args, inspect_tracks, remux, RemuxOutcome, TrackIds};

/// Name of the HandBrake command-line binary looked up on PATH.
pub const HANDBRAKE_BIN: &str = "HandBrakeCLI";

/// Name of the MKVToolNix multiplexer binary looked up on PATH.
pub const MKVMERGE_BIN: &str = "mkvmerge";

/// Captured result of one external tool invocation.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Process exit code; -1 if the process was terminated by a signal.
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Capability to run an external tool with an argument list and capture
/// its exit code and output streams.
///
/// The production implementation is [`SystemCommandRunner`]; tests provide
/// scripted doubles to simulate tool failures.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[String]) -> CoreResult<CommandOutput>;
}

/// Runs commands via `std::process::Command` with implicit PATH lookup.
///
/// Each call blocks until the child exits; both output streams are
/// captured in full.
#[derive(Debug, Clone, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[String]) -> CoreResult<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => CoreError::DependencyNotFound(program.to_string()),
                _ => CoreError::CommandStart(program.to_string(), e),
            })?;

        Ok(CommandOutput {
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Checks that a required external command is available and executable.
///
/// Runs the command with `--version` and only inspects whether it could be
/// started; the reported version is logged at debug level.
pub(crate) fn check_dependency<R: CommandRunner>(runner: &R, cmd_name: &str) -> CoreResult<()> {
    let output = runner.run(cmd_name, &["--version".to_string()])?;
    log::debug!(
        "Found dependency {}: {}",
        cmd_name,
        output.stdout.lines().next().unwrap_or("(no version output)")
    );
    Ok(())
}

/// Quotes an argument list for log output.
pub(crate) fn display_command(program: &str, args: &[String]) -> String {
    let mut parts = Vec::with_capacity(args.len() + 1);
    parts.push(program.to_string());
    for arg in args {
        if arg.contains(' ') {
            parts.push(format!("\"{arg}\""));
        } else {
            parts.push(arg.clone());
        }
    }
    parts.join(" ")
}
