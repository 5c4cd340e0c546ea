//! mkvmerge integration: container inspection and remux with explicit
//! track selection.
//!
//! Inspection runs `mkvmerge -J` and parses the JSON identification into a
//! [`TrackIds`] mapping. The remux combines the freshly encoded video-only
//! file with every original audio and subtitle track, excluding the
//! original video. mkvmerge's exit code 1 means "completed with warnings";
//! those are logged and tolerated, anything above is fatal for the job.

use crate::error::{CoreError, CoreResult};
use crate::external::{display_command, CommandRunner, MKVMERGE_BIN};
use crate::remux_log::RemuxLog;

use serde::Deserialize;
use std::path::Path;

/// Track identifiers of a container, grouped by track kind.
///
/// Re-derived per file from `mkvmerge -J`; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackIds {
    pub video: Vec<u64>,
    pub audio: Vec<u64>,
    pub subtitles: Vec<u64>,
}

/// Subset of the mkvmerge identification JSON consumed here.
#[derive(Debug, Deserialize)]
struct Identification {
    #[serde(default)]
    tracks: Vec<IdentifiedTrack>,
}

#[derive(Debug, Deserialize)]
struct IdentifiedTrack {
    id: u64,
    #[serde(rename = "type")]
    kind: String,
}

/// Outcome of a remux that produced the final output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemuxOutcome {
    /// Exit code 0.
    Clean,
    /// Exit code 1; the captured diagnostics were appended to the log.
    Warnings(String),
}

/// Inspects a media container and returns its track ids grouped by kind.
///
/// Fails with [`CoreError::Inspection`] if mkvmerge exits non-zero or the
/// identification output cannot be parsed. Not retried; fatal for the job.
pub fn inspect_tracks<R: CommandRunner>(runner: &R, path: &Path) -> CoreResult<TrackIds> {
    let args = vec!["-J".to_string(), path.to_string_lossy().into_owned()];
    log::debug!("Running: {}", display_command(MKVMERGE_BIN, &args));

    let output = runner.run(MKVMERGE_BIN, &args)?;
    if !output.success() {
        return Err(CoreError::Inspection {
            path: path.to_path_buf(),
            message: format!(
                "mkvmerge -J exited with status {}: {}",
                output.status,
                output.stderr.trim()
            ),
        });
    }

    let identification: Identification =
        serde_json::from_str(&output.stdout).map_err(|e| CoreError::Inspection {
            path: path.to_path_buf(),
            message: format!("unparsable identification JSON: {e}"),
        })?;

    let mut tracks = TrackIds::default();
    for track in identification.tracks {
        match track.kind.as_str() {
            "video" => tracks.video.push(track.id),
            "audio" => tracks.audio.push(track.id),
            "subtitles" => tracks.subtitles.push(track.id),
            _ => {}
        }
    }
    Ok(tracks)
}

/// Builds the mkvmerge argument list combining the encoded video with the
/// original's audio and subtitle tracks.
///
/// The encoded file is appended first and contributes the sole video
/// track. The original follows with its video excluded and its audio and
/// subtitle tracks selected explicitly; when the original has no subtitle
/// tracks, subtitle inclusion is explicitly disabled so mkvmerge does not
/// fail on the empty selection.
#[must_use]
pub fn build_remux_args(
    encoded_video: &Path,
    original_file: &Path,
    final_output: &Path,
    tracks: &TrackIds,
) -> Vec<String> {
    let mut args = vec![
        "-o".to_string(),
        final_output.to_string_lossy().into_owned(),
        encoded_video.to_string_lossy().into_owned(),
        "--no-video".to_string(),
    ];

    if !tracks.audio.is_empty() {
        args.push("--audio-tracks".to_string());
        args.push(join_ids(&tracks.audio));
    }

    if !tracks.subtitles.is_empty() {
        args.push("--subtitle-tracks".to_string());
        args.push(join_ids(&tracks.subtitles));
    } else {
        args.push("--no-subtitles".to_string());
    }

    args.push(original_file.to_string_lossy().into_owned());
    args
}

fn join_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Remuxes the encoded video with the original's non-video tracks into the
/// final output path.
///
/// Inspects the original first to build the track selection. Exit code 1
/// is a non-fatal warning: it is appended to `remux_log` with a timestamp
/// and reported as [`RemuxOutcome::Warnings`]. Any other non-zero exit is
/// logged with the full diagnostics and returned as [`CoreError::Remux`].
pub fn remux<R: CommandRunner>(
    runner: &R,
    encoded_video: &Path,
    original_file: &Path,
    final_output: &Path,
    remux_log: &RemuxLog,
) -> CoreResult<RemuxOutcome> {
    let tracks = inspect_tracks(runner, original_file)?;
    let args = build_remux_args(encoded_video, original_file, final_output, &tracks);
    log::debug!("Running: {}", display_command(MKVMERGE_BIN, &args));

    let output = runner.run(MKVMERGE_BIN, &args)?;
    match output.status {
        0 => Ok(RemuxOutcome::Clean),
        1 => {
            remux_log.append_warning(original_file, &output.stderr)?;
            Ok(RemuxOutcome::Warnings(output.stderr))
        }
        status => {
            remux_log.append_error(original_file, &output.stderr)?;
            Err(CoreError::Remux {
                path: original_file.to_path_buf(),
                status,
                stderr: output.stderr,
            })
        }
    }
}
