//! HandBrakeCLI integration for the video-only encode step.
//!
//! The encode produces an MKV containing a single H.265 video track at the
//! target height; audio and subtitle inclusion is explicitly suppressed so
//! the remux step can carry the originals over untouched.

use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult};
use crate::external::{display_command, CommandRunner, HANDBRAKE_BIN};

use std::path::{Path, PathBuf};

/// Parameters for a single video-only encode.
#[derive(Debug, Clone)]
pub struct EncodeParams {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// Target height in pixels; width follows from the source aspect.
    pub target_height: u32,
    /// Constant-quality level (x265 CRF).
    pub quality: u8,
    /// Encoder speed/quality preset name.
    pub preset: String,
}

impl EncodeParams {
    /// Builds encode parameters for one job from the batch configuration.
    #[must_use]
    pub fn from_config(config: &CoreConfig, input_path: &Path, output_path: &Path) -> Self {
        Self {
            input_path: input_path.to_path_buf(),
            output_path: output_path.to_path_buf(),
            target_height: config.resolution.height(),
            quality: config.quality,
            preset: config.preset.clone(),
        }
    }
}

/// Builds the HandBrakeCLI argument list for a video-only encode.
///
/// The flag set is fixed apart from the parameterized height, quality and
/// preset: MKV container, x265 encoder, constant framerate matching the
/// source, display aspect kept, no audio, no subtitles.
#[must_use]
pub fn build_encode_args(params: &EncodeParams) -> Vec<String> {
    vec![
        "-i".to_string(),
        params.input_path.to_string_lossy().into_owned(),
        "-o".to_string(),
        params.output_path.to_string_lossy().into_owned(),
        "-f".to_string(),
        "mkv".to_string(),
        "-e".to_string(),
        "x265".to_string(),
        "--encoder-preset".to_string(),
        params.preset.clone(),
        "-q".to_string(),
        params.quality.to_string(),
        "--cfr".to_string(),
        "--height".to_string(),
        params.target_height.to_string(),
        "--keep-display-aspect".to_string(),
        "-a".to_string(),
        "none".to_string(),
        "-s".to_string(),
        "none".to_string(),
    ]
}

/// Runs the video-only encode for one job.
///
/// A non-zero exit is fatal for the job; the tool's diagnostic output is
/// captured in the returned error. No partial-output salvage is attempted.
pub fn run_encode<R: CommandRunner>(runner: &R, params: &EncodeParams) -> CoreResult<()> {
    let args = build_encode_args(params);
    log::debug!("Running: {}", display_command(HANDBRAKE_BIN, &args));

    let output = runner.run(HANDBRAKE_BIN, &args)?;
    if !output.success() {
        return Err(CoreError::Encode {
            path: params.input_path.clone(),
            status: output.status,
            stderr: output.stderr,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolution::Resolution;

    fn params(height: u32) -> EncodeParams {
        EncodeParams {
            input_path: PathBuf::from("/in/show.mkv"),
            output_path: PathBuf::from("/out/temp_show.mkv"),
            target_height: height,
            quality: 22,
            preset: "slow".to_string(),
        }
    }

    #[test]
    fn encode_args_carry_target_height() {
        let args = build_encode_args(&params(720));
        let height_pos = args.iter().position(|a| a == "--height").unwrap();
        assert_eq!(args[height_pos + 1], "720");
    }

    #[test]
    fn encode_args_suppress_audio_and_subtitles() {
        let args = build_encode_args(&params(1080));
        let audio_pos = args.iter().position(|a| a == "-a").unwrap();
        assert_eq!(args[audio_pos + 1], "none");
        let subs_pos = args.iter().position(|a| a == "-s").unwrap();
        assert_eq!(args[subs_pos + 1], "none");
    }

    #[test]
    fn encode_args_use_fixed_container_codec_and_quality() {
        let args = build_encode_args(&params(2160));
        for expected in ["-f", "mkv", "-e", "x265", "-q", "22", "--cfr", "--keep-display-aspect"] {
            assert!(args.iter().any(|a| a == expected), "missing {expected}");
        }
        let preset_pos = args.iter().position(|a| a == "--encoder-preset").unwrap();
        assert_eq!(args[preset_pos + 1], "slow");
    }

    #[test]
    fn from_config_resolves_preset_height() {
        let config = CoreConfig::new(
            PathBuf::from("in"),
            PathBuf::from("out"),
            Resolution::R2160p,
        );
        let p = EncodeParams::from_config(
            &config,
            Path::new("in/a.mp4"),
            Path::new("out/temp_a.mkv"),
        );
        assert_eq!(p.target_height, 2160);
        assert_eq!(p.quality, 22);
    }
}
