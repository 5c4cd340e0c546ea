//! Command-line argument definitions for mkvshrink.

use clap::Parser;
use mkvshrink_core::{DEFAULT_ENCODER_PRESET, DEFAULT_QUALITY};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "mkvshrink",
    version,
    about = "Batch H.265 re-encode and remux tool",
    long_about = "Re-encodes the video track of every recognized file in the input \
folder to H.265 with HandBrakeCLI, then remuxes the result with all original \
audio and subtitle tracks using mkvmerge. Files whose output already exists \
are skipped, so interrupted runs can simply be restarted."
)]
pub struct Cli {
    /// Target resolution: 480p, 720p, 1080p, or 2160p (case-insensitive)
    #[arg(value_name = "RESOLUTION")]
    pub resolution: String,

    /// Folder containing the source video files
    #[arg(value_name = "INPUT_FOLDER")]
    pub input_folder: PathBuf,

    /// Folder where the re-encoded files are written
    #[arg(value_name = "OUTPUT_FOLDER")]
    pub output_folder: PathBuf,

    /// Override the constant-quality level passed to the encoder
    #[arg(
        long,
        value_name = "QUALITY",
        default_value_t = DEFAULT_QUALITY,
        value_parser = clap::value_parser!(u8).range(0..=51)
    )]
    pub quality: u8,

    /// Override the encoder speed/quality preset
    #[arg(long, value_name = "PRESET", default_value = DEFAULT_ENCODER_PRESET)]
    pub preset: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_args() {
        let cli = Cli::try_parse_from(["mkvshrink", "720p", "in_dir", "out_dir"]).unwrap();
        assert_eq!(cli.resolution, "720p");
        assert_eq!(cli.input_folder, PathBuf::from("in_dir"));
        assert_eq!(cli.output_folder, PathBuf::from("out_dir"));
        assert_eq!(cli.quality, DEFAULT_QUALITY);
        assert_eq!(cli.preset, DEFAULT_ENCODER_PRESET);
    }

    #[test]
    fn test_parse_overrides() {
        let cli = Cli::try_parse_from([
            "mkvshrink",
            "1080p",
            "in",
            "out",
            "--quality",
            "20",
            "--preset",
            "medium",
        ])
        .unwrap();
        assert_eq!(cli.quality, 20);
        assert_eq!(cli.preset, "medium");
    }

    #[test]
    fn test_missing_positionals_are_rejected() {
        assert!(Cli::try_parse_from(["mkvshrink"]).is_err());
        assert!(Cli::try_parse_from(["mkvshrink", "720p"]).is_err());
        assert!(Cli::try_parse_from(["mkvshrink", "720p", "in_only"]).is_err());
    }

    #[test]
    fn test_extra_positionals_are_rejected() {
        assert!(Cli::try_parse_from(["mkvshrink", "720p", "in", "out", "extra"]).is_err());
    }

    #[test]
    fn test_quality_out_of_range_is_rejected() {
        assert!(Cli::try_parse_from(["mkvshrink", "720p", "in", "out", "--quality", "99"]).is_err());
    }
}
