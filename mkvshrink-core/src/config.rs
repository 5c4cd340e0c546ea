//! Configuration structures and constants for the mkvshrink core library.
//!
//! Instances of [`CoreConfig`] are created by consumers of the library
//! (like mkvshrink-cli) and passed to `process_videos` to control the
//! encoding behavior.

use crate::error::{CoreError, CoreResult};
use crate::resolution::Resolution;
use std::path::PathBuf;

/// Default constant-quality level passed to the encoder.
/// Lower values produce higher quality but larger files.
pub const DEFAULT_QUALITY: u8 = 22;

/// Default encoder speed/quality preset.
pub const DEFAULT_ENCODER_PRESET: &str = "slow";

/// Main configuration for a batch run.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Directory containing input video files to process
    pub input_dir: PathBuf,

    /// Directory where remuxed output files will be saved
    pub output_dir: PathBuf,

    /// Target resolution for the encoded video track
    pub resolution: Resolution,

    /// Constant-quality level for the encoder
    pub quality: u8,

    /// Encoder speed/quality preset
    pub preset: String,
}

impl CoreConfig {
    /// Creates a configuration with the default quality and preset.
    #[must_use]
    pub fn new(input_dir: PathBuf, output_dir: PathBuf, resolution: Resolution) -> Self {
        Self {
            input_dir,
            output_dir,
            resolution,
            quality: DEFAULT_QUALITY,
            preset: DEFAULT_ENCODER_PRESET.to_string(),
        }
    }

    /// Validates the configuration before any file is processed.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.input_dir.is_dir() {
            return Err(CoreError::PathError(format!(
                "Input folder '{}' does not exist or is not a directory",
                self.input_dir.display()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_applies_default_quality_and_preset() {
        let config = CoreConfig::new(
            PathBuf::from("in"),
            PathBuf::from("out"),
            Resolution::R1080p,
        );
        assert_eq!(config.quality, DEFAULT_QUALITY);
        assert_eq!(config.preset, DEFAULT_ENCODER_PRESET);
    }

    #[test]
    fn validate_rejects_missing_input_dir() {
        let config = CoreConfig::new(
            PathBuf::from("surely_this_does_not_exist_42"),
            PathBuf::from("out"),
            Resolution::R720p,
        );
        assert!(config.validate().is_err());
    }
}
