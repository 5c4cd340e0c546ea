//! Core library for batch video re-encoding and remuxing using
//! HandBrakeCLI and mkvmerge.
//!
//! For every recognized media file in an input directory, the pipeline
//! re-encodes the video track to H.265 at a target resolution and remuxes
//! the result with all original audio and subtitle tracks, skipping files
//! whose final output already exists.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use mkvshrink_core::{CoreConfig, Resolution, RemuxLog, SystemCommandRunner};
//! use std::path::PathBuf;
//!
//! let config = CoreConfig::new(
//!     PathBuf::from("/path/to/input"),
//!     PathBuf::from("/path/to/output"),
//!     Resolution::R1080p,
//! );
//! config.validate().unwrap();
//!
//! let files = mkvshrink_core::find_processable_files(&config.input_dir).unwrap();
//! let remux_log = RemuxLog::in_dir(&config.output_dir);
//!
//! let reports = mkvshrink_core::process_videos(
//!     &SystemCommandRunner,
//!     &config,
//!     &files,
//!     &remux_log,
//! ).unwrap();
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod processing;
pub mod remux_log;
pub mod resolution;
pub mod utils;

// Re-exports for public API
pub use config::{CoreConfig, DEFAULT_ENCODER_PRESET, DEFAULT_QUALITY};
pub use discovery::{find_processable_files, VIDEO_EXTENSIONS};
pub use error::{CoreError, CoreResult};
pub use external::{
    CommandOutput, CommandRunner, SystemCommandRunner, HANDBRAKE_BIN, MKVMERGE_BIN,
};
pub use processing::{process_videos, Job, JobReport, JobStatus, Stage};
pub use remux_log::{RemuxLog, LOG_FILE_NAME};
pub use resolution::Resolution;
pub use utils::{calculate_size_reduction, format_bytes, format_duration};
