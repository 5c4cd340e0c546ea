//! Append-only log for mkvmerge warnings and errors.
//!
//! One log file lives in the output folder and is shared by every job in a
//! run. The file is opened in append mode for each write, so concurrent
//! manual runs against the same output folder do not clobber each other's
//! entries.

use crate::error::CoreResult;

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Filename of the shared warnings/errors log inside the output folder.
pub const LOG_FILE_NAME: &str = "mkvmerge-warnings-errors.log";

/// Append-only sink for remux diagnostics.
#[derive(Debug, Clone)]
pub struct RemuxLog {
    path: PathBuf,
}

impl RemuxLog {
    /// Creates a sink writing to [`LOG_FILE_NAME`] inside `output_dir`.
    /// The file itself is created lazily on first append.
    #[must_use]
    pub fn in_dir(output_dir: &Path) -> Self {
        Self {
            path: output_dir.join(LOG_FILE_NAME),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends a timestamped warning entry for `source_file`.
    pub fn append_warning(&self, source_file: &Path, details: &str) -> CoreResult<()> {
        self.append(&format!(
            "{}: Warning encountered while processing file {}:\n{}\n",
            timestamp(),
            source_file.display(),
            details.trim_end()
        ))
    }

    /// Appends a timestamped error entry for `source_file` with the full
    /// captured diagnostic text.
    pub fn append_error(&self, source_file: &Path, details: &str) -> CoreResult<()> {
        self.append(&format!(
            "{}: Error for file {}:\n{}\n",
            timestamp(),
            source_file.display(),
            details.trim_end()
        ))
    }

    fn append(&self, entry: &str) -> CoreResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(entry.as_bytes())?;
        Ok(())
    }
}

/// Current local time in ISO-8601 form.
fn timestamp() -> String {
    chrono::Local::now().to_rfc3339()
}
