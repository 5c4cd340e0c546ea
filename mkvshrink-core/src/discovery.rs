//! File discovery module for finding video files to process.
//!
//! Scans the top level of the input directory for files with a recognized
//! video extension (case-insensitive). Subdirectories are not searched.

use crate::error::{CoreError, CoreResult};

use std::path::{Path, PathBuf};

/// File extensions recognized as processable video containers.
pub const VIDEO_EXTENSIONS: [&str; 6] = ["mp4", "mkv", "avi", "mov", "flv", "wmv"];

/// Finds video files eligible for processing in the specified directory.
///
/// Matching is case-insensitive on the extension. Results are sorted by
/// path so repeated runs process files in a deterministic order.
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - Paths to the discovered video files
/// * `Err(CoreError::NoFilesFound)` - If no recognized files are found
pub fn find_processable_files(input_dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let read_dir = std::fs::read_dir(input_dir)?;
    let mut files: Vec<PathBuf> = read_dir
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();

            if !path.is_file() {
                return None;
            }

            path.extension()
                .and_then(|ext| ext.to_str())
                .filter(|ext_str| {
                    VIDEO_EXTENSIONS
                        .iter()
                        .any(|known| ext_str.eq_ignore_ascii_case(known))
                })
                .map(|_| path.clone())
        })
        .collect();

    files.sort();

    if files.is_empty() {
        Err(CoreError::NoFilesFound)
    } else {
        Ok(files)
    }
}
