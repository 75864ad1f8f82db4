use std::path::{Path, PathBuf};

use fuq_core::errors::{ErrorInfo, FuqError};
use glob::{glob, Pattern};
use serde::{Deserialize, Serialize};

/// Contiguous range of replicate runs under a common run directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSet {
    /// Directory holding `<copy_folder><index>` replicate directories.
    pub run_dir: PathBuf,
    /// Replicate directory prefix.
    pub copy_folder: String,
    /// Log file name inside each replicate directory.
    pub log_file: String,
    /// First replicate index.
    pub start: usize,
    /// Number of replicates.
    pub count: usize,
}

impl RunSet {
    /// Replicate indices in processing order.
    pub fn indices(&self) -> std::ops::Range<usize> {
        self.start..self.start + self.count
    }

    /// Directory of replicate `copy`.
    pub fn copy_dir(&self, copy: usize) -> PathBuf {
        self.run_dir.join(format!("{}{}", self.copy_folder, copy))
    }

    /// Log path of replicate `copy`.
    pub fn log_path(&self, copy: usize) -> PathBuf {
        self.copy_dir(copy).join(&self.log_file)
    }
}

/// Indices of the replicate directories already present in `run_dir`.
pub fn existing_copies(run_dir: &Path, copy_folder: &str) -> Result<Vec<usize>, FuqError> {
    let pattern = format!(
        "{}/{}*",
        Pattern::escape(&run_dir.to_string_lossy()),
        Pattern::escape(copy_folder)
    );
    let entries = glob(&pattern).map_err(|err| {
        FuqError::Io(
            ErrorInfo::new("copy-glob", err.to_string())
                .with_context("pattern", pattern.clone()),
        )
    })?;
    let mut copies: Vec<usize> = entries
        .filter_map(Result::ok)
        .filter(|path| path.is_dir())
        .filter_map(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .and_then(|name| name.strip_prefix(copy_folder))
                .and_then(|index| index.parse().ok())
        })
        .collect();
    copies.sort_unstable();
    Ok(copies)
}

/// First replicate index for a new submission.
///
/// Without `overwrite`, numbering continues after the highest existing
/// replicate. A non-zero `copy_start` always wins.
pub fn next_copy_start(
    run_dir: &Path,
    copy_folder: &str,
    overwrite: bool,
    copy_start: usize,
) -> Result<usize, FuqError> {
    let mut next = 0;
    if !overwrite {
        if let Some(highest) = existing_copies(run_dir, copy_folder)?.last() {
            next = highest + 1;
        }
    }
    if copy_start > 0 {
        next = copy_start;
    }
    Ok(next)
}
