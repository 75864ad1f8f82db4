//! Rendering replicate inputs and handing them to a job launcher.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::str::FromStr;

use fuq_core::errors::{ErrorInfo, FuqError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// How rendered replicates are launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SubmitMode {
    /// Render the submission template and queue it with the batch scheduler.
    #[default]
    Pbs,
    /// Start the engine directly in the replicate directory.
    Local,
    /// Write the input files only.
    DryRun,
}

impl FromStr for SubmitMode {
    type Err = FuqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pbs" => Ok(SubmitMode::Pbs),
            "local" => Ok(SubmitMode::Local),
            "dry-run" | "dryrun" => Ok(SubmitMode::DryRun),
            other => Err(FuqError::Config(
                ErrorInfo::new("unknown-submit-mode", format!("{other} is not a submit mode"))
                    .with_hint("use pbs, local or dry-run"),
            )),
        }
    }
}

/// Fully rendered inputs for one replicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicateJob {
    /// Replicate index.
    pub copy: usize,
    /// Replicate directory.
    pub dir: PathBuf,
    /// Velocity seed substituted into the input.
    pub seed: u64,
    /// Input file name.
    pub in_file: String,
    /// Rendered input text.
    pub in_text: String,
    /// Submission script name.
    pub sub_file: String,
    /// Rendered submission script, absent when the mode needs none.
    pub sub_text: Option<String>,
}

/// Launches rendered replicate jobs.
pub trait Submitter {
    /// Writes and launches one replicate.
    fn submit(&self, job: &ReplicateJob) -> Result<(), FuqError>;
}

/// Writes input files without launching anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunSubmitter;

impl Submitter for DryRunSubmitter {
    fn submit(&self, job: &ReplicateJob) -> Result<(), FuqError> {
        write_job_files(job)
    }
}

/// Writes input files, then runs the scheduler or engine command in the replicate directory.
#[derive(Debug, Clone)]
pub struct CommandSubmitter {
    /// Launch mode.
    pub mode: SubmitMode,
    /// Scheduler submission command for [`SubmitMode::Pbs`].
    pub queue_command: String,
    /// Engine executable for [`SubmitMode::Local`].
    pub engine_command: String,
}

impl CommandSubmitter {
    /// Submitter using `qsub` and `lmp`.
    pub fn new(mode: SubmitMode) -> Self {
        Self {
            mode,
            queue_command: "qsub".to_string(),
            engine_command: "lmp".to_string(),
        }
    }
}

impl Submitter for CommandSubmitter {
    fn submit(&self, job: &ReplicateJob) -> Result<(), FuqError> {
        write_job_files(job)?;
        let mut command = match self.mode {
            SubmitMode::Pbs => {
                let mut cmd = Command::new(&self.queue_command);
                cmd.arg(&job.sub_file);
                cmd
            }
            SubmitMode::Local => {
                let mut cmd = Command::new(&self.engine_command);
                cmd.arg("-in").arg(&job.in_file);
                cmd
            }
            SubmitMode::DryRun => return Ok(()),
        };
        command.current_dir(&job.dir);
        let launch_error = |err: std::io::Error| {
            FuqError::Submit(
                ErrorInfo::new("launch-failed", err.to_string())
                    .with_context("copy", job.copy.to_string())
                    .with_context("dir", job.dir.display().to_string())
                    .with_hint("use --mode dry-run to only write the inputs"),
            )
        };
        match self.mode {
            SubmitMode::Pbs => {
                let status = command.status().map_err(launch_error)?;
                if !status.success() {
                    return Err(FuqError::Submit(
                        ErrorInfo::new(
                            "queue-rejected",
                            format!("{} exited with {status}", self.queue_command),
                        )
                        .with_context("copy", job.copy.to_string()),
                    ));
                }
            }
            _ => {
                let child = command.spawn().map_err(launch_error)?;
                debug!(copy = job.copy, pid = child.id(), "engine started");
            }
        }
        info!(copy = job.copy, dir = %job.dir.display(), "replicate submitted");
        Ok(())
    }
}

/// Substitutes each placeholder key verbatim.
pub fn render_template(template: &str, replacements: &BTreeMap<&str, String>) -> String {
    replacements
        .iter()
        .fold(template.to_string(), |text, (key, value)| text.replace(key, value))
}

/// Reads a template file.
pub fn read_template(path: &Path) -> Result<String, FuqError> {
    fs::read_to_string(path).map_err(|err| {
        FuqError::Submit(
            ErrorInfo::new("template-read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })
}

fn write_job_files(job: &ReplicateJob) -> Result<(), FuqError> {
    let io_error = |code: &str, path: &Path, err: std::io::Error| {
        FuqError::Io(
            ErrorInfo::new(code, err.to_string())
                .with_context("path", path.display().to_string()),
        )
    };
    fs::create_dir_all(&job.dir).map_err(|err| io_error("copy-dir", &job.dir, err))?;
    let in_path = job.dir.join(&job.in_file);
    fs::write(&in_path, &job.in_text).map_err(|err| io_error("input-write", &in_path, err))?;
    if let Some(sub_text) = &job.sub_text {
        let sub_path = job.dir.join(&job.sub_file);
        fs::write(&sub_path, sub_text).map_err(|err| io_error("script-write", &sub_path, err))?;
    }
    Ok(())
}
