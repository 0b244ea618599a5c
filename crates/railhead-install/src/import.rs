//! Running the downstream import over a provisioned directory.
//!
//! This is a separate phase from fetching: nothing in [`crate::Pipeline`]
//! starts it, callers invoke it once they decide the directory is ready.

use std::path::PathBuf;
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

use crate::error::{PipelineError, Result};

/// `<binary> import`, run inside `work_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportCommand {
    pub binary:   PathBuf,
    pub work_dir: PathBuf,
}

impl ImportCommand {
    pub fn new(binary: impl Into<PathBuf>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            binary:   binary.into(),
            work_dir: work_dir.into(),
        }
    }

    /// The program that is spawned.
    ///
    /// Relative paths with more than one component (`./motis`, `bin/motis`)
    /// are resolved against the work dir; bare names go through `PATH`.
    pub fn program(&self) -> PathBuf {
        if self.binary.is_absolute() || self.binary.components().count() < 2 {
            self.binary.clone()
        } else {
            self.work_dir.join(&self.binary)
        }
    }

    /// Run the import, handing each stdout line to `on_line`.
    ///
    /// Stderr lines are logged. Fails when the process cannot be started or
    /// exits unsuccessfully.
    pub async fn run(&self, mut on_line: impl FnMut(&str) + Send) -> Result<()> {
        let program = self.program();
        let spawn_err = |source| PipelineError::Import {
            binary: program.clone(),
            source,
        };

        tracing::info!(program = %program.display(), work_dir = %self.work_dir.display(), "starting import");
        let mut child = Command::new(&program)
            .arg("import")
            .current_dir(&self.work_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(spawn_err)?;

        let stderr = child.stderr.take().map(|stderr| {
            tokio::spawn(async move {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    tracing::warn!(target: "railhead::import", "{line}");
                }
            })
        });

        if let Some(stdout) = child.stdout.take() {
            let mut lines = BufReader::new(stdout).lines();
            while let Some(line) = lines.next_line().await.map_err(spawn_err)? {
                on_line(&line);
            }
        }

        let status = child.wait().await.map_err(spawn_err)?;
        if let Some(handle) = stderr {
            let _ = handle.await;
        }

        if !status.success() {
            return Err(PipelineError::ImportStatus {
                binary: program,
                status,
            });
        }
        tracing::info!("import finished");
        Ok(())
    }

    /// Whether the program exists, for commands given as a path.
    pub fn is_present(&self) -> bool {
        let program = self.program();
        program.components().count() < 2 || program.is_file()
    }
}
