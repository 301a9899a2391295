//! Diffing through an external `diff` program.

use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempPath;

use crate::{DiffEngine, DiffOutcome, Error};

/// Runs a `diff`-compatible program on two staged temporary files.
///
/// Each text is written to its own uniquely named file, the write handle is
/// closed, and `<program> -U<context> <left> <right>` is run. Exit status 0
/// means identical, 1 means different (the diff is read from stdout), and
/// anything else is an error.
///
/// Staged files are removed on every exit path. Removal happens on a
/// detached background thread, so a file may outlive the call briefly.
#[derive(Debug, Clone)]
pub struct ExternalDiff {
    program: PathBuf,
    scratch_dir: Option<PathBuf>,
}

impl Default for ExternalDiff {
    fn default() -> Self {
        Self::new("diff")
    }
}

impl ExternalDiff {
    /// Use `program` instead of the `diff` found on `PATH`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            scratch_dir: None,
        }
    }

    /// Stage inputs in `dir` instead of the OS temporary directory.
    pub fn scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    /// The program this engine runs.
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn stage(&self, index: u8, text: &str) -> Result<Staged, Error> {
        let staging = |source| Error::Staging { index, source };

        let mut builder = tempfile::Builder::new();
        builder.prefix("diffed-assert-").suffix(".txt");
        let mut file = match &self.scratch_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(staging)?;

        file.write_all(text.as_bytes()).map_err(staging)?;
        file.flush().map_err(staging)?;

        // Closes the handle, keeps the file.
        let path = file.into_temp_path();
        tracing::trace!(index, path = %path.display(), "staged diff input");
        Ok(Staged(Some(path)))
    }
}

impl DiffEngine for ExternalDiff {
    fn unified_diff(
        &self,
        left: &str,
        right: &str,
        context: usize,
    ) -> Result<DiffOutcome, Error> {
        let left = self.stage(1, left)?;
        let right = self.stage(2, right)?;

        let output = Command::new(&self.program)
            .arg(format!("-U{context}"))
            .arg(left.path())
            .arg(right.path())
            .output()
            .map_err(|e| {
                Error::diff_failed(format!("could not run `{}`: {e}", self.program.display()))
            })?;

        match output.status.code() {
            Some(0) => Ok(DiffOutcome::Identical),
            Some(1) => String::from_utf8(output.stdout)
                .map(DiffOutcome::Changed)
                .map_err(|_| Error::diff_failed("diff output is not valid UTF-8")),
            Some(code) => Err(Error::diff_failed(format!(
                "`{}` exited with {code}: {}",
                self.program.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            ))),
            None => Err(Error::diff_failed(format!(
                "`{}` was terminated by a signal",
                self.program.display()
            ))),
        }
    }
}

/// A staged input file, deleted in the background when dropped.
struct Staged(Option<TempPath>);

impl Staged {
    fn path(&self) -> &Path {
        self.0.as_deref().unwrap_or(Path::new(""))
    }
}

impl Drop for Staged {
    fn drop(&mut self) {
        let Some(path) = self.0.take() else {
            return;
        };

        let spawned = std::thread::Builder::new()
            .name("diffed-assert-cleanup".into())
            .spawn(move || {
                let staged = path.to_path_buf();
                if let Err(e) = path.close() {
                    tracing::warn!(
                        path = %staged.display(),
                        error = %e,
                        "failed to remove staged diff input"
                    );
                }
            });

        // If no thread could be spawned the closure (and with it the
        // `TempPath`) has already been dropped, which removes the file inline.
        if let Err(e) = spawned {
            tracing::debug!(error = %e, "removed staged diff input inline");
        }
    }
}
