// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Clone execution - a thin wrapper around `git clone`

use std::path::{Path, PathBuf};
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info, instrument};

/// Fallback message when git printed nothing useful
const DEFAULT_FAILURE: &str = "Clone failed";

/// Reasons a clone request is rejected before git runs
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// No repository URL given
    #[error("Repository is required")]
    RepositoryRequired,
    /// No target directory given
    #[error("Directory is required")]
    DirectoryRequired,
    /// Target directory already on disk
    #[error("Directory already exists: {}", .0.display())]
    DirectoryExists(PathBuf),
}

/// Errors from running a clone
#[derive(Debug, Error)]
pub enum CloneError {
    /// The request did not pass validation
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The parent of the target directory could not be created
    #[error("Failed to create {}: {source}", path.display())]
    CreateParent {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// git could not be started
    #[error("Failed to run git: {0}")]
    Spawn(#[source] std::io::Error),

    /// git ran and exited non-zero
    #[error("{message}")]
    Failed {
        /// Most relevant line of git's stderr
        message: String,
        /// Full stderr output
        stderr: String,
    },
}

/// A repository to clone and where to put it
#[derive(Debug, Clone)]
pub struct CloneRequest {
    /// Repository URL (or any location git understands)
    pub repository: String,
    /// Target directory
    pub directory: PathBuf,
}

/// Result of a successful clone
#[derive(Debug, Clone, serde::Serialize)]
pub struct CloneOutcome {
    /// Repository that was cloned
    pub repository: String,
    /// Directory it was cloned into
    pub directory: PathBuf,
    /// README.md inside the new checkout, if there is one
    pub readme: Option<PathBuf>,
}

impl CloneRequest {
    /// Create a new request
    pub fn new(repository: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        Self {
            repository: repository.into(),
            directory: directory.into(),
        }
    }

    /// Check the request before anything touches the disk
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.repository.trim().is_empty() {
            return Err(ValidationError::RepositoryRequired);
        }
        if self.directory.as_os_str().is_empty() {
            return Err(ValidationError::DirectoryRequired);
        }
        if self.directory.exists() {
            return Err(ValidationError::DirectoryExists(self.directory.clone()));
        }
        Ok(())
    }

    /// Shell form of the clone command
    #[must_use]
    pub fn command_line(&self) -> String {
        format!(
            "git clone {} {}",
            self.repository.trim(),
            self.directory.display()
        )
    }

    /// Validate and run `git clone <repository> <directory>`
    #[instrument(skip(self), fields(repository = %self.repository, directory = %self.directory.display()))]
    pub async fn run(&self) -> Result<CloneOutcome, CloneError> {
        self.validate()?;

        if let Some(parent) = self.directory.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| CloneError::CreateParent {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let mut cmd = Command::new("git");
        cmd.arg("clone")
            .arg(self.repository.trim())
            .arg(&self.directory)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!("> {}", self.command_line());

        let output = cmd.output().await.map_err(CloneError::Spawn)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            debug!(status = %output.status, "git clone failed");
            return Err(CloneError::Failed {
                message: failure_message(&stderr),
                stderr,
            });
        }

        info!("cloned");
        Ok(CloneOutcome {
            repository: self.repository.trim().to_string(),
            directory: self.directory.clone(),
            readme: readme_in(&self.directory),
        })
    }
}

/// Pick the line of git's stderr worth showing to the user
#[must_use]
pub fn failure_message(stderr: &str) -> String {
    let mut lines = stderr.lines().map(str::trim).filter(|l| !l.is_empty());
    let first = lines.clone().next();

    lines
        .find(|l| l.starts_with("fatal:"))
        .or(first)
        .unwrap_or(DEFAULT_FAILURE)
        .to_string()
}

fn readme_in(directory: &Path) -> Option<PathBuf> {
    let readme = directory.join("README.md");
    readme.is_file().then_some(readme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_order() {
        let req = CloneRequest::new("", "");
        assert_eq!(req.validate(), Err(ValidationError::RepositoryRequired));

        let req = CloneRequest::new("https://github.com/a/b", "");
        assert_eq!(req.validate(), Err(ValidationError::DirectoryRequired));
    }

    #[test]
    fn test_validate_existing_directory() {
        let tmp = TempDir::new().unwrap();
        let req = CloneRequest::new("https://github.com/a/b", tmp.path());
        assert_eq!(
            req.validate(),
            Err(ValidationError::DirectoryExists(tmp.path().to_path_buf()))
        );

        let req = CloneRequest::new("https://github.com/a/b", tmp.path().join("new"));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_command_line() {
        let req = CloneRequest::new(" git@github.com:a/b.git ", "/src/github/a/b");
        assert_eq!(req.command_line(), "git clone git@github.com:a/b.git /src/github/a/b");
    }

    #[test]
    fn test_failure_message_prefers_fatal() {
        let stderr = "Cloning into 'x'...\nfatal: repository 'y' not found\n";
        assert_eq!(failure_message(stderr), "fatal: repository 'y' not found");
    }

    #[test]
    fn test_failure_message_fallbacks() {
        assert_eq!(failure_message("\n  error: something odd\nmore\n"), "error: something odd");
        assert_eq!(failure_message(""), DEFAULT_FAILURE);
        assert_eq!(failure_message("\n\n"), DEFAULT_FAILURE);
    }

    #[test]
    fn test_readme_detection() {
        let tmp = TempDir::new().unwrap();
        assert!(readme_in(tmp.path()).is_none());
        std::fs::write(tmp.path().join("README.md"), "# hi").unwrap();
        assert_eq!(readme_in(tmp.path()), Some(tmp.path().join("README.md")));
    }

    #[tokio::test]
    async fn test_run_rejects_invalid_without_spawning() {
        let tmp = TempDir::new().unwrap();
        let err = CloneRequest::new("https://github.com/a/b", tmp.path())
            .run()
            .await
            .unwrap_err();
        assert!(matches!(err, CloneError::Invalid(ValidationError::DirectoryExists(_))));
    }
}
