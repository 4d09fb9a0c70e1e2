//! Staged diff inspection and commit creation.
//!
//! All operations use `tokio::process::Command` to shell out to the system `git`
//! binary, inheriting the user's existing git config, hooks, and signing setup.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::error::GitError;

/// Exit code `git diff --quiet` uses to report that differences exist.
const DIFF_QUIET_HAS_CHANGES: i32 = 1;

/// The three repository operations an interactive commit session needs.
///
/// This abstraction allows the session to run against a fake repository in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StagedChanges: Send + Sync {
    /// Whether the index differs from HEAD.
    async fn has_staged_changes(&self) -> Result<bool, GitError>;

    /// The raw staged diff text. May be empty.
    async fn staged_diff(&self) -> Result<String, GitError>;

    /// Record a commit with exactly this message.
    async fn commit(&self, message: &str) -> Result<(), GitError>;
}

/// [`StagedChanges`] backed by the `git` executable.
#[derive(Debug, Clone)]
pub struct SystemGit {
    program: PathBuf,
    workdir: Option<PathBuf>,
}

impl Default for SystemGit {
    fn default() -> Self {
        Self {
            program: PathBuf::from("git"),
            workdir: None,
        }
    }
}

impl SystemGit {
    /// Run `git` from `PATH` in the current directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different git executable.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Run every command inside `dir` instead of the current directory.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(dir.into());
        self
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(args).stdin(Stdio::null());
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

#[async_trait]
impl StagedChanges for SystemGit {
    async fn has_staged_changes(&self) -> Result<bool, GitError> {
        const OPERATION: &str = "diff --staged --quiet";

        let output = self
            .command(&["diff", "--staged", "--quiet"])
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| GitError::SpawnFailed {
                operation: OPERATION,
                source,
            })?;

        debug!("git {} exited with {:?}", OPERATION, output.status.code());
        classify_quiet_diff(output.status.code(), &output.stderr)
    }

    async fn staged_diff(&self) -> Result<String, GitError> {
        const OPERATION: &str = "diff --staged";

        let output = self
            .command(&["diff", "--staged"])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| GitError::SpawnFailed {
                operation: OPERATION,
                source,
            })?;

        check_status(OPERATION, output.status.code(), &output.stderr)?;

        let diff = String::from_utf8_lossy(&output.stdout).to_string();
        debug!("Staged diff is {} bytes", diff.len());
        Ok(diff)
    }

    async fn commit(&self, message: &str) -> Result<(), GitError> {
        const OPERATION: &str = "commit";

        // git and its hooks talk to the terminal directly, so hook progress
        // shows up while it runs.
        let mut child = self
            .command(&["commit", "-F", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| GitError::SpawnFailed {
                operation: OPERATION,
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(message.as_bytes()).await {
                Ok(()) => {}
                // git exited before reading; its exit status explains why.
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    debug!("git commit closed stdin early");
                }
                Err(e) => return Err(GitError::StdinFailed(e)),
            }
        }

        let status = child.wait().await.map_err(|source| GitError::SpawnFailed {
            operation: OPERATION,
            source,
        })?;

        check_status(OPERATION, status.code(), b"")
    }
}

/// Map the exit code of `git diff --quiet` onto "are there changes".
///
/// 0 means no differences, 1 means differences exist. Anything else is a
/// real failure and is never coerced into a boolean.
fn classify_quiet_diff(code: Option<i32>, stderr: &[u8]) -> Result<bool, GitError> {
    const OPERATION: &str = "diff --staged --quiet";

    match code {
        Some(0) => Ok(false),
        Some(DIFF_QUIET_HAS_CHANGES) => Ok(true),
        Some(code) => Err(GitError::NonZeroExit {
            operation: OPERATION,
            code,
            stderr: String::from_utf8_lossy(stderr).trim().to_string(),
        }),
        None => Err(GitError::Terminated {
            operation: OPERATION,
        }),
    }
}

fn check_status(operation: &'static str, code: Option<i32>, stderr: &[u8]) -> Result<(), GitError> {
    match code {
        Some(0) => Ok(()),
        Some(code) => Err(GitError::NonZeroExit {
            operation,
            code,
            stderr: String::from_utf8_lossy(stderr).trim().to_string(),
        }),
        None => Err(GitError::Terminated { operation }),
    }
}
