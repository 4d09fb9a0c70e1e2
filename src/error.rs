//! Error types for herald modules using thiserror.

use std::time::Duration;

use thiserror::Error;

/// Errors from running the `git` executable.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Failed to run git {operation}: {source}")]
    SpawnFailed {
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("git {operation} exited with code {code}{}", stderr_suffix(.stderr))]
    NonZeroExit {
        operation: &'static str,
        code: i32,
        stderr: String,
    },

    #[error("git {operation} was terminated by a signal")]
    Terminated { operation: &'static str },

    #[error("Failed to pass commit message to git: {0}")]
    StdinFailed(#[source] std::io::Error),
}

/// `": <stderr>"`, or nothing when git's stderr went to the terminal.
fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// Errors from the commit message generator.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Claude Code CLI not found. Install with: npm install -g @anthropic-ai/claude-code")]
    NotInstalled,

    #[error("Claude Code CLI failed to execute: {0}")]
    ExecutionFailed(String),

    #[error("Failed to spawn Claude process: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("Failed to send prompt to Claude: {0}")]
    StdinFailed(#[source] std::io::Error),

    #[error("Claude process timed out after {0:?}")]
    Timeout(Duration),

    #[error("Claude CLI exited with code {code}: {stderr}")]
    NonZeroExit { code: i32, stderr: String },

    #[error("All retry attempts failed: {0}")]
    RetriesExhausted(#[source] Box<GenerationError>),
}

impl GenerationError {
    /// Whether another attempt could succeed.
    ///
    /// A missing CLI or an error reported by the CLI itself (bad API key,
    /// unknown model) fails the same way every time.
    pub fn is_transient(&self) -> bool {
        !matches!(
            self,
            GenerationError::NotInstalled | GenerationError::ExecutionFailed(_)
        )
    }
}

/// Errors from editing a message in the external editor.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Failed to create temp file: {0}")]
    TempFile(#[source] std::io::Error),

    #[error("Failed to write temp file: {0}")]
    WriteFailed(#[source] std::io::Error),

    #[error("Failed to launch editor '{editor}': {source}")]
    Launch {
        editor: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Editor '{editor}' exited with {}", code.map_or("a signal".to_string(), |c| format!("code {c}")))]
    Exited { editor: String, code: Option<i32> },

    #[error("Failed to read edited file: {0}")]
    ReadFailed(#[source] std::io::Error),
}

/// Errors that end an interactive commit session.
///
/// Each variant names the phase that failed and keeps the underlying cause.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("no staged changes found\n\nStage changes first: git add <files>")]
    NoStagedChanges,

    #[error("no changes to commit\n\nStage changes first: git add <files>")]
    NoChanges,

    #[error("failed to check staged changes: {0}")]
    CheckStaged(#[source] GitError),

    #[error("failed to get diff: {0}")]
    Diff(#[source] GitError),

    #[error("failed to generate commit message: {0}")]
    Generate(#[source] GenerationError),

    #[error("failed to regenerate message: {0}")]
    Regenerate(#[source] GenerationError),

    #[error("failed to open editor: {0}")]
    Edit(#[source] EditorError),

    #[error("failed to create commit: {0}")]
    Commit(#[source] GitError),

    #[error("failed to read input: {0}")]
    Input(#[source] std::io::Error),
}

impl WorkflowError {
    /// Whether the user can fix this by staging changes and running again.
    pub fn is_precondition(&self) -> bool {
        matches!(self, WorkflowError::NoStagedChanges | WorkflowError::NoChanges)
    }
}
