//! herald - Git commits with AI-generated messages.
//!
//! # Overview
//!
//! herald reads the staged diff, asks Claude Code CLI for a conventional
//! commit message, and lets the user approve, regenerate with feedback, edit,
//! or cancel before recording the commit with `git`.

pub mod claude;
pub mod commit;
pub mod error;
pub mod git;
pub mod llm;

// Re-export commonly used types
pub use claude::ClaudeGenerator;
pub use commit::{CommitSession, Decision, ExternalEditor, Outcome, PromptPair, RunOptions};
pub use error::{EditorError, GenerationError, GitError, WorkflowError};
pub use git::{StagedChanges, SystemGit};
pub use llm::MessageGenerator;
