//! AI-assisted commit creation: prompt, approval loop, and manual editing.

pub mod decision;
pub mod editor;
pub mod input;
pub mod prompt;
pub mod workflow;

pub use decision::Decision;
pub use editor::{ExternalEditor, MessageEditor, resolve_editor};
pub use input::{LinePrompter, Prompter, TerminalPrompter};
pub use prompt::{DEFAULT_MODEL, PromptPair, compose, effective_model};
pub use workflow::{CommitSession, Outcome, RunOptions, State};
