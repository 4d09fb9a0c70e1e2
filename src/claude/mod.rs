//! Claude CLI integration.

pub mod generator;
pub mod subprocess;

pub use generator::ClaudeGenerator;
pub use subprocess::{check_claude_installed, run_claude};
