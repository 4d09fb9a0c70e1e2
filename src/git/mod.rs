//! Staged-change queries and commit creation via the system `git` binary.

pub mod staged;

pub use staged::{StagedChanges, SystemGit};

#[cfg(test)]
pub use staged::MockStagedChanges;
