//! Integration tests for `SystemGit` against real throwaway repositories.

mod common;

use herald::{GitError, StagedChanges, SystemGit};

use common::TestRepo;

#[tokio::test]
async fn test_clean_index_has_no_staged_changes() {
    let repo = TestRepo::new();
    let git = SystemGit::new().in_dir(repo.path());

    assert!(!git.has_staged_changes().await.unwrap());
}

#[tokio::test]
async fn test_unstaged_edit_is_not_staged() {
    let repo = TestRepo::new();
    repo.write("README.md", "# changed but not staged\n");
    let git = SystemGit::new().in_dir(repo.path());

    assert!(!git.has_staged_changes().await.unwrap());
    assert_eq!(git.staged_diff().await.unwrap(), "");
}

#[tokio::test]
async fn test_staged_file_is_detected_and_diffed() {
    let repo = TestRepo::new();
    repo.write_and_stage("src.txt", "hello\n");
    let git = SystemGit::new().in_dir(repo.path());

    assert!(git.has_staged_changes().await.unwrap());

    let diff = git.staged_diff().await.unwrap();
    assert!(diff.starts_with("diff --git a/src.txt b/src.txt"));
    assert!(diff.contains("+hello"));
}

#[tokio::test]
async fn test_outside_repository_is_execution_error() {
    let dir = tempfile::tempdir().unwrap();
    let git = SystemGit::new().in_dir(dir.path());

    // `git diff --quiet` outside a repository exits with neither 0 nor 1.
    let err = git.has_staged_changes().await.unwrap_err();
    match err {
        GitError::NonZeroExit { code, .. } => assert!(code != 0 && code != 1),
        other => panic!("Expected NonZeroExit, got {other:?}"),
    }

    let err = git.staged_diff().await.unwrap_err();
    assert!(matches!(err, GitError::NonZeroExit { .. }));
}

#[tokio::test]
async fn test_commit_preserves_newlines_and_unicode() {
    let repo = TestRepo::new();
    repo.write_and_stage("notes.txt", "ünïcödé\n");
    let git = SystemGit::new().in_dir(repo.path());

    let message = "feat(notes): add naïve notes\n\nExplains why the café needs notes.\nSecond line — with dash.";
    git.commit(message).await.unwrap();

    assert_eq!(repo.commit_count(), 2);
    assert_eq!(repo.head_message().trim_end(), message);
    assert!(!git.has_staged_changes().await.unwrap());
}

#[tokio::test]
async fn test_commit_with_nothing_staged_fails() {
    let repo = TestRepo::new();
    let git = SystemGit::new().in_dir(repo.path());

    let err = git.commit("feat: nothing").await.unwrap_err();
    assert!(matches!(err, GitError::NonZeroExit { operation: "commit", .. }));
    assert_eq!(repo.commit_count(), 1);
}

#[tokio::test]
async fn test_commit_with_shell_metacharacters_is_literal() {
    let repo = TestRepo::new();
    repo.write_and_stage("a.txt", "a\n");
    let git = SystemGit::new().in_dir(repo.path());

    let message = "fix: handle `$(rm -rf /)` and \"quotes\" & 'ticks'";
    git.commit(message).await.unwrap();

    assert_eq!(repo.head_message().trim_end(), message);
}

#[tokio::test]
async fn test_rejecting_hook_fails_commit_and_talks_to_terminal() {
    let repo = TestRepo::new();
    repo.write_and_stage("a.txt", "a\n");
    repo.install_hook("pre-commit", "#!/bin/sh\necho 'lint: 1 problem' >&2\nexit 1\n");
    let git = SystemGit::new().in_dir(repo.path());

    let err = git.commit("feat: add a").await.unwrap_err();
    match &err {
        // Hook output went straight to the inherited stderr, not into the error.
        GitError::NonZeroExit {
            operation, stderr, ..
        } => {
            assert_eq!(*operation, "commit");
            assert!(stderr.is_empty());
        }
        other => panic!("Expected NonZeroExit, got {other:?}"),
    }
    assert_eq!(err.to_string(), "git commit exited with code 1");
    assert_eq!(repo.commit_count(), 1);
}
