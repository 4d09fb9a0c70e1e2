//! herald - CLI entry point.

use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use herald::commit::{CommitSession, ExternalEditor, Outcome, RunOptions, TerminalPrompter};
use herald::{ClaudeGenerator, SystemGit, WorkflowError};

const EXAMPLES: &str = "\
Examples:
  # Run the guided workflow with iterative approvals
  herald

  # Commit immediately once the first suggestion looks good
  herald --yes

  # Preview the generated message without writing the commit
  herald --dry-run

  # Override the default model
  herald commit --model claude-sonnet-4-5-20250929";

/// Git commit with AI-generated messages.
#[derive(Parser, Debug)]
#[command(name = "herald")]
#[command(about = "Git commit with AI-generated messages")]
#[command(long_about = "Interactive commit workflow with AI-generated messages.

The workflow:
  1. Checks for staged changes
  2. Generates commit message with AI
  3. Presents for approval/editing/regeneration
  4. Creates the commit")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
#[command(after_help = EXAMPLES)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    commit: CommitArgs,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create commit with AI-generated message (default)
    #[command(after_help = EXAMPLES)]
    Commit(CommitArgs),
}

#[derive(Args, Debug, Clone, Default)]
struct CommitArgs {
    /// Skip confirmation prompt
    #[arg(short = 'y', long = "yes")]
    yes: bool,

    /// Generate message but don't commit
    #[arg(long)]
    dry_run: bool,

    /// Model to use (default: claude-haiku-4-5-20251001)
    #[arg(short, long)]
    model: Option<String>,
}

impl From<CommitArgs> for RunOptions {
    fn from(args: CommitArgs) -> Self {
        RunOptions {
            auto_approve: args.yes,
            dry_run: args.dry_run,
            model: args.model,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let args = match cli.command {
        Some(Command::Commit(args)) => args,
        None => cli.commit,
    };

    let git = SystemGit::new();
    let generator = ClaudeGenerator::new();
    let editor = ExternalEditor::from_env();
    let mut prompter = TerminalPrompter;

    let result = CommitSession::new(&git, &generator, &editor, &mut prompter, args.into())
        .run()
        .await;

    finish(result).map(ExitCode::from)
}

/// Exit status for a finished session.
///
/// Precondition failures print only their own message and hint; every other
/// error goes back to anyhow with its cause chain.
fn finish(result: Result<Outcome, WorkflowError>) -> Result<u8> {
    match result {
        Ok(outcome) => {
            debug!("Session finished: {:?}", outcome);
            Ok(0)
        }
        Err(e) if e.is_precondition() => {
            eprintln!("{e}");
            Ok(1)
        }
        Err(e) => Err(e.into()),
    }
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "herald=debug" } else { "herald=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    use herald::commit::DEFAULT_MODEL;

    fn options(argv: &[&str]) -> RunOptions {
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Some(Command::Commit(args)) => args.into(),
            None => cli.commit.into(),
        }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_root_runs_commit_by_default() {
        assert_eq!(options(&["herald"]), RunOptions::default());
    }

    #[test]
    fn test_root_and_subcommand_accept_same_flags() {
        let expected = RunOptions {
            auto_approve: true,
            dry_run: true,
            model: Some("claude-sonnet-4-5-20250929".to_string()),
        };
        assert_eq!(
            options(&["herald", "-y", "--dry-run", "-m", "claude-sonnet-4-5-20250929"]),
            expected
        );
        assert_eq!(
            options(&[
                "herald",
                "commit",
                "--yes",
                "--dry-run",
                "--model",
                "claude-sonnet-4-5-20250929"
            ]),
            expected
        );
    }

    #[test]
    fn test_verbose_is_global() {
        assert!(Cli::try_parse_from(["herald", "commit", "-v"]).unwrap().verbose);
        assert!(Cli::try_parse_from(["herald", "--verbose"]).unwrap().verbose);
    }

    #[test]
    fn test_model_help_names_default() {
        let help = Cli::command().render_help().to_string();
        assert!(help.contains(DEFAULT_MODEL));
    }

    #[test]
    fn test_finish_exit_codes() {
        assert_eq!(finish(Ok(Outcome::Cancelled)).unwrap(), 0);
        assert_eq!(
            finish(Ok(Outcome::DryRun {
                message: "feat: x".to_string()
            }))
            .unwrap(),
            0
        );
        assert_eq!(finish(Err(WorkflowError::NoStagedChanges)).unwrap(), 1);
        assert_eq!(finish(Err(WorkflowError::NoChanges)).unwrap(), 1);
    }

    #[test]
    fn test_finish_passes_other_errors_through() {
        let err = finish(Err(WorkflowError::Input(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "input closed",
        ))))
        .unwrap_err();
        assert!(err.to_string().starts_with("failed to read input"));
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(Cli::try_parse_from(["herald", "--force"]).is_err());
    }
}
