//! Interactive approval loop for AI-generated commit messages.
//!
//! The session is an explicit state machine:
//!
//! ```text
//! CheckingStaged -> FetchingDiff -> Generating -> Presenting
//! Presenting -> Done(DryRun) | Committing | Presenting (invalid input)
//!            | Regenerating -> Generating
//!            | Editing -> Committing
//!            | Done(Cancelled)
//! Committing -> Done(Committed)
//! ```
//!
//! Every external failure ends the session. Only unrecognized input loops.

use tracing::debug;

use crate::commit::decision::Decision;
use crate::commit::editor::MessageEditor;
use crate::commit::input::Prompter;
use crate::commit::prompt::{compose, effective_model};
use crate::error::WorkflowError;
use crate::git::StagedChanges;
use crate::llm::MessageGenerator;

/// Width of the rule printed above and below the candidate message.
const RULE_WIDTH: usize = 70;

const CHOICE_PROMPT: &str = "[y]es, [n]o (regenerate), [e]dit, [c]ancel";
const FEEDBACK_PROMPT: &str = "What would you like improved? (or press Enter for generic)";

/// Session-wide flags, fixed at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Commit the first generated message without asking.
    pub auto_approve: bool,
    /// Show the generated message and stop. Takes precedence over `auto_approve`.
    pub dry_run: bool,
    /// Model identifier to use instead of the default.
    pub model: Option<String>,
}

/// How a session that did not fail ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Committed { message: String },
    DryRun { message: String },
    Cancelled,
}

/// A point in the approval state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    CheckingStaged,
    FetchingDiff,
    /// Ask for a message. `feedback` is from the latest round only.
    Generating { feedback: String, regenerating: bool },
    /// Show the current candidate and collect a decision.
    Presenting { message: String },
    Regenerating,
    Editing { message: String },
    Committing { message: String },
    Done(Outcome),
}

impl State {
    pub fn name(&self) -> &'static str {
        match self {
            State::CheckingStaged => "checking-staged",
            State::FetchingDiff => "fetching-diff",
            State::Generating { .. } => "generating",
            State::Presenting { .. } => "presenting",
            State::Regenerating => "regenerating",
            State::Editing { .. } => "editing",
            State::Committing { .. } => "committing",
            State::Done(_) => "done",
        }
    }
}

/// One interactive commit session.
///
/// The staged diff is fetched once and reused for every generation round.
pub struct CommitSession<'a> {
    git: &'a dyn StagedChanges,
    generator: &'a dyn MessageGenerator,
    editor: &'a dyn MessageEditor,
    prompter: &'a mut dyn Prompter,
    options: RunOptions,
    diff: String,
}

impl<'a> CommitSession<'a> {
    pub fn new(
        git: &'a dyn StagedChanges,
        generator: &'a dyn MessageGenerator,
        editor: &'a dyn MessageEditor,
        prompter: &'a mut dyn Prompter,
        options: RunOptions,
    ) -> Self {
        Self {
            git,
            generator,
            editor,
            prompter,
            options,
            diff: String::new(),
        }
    }

    /// Drive the state machine from the start until it finishes.
    pub async fn run(mut self) -> Result<Outcome, WorkflowError> {
        let mut state = State::CheckingStaged;
        loop {
            state = match self.step(state).await? {
                State::Done(outcome) => return Ok(outcome),
                next => next,
            };
        }
    }

    /// Perform a single transition.
    pub async fn step(&mut self, state: State) -> Result<State, WorkflowError> {
        debug!("Commit session state: {}", state.name());

        match state {
            State::CheckingStaged => {
                println!("Checking for staged changes...");
                let staged = self
                    .git
                    .has_staged_changes()
                    .await
                    .map_err(WorkflowError::CheckStaged)?;
                if !staged {
                    return Err(WorkflowError::NoStagedChanges);
                }
                Ok(State::FetchingDiff)
            }

            State::FetchingDiff => {
                println!("Generating diff...");
                let diff = self.git.staged_diff().await.map_err(WorkflowError::Diff)?;
                // Some setups report staged changes but produce no diff text.
                if diff.is_empty() {
                    return Err(WorkflowError::NoChanges);
                }
                self.diff = diff;
                Ok(State::Generating {
                    feedback: String::new(),
                    regenerating: false,
                })
            }

            State::Generating {
                feedback,
                regenerating,
            } => {
                if !regenerating {
                    println!("Generating commit message with AI...");
                }
                let prompt = compose(&self.diff, &feedback);
                let model = effective_model(self.options.model.as_deref());
                let message = self.generator.generate(&prompt, model).await.map_err(|e| {
                    if regenerating {
                        WorkflowError::Regenerate(e)
                    } else {
                        WorkflowError::Generate(e)
                    }
                })?;
                Ok(State::Presenting {
                    message: message.trim().to_string(),
                })
            }

            State::Presenting { message } => self.present(message),

            State::Regenerating => {
                println!();
                let feedback = self
                    .prompter
                    .read_line(FEEDBACK_PROMPT)
                    .map_err(WorkflowError::Input)?;
                println!("\nRegenerating...");
                Ok(State::Generating {
                    feedback: feedback.trim().to_string(),
                    regenerating: true,
                })
            }

            State::Editing { message } => {
                let edited = self
                    .editor
                    .edit(&message)
                    .await
                    .map_err(WorkflowError::Edit)?;
                Ok(State::Committing { message: edited })
            }

            State::Committing { message } => {
                self.git
                    .commit(&message)
                    .await
                    .map_err(WorkflowError::Commit)?;
                Ok(State::Done(Outcome::Committed { message }))
            }

            done @ State::Done(_) => Ok(done),
        }
    }

    fn present(&mut self, message: String) -> Result<State, WorkflowError> {
        let rule = "=".repeat(RULE_WIDTH);
        println!("\n{rule}");
        println!("{message}");
        println!("{rule}");

        if self.options.dry_run {
            println!("\n(Dry run - no commit created)");
            return Ok(State::Done(Outcome::DryRun { message }));
        }

        if self.options.auto_approve {
            println!("\nAuto-committing...");
            return Ok(State::Committing { message });
        }

        println!();
        let choice = self
            .prompter
            .read_line(CHOICE_PROMPT)
            .map_err(WorkflowError::Input)?;
        let decision = Decision::parse(&choice);
        debug!("User decision: {}", decision);

        Ok(match decision {
            Decision::Approve => State::Committing { message },
            Decision::Regenerate => State::Regenerating,
            Decision::Edit => State::Editing { message },
            Decision::Cancel => {
                println!("\nCommit cancelled.");
                State::Done(Outcome::Cancelled)
            }
            Decision::Invalid => {
                println!("\nInvalid choice. Please enter y/n/e/c.");
                State::Presenting { message }
            }
        })
    }
}
