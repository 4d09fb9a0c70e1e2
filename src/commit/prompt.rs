//! Prompt construction for AI-generated commit messages.

/// Default model for commit message generation.
pub const DEFAULT_MODEL: &str = "claude-haiku-4-5-20251001";

/// Instructions sent as the system prompt on every generation.
pub const SYSTEM_PROMPT: &str = r#"You are an expert developer who writes clear, professional commit messages following conventional commits format.

Your task is to generate a commit message based on git diff output. Follow these principles:

1. **Format**: Use conventional commits (feat:, fix:, refactor:, docs:, test:, chore:)
2. **Subject line**: Concise summary (max 72 chars), imperative mood ("add" not "added")
3. **Body**: Explain WHY, not WHAT (the diff shows what changed)
4. **Scope**: Add scope when helpful (e.g., "feat(cli):", "fix(database):")
5. **Breaking changes**: Use "!" for breaking changes (e.g., "feat!:")

Style guidelines:
- Clear and professional tone
- No unnecessary words or filler
- Focus on user impact and intent
- Group related changes logically

Output ONLY the commit message, no additional commentary."#;

const USER_PROMPT_PREFIX: &str = "Generate a conventional commit message for these changes:\n\n";

/// Marker that introduces user feedback in the user prompt.
pub const FEEDBACK_MARKER: &str = "\n\nUser feedback for improvement: ";

/// The two halves of a generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// Build the prompt pair for one generation attempt.
///
/// The diff is embedded verbatim. `feedback` is appended after
/// [`FEEDBACK_MARKER`] only when it is non-empty; callers pass the latest
/// round's feedback, never an accumulated history.
pub fn compose(diff: &str, feedback: &str) -> PromptPair {
    let mut user = String::with_capacity(USER_PROMPT_PREFIX.len() + diff.len() + feedback.len() + 32);
    user.push_str(USER_PROMPT_PREFIX);
    user.push_str(diff);

    if !feedback.is_empty() {
        user.push_str(FEEDBACK_MARKER);
        user.push_str(feedback);
    }

    PromptPair {
        system: SYSTEM_PROMPT.to_string(),
        user,
    }
}

/// The model to use: the explicit override, else [`DEFAULT_MODEL`].
pub fn effective_model(model_override: Option<&str>) -> &str {
    match model_override {
        Some(model) if !model.trim().is_empty() => model,
        _ => DEFAULT_MODEL,
    }
}
