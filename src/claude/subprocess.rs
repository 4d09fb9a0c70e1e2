//! Claude CLI spawning.

use std::env;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::commit::prompt::PromptPair;
use crate::error::GenerationError;

/// Default timeout for Claude subprocess execution (5 minutes).
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Environment variable to override the default timeout.
pub const TIMEOUT_ENV_VAR: &str = "HERALD_CLAUDE_TIMEOUT";

/// Get the configured timeout duration.
///
/// Reads from HERALD_CLAUDE_TIMEOUT environment variable if set,
/// otherwise uses the default of 300 seconds.
///
/// Logs a warning if the environment variable is set but contains
/// an invalid value (non-numeric or negative).
pub fn get_timeout() -> Duration {
    match env::var(TIMEOUT_ENV_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(_) => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    TIMEOUT_ENV_VAR, v, DEFAULT_TIMEOUT_SECS
                );
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
        },
        _ => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
}

/// Check if the Claude Code CLI is installed and accessible.
///
/// Uses the `which` crate for cross-platform executable detection, so both
/// bare names looked up on `PATH` and explicit paths work.
pub fn check_claude_installed(program: &Path) -> Result<(), GenerationError> {
    let path = which::which(program).map_err(|_| GenerationError::NotInstalled)?;
    debug!("Using Claude CLI at {}", path.display());
    Ok(())
}

/// Run the Claude CLI once and return its raw stdout.
///
/// Invocation: `claude -p --output-format json --model <model> --system-prompt <system>`
/// with the user prompt written to stdin. Diffs routinely exceed the
/// per-argument size limit of the OS, so the user prompt never goes on the
/// command line.
///
/// The child is killed if `limit` elapses first, yielding `GenerationError::Timeout`.
pub async fn run_claude(
    program: &Path,
    prompt: &PromptPair,
    model: &str,
    limit: Duration,
) -> Result<String, GenerationError> {
    let mut child = Command::new(program)
        .arg("-p")
        .arg("--output-format")
        .arg("json")
        .arg("--model")
        .arg(model)
        .arg("--system-prompt")
        .arg(&prompt.system)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(GenerationError::SpawnFailed)?;

    let stdin = child.stdin.take();
    let user_prompt = prompt.user.as_bytes();

    let write_prompt = async move {
        if let Some(mut stdin) = stdin {
            match stdin.write_all(user_prompt).await {
                Ok(()) => {}
                // The exit status reports why the CLI stopped reading.
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {}
                Err(e) => return Err(GenerationError::StdinFailed(e)),
            }
        }
        Ok(())
    };

    let (written, output) = timeout(limit, async {
        tokio::join!(write_prompt, child.wait_with_output())
    })
    .await
    .map_err(|_| GenerationError::Timeout(limit))?;

    written?;
    let output = output.map_err(GenerationError::SpawnFailed)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let code = output.status.code().unwrap_or(-1);
        return Err(GenerationError::NonZeroExit { code, stderr });
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}
