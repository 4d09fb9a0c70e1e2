//! Editing a candidate message in the user's external editor.

use std::env;
use std::io::Write;
use std::process::Stdio;

use async_trait::async_trait;
use tempfile::Builder;
use tokio::process::Command;
use tracing::debug;

use crate::error::EditorError;

/// Environment variable naming the editor executable.
pub const EDITOR_ENV_VAR: &str = "EDITOR";

/// Editor used when `EDITOR` is unset or empty.
pub const FALLBACK_EDITOR: &str = "vim";

/// Lets the user rewrite a message by hand.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageEditor: Send + Sync {
    /// Return the text the user saved, starting from `initial`.
    async fn edit(&self, initial: &str) -> Result<String, EditorError>;
}

/// Resolve the editor executable from `EDITOR`, falling back to `vim`.
pub fn resolve_editor() -> String {
    match env::var(EDITOR_ENV_VAR) {
        Ok(editor) if !editor.trim().is_empty() => editor.trim().to_string(),
        _ => FALLBACK_EDITOR.to_string(),
    }
}

/// [`MessageEditor`] that opens a temp file in an external program.
///
/// The temp file lives only for the duration of [`MessageEditor::edit`] and
/// is removed on every exit path, including editor failure.
#[derive(Debug, Clone)]
pub struct ExternalEditor {
    editor: String,
}

impl ExternalEditor {
    pub fn new(editor: impl Into<String>) -> Self {
        Self {
            editor: editor.into(),
        }
    }

    /// Use the editor named by the environment.
    pub fn from_env() -> Self {
        Self::new(resolve_editor())
    }

    pub fn editor(&self) -> &str {
        &self.editor
    }
}

#[async_trait]
impl MessageEditor for ExternalEditor {
    async fn edit(&self, initial: &str) -> Result<String, EditorError> {
        let mut file = Builder::new()
            .prefix("herald-")
            .suffix(".txt")
            .tempfile()
            .map_err(EditorError::TempFile)?;

        file.write_all(initial.as_bytes())
            .and_then(|()| file.flush())
            .map_err(EditorError::WriteFailed)?;

        // Close our handle but keep the delete-on-drop guard, so editors that
        // replace the file instead of rewriting it in place still work.
        let path = file.into_temp_path();

        debug!("Opening {} in {}", path.display(), self.editor);

        let status = Command::new(&self.editor)
            .arg(&path)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| EditorError::Launch {
                editor: self.editor.clone(),
                source,
            })?;

        if !status.success() {
            return Err(EditorError::Exited {
                editor: self.editor.clone(),
                code: status.code(),
            });
        }

        std::fs::read_to_string(&path).map_err(EditorError::ReadFailed)
    }
}
