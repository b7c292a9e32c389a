//! Editor integration for writing note content

use crate::error::{EmbedLinkError, Result};
use std::fs;
use std::path::Path;
use std::process::Command;

#[cfg(windows)]
const FALLBACK_EDITOR: &str = "notepad";
#[cfg(not(windows))]
const FALLBACK_EDITOR: &str = "vi";

/// Session for editing text in an external editor
pub struct EditorSession {
    command: String,
}

impl EditorSession {
    pub fn new(command: String) -> Self {
        EditorSession { command }
    }

    /// Editor from `$EDITOR`, then `$VISUAL`, then the platform fallback
    pub fn from_env() -> Self {
        let command = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .ok()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_EDITOR.to_string());
        EditorSession::new(command)
    }

    /// Seed `scratch` with `initial`, block until the editor exits, and
    /// return what was saved. The scratch file is removed afterwards.
    pub fn edit(&self, scratch: &Path, initial: &str) -> Result<String> {
        fs::write(scratch, initial)?;
        let outcome = self
            .wait(scratch)
            .and_then(|_| fs::read_to_string(scratch).map_err(EmbedLinkError::from));
        let _ = fs::remove_file(scratch);
        outcome
    }

    fn wait(&self, file_path: &Path) -> Result<()> {
        let (program, args) = self.parse_command();

        let mut argv = args;
        argv.push(file_path.to_string_lossy().into_owned());

        tracing::debug!(editor = %program, "waiting for editor");

        // cmd /C resolves .bat and .cmd editors
        #[cfg(windows)]
        let status = Command::new("cmd")
            .arg("/C")
            .arg(&program)
            .args(&argv)
            .status();

        #[cfg(not(windows))]
        let status = Command::new(&program).args(&argv).status();

        let status = status.map_err(|e| {
            EmbedLinkError::Editor(format!("Failed to launch editor '{}': {}", program, e))
        })?;

        if !status.success() {
            return Err(EmbedLinkError::Editor(format!(
                "Editor '{}' exited with {}",
                program, status
            )));
        }
        Ok(())
    }

    /// Split `$EDITOR` into program and arguments, e.g. `code --wait`.
    fn parse_command(&self) -> (String, Vec<String>) {
        let mut words = self.command.split_whitespace().map(str::to_string);
        match words.next() {
            Some(program) => (program, words.collect()),
            None => (FALLBACK_EDITOR.to_string(), Vec::new()),
        }
    }
}
