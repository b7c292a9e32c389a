//! Error types for embedlink

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the embedlink application
#[derive(Debug, Error)]
pub enum EmbedLinkError {
    #[error("Not an embedlink workspace: {0}")]
    NotWorkspace(PathBuf),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Editor error: {0}")]
    Editor(String),

    #[error("Backup error: {0}")]
    Backup(String),

    #[error("Sync failed: {0}")]
    Sync(String),

    #[error("AI error: {0}")]
    Ai(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl EmbedLinkError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            EmbedLinkError::NotWorkspace(_) => 2,
            EmbedLinkError::InvalidInput(_) => 3,
            EmbedLinkError::NotFound(_) => 4,
            EmbedLinkError::Sync(_) | EmbedLinkError::Http(_) => 5,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            EmbedLinkError::NotWorkspace(path) => {
                format!(
                    "Not an embedlink workspace: {}\n\n\
                    Suggestions:\n\
                    • Run 'embedlink init' in this directory to create a workspace\n\
                    • Navigate to an existing embedlink workspace\n\
                    • Set EMBEDLINK_ROOT environment variable to your workspace path",
                    path.display()
                )
            }
            EmbedLinkError::NotFound(what) => {
                format!(
                    "Not found: {}\n\n\
                    Suggestions:\n\
                    • Use the matching 'list' command to see existing ids\n\
                    • Ids are case-sensitive and must be given in full",
                    what
                )
            }
            EmbedLinkError::Sync(msg) => {
                if msg.contains("token") || msg.contains("Token") {
                    format!(
                        "Sync failed: {}\n\n\
                        Suggestions:\n\
                        • Create a GitHub token with the 'gist' scope\n\
                        • Store it: embedlink config github_token ghp_xxxxxxxxxxxx",
                        msg
                    )
                } else {
                    self.to_string()
                }
            }
            EmbedLinkError::Ai(msg) if msg.contains("API key") => {
                format!(
                    "AI error: {}\n\n\
                    Set GEMINI_API_KEY (or API_KEY) to enable AI suggestions",
                    msg
                )
            }
            EmbedLinkError::Editor(msg) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Check that your editor is installed and in PATH\n\
                    • Set EDITOR environment variable (e.g., export EDITOR=nano)\n\
                    • Pass the text directly with --content",
                    msg
                )
            }
            EmbedLinkError::Config(msg) if msg.contains("Invalid theme") => {
                format!(
                    "{}\n\n\
                    Valid themes: light, dark\n\
                    Example: embedlink config theme dark",
                    msg
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using EmbedLinkError
pub type Result<T> = std::result::Result<T, EmbedLinkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_workspace_suggestion() {
        let err = EmbedLinkError::NotWorkspace(PathBuf::from("/tmp/test"));
        let msg = err.display_with_suggestions();
        assert!(msg.contains("embedlink init"));
        assert!(msg.contains("EMBEDLINK_ROOT"));
        assert!(msg.contains("Suggestions"));
    }

    #[test]
    fn test_not_found_suggestions() {
        let err = EmbedLinkError::NotFound("bookmark 'x1'".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("bookmark 'x1'"));
        assert!(msg.contains("'list' command"));
    }

    #[test]
    fn test_sync_token_suggestions() {
        let err = EmbedLinkError::Sync("Token is invalid or expired".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("'gist' scope"));
        assert!(msg.contains("embedlink config github_token"));
    }

    #[test]
    fn test_ai_missing_key_suggestion() {
        let err = EmbedLinkError::Ai("API key is missing".to_string());
        assert!(err.display_with_suggestions().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(EmbedLinkError::NotWorkspace(PathBuf::new()).exit_code(), 2);
        assert_eq!(EmbedLinkError::InvalidInput("x".into()).exit_code(), 3);
        assert_eq!(EmbedLinkError::NotFound("x".into()).exit_code(), 4);
        assert_eq!(EmbedLinkError::Sync("x".into()).exit_code(), 5);
        assert_eq!(EmbedLinkError::Backup("x".into()).exit_code(), 1);
    }

    #[test]
    fn test_other_errors_fallback() {
        let err = EmbedLinkError::Backup("bad file".to_string());
        let msg = err.display_with_suggestions();
        assert_eq!(msg, "Backup error: bad file");
    }
}
