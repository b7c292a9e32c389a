//! Config management use case

use crate::error::{EmbedLinkError, Result};
use crate::infrastructure::config::Theme;
use crate::infrastructure::{Config, FileSystemRepository, WorkspaceRepository};
use std::str::FromStr;

pub const CONFIG_KEYS: &[&str] = &[
    "theme",
    "github_token",
    "gemini_model",
    "gist_api_url",
    "log_level",
    "created",
];

/// Service for managing workspace configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value. The token is returned in full.
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "theme" => Ok(config.theme.to_string()),
            "github_token" => Ok(config.token().unwrap_or_default().to_string()),
            "gemini_model" => Ok(config.gemini_model),
            "gist_api_url" => Ok(config.gist_api_url),
            "log_level" => Ok(config.log_level),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "theme" => {
                config.theme = Theme::from_str(value).map_err(EmbedLinkError::Config)?;
            }
            "github_token" => {
                let token = value.trim();
                config.github_token = (!token.is_empty()).then(|| token.to_string());
            }
            "gemini_model" => {
                config.gemini_model = non_empty(key, value)?;
            }
            "gist_api_url" => {
                config.gist_api_url = non_empty(key, value)?.trim_end_matches('/').to_string();
            }
            "log_level" => {
                tracing_subscriber::EnvFilter::try_new(value).map_err(|e| {
                    EmbedLinkError::Config(format!("Invalid log_level '{}': {}", value, e))
                })?;
                config.log_level = value.to_string();
            }
            "created" => {
                return Err(EmbedLinkError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => return Err(unknown_key(key)),
        }

        self.repository.save_config(&config)?;
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}

fn non_empty(key: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EmbedLinkError::Config(format!("'{}' cannot be empty", key)));
    }
    Ok(trimmed.to_string())
}

fn unknown_key(key: &str) -> EmbedLinkError {
    EmbedLinkError::Config(format!(
        "Unknown config key: '{}'. Valid keys are: {}",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::workspace;

    #[test]
    fn test_set_and_get_theme() {
        let (_temp, repo) = workspace();
        let service = ConfigService::new(repo);

        service.set("theme", "dark").unwrap();
        assert_eq!(service.get("theme").unwrap(), "dark");
        assert!(service.set("theme", "sepia").is_err());
    }

    #[test]
    fn test_token_set_and_clear() {
        let (_temp, repo) = workspace();
        let service = ConfigService::new(repo);

        service.set("github_token", " ghp_abc123 ").unwrap();
        assert_eq!(service.get("github_token").unwrap(), "ghp_abc123");
        assert_eq!(service.list().unwrap().masked_token(), "****c123");

        service.set("github_token", "").unwrap();
        assert_eq!(service.get("github_token").unwrap(), "");
    }

    #[test]
    fn test_gist_url_trailing_slash_removed() {
        let (_temp, repo) = workspace();
        let service = ConfigService::new(repo);
        service.set("gist_api_url", "http://localhost:8080/").unwrap();
        assert_eq!(service.get("gist_api_url").unwrap(), "http://localhost:8080");
    }

    #[test]
    fn test_log_level_validated() {
        let (_temp, repo) = workspace();
        let service = ConfigService::new(repo);
        service.set("log_level", "embedlink=debug").unwrap();
        assert!(service.set("log_level", "embedlink=verbose").is_err());
    }

    #[test]
    fn test_created_is_read_only() {
        let (_temp, repo) = workspace();
        let service = ConfigService::new(repo);
        assert!(service.get("created").is_ok());
        let err = service.set("created", "2020-01-01T00:00:00Z").unwrap_err();
        assert!(err.to_string().contains("read-only"));
    }

    #[test]
    fn test_unknown_key() {
        let (_temp, repo) = workspace();
        let service = ConfigService::new(repo);
        let err = service.get("editor").unwrap_err();
        assert!(err.to_string().contains("Valid keys"));
    }
}
