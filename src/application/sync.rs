//! Push/pull of the workspace to a private Gist

use crate::application::BackupService;
use crate::domain::backup::payload_from_value;
use crate::domain::ImportPayload;
use crate::error::{EmbedLinkError, Result};
use crate::infrastructure::gist::PushOutcome;
use crate::infrastructure::{Config, FileSystemRepository, GistClient, WorkspaceRepository};

pub struct SyncService {
    repository: FileSystemRepository,
}

impl SyncService {
    pub fn new(repository: FileSystemRepository) -> Self {
        SyncService { repository }
    }

    fn client(&self) -> Result<GistClient> {
        let config: Config = self.repository.load_config()?;
        let token = config.token().ok_or_else(|| {
            EmbedLinkError::Sync("No GitHub token configured".to_string())
        })?;
        GistClient::new(&config.gist_api_url, token)
    }

    /// Upload a timestamped snapshot of every collection.
    pub fn push(&self) -> Result<PushOutcome> {
        let client = self.client()?;
        let document = BackupService::new(self.repository.clone()).snapshot(true)?;
        client.push(&document)
    }

    /// Download the stored backup. Nothing is written until the payload
    /// is applied.
    pub fn pull(&self) -> Result<ImportPayload> {
        let value = self.client()?.pull()?;
        payload_from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::workspace;

    #[test]
    fn test_missing_token_fails_before_network() {
        let (_temp, repo) = workspace();
        let service = SyncService::new(repo);

        for result in [service.push().map(|_| ()), service.pull().map(|_| ())] {
            match result.unwrap_err() {
                EmbedLinkError::Sync(msg) => assert!(msg.contains("token")),
                other => panic!("Expected Sync error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_unreachable_gist_host() {
        let (_temp, repo) = workspace();
        let mut config = repo.load_config().unwrap();
        config.github_token = Some("ghp_test".to_string());
        config.gist_api_url = "http://127.0.0.1:1".to_string();
        repo.save_config(&config).unwrap();

        let err = SyncService::new(repo).push().unwrap_err();
        assert_eq!(err.exit_code(), 5);
    }
}
