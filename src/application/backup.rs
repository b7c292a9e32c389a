//! Export and import of the whole workspace

use crate::domain::backup::{export_filename, parse_import};
use crate::domain::ids::now_millis;
use crate::domain::{
    BackupDocument, Bookmark, CodeSnippet, DailyPlan, ImportPayload, Material, Note, Project,
    BACKUP_VERSION,
};
use crate::error::{EmbedLinkError, Result};
use crate::infrastructure::FileSystemRepository;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

pub struct BackupService {
    repository: FileSystemRepository,
}

impl BackupService {
    pub fn new(repository: FileSystemRepository) -> Self {
        BackupService { repository }
    }

    /// Current state of every exported collection
    pub fn snapshot(&self, with_timestamp: bool) -> Result<BackupDocument> {
        Ok(BackupDocument {
            bookmarks: self.repository.load::<Bookmark>()?,
            notes: self.repository.load::<Note>()?,
            projects: self.repository.load::<Project>()?,
            snippets: self.repository.load::<CodeSnippet>()?,
            materials: self.repository.load::<Material>()?,
            plans: self.repository.load::<DailyPlan>()?,
            version: BACKUP_VERSION,
            timestamp: with_timestamp.then(now_millis),
        })
    }

    /// Write the backup to `output`, or to a dated file in the current
    /// directory. Returns the path written.
    pub fn export(&self, output: Option<&Path>) -> Result<PathBuf> {
        let path = match output {
            Some(p) => p.to_path_buf(),
            None => PathBuf::from(export_filename(Local::now().date_naive())),
        };
        let document = self.snapshot(false)?;
        fs::write(&path, serde_json::to_string_pretty(&document)?)?;
        tracing::info!(path = %path.display(), "backup exported");
        Ok(path)
    }

    /// Parse a backup file without touching the workspace.
    pub fn read_import(&self, path: &Path) -> Result<ImportPayload> {
        let text = fs::read_to_string(path).map_err(|e| {
            EmbedLinkError::Backup(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        parse_import(&text)
    }

    /// Overwrite every collection present in the payload. Returns the
    /// names of the replaced collections.
    pub fn apply(&self, payload: ImportPayload) -> Result<Vec<&'static str>> {
        let replaced = payload.replaced();

        if let Some(items) = payload.bookmarks {
            self.repository.save(&items)?;
        }
        if let Some(items) = payload.notes {
            self.repository.save(&items)?;
        }
        if let Some(items) = payload.projects {
            self.repository.save(&items)?;
        }
        if let Some(items) = payload.snippets {
            self.repository.save(&items)?;
        }
        if let Some(items) = payload.materials {
            self.repository.save(&items)?;
        }
        if let Some(items) = payload.plans {
            self.repository.save(&items)?;
        }

        tracing::info!(collections = ?replaced, "backup imported");
        Ok(replaced)
    }
}
