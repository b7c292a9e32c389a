//! Bookmark use cases

use crate::domain::{Bookmark, BookmarkDraft, BookmarkPatch, Category};
use crate::error::{EmbedLinkError, Result};
use crate::infrastructure::gemini::UrlAnalysis;
use crate::infrastructure::{FileSystemRepository, GeminiClient, WorkspaceRepository};

/// Fields given on the command line for a new bookmark
#[derive(Debug, Clone, Default)]
pub struct BookmarkInput {
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub tags: Option<Vec<String>>,
}

impl BookmarkInput {
    /// Fill every field the user left out from an AI suggestion.
    pub fn fill_from(self, analysis: UrlAnalysis) -> BookmarkDraft {
        BookmarkDraft {
            url: self.url,
            title: self.title.unwrap_or(analysis.title),
            description: self.description.unwrap_or(analysis.description),
            category: self.category.unwrap_or(analysis.category),
            tags: self.tags.unwrap_or(analysis.tags),
        }
    }

    pub fn into_draft(self) -> BookmarkDraft {
        BookmarkDraft {
            title: self.title.unwrap_or_else(|| self.url.clone()),
            url: self.url,
            description: self.description.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
        }
    }
}

pub struct BookmarkService {
    repository: FileSystemRepository,
}

impl BookmarkService {
    pub fn new(repository: FileSystemRepository) -> Self {
        BookmarkService { repository }
    }

    /// Store a new bookmark at the front of the list.
    pub fn add(&self, draft: BookmarkDraft) -> Result<Bookmark> {
        if draft.url.trim().is_empty() {
            return Err(EmbedLinkError::InvalidInput("URL cannot be empty".to_string()));
        }
        if draft.title.trim().is_empty() {
            return Err(EmbedLinkError::InvalidInput("Title cannot be empty".to_string()));
        }

        let bookmark = Bookmark::create(draft);
        self.repository.update(|items: &mut Vec<Bookmark>| {
            items.insert(0, bookmark.clone());
            Ok(())
        })?;
        Ok(bookmark)
    }

    /// Ask Gemini for metadata about a link or site name.
    pub fn suggest(&self, input: &str) -> Result<UrlAnalysis> {
        let config = self.repository.load_config()?;
        let client = GeminiClient::from_env(&config.gemini_model)?;
        Ok(client.analyze_url(input))
    }

    pub fn edit(&self, id: &str, patch: BookmarkPatch) -> Result<Bookmark> {
        self.repository.update(|items: &mut Vec<Bookmark>| {
            let bookmark = items
                .iter_mut()
                .find(|b| b.id == id)
                .ok_or_else(|| not_found(id))?;
            bookmark.apply(patch);
            Ok(bookmark.clone())
        })
    }

    pub fn delete(&self, id: &str) -> Result<Bookmark> {
        self.repository.update(|items: &mut Vec<Bookmark>| {
            let pos = items
                .iter()
                .position(|b| b.id == id)
                .ok_or_else(|| not_found(id))?;
            Ok(items.remove(pos))
        })
    }

    pub fn list(&self, category: Option<Category>, query: &str) -> Result<Vec<Bookmark>> {
        let items = self.repository.load::<Bookmark>()?;
        Ok(items
            .into_iter()
            .filter(|b| b.matches(category, query))
            .collect())
    }
}

fn not_found(id: &str) -> EmbedLinkError {
    EmbedLinkError::NotFound(format!("bookmark '{}'", id))
}
