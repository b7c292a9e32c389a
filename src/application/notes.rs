//! Note use cases

use crate::domain::{Note, NotePatch};
use crate::error::{EmbedLinkError, Result};
use crate::infrastructure::{EditorSession, FileSystemRepository};

const SCRATCH_FILE: &str = "NOTE_EDITMSG.md";

pub struct NoteService {
    repository: FileSystemRepository,
}

impl NoteService {
    pub fn new(repository: FileSystemRepository) -> Self {
        NoteService { repository }
    }

    /// Store a new note at the front of the list.
    pub fn add(&self, title: &str, content: String, tags: Vec<String>) -> Result<Note> {
        if title.trim().is_empty() {
            return Err(EmbedLinkError::InvalidInput("Title cannot be empty".to_string()));
        }

        let note = Note::create(title.trim().to_string(), content, tags);
        self.repository.update(|items: &mut Vec<Note>| {
            items.insert(0, note.clone());
            Ok(())
        })?;
        Ok(note)
    }

    pub fn edit(&self, id: &str, patch: NotePatch) -> Result<Note> {
        self.repository.update(|items: &mut Vec<Note>| {
            let note = items
                .iter_mut()
                .find(|n| n.id == id)
                .ok_or_else(|| not_found(id))?;
            note.apply(patch);
            Ok(note.clone())
        })
    }

    pub fn delete(&self, id: &str) -> Result<Note> {
        self.repository.update(|items: &mut Vec<Note>| {
            let pos = items
                .iter()
                .position(|n| n.id == id)
                .ok_or_else(|| not_found(id))?;
            Ok(items.remove(pos))
        })
    }

    pub fn list(&self, query: &str) -> Result<Vec<Note>> {
        let items = self.repository.load::<Note>()?;
        Ok(items.into_iter().filter(|n| n.matches(query)).collect())
    }

    pub fn show(&self, id: &str) -> Result<Note> {
        self.repository
            .load::<Note>()?
            .into_iter()
            .find(|n| n.id == id)
            .ok_or_else(|| not_found(id))
    }

    /// Write Markdown content in the user's editor.
    pub fn compose(&self, editor: &EditorSession, initial: &str) -> Result<String> {
        let scratch = self.repository.scratch_path(SCRATCH_FILE);
        editor.edit(&scratch, initial)
    }
}

fn not_found(id: &str) -> EmbedLinkError {
    EmbedLinkError::NotFound(format!("note '{}'", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::workspace;

    #[test]
    fn test_add_sets_both_timestamps() {
        let (_temp, repo) = workspace();
        let service = NoteService::new(repo);

        let note = service
            .add("UART DMA", "Use idle line detection".to_string(), vec!["UART".into()])
            .unwrap();
        assert!(note.id.starts_with('n'));
        assert_eq!(note.created_at, note.updated_at);
        assert_eq!(service.list("").unwrap()[0].id, note.id);
    }

    #[test]
    fn test_blank_title_rejected() {
        let (_temp, repo) = workspace();
        let service = NoteService::new(repo);
        assert!(matches!(
            service.add("  ", String::new(), vec![]),
            Err(EmbedLinkError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_edit_refreshes_updated_at_only() {
        let (_temp, repo) = workspace();
        let service = NoteService::new(repo);
        let before = service.show("n1").unwrap();

        let after = service
            .edit(
                "n1",
                NotePatch {
                    content: Some("Nine clock pulses".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(after.title, before.title);
        assert_eq!(after.tags, before.tags);
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at > before.updated_at);
    }

    #[test]
    fn test_delete_and_show_missing() {
        let (_temp, repo) = workspace();
        let service = NoteService::new(repo);

        service.delete("n2").unwrap();
        assert_eq!(service.list("").unwrap().len(), 1);
        assert!(matches!(service.show("n2"), Err(EmbedLinkError::NotFound(_))));
    }

    #[test]
    fn test_list_query_matches_content_and_tags() {
        let (_temp, repo) = workspace();
        let service = NoteService::new(repo);
        assert_eq!(service.list("dtc").unwrap().len(), 1);
        assert_eq!(service.list("stm32").unwrap().len(), 1);
        assert!(service.list("zigbee").unwrap().is_empty());
    }
}
