//! Code snippet use cases

use crate::domain::{CodeSnippet, SnippetDraft, SnippetPatch};
use crate::error::{EmbedLinkError, Result};
use crate::infrastructure::FileSystemRepository;

pub struct SnippetService {
    repository: FileSystemRepository,
}

impl SnippetService {
    pub fn new(repository: FileSystemRepository) -> Self {
        SnippetService { repository }
    }

    pub fn add(&self, draft: SnippetDraft) -> Result<CodeSnippet> {
        if draft.title.trim().is_empty() {
            return Err(EmbedLinkError::InvalidInput("Title cannot be empty".to_string()));
        }
        if draft.code.trim().is_empty() {
            return Err(EmbedLinkError::InvalidInput("Code cannot be empty".to_string()));
        }

        let snippet = CodeSnippet::create(draft);
        self.repository.update(|items: &mut Vec<CodeSnippet>| {
            items.insert(0, snippet.clone());
            Ok(())
        })?;
        Ok(snippet)
    }

    pub fn edit(&self, id: &str, patch: SnippetPatch) -> Result<CodeSnippet> {
        self.repository.update(|items: &mut Vec<CodeSnippet>| {
            let snippet = items
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or_else(|| not_found(id))?;
            snippet.apply(patch);
            Ok(snippet.clone())
        })
    }

    pub fn delete(&self, id: &str) -> Result<CodeSnippet> {
        self.repository.update(|items: &mut Vec<CodeSnippet>| {
            let pos = items
                .iter()
                .position(|s| s.id == id)
                .ok_or_else(|| not_found(id))?;
            Ok(items.remove(pos))
        })
    }

    pub fn list(&self, query: &str) -> Result<Vec<CodeSnippet>> {
        let items = self.repository.load::<CodeSnippet>()?;
        Ok(items.into_iter().filter(|s| s.matches(query)).collect())
    }

    pub fn show(&self, id: &str) -> Result<CodeSnippet> {
        self.repository
            .load::<CodeSnippet>()?
            .into_iter()
            .find(|s| s.id == id)
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: &str) -> EmbedLinkError {
    EmbedLinkError::NotFound(format!("snippet '{}'", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::workspace;
    use crate::domain::SnippetLanguage;

    fn draft(title: &str, platform: Option<&str>) -> SnippetDraft {
        SnippetDraft {
            title: title.to_string(),
            code: "GPIOA->ODR ^= (1 << 5);".to_string(),
            language: SnippetLanguage::C,
            platform: platform.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_list_and_filter_by_platform() {
        let (_temp, repo) = workspace();
        let service = SnippetService::new(repo);

        service.add(draft("Toggle LED", Some("STM32F4"))).unwrap();
        let second = service.add(draft("Delay loop", None)).unwrap();

        let all = service.list("").unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
        assert_eq!(service.list("stm32").unwrap().len(), 1);
    }

    #[test]
    fn test_empty_code_rejected() {
        let (_temp, repo) = workspace();
        let service = SnippetService::new(repo);
        let mut d = draft("Nothing", None);
        d.code = "\n".to_string();
        assert!(matches!(service.add(d), Err(EmbedLinkError::InvalidInput(_))));
    }

    #[test]
    fn test_edit_then_delete() {
        let (_temp, repo) = workspace();
        let service = SnippetService::new(repo);
        let s = service.add(draft("Toggle LED", None)).unwrap();

        let edited = service
            .edit(
                &s.id,
                SnippetPatch {
                    language: Some(SnippetLanguage::Cpp),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(edited.language, SnippetLanguage::Cpp);
        assert_eq!(edited.code, s.code);

        service.delete(&s.id).unwrap();
        assert!(matches!(service.show(&s.id), Err(EmbedLinkError::NotFound(_))));
    }
}
