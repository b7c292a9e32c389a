//! Materials library use cases

use crate::domain::{Material, MaterialDraft, MaterialType};
use crate::error::{EmbedLinkError, Result};
use crate::infrastructure::gemini::MaterialAnalysis;
use crate::infrastructure::{FileSystemRepository, GeminiClient, WorkspaceRepository};

pub struct MaterialService {
    repository: FileSystemRepository,
}

/// Merge an AI suggestion into a draft. Explicit values win; a suggested
/// type only replaces the default `other`.
pub fn apply_analysis(draft: &mut MaterialDraft, analysis: MaterialAnalysis) {
    if draft.description.trim().is_empty() {
        if let Some(description) = analysis.description {
            draft.description = description;
        }
    }
    if draft.kind == MaterialType::Other {
        if let Some(kind) = analysis.kind {
            draft.kind = kind;
        }
    }
    if draft.tags.is_empty() {
        draft.tags = analysis.tags;
    }
}

impl MaterialService {
    pub fn new(repository: FileSystemRepository) -> Self {
        MaterialService { repository }
    }

    pub fn add(&self, draft: MaterialDraft) -> Result<Material> {
        if draft.name.trim().is_empty() {
            return Err(EmbedLinkError::InvalidInput("Name cannot be empty".to_string()));
        }

        let material = Material::create(draft);
        self.repository.update(|items: &mut Vec<Material>| {
            items.insert(0, material.clone());
            Ok(())
        })?;
        Ok(material)
    }

    /// Ask Gemini about a file; `None` when no suggestion could be made.
    pub fn analyze(&self, name: &str, context: &str) -> Result<Option<MaterialAnalysis>> {
        let config = self.repository.load_config()?;
        let client = GeminiClient::from_env(&config.gemini_model)?;
        Ok(client.analyze_material(name, context))
    }

    pub fn delete(&self, id: &str) -> Result<Material> {
        self.repository.update(|items: &mut Vec<Material>| {
            let pos = items
                .iter()
                .position(|m| m.id == id)
                .ok_or_else(|| EmbedLinkError::NotFound(format!("material '{}'", id)))?;
            Ok(items.remove(pos))
        })
    }

    pub fn list(&self, kind: Option<MaterialType>, query: &str) -> Result<Vec<Material>> {
        let items = self.repository.load::<Material>()?;
        Ok(items
            .into_iter()
            .filter(|m| kind.map_or(true, |k| m.kind == k) && m.matches(query))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::workspace;

    fn draft(name: &str, kind: MaterialType) -> MaterialDraft {
        MaterialDraft {
            name: name.to_string(),
            kind,
            ..Default::default()
        }
    }

    #[test]
    fn test_add_sets_size_and_prepends() {
        let (_temp, repo) = workspace();
        let service = MaterialService::new(repo);

        let pdf = service.add(draft("RM0090.pdf", MaterialType::Pdf)).unwrap();
        let git = service.add(draft("zephyr", MaterialType::Git)).unwrap();
        assert_eq!(pdf.size, "Local");
        assert_eq!(git.size, "-");
        assert_eq!(service.list(None, "").unwrap()[0].id, git.id);
        assert_eq!(service.list(Some(MaterialType::Pdf), "").unwrap().len(), 1);
    }

    #[test]
    fn test_delete_missing_material() {
        let (_temp, repo) = workspace();
        let service = MaterialService::new(repo);
        assert!(matches!(service.delete("m0"), Err(EmbedLinkError::NotFound(_))));
    }

    #[test]
    fn test_apply_analysis_respects_explicit_values() {
        let mut d = draft("schematic.pdf", MaterialType::Pdf);
        d.description = "Rev B".to_string();
        apply_analysis(
            &mut d,
            MaterialAnalysis {
                description: Some("Main board schematic".to_string()),
                kind: Some(MaterialType::Image),
                tags: vec!["Schematic".to_string()],
            },
        );
        assert_eq!(d.description, "Rev B");
        assert_eq!(d.kind, MaterialType::Pdf);
        assert_eq!(d.tags, vec!["Schematic"]);

        let mut other = draft("notes.txt", MaterialType::Other);
        apply_analysis(
            &mut other,
            MaterialAnalysis {
                kind: Some(MaterialType::Doc),
                ..Default::default()
            },
        );
        assert_eq!(other.kind, MaterialType::Doc);
    }
}
