//! Tag mind map use case

use crate::domain::mindmap::{cluster_notes, layout, select, TagNode};
use crate::domain::Note;
use crate::error::{EmbedLinkError, Result};
use crate::infrastructure::FileSystemRepository;

/// Laid-out tag nodes plus the notes for the current selection
#[derive(Debug, Clone)]
pub struct MindMapView {
    pub nodes: Vec<TagNode>,
    pub selected: Option<String>,
    pub notes: Vec<Note>,
}

pub struct MindMapService {
    repository: FileSystemRepository,
}

impl MindMapService {
    pub fn new(repository: FileSystemRepository) -> Self {
        MindMapService { repository }
    }

    /// Build the map. Selecting a tag that no note carries is an error.
    pub fn view(&self, tag: Option<&str>) -> Result<MindMapView> {
        let notes = self.repository.load::<Note>()?;
        let clusters = cluster_notes(&notes);

        if let Some(t) = tag {
            if !clusters.iter().any(|c| c.tag == t) {
                return Err(EmbedLinkError::NotFound(format!("tag '{}'", t)));
            }
        }

        Ok(MindMapView {
            nodes: layout(&clusters),
            selected: tag.map(str::to_string),
            notes: select(&notes, &clusters, tag).into_iter().cloned().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::workspace;

    #[test]
    fn test_view_all_and_selected() {
        let (_temp, repo) = workspace();
        let service = MindMapService::new(repo);

        let all = service.view(None).unwrap();
        assert_eq!(all.nodes.len(), 2);
        assert_eq!(all.notes.len(), 2);

        let linux = service.view(Some("Linux")).unwrap();
        assert_eq!(linux.notes.len(), 1);
        assert_eq!(linux.notes[0].id, "n2");

        assert!(matches!(
            service.view(Some("Zigbee")),
            Err(EmbedLinkError::NotFound(_))
        ));
    }
}
