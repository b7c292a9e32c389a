//! Per-collection record counts

use crate::domain::{Bookmark, CodeSnippet, DailyPlan, Material, Note, PomodoroSession, Project};
use crate::error::Result;
use crate::infrastructure::FileSystemRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorkspaceStats {
    pub bookmarks: usize,
    pub notes: usize,
    pub projects: usize,
    pub snippets: usize,
    pub materials: usize,
    pub plans: usize,
    pub pomodoros: usize,
}

pub fn collect(repository: &FileSystemRepository) -> Result<WorkspaceStats> {
    Ok(WorkspaceStats {
        bookmarks: repository.load::<Bookmark>()?.len(),
        notes: repository.load::<Note>()?.len(),
        projects: repository.load::<Project>()?.len(),
        snippets: repository.load::<CodeSnippet>()?.len(),
        materials: repository.load::<Material>()?.len(),
        plans: repository.load::<DailyPlan>()?.len(),
        pomodoros: repository.load::<PomodoroSession>()?.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::workspace;

    #[test]
    fn test_fresh_workspace_counts_samples() {
        let (_temp, repo) = workspace();
        let stats = collect(&repo).unwrap();
        assert_eq!(
            stats,
            WorkspaceStats {
                bookmarks: 5,
                notes: 2,
                ..Default::default()
            }
        );
    }
}
