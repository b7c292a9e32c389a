//! Project and task tracking use cases

use crate::domain::{
    Project, ProjectDashboard, ProjectPatch, ProjectPriority, ProjectStatus, Task,
};
use crate::error::{EmbedLinkError, Result};
use crate::infrastructure::{FileSystemRepository, GeminiClient, WorkspaceRepository};

pub struct ProjectService {
    repository: FileSystemRepository,
}

impl ProjectService {
    pub fn new(repository: FileSystemRepository) -> Self {
        ProjectService { repository }
    }

    /// New project in planning state, placed first.
    pub fn add(
        &self,
        name: &str,
        description: String,
        github_url: Option<String>,
        tags: Vec<String>,
    ) -> Result<Project> {
        if name.trim().is_empty() {
            return Err(EmbedLinkError::InvalidInput(
                "Project name cannot be empty".to_string(),
            ));
        }

        let mut project = Project::create(name.trim().to_string(), description, github_url);
        project.tags = tags;
        self.repository.update(|items: &mut Vec<Project>| {
            items.insert(0, project.clone());
            Ok(())
        })?;
        Ok(project)
    }

    fn modify<R>(&self, id: &str, f: impl FnOnce(&mut Project) -> Result<R>) -> Result<R> {
        self.repository.update(|items: &mut Vec<Project>| {
            let project = items
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| not_found(id))?;
            f(project)
        })
    }

    pub fn edit(&self, id: &str, patch: ProjectPatch) -> Result<Project> {
        self.modify(id, |p| {
            if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
                return Err(EmbedLinkError::InvalidInput(
                    "Project name cannot be empty".to_string(),
                ));
            }
            p.apply(patch);
            Ok(p.clone())
        })
    }

    pub fn set_status(&self, id: &str, status: ProjectStatus) -> Result<Project> {
        self.modify(id, |p| {
            p.status = status;
            Ok(p.clone())
        })
    }

    pub fn set_priority(&self, id: &str, priority: ProjectPriority) -> Result<Project> {
        self.modify(id, |p| {
            p.priority = priority;
            Ok(p.clone())
        })
    }

    pub fn delete(&self, id: &str) -> Result<Project> {
        self.repository.update(|items: &mut Vec<Project>| {
            let pos = items
                .iter()
                .position(|p| p.id == id)
                .ok_or_else(|| not_found(id))?;
            Ok(items.remove(pos))
        })
    }

    pub fn add_task(&self, id: &str, content: &str) -> Result<Task> {
        self.modify(id, |p| {
            p.add_task(content).cloned().ok_or_else(|| {
                EmbedLinkError::InvalidInput("Task text cannot be empty".to_string())
            })
        })
    }

    pub fn toggle_task(&self, id: &str, task_id: &str) -> Result<Project> {
        self.modify(id, |p| {
            if !p.toggle_task(task_id) {
                return Err(task_not_found(task_id));
            }
            Ok(p.clone())
        })
    }

    pub fn delete_task(&self, id: &str, task_id: &str) -> Result<Project> {
        self.modify(id, |p| {
            if !p.delete_task(task_id) {
                return Err(task_not_found(task_id));
            }
            Ok(p.clone())
        })
    }

    pub fn list(&self, status: Option<ProjectStatus>) -> Result<Vec<Project>> {
        let items = self.repository.load::<Project>()?;
        Ok(items
            .into_iter()
            .filter(|p| status.map_or(true, |s| p.status == s))
            .collect())
    }

    pub fn show(&self, id: &str) -> Result<Project> {
        self.repository
            .load::<Project>()?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| not_found(id))
    }

    pub fn dashboard(&self) -> Result<ProjectDashboard> {
        let items = self.repository.load::<Project>()?;
        Ok(ProjectDashboard::from_projects(&items))
    }

    /// Suggest a commit message from the project's completed tasks.
    pub fn commit_message(&self, id: &str) -> Result<String> {
        let project = self.show(id)?;
        let completed = project.completed_tasks();
        if completed.is_empty() {
            return Err(EmbedLinkError::InvalidInput(
                "Complete at least one task before generating a commit message".to_string(),
            ));
        }
        let config = self.repository.load_config()?;
        GeminiClient::from_env(&config.gemini_model)?.commit_message(&completed)
    }
}

fn not_found(id: &str) -> EmbedLinkError {
    EmbedLinkError::NotFound(format!("project '{}'", id))
}

fn task_not_found(id: &str) -> EmbedLinkError {
    EmbedLinkError::NotFound(format!("task '{}'", id))
}
