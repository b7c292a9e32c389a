//! Projects, their task lists and the dashboard aggregate

use crate::domain::ids::{generate_id, now_millis};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Planning,
    Development,
    Testing,
    Released,
    Archived,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 5] = [
        ProjectStatus::Planning,
        ProjectStatus::Development,
        ProjectStatus::Testing,
        ProjectStatus::Released,
        ProjectStatus::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "planning",
            ProjectStatus::Development => "development",
            ProjectStatus::Testing => "testing",
            ProjectStatus::Released => "released",
            ProjectStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectStatus::ALL
            .iter()
            .copied()
            .find(|st| st.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "Invalid status: '{}'. Valid statuses are: planning, development, testing, released, archived",
                    s
                )
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProjectPriority {
    High,
    #[default]
    Medium,
    Low,
}

impl fmt::Display for ProjectPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProjectPriority::High => "high",
            ProjectPriority::Medium => "medium",
            ProjectPriority::Low => "low",
        };
        f.pad(s)
    }
}

impl FromStr for ProjectPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(ProjectPriority::High),
            "medium" => Ok(ProjectPriority::Medium),
            "low" => Ok(ProjectPriority::Low),
            _ => Err(format!(
                "Invalid priority: '{}'. Valid priorities are: high, medium, low",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub content: String,
    pub is_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    pub status: ProjectStatus,
    pub priority: ProjectPriority,
    pub progress: u8,
    pub start_date: i64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// Editable project fields; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    /// An empty string clears the link
    pub github_url: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Percentage of completed tasks, rounded; 0 when there are no tasks.
pub fn calculate_progress(tasks: &[Task]) -> u8 {
    if tasks.is_empty() {
        return 0;
    }
    let completed = tasks.iter().filter(|t| t.is_completed).count();
    ((completed as f64 / tasks.len() as f64) * 100.0).round() as u8
}

impl Project {
    /// New project: planning status, medium priority, no tasks.
    pub fn create(name: String, description: String, github_url: Option<String>) -> Self {
        Project {
            id: generate_id("p"),
            name,
            description,
            github_url: github_url.filter(|u| !u.is_empty()),
            status: ProjectStatus::Planning,
            priority: ProjectPriority::Medium,
            progress: 0,
            start_date: now_millis(),
            tags: Vec::new(),
            tasks: Vec::new(),
        }
    }

    pub fn apply(&mut self, patch: ProjectPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(url) = patch.github_url {
            self.github_url = Some(url).filter(|u| !u.is_empty());
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
    }

    /// Append a task; blank content is ignored and yields `None`.
    pub fn add_task(&mut self, content: &str) -> Option<&Task> {
        if content.trim().is_empty() {
            return None;
        }
        self.tasks.push(Task {
            id: generate_id("t"),
            content: content.to_string(),
            is_completed: false,
        });
        self.progress = calculate_progress(&self.tasks);
        self.tasks.last()
    }

    /// Flip completion of a task. Returns false if the id is unknown.
    pub fn toggle_task(&mut self, task_id: &str) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) else {
            return false;
        };
        task.is_completed = !task.is_completed;
        self.progress = calculate_progress(&self.tasks);
        true
    }

    pub fn delete_task(&mut self, task_id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != task_id);
        self.progress = calculate_progress(&self.tasks);
        self.tasks.len() != before
    }

    pub fn completed_tasks(&self) -> Vec<&str> {
        self.tasks
            .iter()
            .filter(|t| t.is_completed)
            .map(|t| t.content.as_str())
            .collect()
    }
}

/// Aggregate figures over all projects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDashboard {
    pub total: usize,
    pub average_progress: u8,
    pub high_priority: usize,
    pub status_counts: BTreeMap<ProjectStatus, usize>,
}

impl ProjectDashboard {
    pub fn from_projects(projects: &[Project]) -> Self {
        let total = projects.len();
        let average_progress = if total > 0 {
            let sum: u32 = projects.iter().map(|p| p.progress as u32).sum();
            (sum as f64 / total as f64).round() as u8
        } else {
            0
        };
        let high_priority = projects
            .iter()
            .filter(|p| p.priority == ProjectPriority::High)
            .count();

        let mut status_counts = BTreeMap::new();
        for p in projects {
            *status_counts.entry(p.status).or_insert(0) += 1;
        }

        ProjectDashboard {
            total,
            average_progress,
            high_priority,
            status_counts,
        }
    }
}
