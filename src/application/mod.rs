//! Application layer - Use cases and orchestration

pub mod auth;
pub mod backup;
pub mod bookmarks;
pub mod init;
pub mod manage_config;
pub mod materials;
pub mod mindmap;
pub mod notes;
pub mod planner;
pub mod pomodoro;
pub mod projects;
pub mod snippets;
pub mod stats;
pub mod sync;

pub use backup::BackupService;
pub use bookmarks::{BookmarkInput, BookmarkService};
pub use manage_config::ConfigService;
pub use materials::MaterialService;
pub use mindmap::{MindMapService, MindMapView};
pub use notes::NoteService;
pub use planner::PlannerService;
pub use pomodoro::PomodoroService;
pub use projects::ProjectService;
pub use snippets::SnippetService;
pub use stats::WorkspaceStats;
pub use sync::SyncService;
