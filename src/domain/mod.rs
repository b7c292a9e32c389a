//! Domain layer - Records, rules and pure calculations

pub mod backup;
pub mod bookmark;
pub mod converters;
pub mod ids;
pub mod material;
pub mod mindmap;
pub mod note;
pub mod planner;
pub mod pomodoro;
pub mod project;
pub mod quotes;
pub mod samples;
pub mod snippet;
pub mod tags;
pub mod user;

pub use backup::{BackupDocument, ImportPayload, BACKUP_VERSION};
pub use bookmark::{Bookmark, BookmarkDraft, BookmarkPatch, Category};
pub use material::{Material, MaterialDraft, MaterialType};
pub use note::{Note, NotePatch};
pub use planner::{BlockType, DailyPlan, Mood, ScheduleBlock, TodoItem};
pub use pomodoro::{PomodoroSession, PomodoroTimer, SessionStatus, TimerMode};
pub use project::{Project, ProjectDashboard, ProjectPatch, ProjectPriority, ProjectStatus, Task};
pub use snippet::{CodeSnippet, SnippetDraft, SnippetLanguage, SnippetPatch};
pub use user::User;
