//! Infrastructure layer - External I/O and persistence

pub mod config;
pub mod editor;
pub mod gemini;
pub mod gist;
pub mod repository;

pub use config::Config;
pub use editor::EditorSession;
pub use gemini::GeminiClient;
pub use gist::GistClient;
pub use repository::{Collection, FileSystemRepository, WorkspaceRepository};
