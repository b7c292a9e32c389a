//! embedlink - Knowledge base for embedded developers
//!
//! Bookmarks, Markdown notes, projects with task tracking, code snippets,
//! a materials library and a daily planner, all stored as JSON inside a
//! `.embedlink/` workspace. Optional Gemini suggestions and GitHub Gist
//! backups sit on top.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::EmbedLinkError;
