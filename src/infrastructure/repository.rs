//! File system repository
//!
//! Every collection lives in its own JSON array file under `.embedlink/`
//! and is always read and written whole.

use crate::domain::samples::{sample_bookmarks, sample_notes};
use crate::domain::{Bookmark, CodeSnippet, DailyPlan, Material, Note, PomodoroSession, Project, User};
use crate::error::{EmbedLinkError, Result};
use crate::infrastructure::config::WORKSPACE_DIR;
use crate::infrastructure::Config;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

const USER_FILE: &str = "user.json";

/// A record type persisted as one JSON array under its own key
pub trait Collection: Serialize + DeserializeOwned + Clone {
    /// Storage key; the file is `.embedlink/<KEY>.json`
    const KEY: &'static str;

    /// Contents used when nothing (or nothing readable) is stored
    fn defaults() -> Vec<Self> {
        Vec::new()
    }
}

impl Collection for Bookmark {
    const KEY: &'static str = "bookmarks";

    fn defaults() -> Vec<Self> {
        sample_bookmarks()
    }
}

impl Collection for Note {
    const KEY: &'static str = "notes";

    fn defaults() -> Vec<Self> {
        sample_notes()
    }
}

impl Collection for Project {
    const KEY: &'static str = "projects";
}

impl Collection for CodeSnippet {
    const KEY: &'static str = "snippets";
}

impl Collection for Material {
    const KEY: &'static str = "materials";
}

impl Collection for DailyPlan {
    const KEY: &'static str = "daily-plans";
}

impl Collection for PomodoroSession {
    const KEY: &'static str = "pomodoro-history";
}

/// Abstract repository for workspace operations
pub trait WorkspaceRepository {
    /// Get the root directory of this repository
    fn root(&self) -> &Path;

    /// Load configuration from .embedlink/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .embedlink/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .embedlink directory exists
    fn is_initialized(&self) -> bool;

    /// Create .embedlink directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of WorkspaceRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Locate the workspace: `EMBEDLINK_ROOT` if set, otherwise the nearest
    /// ancestor of the current directory holding `.embedlink/`.
    pub fn discover() -> Result<Self> {
        match std::env::var_os("EMBEDLINK_ROOT") {
            Some(root) => {
                let root = PathBuf::from(root);
                if !Self::has_workspace_dir(&root) {
                    return Err(EmbedLinkError::Config(format!(
                        "EMBEDLINK_ROOT points at '{}', which has no .embedlink folder. \
                        Run 'embedlink init' there or unset EMBEDLINK_ROOT.",
                        root.display()
                    )));
                }
                Ok(FileSystemRepository::new(root))
            }
            None => Self::discover_from(&std::env::current_dir()?),
        }
    }

    pub fn discover_from(start: &Path) -> Result<Self> {
        start
            .ancestors()
            .find(|dir| Self::has_workspace_dir(dir))
            .map(|dir| FileSystemRepository::new(dir.to_path_buf()))
            .ok_or_else(|| EmbedLinkError::NotWorkspace(start.to_path_buf()))
    }

    fn has_workspace_dir(path: &Path) -> bool {
        path.join(WORKSPACE_DIR).is_dir()
    }

    fn data_path(&self, file: &str) -> PathBuf {
        self.root.join(WORKSPACE_DIR).join(file)
    }
}

impl WorkspaceRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_workspace_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let workspace_dir = self.root.join(WORKSPACE_DIR);

        if workspace_dir.exists() {
            return Err(EmbedLinkError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&workspace_dir)?;
        Ok(())
    }
}

// Collection storage (not part of trait - filesystem-specific)
impl FileSystemRepository {
    /// Load a whole collection. A missing file yields the collection's
    /// defaults; an unreadable one is logged and replaced by the defaults.
    pub fn load<T: Collection>(&self) -> Result<Vec<T>> {
        let path = self.data_path(&format!("{}.json", T::KEY));

        let contents = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(key = T::KEY, "no stored collection, using defaults");
                return Ok(T::defaults());
            }
            Err(e) => return Err(EmbedLinkError::Io(e)),
        };

        match serde_json::from_str(&contents) {
            Ok(items) => Ok(items),
            Err(e) => {
                tracing::warn!(
                    key = T::KEY,
                    path = %path.display(),
                    error = %e,
                    "discarding malformed collection file"
                );
                Ok(T::defaults())
            }
        }
    }

    /// Overwrite a whole collection
    pub fn save<T: Collection>(&self, items: &[T]) -> Result<()> {
        let contents = serde_json::to_string_pretty(items)?;
        self.write_atomic(&format!("{}.json", T::KEY), &contents)?;
        tracing::debug!(key = T::KEY, count = items.len(), "collection saved");
        Ok(())
    }

    /// Load, mutate and write back a collection in one step.
    pub fn update<T, R, F>(&self, mutate: F) -> Result<R>
    where
        T: Collection,
        F: FnOnce(&mut Vec<T>) -> Result<R>,
    {
        let mut items = self.load::<T>()?;
        let result = mutate(&mut items)?;
        self.save(&items)?;
        Ok(result)
    }

    /// Signed-in profile; a malformed profile file is removed.
    pub fn load_user(&self) -> Result<Option<User>> {
        let path = self.data_path(USER_FILE);
        let contents = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(EmbedLinkError::Io(e)),
        };

        match serde_json::from_str(&contents) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!(error = %e, "removing malformed user profile");
                fs::remove_file(&path)?;
                Ok(None)
            }
        }
    }

    pub fn save_user(&self, user: &User) -> Result<()> {
        let contents = serde_json::to_string_pretty(user)?;
        self.write_atomic(USER_FILE, &contents)
    }

    /// Returns true if a profile was removed.
    pub fn remove_user(&self) -> Result<bool> {
        let path = self.data_path(USER_FILE);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)?;
        Ok(true)
    }

    /// Scratch file path inside the workspace directory
    pub fn scratch_path(&self, name: &str) -> PathBuf {
        self.data_path(name)
    }

    /// Writes land in a sibling temp file first and are renamed over the
    /// collection, so a crash never leaves half a JSON array behind.
    fn write_atomic(&self, file: &str, content: &str) -> Result<()> {
        let target = self.data_path(file);
        if let Some(dir) = target.parent() {
            fs::create_dir_all(dir)?;
        }

        let staging = target.with_file_name(format!(".{}.{}", file, std::process::id()));
        fs::write(&staging, content)?;

        // Windows rename refuses an existing destination.
        if cfg!(windows) && target.exists() {
            fs::remove_file(&target)?;
        }
        fs::rename(&staging, &target)?;
        Ok(())
    }
}
