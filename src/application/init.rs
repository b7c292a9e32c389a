//! Initialize workspace use case

use crate::domain::{Bookmark, Note};
use crate::error::Result;
use crate::infrastructure::{Config, FileSystemRepository, WorkspaceRepository};
use std::fs;
use std::path::Path;

/// Initialize a new workspace at the specified path.
///
/// With `empty`, the bookmark and note collections are written out empty
/// so the built-in samples never show up.
pub fn init(path: &Path, empty: bool) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let repo = FileSystemRepository::new(path.to_path_buf());
    repo.initialize()?;
    repo.save_config(&Config::new())?;

    if empty {
        repo.save::<Bookmark>(&[])?;
        repo.save::<Note>(&[])?;
    }

    tracing::info!(root = %path.display(), empty, "workspace initialized");
    println!("Initialized embedlink workspace at {}", path.display());

    Ok(())
}
