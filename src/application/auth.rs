//! Local sign-in profile
//!
//! There is no server: signing in just stores a profile in the workspace.

use crate::domain::User;
use crate::error::{EmbedLinkError, Result};
use crate::infrastructure::FileSystemRepository;

pub fn login(repository: &FileSystemRepository, email: &str, username: Option<&str>) -> Result<User> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(EmbedLinkError::InvalidInput(format!(
            "Invalid email address: '{}'",
            email
        )));
    }
    let user = User::sign_in(email, username);
    repository.save_user(&user)?;
    Ok(user)
}

/// Returns false when nobody was signed in.
pub fn logout(repository: &FileSystemRepository) -> Result<bool> {
    repository.remove_user()
}

pub fn whoami(repository: &FileSystemRepository) -> Result<Option<User>> {
    repository.load_user()
}
