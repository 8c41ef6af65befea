//! # Session Persistence
//!
//! Keeps the bearer token and the logged-in user between runs in a small
//! JSON file (`{"token": ..., "user": {...}}`). A missing file means "not
//! logged in"; an unreadable or corrupt file is logged and treated the same.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shared::dto::auth::User;

use crate::core::error::Result;

/// What is written to the session file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredSession {
    pub token: String,
    pub user: User,
}

/// File-backed credential store.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored session, if any.
    pub fn load(&self) -> Option<StoredSession> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = ?self.path, error = %e, "Failed to read session file");
                return None;
            }
        };

        match serde_json::from_str::<StoredSession>(&content) {
            Ok(session) if !session.token.trim().is_empty() => Some(session),
            Ok(_) => {
                tracing::warn!(path = ?self.path, "Session file has an empty token, ignoring");
                None
            }
            Err(e) => {
                tracing::warn!(path = ?self.path, error = %e, "Corrupt session file, ignoring");
                None
            }
        }
    }

    /// Persist token and user after a successful login.
    pub fn store_auth(&self, token: &str, user: &User) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let session = StoredSession {
            token: token.to_string(),
            user: user.clone(),
        };
        let content = serde_json::to_string_pretty(&session)
            .map_err(|e| crate::core::error::AppError::Storage(e.to_string()))?;
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            // Owner read/write only; the file holds a bearer token.
            options.mode(0o600);
        }
        let mut file = options.open(&self.path)?;
        file.write_all(content.as_bytes())?;

        tracing::info!(path = ?self.path, user_id = %user.id, "Session stored");
        Ok(())
    }

    /// Replace only the user record (e.g. after a profile update).
    pub fn update_user(&self, user: &User) -> Result<()> {
        match self.stored_token() {
            Some(token) => self.store_auth(&token, user),
            None => Ok(()),
        }
    }

    pub fn stored_user(&self) -> Option<User> {
        self.load().map(|session| session.user)
    }

    pub fn stored_token(&self) -> Option<String> {
        self.load().map(|session| session.token)
    }

    /// Remove the session file. Succeeds when it is already gone.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!(path = ?self.path, "Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
