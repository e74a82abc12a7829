//! User directory access.
//!
//! The directory hands out every account it knows about; `mail_recipients`
//! narrows that down to accounts that actually have an email address.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A user account as exported by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// A user with a usable email address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub username: String,
    pub email: String,
}

/// Source of user accounts.
pub trait UserDirectory {
    /// Return all users, in directory order.
    fn query(&self) -> Result<Vec<User>>;
}

/// Users read from a JSON array on disk.
///
/// Extra fields on each record are ignored, so a full account export works.
pub struct JsonUserDirectory {
    path: PathBuf,
}

impl JsonUserDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl UserDirectory for JsonUserDirectory {
    fn query(&self) -> Result<Vec<User>> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read user list at {}", self.path.display()))?;
        let users: Vec<User> = serde_json::from_str(&content)
            .with_context(|| format!("Invalid user list at {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), count = users.len(), "loaded users");
        Ok(users)
    }
}

/// Fixed, in-memory list of users.
#[derive(Debug, Clone, Default)]
pub struct StaticUserDirectory {
    users: Vec<User>,
}

impl StaticUserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }
}

impl UserDirectory for StaticUserDirectory {
    fn query(&self) -> Result<Vec<User>> {
        Ok(self.users.clone())
    }
}

/// Query `directory` and keep users whose email is present and non-empty.
pub fn mail_recipients(directory: &dyn UserDirectory) -> Result<Vec<Recipient>> {
    let recipients = directory
        .query()?
        .into_iter()
        .filter_map(|user| match user.email {
            Some(email) if !email.is_empty() => Some(Recipient {
                username: user.username,
                email,
            }),
            _ => None,
        })
        .collect();
    Ok(recipients)
}
