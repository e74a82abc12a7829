//! Configuration management for aliasgen.
//!
//! Reads configuration from a .env file and environment variables.
//! Environment variables take precedence over the .env file.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::platform::Platform;

/// Default location of the generated aliases file.
pub const DEFAULT_OUTPUT: &str = "/etc/aliases";

/// Default command that rebuilds the MTA alias database.
pub const DEFAULT_RELOAD_COMMAND: &str = "newaliases";

/// aliasgen configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root the template subpath is resolved against (default: /)
    pub root: PathBuf,
    /// Platform family selecting the template layout
    pub platform: Platform,
    /// JSON export of the user directory
    pub users: Option<PathBuf>,
    /// Where `install` writes the aliases file
    pub output: PathBuf,
    /// Command run after the aliases file changed; None disables reload
    pub reload_command: Option<String>,
}

impl Config {
    /// Load configuration from `<base_dir>/.env` and the environment.
    pub fn load(base_dir: &Path) -> Result<Self> {
        let mut vars = HashMap::new();

        let env_path = base_dir.join(".env");
        if env_path.exists() {
            let iter = dotenvy::from_path_iter(&env_path)
                .with_context(|| format!("Failed to read {}", env_path.display()))?;
            for item in iter {
                let (key, value) =
                    item.with_context(|| format!("Invalid line in {}", env_path.display()))?;
                vars.insert(key, value);
            }
        }

        // Environment variables override .env file
        vars.extend(std::env::vars());

        Self::from_vars(base_dir, &vars)
    }

    /// Build configuration from an explicit variable map.
    pub fn from_vars(base_dir: &Path, vars: &HashMap<String, String>) -> Result<Self> {
        let resolve = |s: &str| {
            let path = PathBuf::from(s);
            if path.is_absolute() {
                path
            } else {
                base_dir.join(path)
            }
        };

        let root = vars
            .get("ALIASGEN_ROOT")
            .map(|s| resolve(s))
            .unwrap_or_else(|| PathBuf::from("/"));

        let platform = match vars.get("ALIASGEN_PLATFORM") {
            Some(s) => s.parse::<Platform>().context("Invalid ALIASGEN_PLATFORM")?,
            None => Platform::host(),
        };

        let users = vars
            .get("ALIASGEN_USERS")
            .filter(|s| !s.is_empty())
            .map(|s| resolve(s));

        let output = vars
            .get("ALIASGEN_OUTPUT")
            .map(|s| resolve(s))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

        let reload_command = match vars.get("ALIASGEN_RELOAD_COMMAND") {
            Some(s) if s.trim().is_empty() => None,
            Some(s) => Some(s.trim().to_string()),
            None => Some(DEFAULT_RELOAD_COMMAND.to_string()),
        };

        Ok(Self {
            root,
            platform,
            users,
            output,
            reload_command,
        })
    }

    /// Base template path for the configured platform.
    pub fn template_path(&self) -> PathBuf {
        self.platform.template_path(&self.root)
    }

    /// Print configuration for debugging.
    pub fn print(&self) {
        println!("Configuration:");
        println!("  ALIASGEN_ROOT: {}", self.root.display());
        println!("  ALIASGEN_PLATFORM: {}", self.platform);
        match &self.users {
            Some(path) => println!("  ALIASGEN_USERS: {}", path.display()),
            None => println!("  ALIASGEN_USERS: (not set)"),
        }
        println!("  ALIASGEN_OUTPUT: {}", self.output.display());
        println!(
            "  ALIASGEN_RELOAD_COMMAND: {}",
            self.reload_command.as_deref().unwrap_or("(disabled)")
        );
        let template = self.template_path();
        if template.exists() {
            println!("  Template: FOUND ({})", template.display());
        } else {
            println!("  Template: NOT FOUND ({})", template.display());
        }
    }
}
