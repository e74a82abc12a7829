//! CLI command handlers.
//!
//! - `render` - Print the merged aliases file
//! - `install` - Write the aliases file and reload the MTA
//! - `show` - Display information

pub mod install;
pub mod render;
pub mod show;

pub use install::cmd_install;
pub use render::cmd_render;
pub use show::cmd_show;

use anyhow::{bail, Result};

use aliasgen::config::Config;
use aliasgen::directory::JsonUserDirectory;

/// User directory named by the configuration.
fn user_directory(config: &Config) -> Result<JsonUserDirectory> {
    match &config.users {
        Some(path) => Ok(JsonUserDirectory::new(path)),
        None => bail!("No user list configured. Set ALIASGEN_USERS or pass --users."),
    }
}
