//! Install command - writes the aliases file and reloads the MTA.

use anyhow::Result;

use aliasgen::config::Config;
use aliasgen::install::{install, InstallOutcome};

/// Execute the install command.
pub fn cmd_install(config: &Config) -> Result<()> {
    let directory = super::user_directory(config)?;
    let template = config.template_path();

    println!("Generating {}...", config.output.display());
    println!("  Template: {}", template.display());

    let outcome = install(
        &template,
        &directory,
        &config.output,
        config.reload_command.as_deref(),
    )?;

    match outcome {
        InstallOutcome::Unchanged => println!("  Unchanged, nothing to do"),
        InstallOutcome::Written => println!("  Written (reload disabled)"),
        InstallOutcome::WrittenAndReloaded => println!("  Written and reloaded"),
    }
    Ok(())
}
