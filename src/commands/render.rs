//! Render command - prints the merged aliases file.

use anyhow::Result;
use std::io::Write;

use aliasgen::config::Config;
use aliasgen::install::generate;

/// Execute the render command.
pub fn cmd_render(config: &Config) -> Result<()> {
    let directory = super::user_directory(config)?;
    let contents = generate(&config.template_path(), &directory)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(contents.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
