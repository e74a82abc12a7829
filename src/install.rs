//! Generating and installing the aliases file.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::aliases::AliasFileBuilder;
use crate::directory::{mail_recipients, UserDirectory};
use crate::process::Cmd;

/// Read the base template at `template` and merge the directory's recipients.
///
/// A missing or unreadable template fails the whole pass.
pub fn generate(template: &Path, directory: &dyn UserDirectory) -> Result<String> {
    let base = fs::read_to_string(template)
        .with_context(|| format!("Failed to read alias template at {}", template.display()))?;

    let recipients = mail_recipients(directory)?;

    let mut builder = AliasFileBuilder::new(&base);
    for recipient in &recipients {
        builder.apply(recipient);
    }
    tracing::info!(
        template = %template.display(),
        rewritten = builder.rewritten(),
        appended = builder.appended(),
        "merged aliases"
    );
    Ok(builder.build())
}

/// Write `contents` to `path` unless it already holds exactly that.
///
/// The new file is staged next to `path` and renamed over it, so readers see
/// either the old or the new aliases, never a partial file.
/// Returns true if the file was written.
pub fn write_if_changed(path: &Path, contents: &str) -> Result<bool> {
    if path.exists() {
        let current = fs::read(path)
            .with_context(|| format!("Failed to read existing {}", path.display()))?;
        if current == contents.as_bytes() {
            return Ok(false);
        }
    }

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create {}", parent.display()))?;

    let mut staged = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temporary file in {}", parent.display()))?;
    staged
        .write_all(contents.as_bytes())
        .and_then(|_| staged.as_file().sync_all())
        .with_context(|| format!("Failed to write {}", staged.path().display()))?;
    fs::set_permissions(staged.path(), fs::Permissions::from_mode(0o644))
        .with_context(|| format!("Failed to set permissions on {}", staged.path().display()))?;

    staged
        .persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to replace {}", path.display()))?;

    Ok(true)
}

/// Run the mail-system reload command.
pub fn reload(command: &str) -> Result<()> {
    Cmd::new("sh")
        .args(["-c", command])
        .error_msg(format!("Mail alias reload '{}' failed", command))
        .run()?;
    Ok(())
}

/// Outcome of an install pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Unchanged,
    Written,
    WrittenAndReloaded,
}

/// Generate the aliases file, persist it, and reload if it changed.
pub fn install(
    template: &Path,
    directory: &dyn UserDirectory,
    output: &Path,
    reload_command: Option<&str>,
) -> Result<InstallOutcome> {
    let contents = generate(template, directory)?;

    if !write_if_changed(output, &contents)? {
        tracing::debug!(output = %output.display(), "aliases unchanged");
        return Ok(InstallOutcome::Unchanged);
    }

    match reload_command {
        Some(command) => {
            reload(command)?;
            Ok(InstallOutcome::WrittenAndReloaded)
        }
        None => Ok(InstallOutcome::Written),
    }
}
