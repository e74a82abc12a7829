//! Platform families and their base template locations.

use anyhow::{bail, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Base template path on Linux, relative to the configuration root.
pub const LINUX_TEMPLATE: &str = "conf/base/etc/aliases";

/// Base template path on every other platform (BSD layout).
pub const OTHER_TEMPLATE: &str = "conf/base/etc/mail/aliases";

/// Platform family; decides where the base aliases template lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Linux,
    Other,
}

impl Platform {
    /// Platform this binary was compiled for.
    pub fn host() -> Self {
        if cfg!(target_os = "linux") {
            Platform::Linux
        } else {
            Platform::Other
        }
    }

    pub fn template_subpath(self) -> &'static str {
        match self {
            Platform::Linux => LINUX_TEMPLATE,
            Platform::Other => OTHER_TEMPLATE,
        }
    }

    /// Full template path under `root`.
    pub fn template_path(self, root: &Path) -> PathBuf {
        root.join(self.template_subpath())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Linux => write!(f, "linux"),
            Platform::Other => write!(f, "other"),
        }
    }
}

impl FromStr for Platform {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linux" => Ok(Platform::Linux),
            "other" | "freebsd" => Ok(Platform::Other),
            unknown => bail!(
                "Unknown platform '{}' (expected one of: linux, other, freebsd)",
                unknown
            ),
        }
    }
}
