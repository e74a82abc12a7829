//! aliasgen library exports.
//!
//! The binary is a thin CLI over these modules; tests drive them directly.

pub mod aliases;
pub mod config;
pub mod directory;
pub mod install;
pub mod platform;
pub mod process;
