//! Configuration paths
//!
//! Uses the directories crate for platform-appropriate locations.

use std::path::PathBuf;

/// Name of the application directory
const APP_NAME: &str = "zulip-doc-examples";

/// Get the configuration directory path
///
/// - Linux: `~/.config/zulip-doc-examples/`
/// - macOS: `~/Library/Application Support/zulip-doc-examples/`
/// - Windows: `%APPDATA%\zulip-doc-examples\`
fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the default configuration file path
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}
