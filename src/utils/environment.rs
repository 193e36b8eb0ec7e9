use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Directory name under `~/.config`
pub const APP_DIR_NAME: &str = "archlinux-ai-cli";

/// Get the configuration directory path (~/.config/archlinux-ai-cli)
pub fn get_config_dir() -> Result<PathBuf> {
    config_dir_for_home(env::var("HOME").ok())
}

/// Internal helper taking the HOME value explicitly (for testing)
pub(crate) fn config_dir_for_home(home: Option<String>) -> Result<PathBuf> {
    let home = home.filter(|h| !h.is_empty()).context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join(APP_DIR_NAME))
}
