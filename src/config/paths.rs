//! Where kubetopo keeps its configuration
//!
//! `KUBETOPO_CONFIG_DIR` wins when set. Otherwise Unix-likes follow XDG,
//! macOS included, and Windows uses the roaming AppData folder.

use directories::BaseDirs;
use std::path::PathBuf;

pub const CONFIG_DIR_ENV: &str = "KUBETOPO_CONFIG_DIR";
const APP_NAME: &str = "kubetopo";
const CONFIG_FILE: &str = "config.yaml";

pub fn config_dir() -> PathBuf {
    match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) => PathBuf::from(dir),
        None => platform_config_home().join(APP_NAME),
    }
}

#[cfg(not(windows))]
fn platform_config_home() -> PathBuf {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| BaseDirs::new().map(|dirs| dirs.home_dir().join(".config")))
        .unwrap_or_else(|| PathBuf::from(".config"))
}

#[cfg(windows)]
fn platform_config_home() -> PathBuf {
    BaseDirs::new()
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".config"))
}

/// The single YAML file holding user settings
pub fn config_file() -> PathBuf {
    config_dir().join(CONFIG_FILE)
}
