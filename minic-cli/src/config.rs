//! Configuration for the minic CLI: arena sizing, the `#include` search
//! path, and the debugger's default enablement, loaded from a small TOML
//! file with CLI flags taking precedence over it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MinicCliError, Result};

pub const CONFIG_FILE_NAME: &str = "minic.toml";

fn default_arena_bytes() -> usize {
    minic_core::DEFAULT_ARENA_CAPACITY
}

fn default_include_path() -> Vec<String> {
    Vec::new()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Byte capacity of the two-ended arena backing one interpreter instance.
    #[serde(default = "default_arena_bytes")]
    pub arena_bytes: usize,

    /// Directories searched, in order, for `#include "..."` headers.
    #[serde(default = "default_include_path")]
    pub include_path: Vec<String>,

    /// Whether newly-parsed translation units enable the interactive
    /// debugger hook by default.
    #[serde(default)]
    pub debug_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            arena_bytes: default_arena_bytes(),
            include_path: default_include_path(),
            debug_mode: false,
        }
    }
}

impl Config {
    /// Loads from the first of: current directory, `$HOME/.config/minic/`,
    /// the platform config directory — falling back to defaults if none
    /// exist.
    pub fn load() -> Result<Self> {
        match Self::find_config_file() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(MinicCliError::Config(format!("configuration file not found: {}", path.display())));
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| MinicCliError::Config(format!("failed to parse configuration: {e}")))
    }

    fn check_current_dir_config() -> Option<PathBuf> {
        let path = PathBuf::from(CONFIG_FILE_NAME);
        path.exists().then_some(path)
    }

    fn check_home_config() -> Option<PathBuf> {
        dirs::home_dir()
            .map(|dir| dir.join(".config").join("minic").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    fn check_system_config() -> Option<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("minic").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    fn find_config_file() -> Option<PathBuf> {
        Self::check_current_dir_config()
            .or_else(Self::check_home_config)
            .or_else(Self::check_system_config)
    }
}
