//! Configuration module
//!
//! One typed struct loaded from `config.toml`, passed by reference into
//! every command. No string-keyed lookups: call sites read fields.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the memo files, flat
    #[serde(default = "default_memo_dir")]
    pub memo_dir: PathBuf,

    /// Editor command for `new`, `edit` and `config --edit`
    #[serde(default = "default_editor")]
    pub editor: String,

    /// Foreground colour of the styled listing (hex)
    #[serde(default = "default_list_fg")]
    pub list_fg_colour: String,

    /// Background colour of the styled listing (hex)
    #[serde(default = "default_list_bg")]
    pub list_bg_colour: String,

    /// Width for listing and view output; 0 means detect from terminal
    #[serde(default)]
    pub display_width: usize,

    /// `memo config` without flags opens the form instead of the table
    #[serde(default)]
    pub edit_config: bool,

    /// Commit memo changes to a git repository in the memo directory
    #[serde(default)]
    pub git: bool,

    /// Static assets for the web viewer (base.html, favicon.ico, css/js)
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            memo_dir: default_memo_dir(),
            editor: default_editor(),
            list_fg_colour: default_list_fg(),
            list_bg_colour: default_list_bg(),
            display_width: 0,
            edit_config: false,
            git: false,
            assets_dir: default_assets_dir(),
        }
    }
}

fn default_memo_dir() -> PathBuf {
    directories::UserDirs::new()
        .map(|u| u.home_dir().join("memo"))
        .unwrap_or_else(|| PathBuf::from("memo"))
}

fn default_editor() -> String {
    std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string())
}

fn default_list_fg() -> String {
    "#FAFAFA".to_string()
}

fn default_list_bg() -> String {
    "#7D56F4".to_string()
}

fn default_assets_dir() -> PathBuf {
    config_dir().join("assets")
}

/// Platform config directory for memo (e.g. `~/.config/memo`)
fn config_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "memo")
        .map(|p| p.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".memo"))
}

impl Config {
    /// Default config file location (`{config dir}/config.toml`)
    pub fn default_path() -> PathBuf {
        config_dir().join("config.toml")
    }

    /// Load config from the default location.
    ///
    /// A missing file yields pure defaults; a file that exists but does
    /// not parse is an error, not a silent fallback.
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.is_file() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("malformed config file {}", path.display()))?;
        Ok(config)
    }

    /// Save config to a file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
            .with_context(|| format!("cannot write config file {}", path.display()))?;
        Ok(())
    }
}
