//! # Configuration
//!
//! Settings live in an optional JSON5 file. The path comes from
//! `WIEDIT_CONFIG`, else `~/.wiedit.json5`. A missing file means defaults.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `output` | `compact` | `compact` or `pretty` JSON on save |
//! | `backup` | `suffix` | `suffix` (`x.json.backup_<ts>`) or `stem` (`x_backup_<ts>.json`) |
//! | `flush` | `on_change` | when form edits reach the entry: `on_change` or `on_selection_change` |
//! | `new_entry_title` | `New entry` | title given to added entries |
//! | `simplified_suffix` | `" - 简"` | title tag for simplified copies |
//! | `traditional_suffix` | `" - 繁"` | title tag for traditional copies |

use crate::backup::BackupStyle;
use crate::convert::Script;
use crate::statics;
use crate::value::OutputStyle;
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// When form edits are written back into the bound entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlushPolicy {
    #[default]
    OnChange,
    OnSelectionChange,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub output: OutputStyle,
    pub backup: BackupStyle,
    pub flush: FlushPolicy,
    pub new_entry_title: String,
    pub simplified_suffix: String,
    pub traditional_suffix: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            output: OutputStyle::default(),
            backup: BackupStyle::default(),
            flush: FlushPolicy::default(),
            new_entry_title: statics::EN_NEW_ENTRY_TITLE.to_string(),
            simplified_suffix: statics::ZH_SUFFIX_SIMPLIFIED.to_string(),
            traditional_suffix: statics::ZH_SUFFIX_TRADITIONAL.to_string(),
        }
    }
}

impl EditorConfig {
    /// Read a config file; a missing file yields the defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(json5::from_str::<EditorConfig>(text)?)
    }

    /// `WIEDIT_CONFIG`, else the dotfile in the home directory.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(p) = std::env::var_os(statics::CONFIG_ENV_VAR) {
            return Some(PathBuf::from(p));
        }
        std::env::var_os("HOME")
            .or_else(|| std::env::var_os("USERPROFILE"))
            .map(|home| PathBuf::from(home).join(statics::CONFIG_FILE_NAME))
    }

    pub fn suffix_for(&self, script: Script) -> &str {
        match script {
            Script::Simplified => &self.simplified_suffix,
            Script::Traditional => &self.traditional_suffix,
        }
    }
}
