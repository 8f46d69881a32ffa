//! Configuration for plates.
//!
//! `config.toml` lives in the plates home directory. Every field is optional;
//! missing fields fall back to [`ConfigDefaults`]. Front ends layer their own
//! per-invocation [`ConfigOverrides`] on top to get a [`ResolvedConfig`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::search::SearchStrategy;

// ============================================================================
// Default Values
// ============================================================================

/// Central source of truth for all configuration defaults.
pub struct ConfigDefaults;

impl ConfigDefaults {
    pub const AUTO_SAVE: bool = true;
    pub const CONFIRM_RESETS: bool = true;
    pub const VERBOSE: bool = false;
    pub const SEARCH_STRATEGY: SearchStrategy = SearchStrategy::Binary;
    /// Relative to the home directory.
    pub const WORKING_FILE: &'static str = "plates.txt";
    /// Relative to the current directory.
    pub const SAVE_DIR: &'static str = ".";
}

// Thin wrappers for serde's #[serde(default = "...")] requirement
fn default_auto_save() -> bool {
    ConfigDefaults::AUTO_SAVE
}
fn default_confirm_resets() -> bool {
    ConfigDefaults::CONFIRM_RESETS
}
fn default_verbose() -> bool {
    ConfigDefaults::VERBOSE
}
fn default_search_strategy() -> SearchStrategy {
    ConfigDefaults::SEARCH_STRATEGY
}

// ============================================================================
// Config (config.toml)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_search_strategy")]
    pub search_strategy: SearchStrategy,
    /// Registry file kept between invocations. Relative paths resolve
    /// against the home directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_file: Option<PathBuf>,
    /// Where auto-named `day_NN.txt` files go.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_dir: Option<PathBuf>,
    /// Save to the next day file when a shell session ends.
    #[serde(default = "default_auto_save")]
    pub auto_save: bool,
    /// Ask before `reset_all` / `reset_tagged`.
    #[serde(default = "default_confirm_resets")]
    pub confirm_resets: bool,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_strategy: default_search_strategy(),
            working_file: None,
            save_dir: None,
            auto_save: default_auto_save(),
            confirm_resets: default_confirm_resets(),
            verbose: default_verbose(),
        }
    }
}

/// Per-invocation settings from flags or JSON input. `None` defers to the
/// config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub search_strategy: Option<SearchStrategy>,
    pub working_file: Option<PathBuf>,
    pub save_dir: Option<PathBuf>,
    pub auto_save: Option<bool>,
    /// `Some(false)` skips reset confirmation (`--yes`).
    pub confirm_resets: Option<bool>,
    pub verbose: bool,
}

/// Fully resolved configuration, with no optional fields left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub search_strategy: SearchStrategy,
    pub working_file: PathBuf,
    pub save_dir: PathBuf,
    pub auto_save: bool,
    pub confirm_resets: bool,
    pub verbose: bool,
}

impl Config {
    /// Applies `overrides` on top of this config. Relative `working_file`
    /// paths from the config file are anchored at `home`.
    pub fn resolve(&self, home: &Path, overrides: &ConfigOverrides) -> ResolvedConfig {
        let working_file = match (&overrides.working_file, &self.working_file) {
            (Some(path), _) => path.clone(),
            (None, Some(path)) => home.join(path),
            (None, None) => home.join(ConfigDefaults::WORKING_FILE),
        };
        let save_dir = overrides
            .save_dir
            .clone()
            .or_else(|| self.save_dir.clone())
            .unwrap_or_else(|| PathBuf::from(ConfigDefaults::SAVE_DIR));

        ResolvedConfig {
            search_strategy: overrides.search_strategy.unwrap_or(self.search_strategy),
            working_file,
            save_dir,
            auto_save: overrides.auto_save.unwrap_or(self.auto_save),
            confirm_resets: overrides.confirm_resets.unwrap_or(self.confirm_resets),
            verbose: overrides.verbose || self.verbose,
        }
    }
}
