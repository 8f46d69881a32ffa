use std::path::PathBuf;

use plates_core::config::ConfigOverrides;
use plates_core::{Command, SearchStrategy};
use schemars::JsonSchema;
use serde::Deserialize;

/// JSON-mode input, read from stdin, one command per invocation.
///
/// Config override priority (highest → lowest):
/// fields here > `config.toml` > defaults
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct JsonInput {
    /// The command to execute
    pub command: Command,
    /// Working file override (default: `<home>/plates.txt`)
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Plates home directory override
    #[serde(default)]
    pub home: Option<PathBuf>,
    /// Directory for auto-named day files
    #[serde(default)]
    pub save_dir: Option<PathBuf>,
    /// Default search strategy for this invocation
    #[serde(default)]
    pub strategy: Option<SearchStrategy>,
    /// Debug logging on stderr
    #[serde(default)]
    pub verbose: bool,
}

impl JsonInput {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            search_strategy: self.strategy,
            working_file: self.file.clone(),
            save_dir: self.save_dir.clone(),
            verbose: self.verbose,
            ..Default::default()
        }
    }
}
