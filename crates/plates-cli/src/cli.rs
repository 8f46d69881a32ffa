//! CLI argument parsing with clap.
//!
//! One-shot subcommands map onto a core [`Command`]; `shell` starts an
//! interactive session instead.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use plates_core::config::ConfigOverrides;
use plates_core::{Command, PlateRef, SearchStrategy};

const CLI_AFTER_HELP: &str = "\
One-shot commands work on the working file (default ~/.plates/plates.txt).
Plates look like 1ABC-123.

Examples:
  plates insert 1ABC-123
  plates tag 1ABC-123
  plates search 1ABC-123 --sequential
  plates export                 # next free day_NN.txt in the save dir
  plates shell                  # interactive session, auto-saves on exit";

/// plates - manage a registry of licence plates
#[derive(Parser, Debug)]
#[command(name = "plates", version, about = "Manage a registry of licence plates", after_help = CLI_AFTER_HELP)]
pub struct Cli {
    /// Plates home directory (overrides PLATES_HOME)
    #[arg(long, global = true, value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Working file for one-shot commands
    #[arg(short = 'f', long = "file", global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Directory for auto-named day files
    #[arg(long = "save-dir", global = true, value_name = "DIR")]
    pub save_dir: Option<PathBuf>,

    /// Search with binary search
    #[arg(long, global = true, conflicts_with = "sequential")]
    pub binary: bool,

    /// Search with a sequential scan
    #[arg(long, global = true)]
    pub sequential: bool,

    /// Don't ask before resets
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Show debug logging on stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Add a plate to the untagged list
    Insert { plate: String },
    /// Change a plate's value
    Edit { plate: String, new_value: String },
    /// Move an untagged plate to the tagged list
    Tag { plate: String },
    /// Move a tagged plate back to the untagged list
    Untag { plate: String },
    /// Remove a plate
    Delete { plate: String },
    /// Find a plate
    Search { term: String },
    /// Clear both lists
    ResetAll,
    /// Move every tagged plate back to untagged
    ResetTagged,
    /// Show both lists
    List,
    /// Merge a plates file into the working file
    Import { path: PathBuf },
    /// Write the registry to PATH, or to the next free day file
    Export { path: Option<PathBuf> },
    /// Start an interactive session
    Shell {
        /// Import this file before the first prompt
        #[arg(long, value_name = "PATH")]
        load: Option<PathBuf>,
        /// Skip the day-file save on exit
        #[arg(long)]
        no_auto_save: bool,
    },
}

impl Cli {
    /// Strategy chosen by `--binary`/`--sequential`, if any.
    pub fn strategy(&self) -> Option<SearchStrategy> {
        if self.binary {
            Some(SearchStrategy::Binary)
        } else if self.sequential {
            Some(SearchStrategy::Sequential)
        } else {
            None
        }
    }

    pub fn overrides(&self) -> ConfigOverrides {
        let auto_save = match &self.command {
            CliCommand::Shell {
                no_auto_save: true, ..
            } => Some(false),
            _ => None,
        };
        ConfigOverrides {
            search_strategy: self.strategy(),
            working_file: self.file.clone(),
            save_dir: self.save_dir.clone(),
            auto_save,
            confirm_resets: self.yes.then_some(false),
            verbose: self.verbose,
        }
    }
}

impl CliCommand {
    /// The core command for a one-shot invocation. `None` for `shell`.
    pub fn to_command(&self) -> Option<Command> {
        let command = match self.clone() {
            CliCommand::Insert { plate } => Command::Insert { plate },
            CliCommand::Edit { plate, new_value } => Command::Edit {
                target: PlateRef::new(plate),
                new_value,
            },
            CliCommand::Tag { plate } => Command::Tag(PlateRef::new(plate)),
            CliCommand::Untag { plate } => Command::Untag(PlateRef::new(plate)),
            CliCommand::Delete { plate } => Command::Delete(PlateRef::new(plate)),
            // strategy comes from the resolved config
            CliCommand::Search { term } => Command::Search {
                term,
                strategy: None,
            },
            CliCommand::ResetAll => Command::ResetAll,
            CliCommand::ResetTagged => Command::ResetTagged,
            CliCommand::List => Command::List,
            CliCommand::Import { path } => Command::Import { path },
            CliCommand::Export { path } => Command::Export { path },
            CliCommand::Shell { .. } => return None,
        };
        Some(command)
    }
}
