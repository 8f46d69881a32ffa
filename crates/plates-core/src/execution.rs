//! Shared command execution for plates binaries.
//!
//! [`execute_command()`] runs one [`Command`] against a registry. Both
//! plates-cli and plates-json call it with their own `OutputSink`; loading and
//! persisting the working file stays with the binary.

use std::path::Path;

use crate::codec::DecodeWarning;
use crate::config::ResolvedConfig;
use crate::error::Result;
use crate::input::Command;
use crate::output::{CommandEvent, OutputSink};
use crate::registry::{ImportSummary, Registry, Selection};
use crate::store;

/// What happened to the registry and to the caller's selection.
///
/// Core doesn't track selections. It returns what happened so binaries can
/// update theirs accordingly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandEffect {
    /// Registry unchanged, selection unchanged.
    None,
    /// Registry unchanged; the caller should select this plate (search hit).
    Selected(Selection),
    /// Registry changed; the caller should select this plate.
    Changed(Selection),
    /// Registry changed; any held selection must be revalidated.
    Reset,
    /// Registry changed; any held selection must be dropped.
    Cleared,
}

impl CommandEffect {
    /// True if the registry needs persisting.
    pub fn mutated(&self) -> bool {
        matches!(
            self,
            CommandEffect::Changed(_) | CommandEffect::Reset | CommandEffect::Cleared
        )
    }
}

/// Execute a command against `registry`.
///
/// Failures are returned untouched for the binary to report. Reset commands
/// check for emptiness first, then ask `output` for confirmation when
/// `config.confirm_resets` is set; declining emits
/// [`CommandEvent::Aborted`] and leaves the registry alone.
pub fn execute_command(
    registry: &mut Registry,
    command: &Command,
    config: &ResolvedConfig,
    output: &dyn OutputSink,
) -> Result<CommandEffect> {
    log::debug!("executing {}", command.as_ref());
    match command {
        Command::Insert { plate } => {
            let selection = registry.insert(plate)?;
            output.emit_event(CommandEvent::Inserted {
                plate: selection.plate.clone(),
            });
            Ok(CommandEffect::Changed(selection))
        }
        Command::Edit { target, new_value } => {
            let selection = target.resolve(registry);
            let edited = registry.edit(&selection, new_value)?;
            output.emit_event(CommandEvent::Edited {
                old: selection.plate,
                new: edited.plate.clone(),
                partition: edited.partition,
            });
            Ok(CommandEffect::Changed(edited))
        }
        Command::Tag(target) => {
            let selection = target.resolve(registry);
            let moved = registry.tag(&selection)?;
            output.emit_event(CommandEvent::Tagged {
                plate: moved.plate.clone(),
            });
            Ok(CommandEffect::Changed(moved))
        }
        Command::Untag(target) => {
            let selection = target.resolve(registry);
            let moved = registry.untag(&selection)?;
            output.emit_event(CommandEvent::Untagged {
                plate: moved.plate.clone(),
            });
            Ok(CommandEffect::Changed(moved))
        }
        Command::Delete(target) => {
            let selection = target.resolve(registry);
            let plate = registry.delete(&selection)?;
            output.emit_event(CommandEvent::Deleted {
                plate,
                partition: selection.partition,
            });
            Ok(CommandEffect::Cleared)
        }
        Command::Search { term, strategy } => {
            let strategy = strategy.unwrap_or(config.search_strategy);
            let hit = registry.search(term, strategy)?;
            let plate = registry.partition(hit.partition)[hit.index].clone();
            output.emit_event(CommandEvent::Found {
                plate: plate.clone(),
                partition: hit.partition,
                index: hit.index,
                strategy,
            });
            Ok(CommandEffect::Selected(Selection::new(hit.partition, plate)))
        }
        Command::ResetAll => {
            registry.check_reset_all()?;
            if !confirmed(config, output, "Clear all plates from both lists?") {
                return Ok(aborted(command, output));
            }
            let removed = registry.reset_all()?;
            output.emit_event(CommandEvent::AllReset { removed });
            Ok(CommandEffect::Reset)
        }
        Command::ResetTagged => {
            registry.check_reset_tagged()?;
            if !confirmed(config, output, "Move all tagged plates back to untagged?") {
                return Ok(aborted(command, output));
            }
            let moved = registry.reset_tagged()?;
            output.emit_event(CommandEvent::TaggedReset { moved });
            Ok(CommandEffect::Reset)
        }
        Command::List => {
            output.emit_snapshot(&registry.snapshot());
            Ok(CommandEffect::None)
        }
        Command::Import { path } => {
            let summary = store::import_file(registry, path)?;
            report_import(path, summary, output);
            Ok(CommandEffect::Cleared)
        }
        Command::Export { path } => {
            let path = match path {
                Some(path) => {
                    store::save_file(registry, path)?;
                    path.clone()
                }
                None => store::save_next_day_file(registry, &config.save_dir)?,
            };
            output.emit_event(CommandEvent::Exported {
                path,
                count: registry.len(),
            });
            Ok(CommandEffect::None)
        }
    }
}

fn confirmed(config: &ResolvedConfig, output: &dyn OutputSink, prompt: &str) -> bool {
    !config.confirm_resets || output.confirm(prompt)
}

fn aborted(command: &Command, output: &dyn OutputSink) -> CommandEffect {
    output.emit_event(CommandEvent::Aborted {
        command: command.as_ref().to_string(),
    });
    CommandEffect::None
}

fn report_import(path: &Path, summary: ImportSummary, output: &dyn OutputSink) {
    let path = path.to_path_buf();
    if summary.carried_no_plates() {
        output.emit_event(CommandEvent::ImportedNoPlates { path: path.clone() });
    } else {
        output.emit_event(CommandEvent::Imported {
            path: path.clone(),
            untagged: summary.untagged_imported,
            tagged: summary.tagged_imported,
            entries_read: summary.entries_read,
        });
    }
    for warning in summary.warnings {
        output.emit_event(match warning {
            DecodeWarning::TaggedSectionMissing => {
                CommandEvent::TaggedSectionMissing { path: path.clone() }
            }
            DecodeWarning::InvalidEntriesSkipped(entries) => CommandEvent::EntriesSkipped {
                path: path.clone(),
                entries,
            },
        });
    }
}
