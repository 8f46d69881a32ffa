//! Output handling for the CLI.
//!
//! `OutputHandler` renders command events and list snapshots as text.
//! Outcomes go to stdout; warnings and prompts go to stderr.

use std::io::{self, IsTerminal, Write};

use plates_core::codec::RejectReason;
use plates_core::{CommandEvent, OutputSink, Snapshot};

/// CLI output handler: text to stdout, warnings to stderr.
pub struct OutputHandler;

/// Human-readable line(s) for an event.
pub fn format_event(event: &CommandEvent) -> String {
    match event {
        CommandEvent::Inserted { plate } => format!("Added {plate}"),
        CommandEvent::Tagged { plate } => format!("Tagged {plate}"),
        CommandEvent::Untagged { plate } => format!("Untagged {plate}"),
        CommandEvent::Deleted { plate, partition } => format!("Deleted {plate} from {partition}"),
        CommandEvent::Edited { old, new, partition } => {
            format!("Changed {old} to {new} ({partition})")
        }
        CommandEvent::Found {
            plate,
            partition,
            index,
            strategy,
        } => format!("Found {plate} in {partition} at index {index} ({strategy} search)"),
        CommandEvent::AllReset { removed } => format!("Cleared {removed} plate(s)"),
        CommandEvent::TaggedReset { moved } => {
            format!("Moved {moved} tagged plate(s) back to untagged")
        }
        CommandEvent::Imported {
            path,
            untagged,
            tagged,
            entries_read,
        } => format!(
            "Imported {} plate(s) from {} ({untagged} untagged, {tagged} tagged, {entries_read} read)",
            untagged + tagged,
            path.display()
        ),
        CommandEvent::ImportedNoPlates { path } => format!(
            "{} is in the correct format but contains no plates",
            path.display()
        ),
        CommandEvent::TaggedSectionMissing { path } => format!(
            "[WARN] {}: tagged list failed to load, data may be corrupted",
            path.display()
        ),
        CommandEvent::EntriesSkipped { path, entries } => {
            let mut text = format!(
                "[WARN] {}: {} invalid plate(s) skipped",
                path.display(),
                entries.len()
            );
            for entry in entries {
                let reason = match entry.reason {
                    RejectReason::InvalidFormat => "invalid format",
                    RejectReason::DuplicateFound => "duplicate",
                };
                text.push_str(&format!(
                    "\n  line {}: '{}' ({reason})",
                    entry.line, entry.value
                ));
            }
            text
        }
        CommandEvent::Exported { path, count } => {
            format!("Saved {count} plate(s) to {}", path.display())
        }
        CommandEvent::Aborted { command } => format!("Aborted {command}"),
    }
}

/// Both lists, one plate per indented line.
pub fn format_snapshot(snapshot: &Snapshot) -> String {
    let mut text = format!("Untagged ({}):", snapshot.untagged.len());
    for plate in &snapshot.untagged {
        text.push_str("\n  ");
        text.push_str(plate);
    }
    text.push_str(&format!("\nTagged ({}):", snapshot.tagged.len()));
    for plate in &snapshot.tagged {
        text.push_str("\n  ");
        text.push_str(plate);
    }
    text
}

impl OutputSink for OutputHandler {
    fn emit_event(&self, event: CommandEvent) {
        let text = format_event(&event);
        if event.is_warning() {
            eprintln!("{text}");
        } else {
            println!("{text}");
        }
    }

    fn emit_snapshot(&self, snapshot: &Snapshot) {
        println!("{}", format_snapshot(snapshot));
    }

    /// Prompt user for confirmation (y/N). Returns true if user confirms.
    /// If stdin is not a terminal (piped input), returns false.
    fn confirm(&self, prompt: &str) -> bool {
        let stdin = io::stdin();
        if !stdin.is_terminal() {
            return false;
        }

        eprint!("{} [y/N] ", prompt);
        io::stderr().flush().ok();

        let mut input = String::new();
        if stdin.read_line(&mut input).is_err() {
            return false;
        }

        matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
    }
}
