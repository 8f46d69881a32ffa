use std::path::PathBuf;

use serde::Serialize;

use crate::codec::RejectedEntry;
use crate::error::Error;
use crate::registry::{Partition, Snapshot};
use crate::search::SearchStrategy;

/// Typed outcomes emitted on the command path.
///
/// Core emits every variant unconditionally; clients decide how to format
/// them. Warning-class variants are the import's partial-failure details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommandEvent {
    Inserted {
        plate: String,
    },
    Tagged {
        plate: String,
    },
    Untagged {
        plate: String,
    },
    Deleted {
        plate: String,
        partition: Partition,
    },
    Edited {
        old: String,
        new: String,
        partition: Partition,
    },
    Found {
        plate: String,
        partition: Partition,
        index: usize,
        strategy: SearchStrategy,
    },
    AllReset {
        removed: usize,
    },
    TaggedReset {
        moved: usize,
    },
    Imported {
        path: PathBuf,
        untagged: usize,
        tagged: usize,
        entries_read: usize,
    },
    /// Well-formed file with no plate lines.
    ImportedNoPlates {
        path: PathBuf,
    },
    /// Warning: the file had no `Tagged:` section.
    TaggedSectionMissing {
        path: PathBuf,
    },
    /// Warning: some plate lines were dropped.
    EntriesSkipped {
        path: PathBuf,
        entries: Vec<RejectedEntry>,
    },
    Exported {
        path: PathBuf,
        count: usize,
    },
    /// The caller declined a confirmation.
    Aborted {
        command: String,
    },
}

impl CommandEvent {
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            CommandEvent::TaggedSectionMissing { .. } | CommandEvent::EntriesSkipped { .. }
        )
    }
}

/// Abstraction over how command results and diagnostics are presented.
///
/// plates-cli implements this with OutputHandler (text to stdout/stderr, interactive TTY).
/// plates-json implements this with JsonOutputSink (JSONL to stdout/stderr, auto-approve).
pub trait OutputSink {
    /// Emit a typed command-path event.
    fn emit_event(&self, event: CommandEvent);

    /// Emit both lists for display.
    fn emit_snapshot(&self, snapshot: &Snapshot);

    /// Prompt the user for confirmation. Returns true if confirmed.
    /// Programmatic sinks (e.g. plates-json) should auto-approve (return true).
    fn confirm(&self, prompt: &str) -> bool;

    /// Signal command completion. Called once, after all output has been emitted.
    ///
    /// Default: no-op. plates-cli reports errors through its own UX.
    fn emit_done(&self, result: &Result<(), Error>) {
        let _ = result;
    }
}

/// A capturing output sink for tests: collects events and snapshots for assertions.
#[cfg(test)]
pub(crate) struct CaptureSink {
    pub events: std::cell::RefCell<Vec<CommandEvent>>,
    pub snapshots: std::cell::RefCell<Vec<Snapshot>>,
    pub prompts: std::cell::RefCell<Vec<String>>,
    /// Return value for `confirm()`. Defaults to false.
    pub confirm_response: bool,
}

#[cfg(test)]
impl CaptureSink {
    pub fn new() -> Self {
        Self {
            events: std::cell::RefCell::new(vec![]),
            snapshots: std::cell::RefCell::new(vec![]),
            prompts: std::cell::RefCell::new(vec![]),
            confirm_response: false,
        }
    }

    pub fn confirming() -> Self {
        Self {
            confirm_response: true,
            ..Self::new()
        }
    }
}

#[cfg(test)]
impl OutputSink for CaptureSink {
    fn emit_event(&self, event: CommandEvent) {
        self.events.borrow_mut().push(event);
    }
    fn emit_snapshot(&self, snapshot: &Snapshot) {
        self.snapshots.borrow_mut().push(snapshot.clone());
    }
    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.confirm_response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::RejectReason;
    use crate::error::SaveError;

    struct RecordingSink {
        done_called: std::cell::Cell<bool>,
    }

    impl OutputSink for RecordingSink {
        fn emit_event(&self, _: CommandEvent) {}
        fn emit_snapshot(&self, _: &Snapshot) {}
        fn confirm(&self, _: &str) -> bool {
            true
        }
        fn emit_done(&self, _: &Result<(), Error>) {
            self.done_called.set(true);
        }
    }

    #[test]
    fn emit_done_default_is_noop() {
        let sink = CaptureSink::new();
        sink.emit_done(&Ok(()));
        sink.emit_done(&Err(SaveError::NothingToSave.into()));
        assert!(sink.events.borrow().is_empty());
    }

    #[test]
    fn emit_done_can_be_overridden() {
        let sink = RecordingSink {
            done_called: std::cell::Cell::new(false),
        };
        sink.emit_done(&Ok(()));
        assert!(sink.done_called.get());
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let json = serde_json::to_value(CommandEvent::Deleted {
            plate: "1ABC-123".into(),
            partition: Partition::Tagged,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "deleted", "plate": "1ABC-123", "partition": "tagged"})
        );

        let json = serde_json::to_value(CommandEvent::EntriesSkipped {
            path: PathBuf::from("in.txt"),
            entries: vec![RejectedEntry {
                line: 3,
                value: "bad".into(),
                reason: RejectReason::InvalidFormat,
            }],
        })
        .unwrap();
        assert_eq!(json["type"], "entries_skipped");
        assert_eq!(json["entries"][0]["reason"], "invalid_format");
        assert_eq!(json["entries"][0]["line"], 3);
    }

    #[test]
    fn only_import_problems_are_warnings() {
        assert!(
            CommandEvent::TaggedSectionMissing {
                path: PathBuf::new()
            }
            .is_warning()
        );
        assert!(!CommandEvent::AllReset { removed: 1 }.is_warning());
    }
}
