//! Plain-text file format.
//!
//! ```text
//! Untagged:
//! 1ABC-123
//! 1XYZ-999
//! Tagged:
//! 1DEF-456
//! ```
//!
//! Decoding is tolerant, in three stages:
//!
//! 1. **File**: fewer than two non-blank lines, or a first line that is not
//!    exactly `Untagged:`, rejects the whole file.
//! 2. **Section**: plate lines follow `Untagged:` until `Tagged:`, a blank
//!    line, or the end of input. A blank line (or the end of input) before
//!    `Tagged:` means the tagged section is missing; the untagged plates are
//!    still returned, with a [`DecodeWarning::TaggedSectionMissing`]. After
//!    `Tagged:`, plate lines run until a blank line or the end of input.
//! 3. **Entry**: every collected line is re-validated and checked for
//!    duplicates. Rejects are dropped and listed in
//!    [`DecodeWarning::InvalidEntriesSkipped`].
//!
//! Anything after the terminating blank line is ignored.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::error::{ErrorKind, ImportError, MalformedReason};
use crate::plate;
use crate::registry::Registry;

pub const UNTAGGED_HEADER: &str = "Untagged:";
pub const TAGGED_HEADER: &str = "Tagged:";

/// Why a plate line was dropped during decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    InvalidFormat,
    DuplicateFound,
}

impl RejectReason {
    pub fn kind(self) -> ErrorKind {
        match self {
            RejectReason::InvalidFormat => ErrorKind::InvalidFormat,
            RejectReason::DuplicateFound => ErrorKind::DuplicateFound,
        }
    }
}

/// A plate line that did not make it into the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedEntry {
    /// 1-based line number in the decoded text.
    pub line: usize,
    pub value: String,
    pub reason: RejectReason,
}

/// Non-fatal decode problems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeWarning {
    TaggedSectionMissing,
    InvalidEntriesSkipped(Vec<RejectedEntry>),
}

impl DecodeWarning {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeWarning::TaggedSectionMissing => ErrorKind::TaggedSectionMissing,
            DecodeWarning::InvalidEntriesSkipped(_) => ErrorKind::InvalidEntriesSkipped,
        }
    }
}

impl fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeWarning::TaggedSectionMissing => {
                f.write_str("tagged list failed to load; data may be corrupted")
            }
            DecodeWarning::InvalidEntriesSkipped(rejected) => {
                write!(f, "{} invalid plate(s) skipped", rejected.len())
            }
        }
    }
}

/// Plates recovered from a file, ready to be merged into a registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoded {
    pub untagged: Vec<String>,
    pub tagged: Vec<String>,
    /// Plate lines collected from both sections before filtering.
    pub entries_read: usize,
    pub warnings: Vec<DecodeWarning>,
}

/// Serializes both partitions, each line newline-terminated.
pub fn encode(registry: &Registry) -> String {
    let mut out = String::with_capacity((registry.len() + 2) * 10);
    out.push_str(UNTAGGED_HEADER);
    out.push('\n');
    for plate in registry.untagged() {
        out.push_str(plate);
        out.push('\n');
    }
    out.push_str(TAGGED_HEADER);
    out.push('\n');
    for plate in registry.tagged() {
        out.push_str(plate);
        out.push('\n');
    }
    out
}

/// Decodes `text` on its own. Duplicates are only checked within the file.
pub fn decode(text: &str) -> Result<Decoded, ImportError> {
    decode_against(text, &Registry::new())
}

/// Decodes `text` for merging into `existing`: plates already in `existing`
/// are rejected as duplicates.
pub fn decode_against(text: &str, existing: &Registry) -> Result<Decoded, ImportError> {
    let lines: Vec<(usize, &str)> = text.lines().enumerate().map(|(i, l)| (i + 1, l)).collect();

    if lines.iter().filter(|(_, l)| !plate::is_blank(l)).count() < 2 {
        return Err(ImportError::MalformedFile(MalformedReason::TooFewLines));
    }
    if lines[0].1 != UNTAGGED_HEADER {
        return Err(ImportError::MalformedFile(
            MalformedReason::MissingUntaggedHeader,
        ));
    }

    let mut rest = lines.into_iter().skip(1);
    let mut untagged_raw = Vec::new();
    let mut tagged_raw = Vec::new();
    let mut tagged_found = false;

    for (no, line) in rest.by_ref() {
        if plate::is_blank(line) {
            break;
        }
        if line == TAGGED_HEADER {
            tagged_found = true;
            break;
        }
        untagged_raw.push((no, line));
    }
    if tagged_found {
        for (no, line) in rest.by_ref() {
            if plate::is_blank(line) {
                break;
            }
            tagged_raw.push((no, line));
        }
    }
    if rest.next().is_some() {
        log::debug!("ignoring content after section terminator");
    }

    let mut decoded = Decoded {
        entries_read: untagged_raw.len() + tagged_raw.len(),
        ..Decoded::default()
    };
    if !tagged_found {
        log::warn!("tagged section missing");
        decoded.warnings.push(DecodeWarning::TaggedSectionMissing);
    }

    let mut filter = EntryFilter {
        existing,
        seen: HashSet::new(),
        rejected: Vec::new(),
    };
    decoded.untagged = filter.accept_all(untagged_raw);
    decoded.tagged = filter.accept_all(tagged_raw);

    if !filter.rejected.is_empty() {
        log::warn!("{} invalid plate(s) skipped", filter.rejected.len());
        decoded
            .warnings
            .push(DecodeWarning::InvalidEntriesSkipped(filter.rejected));
    }
    Ok(decoded)
}

/// Entry-level filtering shared by both sections.
struct EntryFilter<'a> {
    existing: &'a Registry,
    seen: HashSet<&'a str>,
    rejected: Vec<RejectedEntry>,
}

impl<'a> EntryFilter<'a> {
    fn accept_all(&mut self, raw: Vec<(usize, &'a str)>) -> Vec<String> {
        let mut accepted = Vec::with_capacity(raw.len());
        for (line, value) in raw {
            let reason = if !plate::is_valid(value) {
                Some(RejectReason::InvalidFormat)
            } else if !self.existing.is_unique(value) || self.seen.contains(value) {
                Some(RejectReason::DuplicateFound)
            } else {
                None
            };
            match reason {
                Some(reason) => self.rejected.push(RejectedEntry {
                    line,
                    value: value.to_string(),
                    reason,
                }),
                None => {
                    self.seen.insert(value);
                    accepted.push(value.to_string());
                }
            }
        }
        accepted
    }
}
