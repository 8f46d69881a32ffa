//! The plate registry: two disjoint, always-sorted partitions.
//!
//! # Invariants
//!
//! After every public method returns, whether it succeeded or failed:
//! - each partition is ascending by [`ordinal_cmp`](crate::sort::ordinal_cmp)
//! - a plate appears at most once across both partitions
//! - every stored plate passes [`plate::is_valid`]
//!
//! Failed operations never mutate anything.
//!
//! # Selections
//!
//! The registry does not track what the caller has selected. Operations that
//! act on "the selected plate" take a [`Selection`] argument and check it is
//! still current (the plate is still in the partition it names). A stale
//! selection is reported as `NoSelection`, exactly like an empty one.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

use crate::codec::{self, DecodeWarning};
use crate::error::{
    EditError, ImportError, InsertError, ResetError, SearchError, SelectionError,
};
use crate::plate;
use crate::search::SearchStrategy;
use crate::sort::{self, insertion_point};

/// One of the two partitions.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Partition {
    Untagged,
    Tagged,
}

impl Partition {
    /// The partition a tag/untag would move a plate into.
    pub fn other(self) -> Partition {
        match self {
            Partition::Untagged => Partition::Tagged,
            Partition::Tagged => Partition::Untagged,
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Caller-held reference to a plate and the partition it was seen in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Selection {
    pub partition: Partition,
    pub plate: String,
}

impl Selection {
    pub fn new(partition: Partition, plate: impl Into<String>) -> Self {
        Self {
            partition,
            plate: plate.into(),
        }
    }
}

/// Where a search found its term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub partition: Partition,
    pub index: usize,
}

/// Read-only copy of both partitions, for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub untagged: Vec<String>,
    pub tagged: Vec<String>,
}

/// Outcome of a successful [`Registry::load_from_text`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Plates added to `untagged`.
    pub untagged_imported: usize,
    /// Plates added to `tagged`.
    pub tagged_imported: usize,
    /// Plate lines found in the file, before filtering.
    pub entries_read: usize,
    /// Non-fatal problems. Empty means the file imported cleanly.
    pub warnings: Vec<DecodeWarning>,
}

impl ImportSummary {
    pub fn imported(&self) -> usize {
        self.untagged_imported + self.tagged_imported
    }

    /// The partial-failure flag.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Well-formed file that listed no plates in either section.
    pub fn carried_no_plates(&self) -> bool {
        self.entries_read == 0
    }
}

/// Two partitions of unique, ordinal-sorted plates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    untagged: Vec<String>,
    tagged: Vec<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn partition(&self, partition: Partition) -> &[String] {
        match partition {
            Partition::Untagged => &self.untagged,
            Partition::Tagged => &self.tagged,
        }
    }

    fn partition_mut(&mut self, partition: Partition) -> &mut Vec<String> {
        match partition {
            Partition::Untagged => &mut self.untagged,
            Partition::Tagged => &mut self.tagged,
        }
    }

    pub fn untagged(&self) -> &[String] {
        &self.untagged
    }

    pub fn tagged(&self) -> &[String] {
        &self.tagged
    }

    /// Total plates across both partitions.
    pub fn len(&self) -> usize {
        self.untagged.len() + self.tagged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.untagged.is_empty() && self.tagged.is_empty()
    }

    /// Finds `plate` in either partition. Exact match.
    pub fn locate(&self, plate: &str) -> Option<(Partition, usize)> {
        [Partition::Untagged, Partition::Tagged]
            .into_iter()
            .find_map(|p| {
                SearchStrategy::Binary
                    .find(self.partition(p), plate)
                    .map(|i| (p, i))
            })
    }

    /// DuplicateChecker: false if `candidate` is already in either partition.
    pub fn is_unique(&self, candidate: &str) -> bool {
        self.locate(candidate).is_none()
    }

    /// Resolves a plate to a selection, the way clicking its row would.
    pub fn select(&self, plate: &str) -> Option<Selection> {
        self.locate(plate).map(|(p, _)| Selection::new(p, plate))
    }

    /// True if `selection` still points at a plate in the partition it names.
    pub fn is_current(&self, selection: &Selection) -> bool {
        self.index_of(selection).is_some()
    }

    fn index_of(&self, selection: &Selection) -> Option<usize> {
        if plate::is_blank(&selection.plate) {
            return None;
        }
        SearchStrategy::Binary.find(self.partition(selection.partition), &selection.plate)
    }

    fn insert_sorted(&mut self, partition: Partition, plate: String) {
        let list = self.partition_mut(partition);
        let at = insertion_point(list.as_slice(), &plate);
        list.insert(at, plate);
    }

    /// Validates and appends `candidate` to `untagged`.
    ///
    /// Returns the selection of the new plate.
    pub fn insert(&mut self, candidate: &str) -> Result<Selection, InsertError> {
        plate::check(candidate)?;
        if !self.is_unique(candidate) {
            return Err(InsertError::DuplicateFound(candidate.to_string()));
        }
        self.insert_sorted(Partition::Untagged, candidate.to_string());
        log::debug!("inserted {candidate}");
        Ok(Selection::new(Partition::Untagged, candidate))
    }

    /// Moves an untagged plate into `tagged`.
    pub fn tag(&mut self, selection: &Selection) -> Result<Selection, SelectionError> {
        self.move_selected(selection, Partition::Untagged)
    }

    /// Moves a tagged plate back into `untagged`.
    pub fn untag(&mut self, selection: &Selection) -> Result<Selection, SelectionError> {
        self.move_selected(selection, Partition::Tagged)
    }

    fn move_selected(
        &mut self,
        selection: &Selection,
        from: Partition,
    ) -> Result<Selection, SelectionError> {
        if selection.partition != from {
            return Err(SelectionError::NoSelection);
        }
        let index = self.index_of(selection).ok_or(SelectionError::NoSelection)?;
        let plate = self.partition_mut(from).remove(index);
        let to = from.other();
        log::debug!("moved {plate} from {from} to {to}");
        self.insert_sorted(to, plate.clone());
        Ok(Selection::new(to, plate))
    }

    /// Removes the selected plate. Returns the removed value.
    pub fn delete(&mut self, selection: &Selection) -> Result<String, SelectionError> {
        let index = self.index_of(selection).ok_or(SelectionError::NoSelection)?;
        let plate = self.partition_mut(selection.partition).remove(index);
        log::debug!("deleted {plate} from {}", selection.partition);
        Ok(plate)
    }

    /// Replaces the selected plate with `new_value`, in the same partition.
    ///
    /// Resubmitting the selected plate's own value is accepted as a no-op.
    /// Returns the selection of the edited plate.
    pub fn edit(&mut self, selection: &Selection, new_value: &str) -> Result<Selection, EditError> {
        let index = self.index_of(selection).ok_or(EditError::NoSelection)?;
        plate::check(new_value)?;
        if new_value != selection.plate && !self.is_unique(new_value) {
            return Err(EditError::DuplicateFound(new_value.to_string()));
        }
        self.partition_mut(selection.partition).remove(index);
        self.insert_sorted(selection.partition, new_value.to_string());
        log::debug!(
            "edited {} -> {new_value} in {}",
            selection.plate,
            selection.partition
        );
        Ok(Selection::new(selection.partition, new_value))
    }

    /// Looks for `term` in `untagged`, then in `tagged`.
    pub fn search(&self, term: &str, strategy: SearchStrategy) -> Result<SearchHit, SearchError> {
        if plate::is_blank(term) {
            return Err(SearchError::EmptyInput);
        }
        if self.is_empty() {
            return Err(SearchError::BothPartitionsEmpty);
        }
        debug_assert!(sort::is_sorted(&self.untagged) && sort::is_sorted(&self.tagged));
        [Partition::Untagged, Partition::Tagged]
            .into_iter()
            .find_map(|partition| {
                strategy
                    .find(self.partition(partition), term)
                    .map(|index| SearchHit { partition, index })
            })
            .ok_or_else(|| SearchError::NotFound(term.to_string()))
    }

    /// Emptiness check for [`reset_all`](Self::reset_all), so callers can
    /// bail out before asking for confirmation.
    pub fn check_reset_all(&self) -> Result<(), ResetError> {
        if self.is_empty() {
            Err(ResetError::NothingToReset)
        } else {
            Ok(())
        }
    }

    /// Emptiness check for [`reset_tagged`](Self::reset_tagged).
    pub fn check_reset_tagged(&self) -> Result<(), ResetError> {
        if self.tagged.is_empty() {
            Err(ResetError::NothingToReset)
        } else {
            Ok(())
        }
    }

    /// Clears both partitions. Returns how many plates were removed.
    pub fn reset_all(&mut self) -> Result<usize, ResetError> {
        self.check_reset_all()?;
        let removed = self.len();
        self.untagged.clear();
        self.tagged.clear();
        log::debug!("reset all ({removed} removed)");
        Ok(removed)
    }

    /// Moves every tagged plate back to `untagged`. Returns how many moved.
    pub fn reset_tagged(&mut self) -> Result<usize, ResetError> {
        self.check_reset_tagged()?;
        let moved = self.tagged.len();
        self.untagged.append(&mut self.tagged);
        sort::sort_plates(&mut self.untagged);
        log::debug!("reset tagged ({moved} moved)");
        Ok(moved)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            untagged: self.untagged.clone(),
            tagged: self.tagged.clone(),
        }
    }

    /// Imports a file's contents into this registry.
    ///
    /// Plates are added to the existing partitions; anything invalid or
    /// already present (here or earlier in the same file) is skipped and
    /// reported in the summary's warnings.
    pub fn load_from_text(&mut self, text: &str) -> Result<ImportSummary, ImportError> {
        let decoded = codec::decode_against(text, self)?;
        let summary = ImportSummary {
            untagged_imported: decoded.untagged.len(),
            tagged_imported: decoded.tagged.len(),
            entries_read: decoded.entries_read,
            warnings: decoded.warnings,
        };
        self.untagged.extend(decoded.untagged);
        self.tagged.extend(decoded.tagged);
        sort::sort_plates(&mut self.untagged);
        sort::sort_plates(&mut self.tagged);
        log::debug!(
            "imported {} untagged, {} tagged",
            summary.untagged_imported,
            summary.tagged_imported
        );
        Ok(summary)
    }

    pub fn save_to_text(&self) -> String {
        codec::encode(self)
    }
}
