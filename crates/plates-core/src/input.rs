//! Unified input types for CLI and JSON input modes.
//!
//! A [`Command`] names one registry operation, independent of whether it came
//! from command-line arguments, a shell line, or a JSON request.

use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::AsRefStr;

use crate::registry::{Partition, Registry, Selection};
use crate::search::SearchStrategy;

/// Names a plate to act on.
///
/// Without `partition`, the plate is looked up in both partitions at
/// execution time. With it, the reference is taken as given and reported as
/// `no_selection` if the plate is not in that partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PlateRef {
    pub plate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition: Option<Partition>,
}

impl PlateRef {
    pub fn new(plate: impl Into<String>) -> Self {
        Self {
            plate: plate.into(),
            partition: None,
        }
    }

    /// Turns this reference into a [`Selection`] against `registry`.
    ///
    /// An unknown plate yields a selection that is not current, so the
    /// operation it is passed to reports `NoSelection`.
    pub fn resolve(&self, registry: &Registry) -> Selection {
        match self.partition {
            Some(partition) => Selection::new(partition, &self.plate),
            None => registry
                .select(&self.plate)
                .unwrap_or_else(|| Selection::new(Partition::Untagged, &self.plate)),
        }
    }
}

impl From<Selection> for PlateRef {
    fn from(selection: Selection) -> Self {
        Self {
            plate: selection.plate,
            partition: Some(selection.partition),
        }
    }
}

/// What operation to perform (mutually exclusive commands)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Command {
    /// Add a plate to the untagged list
    Insert { plate: String },
    /// Replace a plate's value, keeping its partition
    Edit { target: PlateRef, new_value: String },
    /// Move an untagged plate to the tagged list
    Tag(PlateRef),
    /// Move a tagged plate back to the untagged list
    Untag(PlateRef),
    /// Remove a plate
    Delete(PlateRef),
    /// Look a plate up, untagged first
    Search {
        term: String,
        /// Overrides the configured strategy for this search
        #[serde(default, skip_serializing_if = "Option::is_none")]
        strategy: Option<SearchStrategy>,
    },
    /// Clear both lists (asks for confirmation)
    ResetAll,
    /// Move every tagged plate back to untagged (asks for confirmation)
    ResetTagged,
    /// Show both lists
    List,
    /// Merge a plates file into the registry
    Import { path: PathBuf },
    /// Save the registry to a file, or to the next free day file
    Export {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<PathBuf>,
    },
}
