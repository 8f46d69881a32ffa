//! Error types for registry operations.
//!
//! Each collaborator operation has its own error enum so callers can match on
//! exactly the failures that operation can produce. All of them also map onto
//! the coarse [`ErrorKind`], which is what the JSON front end reports and what
//! callers that only care about the category should switch on.

use std::fmt;
use std::io;
use std::path::PathBuf;

use strum::{AsRefStr, IntoStaticStr};
use thiserror::Error;

/// Coarse error category shared by every error and warning in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    EmptyInput,
    InvalidFormat,
    DuplicateFound,
    NoSelection,
    NothingToReset,
    BothPartitionsEmpty,
    NotFound,
    MalformedFile,
    // warning-class, attached to a successful import
    TaggedSectionMissing,
    InvalidEntriesSkipped,
    NothingToSave,
    Io,
    Config,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Validator outcome for a single candidate string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlateError {
    #[error("no plate provided")]
    EmptyInput,
    #[error("invalid plate format: '{0}'")]
    InvalidFormat(String),
}

/// Failure of [`Registry::insert`](crate::Registry::insert).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InsertError {
    #[error("no plate provided")]
    EmptyInput,
    #[error("invalid plate format: '{0}'")]
    InvalidFormat(String),
    #[error("duplicate plate found: '{0}'")]
    DuplicateFound(String),
}

impl From<PlateError> for InsertError {
    fn from(e: PlateError) -> Self {
        match e {
            PlateError::EmptyInput => InsertError::EmptyInput,
            PlateError::InvalidFormat(s) => InsertError::InvalidFormat(s),
        }
    }
}

/// Failure of [`Registry::edit`](crate::Registry::edit).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("no plate selected")]
    NoSelection,
    #[error("no plate provided")]
    EmptyInput,
    #[error("invalid plate format: '{0}'")]
    InvalidFormat(String),
    #[error("duplicate plate found: '{0}'")]
    DuplicateFound(String),
}

impl From<PlateError> for EditError {
    fn from(e: PlateError) -> Self {
        match e {
            PlateError::EmptyInput => EditError::EmptyInput,
            PlateError::InvalidFormat(s) => EditError::InvalidFormat(s),
        }
    }
}

impl From<SelectionError> for EditError {
    fn from(e: SelectionError) -> Self {
        match e {
            SelectionError::NoSelection => EditError::NoSelection,
        }
    }
}

/// Failure of tag, untag and delete: the selection is empty or stale.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no plate selected")]
    NoSelection,
}

/// Failure of [`Registry::search`](crate::Registry::search).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("no search term provided")]
    EmptyInput,
    #[error("plate lists are empty")]
    BothPartitionsEmpty,
    #[error("no match found for '{0}'")]
    NotFound(String),
}

/// Failure of the reset operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResetError {
    #[error("nothing to reset")]
    NothingToReset,
}

/// Why a file was rejected outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    TooFewLines,
    MissingUntaggedHeader,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedReason::TooFewLines => f.write_str("fewer than two lines"),
            MalformedReason::MissingUntaggedHeader => {
                f.write_str("first line is not 'Untagged:'")
            }
        }
    }
}

/// Hard failure of an import. Nothing is imported when this is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("file is not in the correct format ({0})")]
    MalformedFile(MalformedReason),
}

/// Failure of an explicit save.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SaveError {
    #[error("no plates to save")]
    NothingToSave,
}

/// Crate-level error: any operation failure, plus I/O and configuration.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Insert(#[from] InsertError),
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error(transparent)]
    Reset(#[from] ResetError),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    Save(#[from] SaveError),
    #[error("failed to parse {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl PlateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlateError::EmptyInput => ErrorKind::EmptyInput,
            PlateError::InvalidFormat(_) => ErrorKind::InvalidFormat,
        }
    }
}

impl InsertError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InsertError::EmptyInput => ErrorKind::EmptyInput,
            InsertError::InvalidFormat(_) => ErrorKind::InvalidFormat,
            InsertError::DuplicateFound(_) => ErrorKind::DuplicateFound,
        }
    }
}

impl EditError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EditError::NoSelection => ErrorKind::NoSelection,
            EditError::EmptyInput => ErrorKind::EmptyInput,
            EditError::InvalidFormat(_) => ErrorKind::InvalidFormat,
            EditError::DuplicateFound(_) => ErrorKind::DuplicateFound,
        }
    }
}

impl SelectionError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::NoSelection
    }
}

impl SearchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchError::EmptyInput => ErrorKind::EmptyInput,
            SearchError::BothPartitionsEmpty => ErrorKind::BothPartitionsEmpty,
            SearchError::NotFound(_) => ErrorKind::NotFound,
        }
    }
}

impl ResetError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::NothingToReset
    }
}

impl ImportError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::MalformedFile
    }
}

impl SaveError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::NothingToSave
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Insert(e) => e.kind(),
            Error::Edit(e) => e.kind(),
            Error::Selection(e) => e.kind(),
            Error::Search(e) => e.kind(),
            Error::Reset(e) => e.kind(),
            Error::Import(e) => e.kind(),
            Error::Save(e) => e.kind(),
            Error::Config { .. } => ErrorKind::Config,
            Error::Io(_) => ErrorKind::Io,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_strings_are_snake_case() {
        assert_eq!(ErrorKind::EmptyInput.as_ref(), "empty_input");
        assert_eq!(ErrorKind::BothPartitionsEmpty.as_ref(), "both_partitions_empty");
        assert_eq!(
            ErrorKind::TaggedSectionMissing.to_string(),
            "tagged_section_missing"
        );
    }

    #[test]
    fn plate_error_converts_into_insert_and_edit() {
        let insert: InsertError = PlateError::EmptyInput.into();
        assert_eq!(insert, InsertError::EmptyInput);
        let edit: EditError = PlateError::InvalidFormat("x".into()).into();
        assert_eq!(edit, EditError::InvalidFormat("x".into()));
    }

    #[test]
    fn crate_error_preserves_kind() {
        let e: Error = SearchError::NotFound("1ABC-123".into()).into();
        assert_eq!(e.kind(), ErrorKind::NotFound);
        let e: Error = ImportError::MalformedFile(MalformedReason::TooFewLines).into();
        assert_eq!(e.kind(), ErrorKind::MalformedFile);
        assert!(e.to_string().contains("fewer than two lines"));
        let e: Error = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert_eq!(e.kind(), ErrorKind::Io);
    }
}
