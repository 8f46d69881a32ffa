//! plates-core: licence-plate registry engine.
//!
//! Keeps plates in two disjoint, always-sorted partitions (untagged and
//! tagged), validates and deduplicates every write, searches with either a
//! binary or a sequential strategy, and reads/writes a small line-oriented
//! text format that tolerates partial corruption.
//!
//! ```
//! use plates_core::{Registry, SearchStrategy};
//!
//! let mut registry = Registry::new();
//! let selection = registry.insert("1ABC-123").unwrap();
//! registry.tag(&selection).unwrap();
//!
//! let hit = registry.search("1ABC-123", SearchStrategy::Binary).unwrap();
//! assert_eq!(hit.partition, plates_core::Partition::Tagged);
//!
//! let text = registry.save_to_text();
//! assert_eq!(text, "Untagged:\nTagged:\n1ABC-123\n");
//! ```
//!
//! Front ends drive the engine through [`Command`] and [`execute_command`],
//! rendering through their own [`OutputSink`].

pub mod codec;
pub mod config;
pub mod error;
pub mod execution;
pub mod input;
pub mod naming;
pub mod output;
pub mod plate;
pub mod registry;
pub mod safe_io;
pub mod search;
pub mod sort;
pub mod state;
pub mod store;

pub use codec::{DecodeWarning, RejectReason, RejectedEntry};
pub use config::{Config, ConfigOverrides, ResolvedConfig};
pub use error::{Error, ErrorKind, Result};
pub use execution::{CommandEffect, execute_command};
pub use input::{Command, PlateRef};
pub use output::{CommandEvent, OutputSink};
pub use registry::{ImportSummary, Partition, Registry, SearchHit, Selection, Snapshot};
pub use search::SearchStrategy;
pub use state::AppState;
