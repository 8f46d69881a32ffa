//! Lookup strategies over a partition.
//!
//! Two interchangeable strategies, picked by the caller:
//! - [`SearchStrategy::Binary`]: narrowing inclusive bounds over an
//!   ordinal-sorted slice. Garbage in, garbage out if the slice is unsorted.
//! - [`SearchStrategy::Sequential`]: exact-match linear scan, no precondition.
//!
//! Both return the index of the match, or `None`.

use std::cmp::Ordering;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

use crate::sort::ordinal_cmp;

/// Which lookup algorithm to use. Binary by default.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SearchStrategy {
    #[default]
    Binary,
    Sequential,
}

impl SearchStrategy {
    /// Runs this strategy over `plates`.
    pub fn find<S: AsRef<str>>(self, plates: &[S], term: &str) -> Option<usize> {
        match self {
            SearchStrategy::Binary => binary_search(plates, term),
            SearchStrategy::Sequential => sequential_search(plates, term),
        }
    }
}

impl std::fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Classic binary search with inclusive `low`/`high` bounds.
///
/// `plates` must be ascending by [`ordinal_cmp`].
pub fn binary_search<S: AsRef<str>>(plates: &[S], term: &str) -> Option<usize> {
    if plates.is_empty() {
        return None;
    }
    let mut low = 0usize;
    let mut high = plates.len() - 1;
    while low <= high {
        let mid = low + (high - low) / 2;
        match ordinal_cmp(plates[mid].as_ref(), term) {
            Ordering::Equal => return Some(mid),
            // term is greater: discard the lower half
            Ordering::Less => low = mid + 1,
            Ordering::Greater => {
                if mid == 0 {
                    return None;
                }
                high = mid - 1;
            }
        }
    }
    None
}

/// Exact-match linear scan in the slice's current order.
pub fn sequential_search<S: AsRef<str>>(plates: &[S], term: &str) -> Option<usize> {
    plates.iter().position(|p| p.as_ref() == term)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::sort_plates;
    use proptest::prelude::*;

    const PLATES: [&str; 5] = ["1AAA-001", "1BBB-002", "1CCC-003", "1DDD-004", "1EEE-005"];

    #[test]
    fn binary_finds_every_element() {
        for (i, p) in PLATES.iter().enumerate() {
            assert_eq!(binary_search(&PLATES, p), Some(i));
        }
    }

    #[test]
    fn binary_misses_below_between_and_above() {
        assert_eq!(binary_search(&PLATES, "0"), None);
        assert_eq!(binary_search(&PLATES, "1BBB-0025"), None);
        assert_eq!(binary_search(&PLATES, "1ZZZ-999"), None);
    }

    #[test]
    fn empty_input_is_not_found() {
        let empty: [&str; 0] = [];
        assert_eq!(binary_search(&empty, "1ABC-123"), None);
        assert_eq!(sequential_search(&empty, "1ABC-123"), None);
    }

    #[test]
    fn single_element() {
        assert_eq!(binary_search(&["1ABC-123"], "1ABC-123"), Some(0));
        assert_eq!(binary_search(&["1ABC-123"], "1AAA-000"), None);
        assert_eq!(binary_search(&["1ABC-123"], "1ZZZ-000"), None);
    }

    #[test]
    fn sequential_works_unsorted() {
        let v = ["1ZZZ-000", "1AAA-000", "1MMM-000"];
        assert_eq!(sequential_search(&v, "1AAA-000"), Some(1));
        assert_eq!(sequential_search(&v, "1aaa-000"), None);
    }

    #[test]
    fn strategy_parses_from_snake_case() {
        assert_eq!("binary".parse::<SearchStrategy>(), Ok(SearchStrategy::Binary));
        assert_eq!(
            "sequential".parse::<SearchStrategy>(),
            Ok(SearchStrategy::Sequential)
        );
        assert!("linear".parse::<SearchStrategy>().is_err());
        assert_eq!(SearchStrategy::default(), SearchStrategy::Binary);
    }

    proptest! {
        #[test]
        fn prop_strategies_agree_on_sorted_unique_input(
            set in prop::collection::btree_set("1[A-C]{3}-[0-2]{3}", 0..30),
            term in "1[A-C]{3}-[0-2]{3}",
        ) {
            let mut plates: Vec<String> = set.into_iter().collect();
            sort_plates(&mut plates);
            prop_assert_eq!(
                SearchStrategy::Binary.find(&plates, &term),
                SearchStrategy::Sequential.find(&plates, &term)
            );
        }
    }
}
