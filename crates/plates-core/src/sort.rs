//! Ordinal ordering of plates.
//!
//! Every ordering decision in the crate (sorting a partition, finding an
//! insertion point, binary search) goes through [`ordinal_cmp`] so the sort
//! order and the search predicate can never drift apart.

use std::cmp::Ordering;

/// Byte-wise comparison. No locale, no case folding.
#[inline]
pub fn ordinal_cmp(a: &str, b: &str) -> Ordering {
    a.as_bytes().cmp(b.as_bytes())
}

/// Sorts `plates` ascending by [`ordinal_cmp`], in place.
pub fn sort_plates<S: AsRef<str>>(plates: &mut [S]) {
    plates.sort_unstable_by(|a, b| ordinal_cmp(a.as_ref(), b.as_ref()));
}

/// True if `plates` is ascending by [`ordinal_cmp`].
pub fn is_sorted<S: AsRef<str>>(plates: &[S]) -> bool {
    plates
        .windows(2)
        .all(|w| ordinal_cmp(w[0].as_ref(), w[1].as_ref()) != Ordering::Greater)
}

/// Index at which `plate` would have to be inserted to keep `plates` sorted.
///
/// `plates` must already be sorted.
pub(crate) fn insertion_point<S: AsRef<str>>(plates: &[S], plate: &str) -> usize {
    plates.partition_point(|p| ordinal_cmp(p.as_ref(), plate) == Ordering::Less)
}
