//! Plate validation.
//!
//! A plate is a plain string. The only structure it carries is the fixed
//! grammar `1[A-Z]{3}-[0-9]{3}` (for example `1ABC-123`): the digit `1`, three
//! uppercase ASCII letters, a hyphen, three ASCII digits. Matching is exact,
//! case-sensitive and anchored at both ends; nothing is trimmed or normalised.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::PlateError;

/// Anchored plate grammar. `\A`/`\z` rather than `^`/`$` so a trailing
/// newline can never sneak through.
static PLATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A1[A-Z]{3}-[0-9]{3}\z").expect("plate pattern compiles"));

/// Returns true if `candidate` is empty or whitespace only.
pub fn is_blank(candidate: &str) -> bool {
    candidate.trim().is_empty()
}

/// Returns true if `candidate` matches the plate grammar exactly.
pub fn matches_format(candidate: &str) -> bool {
    PLATE_PATTERN.is_match(candidate)
}

/// Validator contract: non-blank and well-formed.
pub fn is_valid(candidate: &str) -> bool {
    check(candidate).is_ok()
}

/// Like [`is_valid`], but says which rule failed.
///
/// The blank check runs first, so `"   "` reports `EmptyInput` rather than
/// `InvalidFormat`.
pub fn check(candidate: &str) -> Result<(), PlateError> {
    if is_blank(candidate) {
        return Err(PlateError::EmptyInput);
    }
    if !matches_format(candidate) {
        return Err(PlateError::InvalidFormat(candidate.to_string()));
    }
    Ok(())
}
