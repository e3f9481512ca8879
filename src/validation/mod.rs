//! Screen-level validators: one module per form, each producing a map
//! from draft field to message key.
//!
//! These mirror what the app shows next to each input, so they run on
//! raw form text (masks included) and report at most one key per field.
//! They are deliberately shallow: dates get the range-only check here
//! and full calendar verification only at encode time, and nothing stops
//! an "invalid" status transition because there is no such thing.

use std::collections::BTreeMap;

use crate::i18n::MessageKey;

pub mod account;
pub mod batches;
pub mod cuts;
pub mod payments;
pub mod receive_pieces;
pub mod workshops;

/// Field name (the draft's field, snake case) to message key. A `BTreeMap`
/// keeps iteration deterministic for logs and assertions.
pub type FieldErrors = BTreeMap<&'static str, MessageKey>;

/// Character count after trimming, what the form length rules measure.
pub(crate) fn trimmed_len(raw: &str) -> usize {
    raw.trim().chars().count()
}

/// Digits in the text, ignoring mask punctuation.
pub(crate) fn digit_count(raw: &str) -> usize {
    raw.chars().filter(char::is_ascii_digit).count()
}
