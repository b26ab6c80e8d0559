//! Newest-first ordering of notes.
//!
//! # Invariants
//! - Output is a permutation of the input.
//! - Sort is stable: notes with equal moments keep their input order.
//! - Notes without a canonical moment rank after every valid note.

use crate::model::note::Note;
use chrono::{DateTime, FixedOffset};
use std::borrow::Borrow;
use std::cmp::Ordering;

/// Orders notes by canonical moment, most recent first.
///
/// Accepts owned notes or references; the input is consumed, so a caller's
/// original sequence is never reordered behind its back.
pub fn order_notes<N, I>(notes: I) -> Vec<N>
where
    N: Borrow<Note>,
    I: IntoIterator<Item = N>,
{
    let mut ordered: Vec<N> = notes.into_iter().collect();
    // `sort_by` is stable.
    ordered.sort_by(|a, b| {
        compare_newest_first(a.borrow().canonical_moment(), b.borrow().canonical_moment())
    });
    ordered
}

/// Comparator behind [`order_notes`]: descending moments, `None` last.
pub fn compare_newest_first(
    a: Option<&DateTime<FixedOffset>>,
    b: Option<&DateTime<FixedOffset>>,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::compare_newest_first;
    use crate::model::timestamp::{canonical_moment, RawTimestamp};
    use std::cmp::Ordering;

    #[test]
    fn invalid_moments_rank_after_valid_ones() {
        let valid = canonical_moment(&RawTimestamp::new("01/01/1970", "00:00:00"));
        assert!(valid.is_some());
        assert_eq!(compare_newest_first(valid.as_ref(), None), Ordering::Less);
        assert_eq!(compare_newest_first(None, valid.as_ref()), Ordering::Greater);
        assert_eq!(compare_newest_first(None, None), Ordering::Equal);
    }
}
