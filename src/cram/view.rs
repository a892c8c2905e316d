//! The view projector.
//!
//! [`project`] derives the displayed sequence from the stored one: pinned
//! records first, alphabetical within each group, filtered by the search
//! term. It is a pure function—no store access, no hidden state—so a UI
//! simply re-projects from the latest records on every render.

use crate::model::Record;
use std::cmp::Ordering;

/// Returns the records to display for `term`, in display order.
///
/// Sort: pinned before unpinned, then ascending by the primary text field
/// (case-sensitive). The sort is stable, so equal keys keep their stored
/// order and identical inputs always produce identical output.
///
/// Filter: an empty term passes everything. Otherwise the lowercased term
/// must occur in the lowercased primary or secondary text, or inside any
/// tag (tags are stored lowercase already).
pub fn project<R: Record>(records: &[R], term: &str) -> Vec<R> {
    let mut out: Vec<R> = records.to_vec();
    out.sort_by(|a, b| match (a.pinned(), b.pinned()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.primary().cmp(b.primary()),
    });

    if term.is_empty() {
        return out;
    }

    let needle = term.to_lowercase();
    out.retain(|r| matches(r, &needle));
    out
}

fn matches<R: Record>(record: &R, needle: &str) -> bool {
    record.primary().to_lowercase().contains(needle)
        || record.secondary().to_lowercase().contains(needle)
        || record.tags().iter().any(|tag| tag.contains(needle))
}
