//! Maps a freshly edited list of labels onto existing segments.
//!
//! Exact label matches keep their segment (and its flags) wherever they moved
//! to. Unmatched positions then take over leftover segments in order as
//! renames, and only when none are left is a new segment created.

use crate::ids::SegmentId;
use crate::wheel_state::Segment;

/// Reconciles `existing` against `desired` labels.
///
/// `fresh_id` is called once per segment that has to be created. The result
/// always has the same length as `desired`.
pub fn reconcile<F>(existing: &[Segment], desired: &[String], mut fresh_id: F) -> Vec<Segment>
where
    F: FnMut() -> SegmentId,
{
    let mut pool: Vec<Option<&Segment>> = existing.iter().map(Some).collect();
    let mut results: Vec<Option<Segment>> = vec![None; desired.len()];
    let mut missing = Vec::new();

    for (i, label) in desired.iter().enumerate() {
        let found = pool
            .iter_mut()
            .find(|slot| matches!(slot, Some(segment) if segment.label == *label));
        match found.and_then(Option::take) {
            Some(segment) => results[i] = Some(segment.clone()),
            None => missing.push(i),
        }
    }

    let mut leftovers = pool.into_iter().flatten();
    for i in missing {
        let label = desired[i].clone();
        results[i] = Some(match leftovers.next() {
            Some(segment) => Segment {
                label,
                ..segment.clone()
            },
            None => Segment::new(fresh_id(), label),
        });
    }

    results.into_iter().flatten().collect()
}
