//! Consumed edge points mirror the ray history exactly.

use super::Invariant;
use crate::session::Session;
use crate::types::EdgePoint;
use std::collections::BTreeSet;

/// The consumed set equals the union of every fired ray's entry and exit
/// points: nothing is consumed without a ray, and no ray crossing is
/// missing from the set.
#[derive(Debug, Clone, Copy)]
pub struct ConsumedEdgesConsistent;

impl Invariant<Session> for ConsumedEdgesConsistent {
    fn holds(session: &Session) -> bool {
        let mut expected: BTreeSet<EdgePoint> = BTreeSet::new();
        for ray in session.rays() {
            expected.insert(ray.entry());
            if let Some(exit) = ray.exit() {
                expected.insert(exit);
            }
        }
        &expected == session.consumed_edges()
    }

    fn description() -> &'static str {
        "consumed edge points equal the union of ray entry and exit points"
    }
}
