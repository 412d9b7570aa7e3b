//! Ray history is append-only with dense sequence ids.

use super::Invariant;
use crate::session::Session;

/// Ray ids are exactly 1..=n in firing order: history is never reordered,
/// truncated, or renumbered.
#[derive(Debug, Clone, Copy)]
pub struct SequentialRayIds;

impl Invariant<Session> for SequentialRayIds {
    fn holds(session: &Session) -> bool {
        session
            .rays()
            .iter()
            .enumerate()
            .all(|(index, ray)| ray.id() as usize == index + 1)
    }

    fn description() -> &'static str {
        "ray ids run 1..=n in firing order"
    }
}
