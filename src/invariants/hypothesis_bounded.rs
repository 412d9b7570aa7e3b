//! The hypothesis set never outgrows the atom count.

use super::Invariant;
use crate::session::Session;

/// At most `atom_count` cells are ever marked; a mark that would exceed
/// the limit is rejected before mutation.
#[derive(Debug, Clone, Copy)]
pub struct HypothesisBounded;

impl Invariant<Session> for HypothesisBounded {
    fn holds(session: &Session) -> bool {
        session.hypotheses().len() <= session.config().atom_count()
    }

    fn description() -> &'static str {
        "hypothesis marks never exceed the configured atom count"
    }
}
