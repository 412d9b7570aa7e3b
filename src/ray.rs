//! Fired rays and their outcomes.

use crate::types::{Cell, EdgePoint};
use serde::{Deserialize, Serialize};

/// How a traced ray left (or failed to leave) the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RayOutcome {
    /// The ray crossed the boundary at a point distinct from its entry.
    Exited(EdgePoint),
    /// The ray emerged from its own entry point, either because it never
    /// entered the grid or because its path geometrically returned.
    Reflected,
    /// The ray ran into an atom and never emerged.
    Absorbed,
    /// The tracer hit its internal step bound. Never produced by a correct
    /// rule set; treated as a defect signal, not a game condition.
    TraceLimitExceeded,
}

/// An immutable record of one fired ray.
///
/// Created once at fire time and owned by the session history thereafter.
/// The path lists every interior cell the ray occupied, in order,
/// including the absorbing cell on absorption; a ray reflected at the
/// boundary has an empty path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ray {
    id: u32,
    entry: EdgePoint,
    outcome: RayOutcome,
    path: Vec<Cell>,
}

impl Ray {
    /// Assembles a ray record. Ids are assigned by the session, starting at 1.
    pub(crate) fn new(id: u32, entry: EdgePoint, outcome: RayOutcome, path: Vec<Cell>) -> Self {
        Self {
            id,
            entry,
            outcome,
            path,
        }
    }

    /// Sequence number within the session, starting at 1.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Where the ray was fired from.
    pub fn entry(&self) -> EdgePoint {
        self.entry
    }

    /// The ray's outcome.
    pub fn outcome(&self) -> RayOutcome {
        self.outcome
    }

    /// Interior cells the ray occupied, in traversal order.
    pub fn path(&self) -> &[Cell] {
        &self.path
    }

    /// The boundary point the ray emerged from, if it emerged at all.
    ///
    /// Reflections emerge from their own entry point; absorbed rays
    /// emerge nowhere.
    pub fn exit(&self) -> Option<EdgePoint> {
        match self.outcome {
            RayOutcome::Exited(edge) => Some(edge),
            RayOutcome::Reflected => Some(self.entry),
            RayOutcome::Absorbed | RayOutcome::TraceLimitExceeded => None,
        }
    }

    /// Whether the ray crossed the boundary at two different points.
    ///
    /// Detours charge both crossing points when scoring.
    pub fn is_detour(&self) -> bool {
        matches!(self.outcome, RayOutcome::Exited(_))
    }
}

impl std::fmt::Display for Ray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ray {} from {}: ", self.id, self.entry)?;
        match self.outcome {
            RayOutcome::Exited(edge) => write!(f, "exited at {edge}"),
            RayOutcome::Reflected => write!(f, "REFLECTED"),
            RayOutcome::Absorbed => write!(f, "ABSORBED"),
            RayOutcome::TraceLimitExceeded => write!(f, "trace limit exceeded"),
        }
    }
}
