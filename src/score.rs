//! Round scoring. Lower totals are better.

use crate::ray::Ray;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Penalty charged per atom the final guess failed to cover.
pub const MISS_PENALTY: u32 = 5;

/// Breakdown of a finished round's score.
///
/// Every ray charges 1 point for its entry point, plus 1 more only when
/// it produced an exit distinct from the entry (a detour charges both
/// crossing points). Reflections and absorptions charge the entry only.
/// Each uncovered atom adds [`MISS_PENALTY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    ray_points: u32,
    atoms_missed: u32,
    miss_penalty: u32,
    total: u32,
}

impl Score {
    /// Points charged for edge crossings.
    pub fn ray_points(&self) -> u32 {
        self.ray_points
    }

    /// Atoms the guess failed to cover.
    pub fn atoms_missed(&self) -> u32 {
        self.atoms_missed
    }

    /// Points charged for uncovered atoms.
    pub fn miss_penalty(&self) -> u32 {
        self.miss_penalty
    }

    /// Total score; lower is better, with no upper bound.
    pub fn total(&self) -> u32 {
        self.total
    }
}

/// Scores a round from its ray history and guess correctness.
///
/// Pure function: the session calls it once at round end, and tests may
/// call it directly.
#[instrument(skip(rays), fields(ray_count = rays.len()))]
pub fn score_round(rays: &[Ray], atoms_correct: usize, atom_count: usize) -> Score {
    let ray_points = rays
        .iter()
        .map(|ray| if ray.is_detour() { 2 } else { 1 })
        .sum();
    let atoms_missed = atom_count.saturating_sub(atoms_correct) as u32;
    let miss_penalty = atoms_missed * MISS_PENALTY;
    Score {
        ray_points,
        atoms_missed,
        miss_penalty,
        total: ray_points + miss_penalty,
    }
}
