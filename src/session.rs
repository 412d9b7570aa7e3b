//! One round of Black Box: command legality, bookkeeping, and scoring.
//!
//! A session owns the atom set and all per-round mutable state. Commands
//! are applied sequentially by a single owner; independent sessions share
//! nothing and may be driven in parallel by the caller.

use crate::atoms::AtomSet;
use crate::error::GameError;
use crate::ray::{Ray, RayOutcome};
use crate::score::{Score, score_round};
use crate::tracer::trace;
use crate::types::{Cell, EdgePoint};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info, instrument, warn};

/// Per-round configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    atom_count: usize,
    max_rays: usize,
    hypothesis_mode: bool,
}

impl SessionConfig {
    /// Atoms hidden per round and required per guess.
    pub fn atom_count(&self) -> usize {
        self.atom_count
    }

    /// Ray budget; firing past it fails with a budget error.
    pub fn max_rays(&self) -> usize {
        self.max_rays
    }

    /// Whether the round ends via mark/check instead of a direct guess.
    pub fn hypothesis_mode(&self) -> bool {
        self.hypothesis_mode
    }

    /// Overrides the number of hidden atoms.
    pub fn with_atom_count(mut self, atom_count: usize) -> Self {
        self.atom_count = atom_count;
        self
    }

    /// Overrides the ray budget.
    pub fn with_max_rays(mut self, max_rays: usize) -> Self {
        self.max_rays = max_rays;
        self
    }

    /// Enables or disables hypothesis marking.
    pub fn with_hypothesis_mode(mut self, enabled: bool) -> Self {
        self.hypothesis_mode = enabled;
        self
    }
}

impl Default for SessionConfig {
    /// Standard round: 4 atoms, 20 rays, direct guessing.
    fn default() -> Self {
        Self {
            atom_count: 4,
            max_rays: 20,
            hypothesis_mode: false,
        }
    }
}

/// Lifecycle of a session. The only transition is `Active` to `Finished`,
/// via a completed guess or check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Commands are accepted.
    Active,
    /// The round ended; every mutating command now fails.
    Finished,
}

/// Correctness breakdown produced when a round ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    atoms_correct: usize,
    score: Score,
}

impl RoundResult {
    /// Guessed cells that held an atom.
    pub fn atoms_correct(&self) -> usize {
        self.atoms_correct
    }

    /// Final score breakdown.
    pub fn score(&self) -> Score {
        self.score
    }
}

/// A single round of play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    config: SessionConfig,
    atoms: AtomSet,
    rays: Vec<Ray>,
    consumed: BTreeSet<EdgePoint>,
    hypotheses: BTreeSet<Cell>,
    status: SessionStatus,
    result: Option<RoundResult>,
}

impl Session {
    /// Starts a round with a supplied atom set.
    ///
    /// # Errors
    ///
    /// Fails when the set size disagrees with the configured atom count.
    #[instrument(skip(atoms))]
    pub fn new(atoms: AtomSet, config: SessionConfig) -> Result<Self, GameError> {
        if atoms.len() != config.atom_count {
            warn!(
                expected = config.atom_count,
                actual = atoms.len(),
                "rejected atom set of the wrong size"
            );
            return Err(GameError::AtomCountMismatch {
                expected: config.atom_count,
                actual: atoms.len(),
            });
        }
        info!(atom_count = atoms.len(), "starting session");
        Ok(Self {
            config,
            atoms,
            rays: Vec::new(),
            consumed: BTreeSet::new(),
            hypotheses: BTreeSet::new(),
            status: SessionStatus::Active,
            result: None,
        })
    }

    /// Starts a round with a freshly drawn atom set.
    #[instrument(skip(rng))]
    pub fn with_random_atoms<R: Rng + ?Sized>(rng: &mut R, config: SessionConfig) -> Self {
        let atoms = AtomSet::draw(rng, config.atom_count);
        Self::new(atoms, config).expect("drawn atom set matches the configured count")
    }

    /// Fires a ray from the given edge point.
    ///
    /// On success the ray is traced, assigned the next sequence id,
    /// appended to history, and both its entry and (distinct) exit points
    /// are consumed. Failures leave the session untouched.
    #[instrument(skip(self))]
    pub fn fire(&mut self, edge: EdgePoint) -> Result<&Ray, GameError> {
        self.ensure_active()?;
        if self.consumed.contains(&edge) {
            warn!(%edge, "edge point already consumed");
            return Err(GameError::PositionUnavailable { edge });
        }
        if self.rays.len() >= self.config.max_rays {
            warn!(limit = self.config.max_rays, "ray budget exhausted");
            return Err(GameError::BudgetExceeded {
                limit: self.config.max_rays,
            });
        }

        let (entry, outcome, path) = trace(&self.atoms, edge).into_parts();
        if outcome == RayOutcome::TraceLimitExceeded {
            // Defect signal, never a game condition. Nothing is consumed.
            return Err(GameError::TraceLimitExceeded);
        }

        let id = self.rays.len() as u32 + 1;
        let ray = Ray::new(id, entry, outcome, path);
        self.consumed.insert(entry);
        if let Some(exit) = ray.exit() {
            self.consumed.insert(exit);
        }
        info!(%ray, remaining = self.config.max_rays - self.rays.len() - 1, "ray fired");
        self.rays.push(ray);
        let index = self.rays.len() - 1;
        Ok(&self.rays[index])
    }

    /// Marks a cell as a hypothesized atom position.
    ///
    /// Returns the number of marked cells. Marking an already-marked cell
    /// succeeds without change; marking a new cell with the set already at
    /// the configured count fails before any mutation. Marks never touch
    /// ray history or the firing budget.
    #[instrument(skip(self))]
    pub fn mark(&mut self, cell: Cell) -> Result<usize, GameError> {
        self.ensure_active()?;
        self.ensure_hypothesis_mode()?;
        if self.hypotheses.contains(&cell) {
            debug!(%cell, "cell already marked");
            return Ok(self.hypotheses.len());
        }
        if self.hypotheses.len() >= self.config.atom_count {
            warn!(%cell, "hypothesis set is full");
            return Err(GameError::HypothesisCountMismatch {
                expected: self.config.atom_count,
                actual: self.hypotheses.len() + 1,
            });
        }
        self.hypotheses.insert(cell);
        info!(%cell, marked = self.hypotheses.len(), "cell marked");
        Ok(self.hypotheses.len())
    }

    /// Removes a hypothesis mark. Unmarking an unmarked cell succeeds
    /// without change.
    #[instrument(skip(self))]
    pub fn unmark(&mut self, cell: Cell) -> Result<usize, GameError> {
        self.ensure_active()?;
        self.ensure_hypothesis_mode()?;
        if self.hypotheses.remove(&cell) {
            info!(%cell, marked = self.hypotheses.len(), "cell unmarked");
        } else {
            debug!(%cell, "cell was not marked");
        }
        Ok(self.hypotheses.len())
    }

    /// Commits a direct guess and ends the round (direct-guess mode only).
    ///
    /// The guess must name exactly the configured number of distinct cells.
    #[instrument(skip(self))]
    pub fn guess(&mut self, cells: &[Cell]) -> Result<RoundResult, GameError> {
        self.ensure_active()?;
        if self.config.hypothesis_mode {
            warn!("direct guess rejected in hypothesis mode");
            return Err(GameError::GuessUnavailable);
        }
        let distinct: BTreeSet<Cell> = cells.iter().copied().collect();
        if distinct.len() != self.config.atom_count {
            warn!(
                expected = self.config.atom_count,
                actual = distinct.len(),
                "guess has the wrong number of distinct cells"
            );
            return Err(GameError::HypothesisCountMismatch {
                expected: self.config.atom_count,
                actual: distinct.len(),
            });
        }
        Ok(self.finish(&distinct))
    }

    /// Scores the marked hypotheses and ends the round (hypothesis mode
    /// only). Requires exactly the configured number of marks; the error
    /// reports the actual count.
    #[instrument(skip(self))]
    pub fn check(&mut self) -> Result<RoundResult, GameError> {
        self.ensure_active()?;
        self.ensure_hypothesis_mode()?;
        if self.hypotheses.len() != self.config.atom_count {
            warn!(
                expected = self.config.atom_count,
                actual = self.hypotheses.len(),
                "check rejected with incomplete hypothesis set"
            );
            return Err(GameError::HypothesisCountMismatch {
                expected: self.config.atom_count,
                actual: self.hypotheses.len(),
            });
        }
        let guessed = self.hypotheses.clone();
        Ok(self.finish(&guessed))
    }

    /// Session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The hidden atoms. Read-only; exposed for membership queries and
    /// post-round comparison.
    pub fn atoms(&self) -> &AtomSet {
        &self.atoms
    }

    /// Fired rays in firing order.
    pub fn rays(&self) -> &[Ray] {
        &self.rays
    }

    /// Edge points no longer available for firing.
    pub fn consumed_edges(&self) -> &BTreeSet<EdgePoint> {
        &self.consumed
    }

    /// Currently marked hypothesis cells.
    pub fn hypotheses(&self) -> &BTreeSet<Cell> {
        &self.hypotheses
    }

    /// Current lifecycle state.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Whether the round has ended.
    pub fn is_finished(&self) -> bool {
        self.status == SessionStatus::Finished
    }

    /// Rays still available within the budget.
    pub fn rays_remaining(&self) -> usize {
        self.config.max_rays.saturating_sub(self.rays.len())
    }

    /// The final breakdown, present once the round has ended.
    pub fn result(&self) -> Option<RoundResult> {
        self.result
    }

    fn ensure_active(&self) -> Result<(), GameError> {
        match self.status {
            SessionStatus::Active => Ok(()),
            SessionStatus::Finished => {
                warn!("command rejected on finished session");
                Err(GameError::SessionFinished)
            }
        }
    }

    fn ensure_hypothesis_mode(&self) -> Result<(), GameError> {
        if self.config.hypothesis_mode {
            Ok(())
        } else {
            warn!("hypothesis command rejected in direct-guess mode");
            Err(GameError::HypothesesDisabled)
        }
    }

    fn finish(&mut self, guessed: &BTreeSet<Cell>) -> RoundResult {
        let atoms_correct = guessed
            .iter()
            .filter(|cell| self.atoms.contains(**cell))
            .count();
        let score = score_round(&self.rays, atoms_correct, self.config.atom_count);
        let result = RoundResult {
            atoms_correct,
            score,
        };
        self.status = SessionStatus::Finished;
        self.result = Some(result);
        info!(
            atoms_correct,
            total = score.total(),
            rays = self.rays.len(),
            "round finished"
        );
        result
    }
}
