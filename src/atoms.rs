//! Hidden atom layouts: construction, random draws, and fixed presets.

use crate::error::GameError;
use crate::types::{Cell, GRID_SIZE};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::instrument;

/// Fixed layouts for reproducible rounds, four atoms each.
///
/// Covers a spread of shapes: corner clusters, diagonals, edge-heavy,
/// central clusters, and asymmetric scatters.
const PRESETS: [[(u8, u8); 4]; 10] = [
    [(2, 3), (3, 6), (6, 2), (7, 7)],
    [(1, 1), (1, 3), (2, 2), (5, 6)],
    [(2, 2), (4, 4), (6, 6), (8, 8)],
    [(1, 4), (4, 8), (8, 5), (5, 1)],
    [(3, 4), (4, 3), (4, 5), (5, 4)],
    [(2, 2), (2, 3), (2, 4), (4, 2)],
    [(1, 1), (1, 8), (8, 1), (8, 8)],
    [(2, 7), (3, 2), (6, 5), (7, 3)],
    [(4, 2), (4, 4), (4, 6), (4, 8)],
    [(1, 5), (3, 3), (5, 7), (8, 2)],
];

/// A set of distinct hidden atom cells.
///
/// Immutable once built: the session reads it for membership queries and
/// scoring comparison, never for mutation. Backed by a `BTreeSet` so
/// iteration order is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomSet(BTreeSet<Cell>);

impl AtomSet {
    /// Number of fixed preset layouts available through [`AtomSet::preset`].
    pub const PRESET_COUNT: usize = PRESETS.len();

    /// Builds an atom set from cells, deduplicating repeats.
    pub fn new(cells: impl IntoIterator<Item = Cell>) -> Self {
        Self(cells.into_iter().collect())
    }

    /// Builds an atom set from (row, col) pairs, validating each.
    pub fn from_pairs(pairs: &[(u8, u8)]) -> Result<Self, GameError> {
        let mut cells = BTreeSet::new();
        for &(row, col) in pairs {
            cells.insert(Cell::new(row, col)?);
        }
        Ok(Self(cells))
    }

    /// Draws `count` distinct atoms uniformly at random.
    #[instrument(skip(rng))]
    pub fn draw<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Self {
        let mut cells = BTreeSet::new();
        while cells.len() < count {
            let row = rng.random_range(1..=GRID_SIZE);
            let col = rng.random_range(1..=GRID_SIZE);
            cells.insert(Cell::new(row, col).expect("drawn coordinates are within the grid"));
        }
        Self(cells)
    }

    /// Returns one of the fixed preset layouts, or `None` past the last index.
    pub fn preset(index: usize) -> Option<Self> {
        let pairs = PRESETS.get(index)?;
        Some(Self::from_pairs(pairs).expect("preset layouts are within the grid"))
    }

    /// Whether the given cell holds an atom.
    pub fn contains(&self, cell: Cell) -> bool {
        self.0.contains(&cell)
    }

    /// Membership check on raw signed coordinates.
    ///
    /// Coordinates off the grid never hold an atom, which lets the tracer
    /// probe flanking positions without boundary special cases.
    pub(crate) fn contains_coords(&self, row: i16, col: i16) -> bool {
        if row < 1 || row > i16::from(GRID_SIZE) || col < 1 || col > i16::from(GRID_SIZE) {
            return false;
        }
        // Bounds were just checked.
        let cell = Cell::new(row as u8, col as u8).expect("coordinates are within the grid");
        self.0.contains(&cell)
    }

    /// Number of atoms in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the atoms in (row, col) order.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.0.iter().copied()
    }
}
