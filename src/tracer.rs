//! Deterministic ray propagation over the grid.
//!
//! `trace` is a pure function of the atom set and the entry point: no
//! session state, no I/O, identical results for identical inputs. The
//! rule priority is absorption over reflection over deflection over
//! straight travel, and that ordering is load-bearing.

use crate::atoms::AtomSet;
use crate::ray::RayOutcome;
use crate::types::{Cell, EdgePoint, GRID_SIZE, Side};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// Upper bound on stepping iterations, an order of magnitude above any
/// geometrically possible path length on an 8x8 grid. Hitting it yields
/// [`RayOutcome::TraceLimitExceeded`] and indicates a rule-set defect.
pub const TRACE_STEP_LIMIT: usize = 512;

/// Result of tracing one ray: its outcome plus the traversed path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    entry: EdgePoint,
    outcome: RayOutcome,
    path: Vec<Cell>,
}

impl Trace {
    /// Where the ray was fired from.
    pub fn entry(&self) -> EdgePoint {
        self.entry
    }

    /// The ray's outcome.
    pub fn outcome(&self) -> RayOutcome {
        self.outcome
    }

    /// Interior cells the ray occupied, in order. Includes the absorbing
    /// cell on absorption; empty for a ray reflected at the boundary.
    pub fn path(&self) -> &[Cell] {
        &self.path
    }

    pub(crate) fn into_parts(self) -> (EdgePoint, RayOutcome, Vec<Cell>) {
        (self.entry, self.outcome, self.path)
    }
}

/// Direction of travel across the grid, in the fixed board frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Heading {
    North,
    South,
    East,
    West,
}

impl Heading {
    fn delta(self) -> (i16, i16) {
        match self {
            Heading::North => (-1, 0),
            Heading::South => (1, 0),
            Heading::East => (0, 1),
            Heading::West => (0, -1),
        }
    }

    fn reversed(self) -> Self {
        match self {
            Heading::North => Heading::South,
            Heading::South => Heading::North,
            Heading::East => Heading::West,
            Heading::West => Heading::East,
        }
    }

    fn is_vertical(self) -> bool {
        matches!(self, Heading::North | Heading::South)
    }
}

/// Traces a ray fired from `entry` through `atoms`.
///
/// Works for any atom count, including none. Always terminates: either
/// with one of the three game outcomes or, past the step bound, with the
/// internal-error outcome.
#[instrument(skip(atoms), fields(atom_count = atoms.len()))]
pub fn trace(atoms: &AtomSet, entry: EdgePoint) -> Trace {
    let ((mut row, mut col), mut heading) = launch(entry);

    // Entry phase. An atom in the first cell absorbs before the edge
    // reflection check is ever made.
    let (dr, dc) = heading.delta();
    let (first_row, first_col) = (row + dr, col + dc);
    if atoms.contains_coords(first_row, first_col) {
        return Trace {
            entry,
            outcome: RayOutcome::Absorbed,
            path: vec![cell_at(first_row, first_col)],
        };
    }
    if flanked(atoms, heading, first_row, first_col) {
        // The ray never enters the grid.
        return Trace {
            entry,
            outcome: RayOutcome::Reflected,
            path: Vec::new(),
        };
    }

    let mut path = Vec::new();
    for _ in 0..TRACE_STEP_LIMIT {
        let (dr, dc) = heading.delta();
        let (next_row, next_col) = (row + dr, col + dc);

        if outside(next_row, next_col) {
            let exit = boundary_point(next_row, next_col);
            let outcome = if exit == entry {
                RayOutcome::Reflected
            } else {
                RayOutcome::Exited(exit)
            };
            return Trace {
                entry,
                outcome,
                path,
            };
        }

        row = next_row;
        col = next_col;
        path.push(cell_at(row, col));

        if atoms.contains_coords(row, col) {
            return Trace {
                entry,
                outcome: RayOutcome::Absorbed,
                path,
            };
        }

        // Deflection decision for the move out of this cell. An atom dead
        // ahead takes priority, so flanks are only consulted when the cell
        // ahead is clear.
        let (dr, dc) = heading.delta();
        let (ahead_row, ahead_col) = (row + dr, col + dc);
        if !atoms.contains_coords(ahead_row, ahead_col) {
            heading = deflect(atoms, heading, ahead_row, ahead_col);
        }
    }

    warn!(%entry, "ray trace exceeded its step bound");
    Trace {
        entry,
        outcome: RayOutcome::TraceLimitExceeded,
        path,
    }
}

/// Starting coordinates just outside the grid plus the inward heading.
fn launch(entry: EdgePoint) -> ((i16, i16), Heading) {
    let position = i16::from(entry.position());
    let beyond = i16::from(GRID_SIZE) + 1;
    match entry.side() {
        Side::North => ((0, position), Heading::South),
        Side::South => ((beyond, position), Heading::North),
        Side::West => ((position, 0), Heading::East),
        Side::East => ((position, beyond), Heading::West),
    }
}

fn outside(row: i16, col: i16) -> bool {
    row < 1 || row > i16::from(GRID_SIZE) || col < 1 || col > i16::from(GRID_SIZE)
}

/// Edge point for coordinates one step beyond the boundary. Movement is
/// orthogonal, so exactly one coordinate is out of range.
fn boundary_point(row: i16, col: i16) -> EdgePoint {
    let size = i16::from(GRID_SIZE);
    let (side, position) = if row < 1 {
        (Side::North, col)
    } else if row > size {
        (Side::South, col)
    } else if col < 1 {
        (Side::West, row)
    } else {
        (Side::East, row)
    };
    EdgePoint::new(side, position as u8).expect("exit position is within the edge range")
}

fn cell_at(row: i16, col: i16) -> Cell {
    Cell::new(row as u8, col as u8).expect("cell is within the grid")
}

/// Whether either cell flanking `(row, col)` perpendicular to travel
/// holds an atom.
fn flanked(atoms: &AtomSet, heading: Heading, row: i16, col: i16) -> bool {
    if heading.is_vertical() {
        atoms.contains_coords(row, col + 1) || atoms.contains_coords(row, col - 1)
    } else {
        atoms.contains_coords(row - 1, col) || atoms.contains_coords(row + 1, col)
    }
}

/// New heading given the flanks of the cell about to be entered: both
/// occupied reverses the ray, one occupied turns it 90 degrees away from
/// the atom, none leaves it straight.
fn deflect(atoms: &AtomSet, heading: Heading, ahead_row: i16, ahead_col: i16) -> Heading {
    if heading.is_vertical() {
        let east = atoms.contains_coords(ahead_row, ahead_col + 1);
        let west = atoms.contains_coords(ahead_row, ahead_col - 1);
        match (east, west) {
            (true, true) => heading.reversed(),
            (true, false) => Heading::West,
            (false, true) => Heading::East,
            (false, false) => heading,
        }
    } else {
        let north = atoms.contains_coords(ahead_row - 1, ahead_col);
        let south = atoms.contains_coords(ahead_row + 1, ahead_col);
        match (north, south) {
            (true, true) => heading.reversed(),
            (true, false) => Heading::South,
            (false, true) => Heading::North,
            (false, false) => heading,
        }
    }
}
