//! Core domain types for Black Box: grid cells, edges, and edge points.

use crate::error::GameError;
use serde::{Deserialize, Serialize};

/// Width and height of the grid. Rows and columns are indexed 1 through 8.
pub const GRID_SIZE: u8 = 8;

/// A cell on the 8x8 grid, addressed by (row, col) with both in 1..=8.
///
/// Rows count top to bottom, columns left to right. `Ord` follows
/// (row, col) so cell sets iterate in a stable order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Cell {
    row: u8,
    col: u8,
}

impl Cell {
    /// Creates a cell, validating that both coordinates are on the grid.
    pub fn new(row: u8, col: u8) -> Result<Self, GameError> {
        if !(1..=GRID_SIZE).contains(&row) || !(1..=GRID_SIZE).contains(&col) {
            return Err(GameError::InvalidCoordinate { row, col });
        }
        Ok(Self { row, col })
    }

    /// Returns the row (1-8).
    pub fn row(&self) -> u8 {
        self.row
    }

    /// Returns the column (1-8).
    pub fn col(&self) -> u8 {
        self.col
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// One of the four grid edges a ray can cross.
///
/// North/south edge positions index columns 1-8; east/west edge
/// positions index rows 1-8.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Top edge; rays fired from here travel south.
    North,
    /// Bottom edge; rays fired from here travel north.
    South,
    /// Right edge; rays fired from here travel west.
    East,
    /// Left edge; rays fired from here travel east.
    West,
}

impl Side {
    /// Uppercase label used in ray summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Side::North => "NORTH",
            Side::South => "SOUTH",
            Side::East => "EAST",
            Side::West => "WEST",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// An addressable boundary crossing: a side plus a 1-8 position along it.
///
/// Edge points are the unit of firing and of position consumption. Two
/// edge points are equal iff both side and position match.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct EdgePoint {
    side: Side,
    position: u8,
}

impl EdgePoint {
    /// Creates an edge point, validating the position range.
    pub fn new(side: Side, position: u8) -> Result<Self, GameError> {
        if !(1..=GRID_SIZE).contains(&position) {
            return Err(GameError::InvalidPosition { position });
        }
        Ok(Self { side, position })
    }

    /// Returns the side of the grid this point sits on.
    pub fn side(&self) -> Side {
        self.side
    }

    /// Returns the position along the edge (1-8).
    pub fn position(&self) -> u8 {
        self.position
    }

    /// Iterates all 32 edge points in a stable order.
    pub fn all() -> impl Iterator<Item = EdgePoint> {
        use strum::IntoEnumIterator;
        Side::iter().flat_map(|side| (1..=GRID_SIZE).map(move |position| Self { side, position }))
    }
}

impl std::fmt::Display for EdgePoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.side, self.position)
    }
}
