//! Error types for the Black Box core.
//!
//! Every failure is recoverable at the caller level and is returned as a
//! typed `Result`; nothing here is raised as a panic. The core performs
//! no retries itself - replaying malformed input is the caller's job.

use crate::types::EdgePoint;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// Failure reasons surfaced by session commands and type constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, Error)]
pub enum GameError {
    /// A cell coordinate was outside the 1-8 grid range.
    #[display("cell ({row},{col}) is off the grid, rows and columns run 1-8")]
    InvalidCoordinate {
        /// Requested row.
        row: u8,
        /// Requested column.
        col: u8,
    },
    /// An edge position was outside the 1-8 range.
    #[display("edge position {position} is out of range, positions run 1-8")]
    InvalidPosition {
        /// Requested position along the edge.
        position: u8,
    },
    /// A fire command targeted an edge point already used as an entry or exit.
    #[display("position {edge} has already been used as an entry or exit point")]
    PositionUnavailable {
        /// The consumed edge point.
        edge: EdgePoint,
    },
    /// A fire command was issued after the configured ray limit was reached.
    #[display("ray budget of {limit} is exhausted")]
    BudgetExceeded {
        /// The configured maximum number of rays.
        limit: usize,
    },
    /// A check or guess did not carry the required number of distinct cells,
    /// or a mark would push the hypothesis set past the limit.
    #[display("hypothesis set would hold {actual} cells, the round requires exactly {expected}")]
    HypothesisCountMismatch {
        /// Cells the round requires.
        expected: usize,
        /// Cells the command would leave in place.
        actual: usize,
    },
    /// A mark, unmark, or check was issued with hypothesis mode disabled.
    #[display("hypothesis commands are not available, the session runs in direct-guess mode")]
    HypothesesDisabled,
    /// A direct guess was issued with hypothesis mode enabled.
    #[display("direct guesses are not available, mark cells and use check instead")]
    GuessUnavailable,
    /// A mutating command was issued after the round ended.
    #[display("the session is finished, no further commands are accepted")]
    SessionFinished,
    /// A session was created with an atom set of the wrong size.
    #[display("atom set holds {actual} atoms, the configuration requires {expected}")]
    AtomCountMismatch {
        /// Atoms the configuration requires.
        expected: usize,
        /// Atoms supplied.
        actual: usize,
    },
    /// The ray tracer hit its internal step bound. This signals a defect in
    /// the rule set, not a game condition a player can reach.
    #[display("ray trace exceeded its internal step bound")]
    TraceLimitExceeded,
}
