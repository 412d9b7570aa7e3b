//! Strictly Black Box - pure game logic for the Black Box deduction game.
//!
//! Four atoms hide on an 8x8 grid; rays fired from the edges enter, bend,
//! reflect, or are absorbed, and the player infers the atom positions
//! from the crossings. This crate holds the two core pieces and nothing
//! else:
//!
//! - **Ray tracer** ([`trace`]): a pure function from an atom set and an
//!   entry point to an outcome plus the traversed path.
//! - **Session engine** ([`Session`]): one round's mutable state behind
//!   command operations (fire, mark, unmark, guess, check) that enforce
//!   legality and produce the final score.
//!
//! Rendering, prompting, transports, and experiment orchestration are
//! collaborators that drive the command surface from outside; nothing in
//! here performs I/O or blocks.
//!
//! # Example
//!
//! ```
//! use strictly_blackbox::{AtomSet, Cell, EdgePoint, Session, SessionConfig, Side};
//!
//! # fn main() -> Result<(), strictly_blackbox::GameError> {
//! let atoms = AtomSet::from_pairs(&[(2, 3), (3, 6), (6, 2), (7, 7)])?;
//! let mut session = Session::new(atoms, SessionConfig::default())?;
//!
//! let ray = session.fire(EdgePoint::new(Side::North, 1)?)?;
//! println!("{ray}");
//!
//! let guess = [
//!     Cell::new(2, 3)?,
//!     Cell::new(3, 6)?,
//!     Cell::new(6, 2)?,
//!     Cell::new(7, 7)?,
//! ];
//! let result = session.guess(&guess)?;
//! assert_eq!(result.atoms_correct(), 4);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod atoms;
mod error;
mod ray;
mod score;
mod session;
mod tracer;
mod types;

pub mod invariants;

pub use atoms::AtomSet;
pub use error::GameError;
pub use ray::{Ray, RayOutcome};
pub use score::{MISS_PENALTY, Score, score_round};
pub use session::{RoundResult, Session, SessionConfig, SessionStatus};
pub use tracer::{TRACE_STEP_LIMIT, Trace, trace};
pub use types::{Cell, EdgePoint, GRID_SIZE, Side};
