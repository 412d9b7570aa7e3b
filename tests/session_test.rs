//! Tests for session command legality, bookkeeping, and scoring.

use strictly_blackbox::invariants::{InvariantSet, SessionInvariants};
use strictly_blackbox::{
    AtomSet, Cell, EdgePoint, GameError, RayOutcome, Session, SessionConfig, SessionStatus, Side,
};

fn edge(side: Side, position: u8) -> EdgePoint {
    EdgePoint::new(side, position).unwrap()
}

fn cell(row: u8, col: u8) -> Cell {
    Cell::new(row, col).unwrap()
}

/// Atoms packed into the top-left corner, leaving columns 3-8 clear.
fn corner_atoms() -> AtomSet {
    AtomSet::from_pairs(&[(1, 1), (1, 2), (2, 1), (2, 2)]).unwrap()
}

#[test]
fn test_refire_from_entry_point_fails() {
    let mut session = Session::new(corner_atoms(), SessionConfig::default()).unwrap();
    session.fire(edge(Side::North, 4)).unwrap();

    let err = session.fire(edge(Side::North, 4)).unwrap_err();
    assert_eq!(
        err,
        GameError::PositionUnavailable {
            edge: edge(Side::North, 4)
        }
    );
}

#[test]
fn test_refire_from_exit_point_fails() {
    let mut session = Session::new(corner_atoms(), SessionConfig::default()).unwrap();
    let ray = session.fire(edge(Side::North, 4)).unwrap();
    assert_eq!(ray.outcome(), RayOutcome::Exited(edge(Side::South, 4)));

    let err = session.fire(edge(Side::South, 4)).unwrap_err();
    assert_eq!(
        err,
        GameError::PositionUnavailable {
            edge: edge(Side::South, 4)
        }
    );
}

#[test]
fn test_budget_rejects_firing_past_the_limit() {
    let config = SessionConfig::default().with_max_rays(2);
    let mut session = Session::new(corner_atoms(), config).unwrap();
    session.fire(edge(Side::North, 5)).unwrap();
    session.fire(edge(Side::North, 6)).unwrap();

    let err = session.fire(edge(Side::North, 7)).unwrap_err();
    assert_eq!(err, GameError::BudgetExceeded { limit: 2 });
    assert_eq!(session.rays_remaining(), 0);
    assert_eq!(session.rays().len(), 2);
}

#[test]
fn test_guess_is_still_available_after_budget_exhaustion() {
    let config = SessionConfig::default().with_max_rays(1);
    let mut session = Session::new(corner_atoms(), config).unwrap();
    session.fire(edge(Side::North, 5)).unwrap();
    assert!(session.fire(edge(Side::North, 6)).is_err());

    let guess = [cell(1, 1), cell(1, 2), cell(2, 1), cell(2, 2)];
    let result = session.guess(&guess).unwrap();
    assert_eq!(result.atoms_correct(), 4);
}

#[test]
fn test_finished_session_rejects_every_mutating_command() {
    let mut session = Session::new(corner_atoms(), SessionConfig::default()).unwrap();
    let guess = [cell(1, 1), cell(1, 2), cell(2, 1), cell(2, 2)];
    session.guess(&guess).unwrap();
    assert_eq!(session.status(), SessionStatus::Finished);

    assert_eq!(
        session.fire(edge(Side::North, 4)).unwrap_err(),
        GameError::SessionFinished
    );
    assert_eq!(
        session.guess(&guess).unwrap_err(),
        GameError::SessionFinished
    );
    assert_eq!(
        session.mark(cell(4, 4)).unwrap_err(),
        GameError::SessionFinished
    );
    assert_eq!(
        session.unmark(cell(4, 4)).unwrap_err(),
        GameError::SessionFinished
    );
    assert_eq!(session.check().unwrap_err(), GameError::SessionFinished);
}

#[test]
fn test_scoring_detour_plus_absorption_with_two_correct() {
    let mut session = Session::new(corner_atoms(), SessionConfig::default()).unwrap();

    // Detour: two distinct crossing points, two points charged.
    let ray = session.fire(edge(Side::North, 6)).unwrap();
    assert!(ray.is_detour());
    // Absorption: entry point only.
    let ray = session.fire(edge(Side::West, 1)).unwrap();
    assert_eq!(ray.outcome(), RayOutcome::Absorbed);

    let guess = [cell(1, 1), cell(1, 2), cell(5, 5), cell(6, 6)];
    let result = session.guess(&guess).unwrap();
    assert_eq!(result.atoms_correct(), 2);
    assert_eq!(result.score().ray_points(), 3);
    assert_eq!(result.score().miss_penalty(), 10);
    assert_eq!(result.score().total(), 13);
    assert_eq!(session.result(), Some(result));
}

#[test]
fn test_hypothesis_flow_mark_check() {
    let config = SessionConfig::default().with_hypothesis_mode(true);
    let mut session = Session::new(corner_atoms(), config).unwrap();

    assert_eq!(session.mark(cell(1, 1)).unwrap(), 1);
    assert_eq!(session.mark(cell(1, 2)).unwrap(), 2);
    // Re-marking is a successful no-op.
    assert_eq!(session.mark(cell(1, 2)).unwrap(), 2);

    // Checking early reports the actual count.
    assert_eq!(
        session.check().unwrap_err(),
        GameError::HypothesisCountMismatch {
            expected: 4,
            actual: 2
        }
    );

    assert_eq!(session.mark(cell(2, 1)).unwrap(), 3);
    assert_eq!(session.mark(cell(7, 7)).unwrap(), 4);

    // A fifth mark is rejected before mutation.
    assert_eq!(
        session.mark(cell(8, 8)).unwrap_err(),
        GameError::HypothesisCountMismatch {
            expected: 4,
            actual: 5
        }
    );
    assert_eq!(session.hypotheses().len(), 4);

    // Swap the miss for the last atom, then check.
    assert_eq!(session.unmark(cell(7, 7)).unwrap(), 3);
    assert_eq!(session.mark(cell(2, 2)).unwrap(), 4);
    let result = session.check().unwrap();
    assert_eq!(result.atoms_correct(), 4);
    assert_eq!(result.score().miss_penalty(), 0);
}

#[test]
fn test_unmark_of_unmarked_cell_is_a_no_op() {
    let config = SessionConfig::default().with_hypothesis_mode(true);
    let mut session = Session::new(corner_atoms(), config).unwrap();
    assert_eq!(session.unmark(cell(4, 4)).unwrap(), 0);
}

#[test]
fn test_mode_gating_of_answer_commands() {
    let mut direct = Session::new(corner_atoms(), SessionConfig::default()).unwrap();
    assert_eq!(direct.check().unwrap_err(), GameError::HypothesesDisabled);
    assert_eq!(
        direct.mark(cell(4, 4)).unwrap_err(),
        GameError::HypothesesDisabled
    );

    let config = SessionConfig::default().with_hypothesis_mode(true);
    let mut hypothesis = Session::new(corner_atoms(), config).unwrap();
    let guess = [cell(1, 1), cell(1, 2), cell(2, 1), cell(2, 2)];
    assert_eq!(
        hypothesis.guess(&guess).unwrap_err(),
        GameError::GuessUnavailable
    );
}

#[test]
fn test_marks_do_not_touch_rays_or_budget() {
    let config = SessionConfig::default()
        .with_hypothesis_mode(true)
        .with_max_rays(3);
    let mut session = Session::new(corner_atoms(), config).unwrap();
    session.fire(edge(Side::North, 5)).unwrap();

    session.mark(cell(1, 1)).unwrap();
    session.unmark(cell(1, 1)).unwrap();
    assert_eq!(session.rays().len(), 1);
    assert_eq!(session.rays_remaining(), 2);
}

#[test]
fn test_invariants_hold_through_a_full_round() {
    let config = SessionConfig::default().with_hypothesis_mode(true);
    let mut session = Session::new(corner_atoms(), config).unwrap();

    for entry in EdgePoint::all() {
        let _ = session.fire(entry);
        SessionInvariants::check_all(&session).unwrap();
    }
    for target in [(1, 1), (1, 2), (2, 1), (3, 3)] {
        session.mark(cell(target.0, target.1)).unwrap();
        SessionInvariants::check_all(&session).unwrap();
    }
    session.check().unwrap();
    SessionInvariants::check_all(&session).unwrap();
}

#[test]
fn test_finished_session_serializes_round_trip() {
    let mut session = Session::new(corner_atoms(), SessionConfig::default()).unwrap();
    session.fire(edge(Side::North, 6)).unwrap();
    session
        .guess(&[cell(1, 1), cell(1, 2), cell(2, 1), cell(2, 2)])
        .unwrap();

    let json = serde_json::to_string(&session).unwrap();
    let restored: Session = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, session);
    assert!(restored.is_finished());
}
