//! Contract-based validation for strokes.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P} stroke {Q}. The preconditions are the stroke validation pipeline,
//! run in order with the first failure winning.

use super::board::Board;
use super::geometry::is_aligned;
use super::invariants::{BoardInvariants, InvariantSet, InvariantViolation};
use super::resolver::{Stroke, StrokeError};
use super::types::{Coord, EdgeId};
use tracing::instrument;

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// What a passing precondition hands to the transition.
    type Plan;

    /// Checks preconditions before applying the action.
    fn pre(&self, state: &S, action: &A) -> Result<Self::Plan, StrokeError>;

    /// Checks postconditions after applying the action.
    fn post(&self, before: &S, after: &S) -> Result<(), Vec<InvariantViolation>>;
}

// ─────────────────────────────────────────────────────────────
//  Stroke Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the stroke runs along a lattice direction.
pub struct AngleAligned;

impl AngleAligned {
    /// Fails with [`StrokeError::InvalidAngle`].
    pub fn check(board: &Board, stroke: &Stroke) -> Result<(), StrokeError> {
        let lattice = board.lattice();
        match (lattice.point(stroke.from), lattice.point(stroke.to)) {
            (Some(a), Some(b)) if !is_aligned(*a.position(), *b.position()) => {
                Err(StrokeError::InvalidAngle)
            }
            _ => Ok(()),
        }
    }
}

/// Precondition: at least one unit segment lies between the endpoints.
pub struct HasSegments;

impl HasSegments {
    /// Returns consecutive point pairs, or [`StrokeError::NoSegments`].
    pub fn check(board: &Board, stroke: &Stroke) -> Result<Vec<(Coord, Coord)>, StrokeError> {
        let pairs = board.lattice().chain(stroke.from, stroke.to);
        if pairs.is_empty() {
            Err(StrokeError::NoSegments)
        } else {
            Ok(pairs)
        }
    }
}

/// Precondition: the stroke respects the segment cap (0 disables the cap).
pub struct WithinCap;

impl WithinCap {
    /// Fails with [`StrokeError::TooLong`].
    pub fn check(segments: usize, max_segments: u32) -> Result<(), StrokeError> {
        if max_segments > 0 && segments > max_segments as usize {
            Err(StrokeError::TooLong {
                segments,
                max: max_segments,
            })
        } else {
            Ok(())
        }
    }
}

/// Precondition: every consecutive pair is joined by a lattice edge.
pub struct EdgesExist;

impl EdgesExist {
    /// Returns the edge ids in stroke order, or [`StrokeError::NotAligned`].
    pub fn check(board: &Board, pairs: &[(Coord, Coord)]) -> Result<Vec<EdgeId>, StrokeError> {
        pairs
            .iter()
            .map(|&(a, b)| board.edge_between(a, b).ok_or(StrokeError::NotAligned))
            .collect()
    }
}

/// Precondition: at least one edge of the stroke is still undrawn.
pub struct DrawsSomething;

impl DrawsSomething {
    /// Fails with [`StrokeError::AlreadyDrawn`].
    pub fn check(board: &Board, edges: &[EdgeId]) -> Result<(), StrokeError> {
        if edges.iter().all(|&e| board.is_drawn(e)) {
            Err(StrokeError::AlreadyDrawn)
        } else {
            Ok(())
        }
    }
}

/// Composite precondition: the full validation pipeline.
pub struct LegalStroke;

impl LegalStroke {
    /// Validates a stroke and returns the unit edges it covers, in order.
    #[instrument(skip(board))]
    pub fn check(
        board: &Board,
        stroke: &Stroke,
        max_segments: u32,
    ) -> Result<Vec<EdgeId>, StrokeError> {
        AngleAligned::check(board, stroke)?;
        let pairs = HasSegments::check(board, stroke)?;
        WithinCap::check(pairs.len(), max_segments)?;
        let edges = EdgesExist::check(board, &pairs)?;
        DrawsSomething::check(board, &edges)?;
        Ok(edges)
    }
}

// ─────────────────────────────────────────────────────────────
//  Stroke Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for stroke resolution.
///
/// Preconditions: the [`LegalStroke`] pipeline under the configured cap.
///
/// Postconditions:
/// - Board invariants hold (scores, fills, shares)
/// - Progress is monotonic: nothing drawn or filled before is undone or reassigned
#[derive(Debug, Clone, Copy, derive_new::new)]
pub struct StrokeContract {
    max_segments: u32,
}

impl Contract<Board, Stroke> for StrokeContract {
    type Plan = Vec<EdgeId>;

    fn pre(&self, board: &Board, stroke: &Stroke) -> Result<Vec<EdgeId>, StrokeError> {
        LegalStroke::check(board, stroke, self.max_segments)
    }

    fn post(&self, before: &Board, after: &Board) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = match BoardInvariants::check_all(after) {
            Ok(()) => Vec::new(),
            Err(violations) => violations,
        };
        if !MonotonicProgress::holds(before, after) {
            violations.push(InvariantViolation::new(MonotonicProgress::description()));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Transition property: drawn edges keep their owner, filled triangles keep their scorer.
pub struct MonotonicProgress;

impl MonotonicProgress {
    /// Compares two snapshots of the same board.
    pub fn holds(before: &Board, after: &Board) -> bool {
        let edges_kept = before
            .edge_states()
            .iter()
            .zip(after.edge_states())
            .all(|(b, a)| !b.drawn() || (a.drawn() && a.owner() == b.owner()));
        let triangles_kept = before
            .triangle_states()
            .iter()
            .zip(after.triangle_states())
            .all(|(b, a)| !b.filled() || (a.filled() && a.scored_by() == b.scored_by()));
        edges_kept && triangles_kept
    }

    /// Human-readable description.
    pub fn description() -> &'static str {
        "Drawn edges and filled triangles never revert"
    }
}
