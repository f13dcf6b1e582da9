//! Fill consistency: a triangle is filled exactly when its three edges are drawn.

use super::Invariant;
use crate::board::Board;

/// Invariant: after a sweep, `filled` matches "all three edges drawn",
/// and every filled triangle has a scorer.
pub struct FillConsistencyInvariant;

impl Invariant<Board> for FillConsistencyInvariant {
    fn holds(board: &Board) -> bool {
        board.lattice().triangles().iter().all(|triangle| {
            let state = board.triangle_state(*triangle.id());
            let complete = board.drawn_sides(*triangle.id()) == 3;
            state.filled() == complete && state.filled() == state.scored_by().is_some()
        })
    }

    fn description() -> &'static str {
        "Triangles are filled exactly when all three edges are drawn"
    }
}
