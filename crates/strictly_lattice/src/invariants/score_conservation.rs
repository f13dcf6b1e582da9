//! Score conservation: every point scored corresponds to exactly one filled triangle.

use super::Invariant;
use crate::board::Board;
use crate::types::Player;

/// Invariant: `score[1] + score[2]` equals the number of filled triangles,
/// and each player's score equals the triangles credited to them.
pub struct ScoreConservationInvariant;

impl Invariant<Board> for ScoreConservationInvariant {
    fn holds(board: &Board) -> bool {
        let scores = board.scores();
        let credited = |player| {
            board
                .triangle_states()
                .iter()
                .filter(|t| t.filled() && t.scored_by() == Some(player))
                .count()
        };
        scores.total() as usize == board.filled_count()
            && scores.get(Player::One) as usize == credited(Player::One)
            && scores.get(Player::Two) as usize == credited(Player::Two)
    }

    fn description() -> &'static str {
        "Scores sum to the number of filled triangles"
    }
}
