//! Shared-edge consistency.

use super::Invariant;
use crate::board::Board;

/// Invariant: `shared_with` is only set on drawn edges, never equals the
/// owner, and drawn edges always have an owner.
pub struct SharedEdgeInvariant;

impl Invariant<Board> for SharedEdgeInvariant {
    fn holds(board: &Board) -> bool {
        board.edge_states().iter().all(|edge| {
            if !edge.drawn() {
                edge.owner().is_none() && edge.shared_with().is_none()
            } else {
                edge.owner().is_some() && edge.shared_with() != edge.owner()
            }
        })
    }

    fn description() -> &'static str {
        "Shared edges are drawn and shared with the non-owner"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoardPreset, EdgeId, Player};

    #[test]
    fn test_share_on_undrawn_edge_violates() {
        let mut board = Board::from_preset(BoardPreset::Small);
        board.share_edge(EdgeId(0), Player::Two);
        assert!(!SharedEdgeInvariant::holds(&board));
    }

    #[test]
    fn test_share_with_owner_violates() {
        let mut board = Board::from_preset(BoardPreset::Small);
        board.draw_edge(EdgeId(0), Player::One);
        assert!(SharedEdgeInvariant::holds(&board));
        board.share_edge(EdgeId(0), Player::One);
        assert!(!SharedEdgeInvariant::holds(&board));
    }
}
