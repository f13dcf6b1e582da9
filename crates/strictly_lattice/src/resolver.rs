//! Stroke resolution: validate a stroke, draw its edges, score completed triangles.
//!
//! Strokes are domain events: a player's intent to draw from one point to
//! another. Validation runs to completion before the board is touched, so a
//! rejected stroke never leaves partial state behind.

use super::board::Board;
use super::contracts::{Contract, StrokeContract};
use super::types::{Coord, EdgeId, Player, Scores, TriangleId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{info, instrument, warn};

/// A stroke between two lattice points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Stroke {
    /// First endpoint.
    pub from: Coord,
    /// Second endpoint.
    pub to: Coord,
}

impl std::fmt::Display for Stroke {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Reason a stroke was rejected. No board state changes on rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum StrokeError {
    /// The endpoints are not along 0°, 60°, 120° or 180°.
    #[display("Stroke must run at 0, 60, 120 or 180 degrees")]
    InvalidAngle,

    /// No lattice segments lie between the endpoints.
    #[display("No lattice segments lie between the endpoints")]
    NoSegments,

    /// The stroke covers more unit edges than the configured cap.
    #[display("Stroke covers {} segments; at most {} allowed", segments, max)]
    TooLong {
        /// Unit edges the stroke decomposes into.
        segments: usize,
        /// Configured cap.
        max: u32,
    },

    /// Two consecutive points on the stroke are not joined by a lattice edge.
    #[display("Stroke is not aligned with the grid")]
    NotAligned,

    /// Every unit edge of the stroke is already drawn.
    #[display("Every segment of this stroke is already drawn")]
    AlreadyDrawn,
}

impl std::error::Error for StrokeError {}

/// What happened to an edge during a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeChange {
    /// The edge was undrawn and now belongs to the mover.
    Drawn,
    /// The edge belonged to the opponent and is now shared with the mover.
    Shared,
}

/// An edge touched by a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeMark {
    /// The edge.
    pub edge: EdgeId,
    /// How it changed.
    pub change: EdgeChange,
}

/// A triangle completed by a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedTriangle {
    /// The triangle.
    pub triangle: TriangleId,
    /// Player credited with it.
    pub scored_by: Player,
}

/// Result of a successfully resolved stroke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrokeOutcome {
    stroke: Stroke,
    player: Player,
    marked: Vec<EdgeMark>,
    completed: Vec<CompletedTriangle>,
    scores: Scores,
    terminal: bool,
}

impl StrokeOutcome {
    /// The stroke that was applied.
    pub fn stroke(&self) -> Stroke {
        self.stroke
    }

    /// The player who moved.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Edges newly drawn or newly shared, in stroke order.
    pub fn marked(&self) -> &[EdgeMark] {
        &self.marked
    }

    /// Triangles completed by this stroke.
    pub fn completed(&self) -> &[CompletedTriangle] {
        &self.completed
    }

    /// Score tally after the stroke.
    pub fn scores(&self) -> Scores {
        self.scores
    }

    /// Whether every triangle is now filled.
    pub fn terminal(&self) -> bool {
        self.terminal
    }

    /// Whether the mover scored at least one triangle.
    pub fn scored(&self) -> bool {
        !self.completed.is_empty()
    }
}

/// Validates `stroke` for `player` and applies it to the board.
///
/// `max_segments` of 0 means strokes of any length are allowed.
#[instrument(skip(board, player), fields(player = %player))]
pub fn resolve_stroke(
    board: &mut Board,
    stroke: Stroke,
    player: Player,
    max_segments: u32,
) -> Result<StrokeOutcome, StrokeError> {
    let contract = StrokeContract::new(max_segments);
    let chain = contract.pre(board, &stroke).inspect_err(|error| {
        warn!(%stroke, %error, "Stroke rejected");
    })?;

    #[cfg(debug_assertions)]
    let before = board.clone();

    let marked = apply(board, &chain, player);
    let completed = sweep(board, &marked, player);
    let terminal = board.is_full();

    #[cfg(debug_assertions)]
    if let Err(violations) = contract.post(&before, board) {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        panic!("Stroke postcondition failed: {}", descriptions);
    }

    if !completed.is_empty() {
        info!(
            %stroke,
            completed = completed.len(),
            scores = %board.scores(),
            "Triangles completed"
        );
    }
    if terminal {
        info!(scores = %board.scores(), "Board full");
    }

    Ok(StrokeOutcome {
        stroke,
        player,
        marked,
        completed,
        scores: board.scores(),
        terminal,
    })
}

/// Draws undrawn edges and marks the opponent's edges as shared.
fn apply(board: &mut Board, chain: &[EdgeId], player: Player) -> Vec<EdgeMark> {
    let mut marked = Vec::with_capacity(chain.len());
    for &edge in chain {
        let state = board.edge_state(edge);
        if !state.drawn() {
            board.draw_edge(edge, player);
            marked.push(EdgeMark {
                edge,
                change: EdgeChange::Drawn,
            });
        } else if state.owner().is_some_and(|owner| owner != player)
            && state.shared_with() != Some(player)
        {
            board.share_edge(edge, player);
            marked.push(EdgeMark {
                edge,
                change: EdgeChange::Shared,
            });
        }
    }
    marked
}

/// Fills every triangle completed by the newly drawn edges.
fn sweep(board: &mut Board, marked: &[EdgeMark], player: Player) -> Vec<CompletedTriangle> {
    let touched: BTreeSet<TriangleId> = marked
        .iter()
        .filter(|m| m.change == EdgeChange::Drawn)
        .flat_map(|m| board.triangles_of(m.edge).iter().copied())
        .collect();

    let mut completed = Vec::new();
    for triangle in touched {
        if !board.triangle_state(triangle).filled() && board.drawn_sides(triangle) == 3 {
            board.fill_triangle(triangle, player);
            completed.push(CompletedTriangle {
                triangle,
                scored_by: player,
            });
        }
    }
    completed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::BoardPreset;

    fn stroke(a: (usize, usize), b: (usize, usize)) -> Stroke {
        Stroke::new(Coord::new(a.0, a.1), Coord::new(b.0, b.1))
    }

    #[test]
    fn test_single_edge_drawn() {
        let mut board = Board::from_preset(BoardPreset::Medium);
        let outcome = resolve_stroke(&mut board, stroke((0, 0), (0, 1)), Player::One, 0).unwrap();
        assert_eq!(outcome.marked().len(), 1);
        assert_eq!(outcome.marked()[0].change, EdgeChange::Drawn);
        assert!(!outcome.scored());
        let edge = board.edge_between(Coord::new(0, 1), Coord::new(0, 0)).unwrap();
        assert_eq!(board.edge_state(edge).owner(), Some(Player::One));
    }

    #[test]
    fn test_rejection_leaves_board_untouched() {
        let mut board = Board::from_preset(BoardPreset::Medium);
        let before = board.edge_states().to_vec();
        let result = resolve_stroke(&mut board, stroke((0, 0), (2, 1)), Player::One, 0);
        assert_eq!(result, Err(StrokeError::InvalidAngle));
        assert_eq!(board.edge_states(), before.as_slice());
    }

    #[test]
    fn test_identical_endpoints_have_no_segments() {
        let mut board = Board::from_preset(BoardPreset::Small);
        let result = resolve_stroke(&mut board, stroke((1, 1), (1, 1)), Player::One, 0);
        assert_eq!(result, Err(StrokeError::NoSegments));
    }

    #[test]
    fn test_cap_enforced_and_zero_is_unlimited() {
        let mut board = Board::from_preset(BoardPreset::Medium);
        let long = stroke((3, 0), (3, 6));
        assert_eq!(
            resolve_stroke(&mut board, long, Player::One, 3),
            Err(StrokeError::TooLong { segments: 6, max: 3 })
        );
        let outcome = resolve_stroke(&mut board, long, Player::One, 0).unwrap();
        assert_eq!(outcome.marked().len(), 6);
    }

    #[test]
    fn test_same_player_retrace_is_already_drawn() {
        let mut board = Board::from_preset(BoardPreset::Small);
        resolve_stroke(&mut board, stroke((0, 0), (0, 2)), Player::One, 0).unwrap();
        assert_eq!(
            resolve_stroke(&mut board, stroke((0, 2), (0, 0)), Player::One, 0),
            Err(StrokeError::AlreadyDrawn)
        );
    }

    #[test]
    fn test_opponent_full_retrace_does_not_share() {
        let mut board = Board::from_preset(BoardPreset::Small);
        resolve_stroke(&mut board, stroke((0, 0), (0, 1)), Player::One, 0).unwrap();
        assert_eq!(
            resolve_stroke(&mut board, stroke((0, 0), (0, 1)), Player::Two, 0),
            Err(StrokeError::AlreadyDrawn)
        );
        let edge = board.edge_between(Coord::new(0, 0), Coord::new(0, 1)).unwrap();
        assert_eq!(board.edge_state(edge).shared_with(), None);
    }
}
