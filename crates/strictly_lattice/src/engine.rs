//! Heuristic move selection for the computer opponent.
//!
//! The engine prefers strokes of the full configured length and picks, in
//! order: a stroke that completes a triangle, a random stroke that leaves no
//! triangle one edge short, any random full-length stroke, and finally a
//! shorter stroke or a single random edge.

use super::board::Board;
use super::geometry::is_aligned;
use super::resolver::Stroke;
use super::types::{EdgeId, Player};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, instrument};

/// Stroke length the engine aims for when strokes are uncapped.
pub const NATIVE_STROKE_LENGTH: usize = 3;

/// A legal stroke and the unit edges it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    stroke: Stroke,
    edges: Vec<EdgeId>,
}

impl Candidate {
    /// The stroke.
    pub fn stroke(&self) -> Stroke {
        self.stroke
    }

    /// Unit edges in stroke order.
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    /// Number of sides of each unfilled triangle that would be drawn after this stroke.
    fn sides_after<'a>(&'a self, board: &'a Board) -> impl Iterator<Item = usize> + 'a {
        board
            .lattice()
            .triangles()
            .iter()
            .filter(|t| !board.triangle_state(*t.id()).filled())
            .map(|t| {
                t.edges()
                    .iter()
                    .filter(|e| self.edges.contains(e) || board.is_drawn(**e))
                    .count()
            })
    }

    /// Would this stroke complete some triangle?
    pub fn completes_triangle(&self, board: &Board) -> bool {
        self.sides_after(board).any(|sides| sides == 3)
    }

    /// Would this stroke leave some triangle with exactly two sides drawn?
    pub fn leaves_opening(&self, board: &Board) -> bool {
        self.sides_after(board).any(|sides| sides == 2)
    }
}

/// Stroke length the engine searches for under a segment cap (0 = uncapped).
pub fn target_length(max_segments: u32) -> usize {
    if max_segments == 0 {
        NATIVE_STROKE_LENGTH
    } else {
        max_segments as usize
    }
}

/// Enumerates every aligned stroke of exactly `length` unit edges that
/// would draw at least one new edge.
#[instrument(skip(board))]
pub fn candidates(board: &Board, length: usize) -> Vec<Candidate> {
    let lattice = board.lattice();
    let points = lattice.points();
    let mut found = Vec::new();

    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            let pairs = lattice.chain(*a.coord(), *b.coord());
            if pairs.len() != length || !is_aligned(*a.position(), *b.position()) {
                continue;
            }
            let Some(edges) = pairs
                .iter()
                .map(|&(p, q)| lattice.edge_between(p, q))
                .collect::<Option<Vec<_>>>()
            else {
                continue;
            };
            if edges.iter().all(|&e| board.is_drawn(e)) {
                continue;
            }
            found.push(Candidate {
                stroke: Stroke::new(*a.coord(), *b.coord()),
                edges,
            });
        }
    }

    debug!(length, count = found.len(), "Enumerated candidates");
    found
}

/// Heuristic opponent with an injected random source.
#[derive(Debug, Clone)]
pub struct HeuristicEngine<R = ChaCha8Rng> {
    rng: R,
}

impl HeuristicEngine<ChaCha8Rng> {
    /// Creates an engine with deterministic tie-breaking.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Creates an engine seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::with_rng(ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> HeuristicEngine<R> {
    /// Creates an engine using the given random source.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Chooses a stroke for `player`, or `None` if no undrawn edge remains.
    #[instrument(skip(self, board, player), fields(player = %player))]
    pub fn select_move(
        &mut self,
        board: &Board,
        player: Player,
        max_segments: u32,
    ) -> Option<Stroke> {
        let length = target_length(max_segments);
        let full = candidates(board, length);

        if let Some(winning) = full.iter().find(|c| c.completes_triangle(board)) {
            debug!(stroke = %winning.stroke, "Choosing scoring stroke");
            return Some(winning.stroke);
        }

        let safe: Vec<&Candidate> = full.iter().filter(|c| !c.leaves_opening(board)).collect();
        if let Some(choice) = safe.choose(&mut self.rng) {
            debug!(stroke = %choice.stroke, options = safe.len(), "Choosing safe stroke");
            return Some(choice.stroke);
        }

        if let Some(choice) = full.choose(&mut self.rng) {
            debug!(stroke = %choice.stroke, options = full.len(), "Choosing risky stroke");
            return Some(choice.stroke);
        }

        self.fallback(board, length)
    }

    /// No full-length stroke exists: try one edge shorter, then any single edge.
    fn fallback(&mut self, board: &Board, length: usize) -> Option<Stroke> {
        if length > 1
            && let Some(shorter) = candidates(board, length - 1).into_iter().next()
        {
            debug!(stroke = %shorter.stroke, "Choosing shorter stroke");
            return Some(shorter.stroke);
        }

        let undrawn: Vec<EdgeId> = board.undrawn_edges().collect();
        let edge = undrawn.choose(&mut self.rng)?;
        let key = *board.lattice().edge(*edge)?.key();
        debug!(edge = %key, "Choosing single edge");
        Some(Stroke::new(key.low(), key.high()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoardPreset, Coord, Lattice, resolve_stroke};

    fn draw(board: &mut Board, a: (usize, usize), b: (usize, usize), player: Player) {
        let stroke = Stroke::new(Coord::new(a.0, a.1), Coord::new(b.0, b.1));
        resolve_stroke(board, stroke, player, 0).unwrap();
    }

    #[test]
    fn test_candidates_have_exact_length() {
        let board = Board::from_preset(BoardPreset::Small);
        let found = candidates(&board, 3);
        assert!(!found.is_empty());
        assert!(found.iter().all(|c| c.edges().len() == 3));
    }

    #[test]
    fn test_fully_drawn_strokes_excluded() {
        let mut board = Board::from_preset(BoardPreset::Small);
        draw(&mut board, (2, 0), (2, 3), Player::One);
        let found = candidates(&board, 3);
        assert!(
            !found
                .iter()
                .any(|c| c.stroke() == Stroke::new(Coord::new(2, 0), Coord::new(2, 3)))
        );
        // Overlapping stroke with one fresh edge is still a candidate.
        assert!(
            found
                .iter()
                .any(|c| c.stroke() == Stroke::new(Coord::new(2, 1), Coord::new(2, 4)))
        );
    }

    #[test]
    fn test_prefers_scoring_stroke() {
        let mut board = Board::from_preset(BoardPreset::Small);
        // Two sides of the top-left upward triangle {(0,0),(1,0),(1,1)}.
        draw(&mut board, (0, 0), (1, 0), Player::One);
        draw(&mut board, (0, 0), (1, 1), Player::Two);
        let mut engine = HeuristicEngine::seeded(7);
        let stroke = engine.select_move(&board, Player::Two, 3).unwrap();
        let outcome = resolve_stroke(&mut board, stroke, Player::Two, 3).unwrap();
        assert!(outcome.scored());
    }

    #[test]
    fn test_selection_is_deterministic_for_seed() {
        let board = Board::from_preset(BoardPreset::Medium);
        let first = HeuristicEngine::seeded(42).select_move(&board, Player::Two, 3);
        let second = HeuristicEngine::seeded(42).select_move(&board, Player::Two, 3);
        assert_eq!(first, second);
    }

    #[test]
    fn test_safe_stroke_leaves_no_opening() {
        let board = Board::from_preset(BoardPreset::Medium);
        let mut engine = HeuristicEngine::seeded(3);
        let stroke = engine.select_move(&board, Player::Two, 3).unwrap();
        let chosen = candidates(&board, 3)
            .into_iter()
            .find(|c| c.stroke() == stroke)
            .unwrap();
        assert!(!chosen.leaves_opening(&board));
    }

    /// Draws every edge except `keep`, one edge per stroke, alternating players.
    fn draw_all_except(board: &mut Board, keep: &[(Coord, Coord)]) {
        let kept: Vec<EdgeId> = keep
            .iter()
            .filter_map(|&(a, b)| board.edge_between(a, b))
            .collect();
        let keys: Vec<_> = board.lattice().edges().iter().map(|e| (*e.id(), *e.key())).collect();
        let mut player = Player::One;
        for (id, key) in keys {
            if kept.contains(&id) {
                continue;
            }
            resolve_stroke(board, Stroke::new(key.low(), key.high()), player, 1).unwrap();
            player = player.opponent();
        }
    }

    /// One triangle: `(0,0)`, `(1,0)`, `(1,1)`.
    fn single_cell() -> Board {
        Board::new(Lattice::from_row_lengths(&[1, 2]))
    }

    #[test]
    fn test_risky_stroke_when_nothing_is_safe() {
        let mut board = single_cell();
        draw(&mut board, (1, 0), (1, 1), Player::One);

        let options = candidates(&board, 1);
        assert_eq!(options.len(), 2);
        assert!(options.iter().all(|c| c.leaves_opening(&board)));
        assert!(!options.iter().any(|c| c.completes_triangle(&board)));

        let stroke = HeuristicEngine::seeded(5)
            .select_move(&board, Player::Two, 1)
            .unwrap();
        assert!(options.iter().any(|c| c.stroke() == stroke));
    }

    #[test]
    fn test_falls_back_to_shorter_stroke() {
        let mut board = Board::from_preset(BoardPreset::Small);
        let open = (Coord::new(0, 0), Coord::new(0, 1));
        draw_all_except(&mut board, &[open]);
        assert!(candidates(&board, 3).is_empty());

        let stroke = HeuristicEngine::seeded(1).select_move(&board, Player::One, 3);
        assert_eq!(stroke, Some(Stroke::new(Coord::new(0, 0), Coord::new(0, 2))));

        let stroke = HeuristicEngine::seeded(1).select_move(&board, Player::One, 1);
        assert_eq!(stroke, Some(Stroke::new(open.0, open.1)));
    }

    #[test]
    fn test_falls_back_to_single_edge() {
        let mut board = single_cell();
        draw(&mut board, (0, 0), (1, 0), Player::One);
        assert!(candidates(&board, 3).is_empty());
        assert!(candidates(&board, 2).is_empty());

        let stroke = HeuristicEngine::seeded(9)
            .select_move(&board, Player::Two, 3)
            .unwrap();
        let edge = board.edge_between(stroke.from, stroke.to).unwrap();
        assert!(!board.is_drawn(edge));
    }

    #[test]
    fn test_full_board_yields_nothing() {
        let mut board = Board::from_preset(BoardPreset::Small);
        draw_all_except(&mut board, &[]);
        assert!(board.is_full());
        assert_eq!(HeuristicEngine::seeded(2).select_move(&board, Player::One, 3), None);
        assert_eq!(HeuristicEngine::seeded(2).select_move(&board, Player::One, 1), None);
    }

    #[test]
    fn test_uncapped_uses_native_length() {
        assert_eq!(target_length(0), NATIVE_STROKE_LENGTH);
        assert_eq!(target_length(2), 2);
    }
}
