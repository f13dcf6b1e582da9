//! Grid state: which edges are drawn, which triangles are filled, and the score.

use super::lattice::Lattice;
use super::preset::BoardPreset;
use super::types::{Coord, EdgeId, Player, Scores, TriangleId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Mutable state of one unit edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeState {
    drawn: bool,
    owner: Option<Player>,
    shared_with: Option<Player>,
}

impl EdgeState {
    /// Whether the edge has been drawn.
    pub fn drawn(&self) -> bool {
        self.drawn
    }

    /// Player who first drew the edge.
    pub fn owner(&self) -> Option<Player> {
        self.owner
    }

    /// Player who later traced over the edge, if different from the owner.
    pub fn shared_with(&self) -> Option<Player> {
        self.shared_with
    }

    /// Returns true if the edge is drawn and has been traced by the other player.
    pub fn is_shared(&self) -> bool {
        self.drawn && self.shared_with.is_some() && self.shared_with != self.owner
    }
}

/// Mutable state of one triangular cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriangleState {
    filled: bool,
    scored_by: Option<Player>,
}

impl TriangleState {
    /// Whether the triangle has been completed.
    pub fn filled(&self) -> bool {
        self.filled
    }

    /// Player who drew the completing edge.
    pub fn scored_by(&self) -> Option<Player> {
        self.scored_by
    }
}

/// The board: immutable lattice topology plus the mutable play state.
///
/// Edges only ever move toward drawn and triangles toward filled; the only
/// way back is building a new board.
#[derive(Debug, Clone)]
pub struct Board {
    lattice: Lattice,
    edges: Vec<EdgeState>,
    triangles: Vec<TriangleState>,
    scores: Scores,
}

impl Board {
    /// Creates an empty board over the given lattice.
    #[instrument(skip(lattice))]
    pub fn new(lattice: Lattice) -> Self {
        let edges = vec![EdgeState::default(); lattice.edges().len()];
        let triangles = vec![TriangleState::default(); lattice.triangles().len()];
        Self {
            lattice,
            edges,
            triangles,
            scores: Scores::default(),
        }
    }

    /// Creates an empty board for a preset.
    #[instrument]
    pub fn from_preset(preset: BoardPreset) -> Self {
        Self::new(Lattice::from_preset(preset))
    }

    /// The board topology.
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Current score tally.
    pub fn scores(&self) -> Scores {
        self.scores
    }

    /// State of an edge. Unknown ids read as undrawn.
    pub fn edge_state(&self, id: EdgeId) -> EdgeState {
        self.edges.get(id.0).copied().unwrap_or_default()
    }

    /// State of a triangle. Unknown ids read as unfilled.
    pub fn triangle_state(&self, id: TriangleId) -> TriangleState {
        self.triangles.get(id.0).copied().unwrap_or_default()
    }

    /// Edge states in id order.
    pub fn edge_states(&self) -> &[EdgeState] {
        &self.edges
    }

    /// Triangle states in id order.
    pub fn triangle_states(&self) -> &[TriangleState] {
        &self.triangles
    }

    /// Returns the edge joining two points, or `None` if they are not adjacent.
    pub fn edge_between(&self, a: Coord, b: Coord) -> Option<EdgeId> {
        self.lattice.edge_between(a, b)
    }

    /// Triangles bounded by the given edge.
    pub fn triangles_of(&self, edge: EdgeId) -> &[TriangleId] {
        self.lattice.triangles_of(edge)
    }

    /// Returns true if the edge has been drawn.
    pub fn is_drawn(&self, id: EdgeId) -> bool {
        self.edge_state(id).drawn
    }

    /// Number of triangles on the board.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Number of filled triangles.
    pub fn filled_count(&self) -> usize {
        self.triangles.iter().filter(|t| t.filled).count()
    }

    /// Returns true once every triangle is filled.
    pub fn is_full(&self) -> bool {
        self.triangles.iter().all(|t| t.filled)
    }

    /// Ids of edges nobody has drawn yet.
    pub fn undrawn_edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.drawn)
            .map(|(i, _)| EdgeId(i))
    }

    /// Number of drawn edges around a triangle.
    pub fn drawn_sides(&self, id: TriangleId) -> usize {
        self.lattice
            .triangle(id)
            .map(|t| t.edges().iter().filter(|&&e| self.is_drawn(e)).count())
            .unwrap_or(0)
    }

    pub(crate) fn draw_edge(&mut self, id: EdgeId, player: Player) {
        if let Some(edge) = self.edges.get_mut(id.0) {
            edge.drawn = true;
            edge.owner = Some(player);
        }
    }

    pub(crate) fn share_edge(&mut self, id: EdgeId, player: Player) {
        if let Some(edge) = self.edges.get_mut(id.0) {
            edge.shared_with = Some(player);
        }
    }

    pub(crate) fn fill_triangle(&mut self, id: TriangleId, player: Player) {
        if let Some(triangle) = self.triangles.get_mut(id.0)
            && !triangle.filled
        {
            triangle.filled = true;
            triangle.scored_by = Some(player);
            self.scores.increment(player);
        }
    }

    #[cfg(test)]
    pub(crate) fn corrupt_score(&mut self, player: Player) {
        self.scores.increment(player);
    }
}
