//! Lattice builder: immutable topology of points, unit edges and triangular cells.

use super::geometry::{H_SPACING, PADDING, Vec2, along_segment, in_bounds, is_collinear, v_spacing};
use super::preset::BoardPreset;
use super::types::{Coord, EdgeId, TriangleId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// A lattice point and its board-space position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Point {
    /// Lattice coordinate.
    coord: Coord,
    /// Position in board space.
    position: Vec2,
}

/// Canonical identity of an undirected edge: the endpoints in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeKey {
    low: Coord,
    high: Coord,
}

impl EdgeKey {
    /// Normalizes an endpoint pair so both traversal directions map to one key.
    pub fn new(a: Coord, b: Coord) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// The endpoint that sorts first.
    pub fn low(&self) -> Coord {
        self.low
    }

    /// The endpoint that sorts last.
    pub fn high(&self) -> Coord {
        self.high
    }
}

impl std::fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

/// A unit edge between two adjacent points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Edge {
    /// Edge id (index in [`Lattice::edges`]).
    id: EdgeId,
    /// Canonical endpoints.
    key: EdgeKey,
}

/// A minimal triangular cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Triangle {
    /// Triangle id (index in [`Lattice::triangles`]).
    id: TriangleId,
    /// Corner points.
    points: [Coord; 3],
    /// Bounding edges.
    edges: [EdgeId; 3],
}

/// Immutable board topology.
///
/// Built deterministically: the same row lengths always produce the same
/// ids and positions.
#[derive(Debug, Clone)]
pub struct Lattice {
    row_lengths: Vec<usize>,
    points: Vec<Point>,
    point_index: BTreeMap<Coord, usize>,
    edges: Vec<Edge>,
    edge_index: BTreeMap<EdgeKey, EdgeId>,
    triangles: Vec<Triangle>,
    edge_triangles: Vec<Vec<TriangleId>>,
    width: f64,
    height: f64,
}

impl Lattice {
    /// Builds the lattice for a preset.
    #[instrument]
    pub fn from_preset(preset: BoardPreset) -> Self {
        Self::from_row_lengths(preset.row_lengths())
    }

    /// Builds the lattice for an arbitrary sequence of row lengths.
    ///
    /// Rows that grow relative to their predecessor form the upper half of
    /// the diamond; rows that shrink (or stay equal) form the lower half.
    #[instrument]
    pub fn from_row_lengths(row_lengths: &[usize]) -> Self {
        let widest = row_lengths.iter().copied().max().unwrap_or(0);
        let width = widest.saturating_sub(1) as f64 * H_SPACING + PADDING * 2.0;
        let height = row_lengths.len().saturating_sub(1) as f64 * v_spacing() + PADDING * 2.0;

        let mut lattice = Self {
            row_lengths: row_lengths.to_vec(),
            points: Vec::new(),
            point_index: BTreeMap::new(),
            edges: Vec::new(),
            edge_index: BTreeMap::new(),
            triangles: Vec::new(),
            edge_triangles: Vec::new(),
            width,
            height,
        };

        lattice.build_points();
        lattice.build_edges();
        lattice.build_triangles();

        debug!(
            points = lattice.points.len(),
            edges = lattice.edges.len(),
            triangles = lattice.triangles.len(),
            "Lattice built"
        );
        lattice
    }

    fn build_points(&mut self) {
        for (row, &len) in self.row_lengths.iter().enumerate() {
            let row_width = len.saturating_sub(1) as f64 * H_SPACING;
            let offset_x = (self.width - row_width) / 2.0;
            let y = row as f64 * v_spacing() + PADDING;
            for col in 0..len {
                let coord = Coord::new(row, col);
                self.point_index.insert(coord, self.points.len());
                self.points.push(Point {
                    coord,
                    position: Vec2::new(col as f64 * H_SPACING + offset_x, y),
                });
            }
        }
    }

    fn build_edges(&mut self) {
        let rows = self.row_lengths.clone();
        for (r, &len) in rows.iter().enumerate() {
            for c in 0..len {
                let here = Coord::new(r, c);
                self.link(here, Coord::new(r, c + 1));

                let Some(&next_len) = rows.get(r + 1) else {
                    continue;
                };
                if next_len > len {
                    self.link(here, Coord::new(r + 1, c));
                    self.link(here, Coord::new(r + 1, c + 1));
                } else {
                    self.link(here, Coord::new(r + 1, c));
                    if c > 0 {
                        self.link(here, Coord::new(r + 1, c - 1));
                    }
                }
            }
        }
        self.edge_triangles = vec![Vec::new(); self.edges.len()];
    }

    /// Adds an edge if both endpoints exist and the edge is not yet present.
    fn link(&mut self, a: Coord, b: Coord) {
        if !self.point_index.contains_key(&a) || !self.point_index.contains_key(&b) {
            return;
        }
        let key = EdgeKey::new(a, b);
        if self.edge_index.contains_key(&key) {
            return;
        }
        let id = EdgeId(self.edges.len());
        self.edges.push(Edge { id, key });
        self.edge_index.insert(key, id);
    }

    fn build_triangles(&mut self) {
        let rows = self.row_lengths.clone();
        for (r, pair) in rows.windows(2).enumerate() {
            let (len, next_len) = (pair[0], pair[1]);
            if next_len > len {
                for c in 0..len {
                    self.add_triangle([
                        Coord::new(r, c),
                        Coord::new(r + 1, c),
                        Coord::new(r + 1, c + 1),
                    ]);
                    if c + 1 < len {
                        self.add_triangle([
                            Coord::new(r, c),
                            Coord::new(r, c + 1),
                            Coord::new(r + 1, c + 1),
                        ]);
                    }
                }
            } else {
                for c in 0..next_len {
                    self.add_triangle([
                        Coord::new(r, c),
                        Coord::new(r, c + 1),
                        Coord::new(r + 1, c),
                    ]);
                    if c + 1 < next_len {
                        self.add_triangle([
                            Coord::new(r, c + 1),
                            Coord::new(r + 1, c),
                            Coord::new(r + 1, c + 1),
                        ]);
                    }
                }
            }
        }
    }

    /// Adds a triangle if all three of its edges exist.
    fn add_triangle(&mut self, points: [Coord; 3]) {
        let [a, b, c] = points;
        let (Some(ab), Some(ac), Some(bc)) = (
            self.edge_between(a, b),
            self.edge_between(a, c),
            self.edge_between(b, c),
        ) else {
            return;
        };
        let id = TriangleId(self.triangles.len());
        let edges = [ab, ac, bc];
        for edge in edges {
            self.edge_triangles[edge.0].push(id);
        }
        self.triangles.push(Triangle { id, points, edges });
    }

    /// Row lengths the lattice was built from.
    pub fn row_lengths(&self) -> &[usize] {
        &self.row_lengths
    }

    /// All points, in row-major order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// All edges, in id order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// All triangles, in id order.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Board width including padding.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Board height including padding.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Looks up a point by coordinate.
    pub fn point(&self, coord: Coord) -> Option<&Point> {
        self.point_index.get(&coord).map(|&i| &self.points[i])
    }

    /// Returns true if the coordinate names a lattice point.
    pub fn contains(&self, coord: Coord) -> bool {
        self.point_index.contains_key(&coord)
    }

    /// Looks up an edge by id.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0)
    }

    /// Looks up a triangle by id.
    pub fn triangle(&self, id: TriangleId) -> Option<&Triangle> {
        self.triangles.get(id.0)
    }

    /// Returns the edge joining two points, or `None` if they are not adjacent.
    pub fn edge_between(&self, a: Coord, b: Coord) -> Option<EdgeId> {
        self.edge_index.get(&EdgeKey::new(a, b)).copied()
    }

    /// Triangles bounded by the given edge (one or two).
    pub fn triangles_of(&self, edge: EdgeId) -> &[TriangleId] {
        self.edge_triangles
            .get(edge.0)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every lattice point lying on the segment between `from` and `to`,
    /// ordered along the segment.
    ///
    /// Returns an empty list if either endpoint is not a lattice point.
    #[instrument(skip(self))]
    pub fn points_on_segment(&self, from: Coord, to: Coord) -> Vec<Coord> {
        let (Some(a), Some(b)) = (self.point(from), self.point(to)) else {
            return Vec::new();
        };
        let (a, b) = (a.position, b.position);
        let mut on_line: Vec<&Point> = self
            .points
            .iter()
            .filter(|p| in_bounds(a, b, p.position) && is_collinear(a, b, p.position))
            .collect();
        on_line.sort_by(|p, q| along_segment(&p.position, &q.position));
        on_line.into_iter().map(|p| p.coord).collect()
    }

    /// Consecutive point pairs along the segment between `from` and `to`.
    pub fn chain(&self, from: Coord, to: Coord) -> Vec<(Coord, Coord)> {
        self.points_on_segment(from, to)
            .windows(2)
            .map(|w| (w[0], w[1]))
            .collect()
    }
}
