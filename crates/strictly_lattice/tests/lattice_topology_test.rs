//! Tests for lattice construction.

use strictly_lattice::{BoardPreset, Coord, EdgeKey, H_SPACING, Lattice};
use strum::IntoEnumIterator;

#[test]
fn test_counts_per_preset() {
    let expected = [
        (BoardPreset::Small, 19, 42, 24),
        (BoardPreset::Medium, 37, 90, 54),
        (BoardPreset::Large, 61, 156, 96),
    ];
    for (preset, points, edges, triangles) in expected {
        let lattice = Lattice::from_preset(preset);
        assert_eq!(lattice.points().len(), points, "{preset} points");
        assert_eq!(lattice.edges().len(), edges, "{preset} edges");
        assert_eq!(lattice.triangles().len(), triangles, "{preset} triangles");
    }
}

#[test]
fn test_build_is_deterministic() {
    for preset in BoardPreset::iter() {
        let first = Lattice::from_preset(preset);
        let second = Lattice::from_preset(preset);
        assert_eq!(first.points(), second.points());
        assert_eq!(first.edges(), second.edges());
        assert_eq!(first.triangles(), second.triangles());
    }
}

#[test]
fn test_edge_lookup_ignores_direction() {
    let lattice = Lattice::from_preset(BoardPreset::Medium);
    for a in lattice.points() {
        for b in lattice.points() {
            let (a, b) = (*a.coord(), *b.coord());
            assert_eq!(lattice.edge_between(a, b), lattice.edge_between(b, a));
            assert_eq!(EdgeKey::new(a, b), EdgeKey::new(b, a));
        }
    }
}

#[test]
fn test_edges_join_exactly_the_unit_distance_pairs() {
    for preset in BoardPreset::iter() {
        let lattice = Lattice::from_preset(preset);
        for (i, a) in lattice.points().iter().enumerate() {
            for b in &lattice.points()[i + 1..] {
                let dx = a.position().x - b.position().x;
                let dy = a.position().y - b.position().y;
                let unit = ((dx * dx + dy * dy).sqrt() - H_SPACING).abs() < 1e-6;
                let linked = lattice.edge_between(*a.coord(), *b.coord()).is_some();
                assert_eq!(unit, linked, "{preset}: {} {}", a.coord(), b.coord());
            }
        }
    }
}

#[test]
fn test_triangle_edges_match_corners() {
    let lattice = Lattice::from_preset(BoardPreset::Large);
    for triangle in lattice.triangles() {
        let [a, b, c] = *triangle.points();
        let mut expected = [
            lattice.edge_between(a, b).unwrap(),
            lattice.edge_between(a, c).unwrap(),
            lattice.edge_between(b, c).unwrap(),
        ];
        let mut actual = *triangle.edges();
        expected.sort();
        actual.sort();
        assert_eq!(expected, actual);
    }
}

#[test]
fn test_medium_upper_left_triangle_present() {
    let lattice = Lattice::from_preset(BoardPreset::Medium);
    let corners = [Coord::new(0, 0), Coord::new(0, 1), Coord::new(1, 1)];
    assert!(
        lattice
            .triangles()
            .iter()
            .any(|t| *t.points() == corners)
    );
}
