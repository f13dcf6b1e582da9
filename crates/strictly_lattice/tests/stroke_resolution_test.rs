//! Tests for stroke validation, sharing and scoring.

use strictly_lattice::{
    Board, BoardPreset, Coord, EdgeChange, GameSession, GameSettings, Player, Stroke, StrokeError,
    TurnState, Vec2, is_aligned, resolve_stroke,
};

fn stroke(a: (usize, usize), b: (usize, usize)) -> Stroke {
    Stroke::new(Coord::new(a.0, a.1), Coord::new(b.0, b.1))
}

fn two_humans(preset: BoardPreset, max_segments: u32) -> GameSession {
    GameSession::new(GameSettings {
        preset,
        max_segments,
        bot_enabled: false,
        seed: Some(1),
    })
}

#[test]
fn test_third_side_scores_for_mover() {
    let mut session = two_humans(BoardPreset::Medium, 0);

    session.submit_stroke(stroke((0, 0), (0, 1))).unwrap();
    session.submit_stroke(stroke((0, 1), (1, 1))).unwrap();
    let outcome = session.submit_stroke(stroke((0, 0), (1, 1))).unwrap();

    assert_eq!(outcome.completed().len(), 1);
    let completed = outcome.completed()[0];
    assert_eq!(completed.scored_by, Player::One);
    let triangle = session.board().lattice().triangle(completed.triangle).unwrap();
    assert_eq!(
        *triangle.points(),
        [Coord::new(0, 0), Coord::new(0, 1), Coord::new(1, 1)]
    );
    assert_eq!(session.scores().get(Player::One), 1);
    assert_eq!(session.scores().get(Player::Two), 0);
    // Scoring does not grant another turn.
    assert_eq!(session.state(), TurnState::AwaitingPlayer2Human);
}

#[test]
fn test_long_stroke_shares_opponent_edge() {
    let mut session = two_humans(BoardPreset::Medium, 0);

    session.submit_stroke(stroke((0, 0), (0, 1))).unwrap();
    let outcome = session.submit_stroke(stroke((0, 0), (0, 3))).unwrap();

    let changes: Vec<_> = outcome.marked().iter().map(|m| m.change).collect();
    assert_eq!(
        changes,
        vec![EdgeChange::Shared, EdgeChange::Drawn, EdgeChange::Drawn]
    );

    let board = session.board();
    let shared = board.edge_between(Coord::new(0, 0), Coord::new(0, 1)).unwrap();
    assert_eq!(board.edge_state(shared).owner(), Some(Player::One));
    assert_eq!(board.edge_state(shared).shared_with(), Some(Player::Two));
    assert!(board.edge_state(shared).is_shared());
    for (a, b) in [((0, 1), (0, 2)), ((0, 2), (0, 3))] {
        let edge = board
            .edge_between(Coord::new(a.0, a.1), Coord::new(b.0, b.1))
            .unwrap();
        assert_eq!(board.edge_state(edge).owner(), Some(Player::Two));
        assert_eq!(board.edge_state(edge).shared_with(), None);
    }
}

#[test]
fn test_shared_edge_completes_triangle_for_tracer() {
    let mut board = Board::from_preset(BoardPreset::Medium);
    resolve_stroke(&mut board, stroke((1, 1), (2, 2)), Player::One, 0).unwrap();
    resolve_stroke(&mut board, stroke((0, 0), (0, 1)), Player::One, 0).unwrap();
    resolve_stroke(&mut board, stroke((0, 1), (1, 1)), Player::One, 0).unwrap();

    // Player 2 traces over (1,1)-(2,2) and closes the triangle with (0,0)-(1,1).
    let outcome = resolve_stroke(&mut board, stroke((0, 0), (2, 2)), Player::Two, 0).unwrap();
    let changes: Vec<_> = outcome.marked().iter().map(|m| m.change).collect();
    assert_eq!(changes, vec![EdgeChange::Drawn, EdgeChange::Shared]);
    assert_eq!(outcome.completed().len(), 1);
    assert_eq!(outcome.completed()[0].scored_by, Player::Two);
}

#[test]
fn test_resubmitting_drawn_stroke_changes_nothing() {
    let mut board = Board::from_preset(BoardPreset::Small);
    resolve_stroke(&mut board, stroke((1, 0), (1, 3)), Player::One, 0).unwrap();
    let edges = board.edge_states().to_vec();
    let scores = board.scores();

    for player in [Player::One, Player::Two] {
        assert_eq!(
            resolve_stroke(&mut board, stroke((1, 0), (1, 3)), player, 0),
            Err(StrokeError::AlreadyDrawn)
        );
    }
    assert_eq!(board.edge_states(), edges.as_slice());
    assert_eq!(board.scores(), scores);
}

#[test]
fn test_validation_order() {
    let mut board = Board::from_preset(BoardPreset::Medium);
    assert_eq!(
        resolve_stroke(&mut board, stroke((0, 0), (1, 3)), Player::One, 0),
        Err(StrokeError::InvalidAngle)
    );
    assert_eq!(
        resolve_stroke(&mut board, stroke((2, 2), (2, 2)), Player::One, 0),
        Err(StrokeError::NoSegments)
    );
    assert_eq!(
        resolve_stroke(&mut board, stroke((3, 0), (3, 4)), Player::One, 2),
        Err(StrokeError::TooLong { segments: 4, max: 2 })
    );
    assert_eq!(board.filled_count(), 0);
    assert_eq!(board.undrawn_edges().count(), 90);
}

#[test]
fn test_multiple_triangles_in_one_stroke() {
    let mut board = Board::from_preset(BoardPreset::Small);
    for (a, b) in [((0, 0), (1, 0)), ((0, 0), (1, 1)), ((0, 1), (1, 1)), ((0, 1), (1, 2))] {
        resolve_stroke(&mut board, stroke(a, b), Player::One, 0).unwrap();
    }

    // Closes {(0,0),(1,0),(1,1)} and {(0,1),(1,1),(1,2)} at once.
    let outcome = resolve_stroke(&mut board, stroke((1, 0), (1, 2)), Player::Two, 0).unwrap();
    assert_eq!(outcome.completed().len(), 2);
    assert_eq!(board.scores().get(Player::Two), 2);

    let outcome = resolve_stroke(&mut board, stroke((0, 0), (0, 1)), Player::One, 0).unwrap();
    assert_eq!(outcome.completed().len(), 1);
    assert_eq!(board.scores().get(Player::One), 1);
    assert_eq!(board.scores().total() as usize, board.filled_count());
}

#[test]
fn test_angle_tolerance_boundary() {
    let origin = Vec2::new(0.0, 0.0);
    let at = |degrees: f64| {
        let r = degrees.to_radians();
        Vec2::new(300.0 * r.cos(), 300.0 * r.sin())
    };
    assert!(is_aligned(origin, at(61.4)));
    assert!(!is_aligned(origin, at(61.6)));
    assert!(is_aligned(origin, at(178.6)));
    assert!(!is_aligned(origin, at(178.4)));
}
