//! Pure game logic for the triangle-claiming lattice game.
//!
//! Players draw strokes between points of a diamond-shaped triangular
//! lattice. A stroke is decomposed into unit edges; drawing the last edge
//! of a triangular cell scores that cell for the player who drew it.
//!
//! # Architecture
//!
//! - **Lattice**: immutable topology (points, edges, triangles) built from a preset
//! - **Board**: mutable drawn/filled state plus the score tally
//! - **Resolver**: validates and applies strokes
//! - **Session**: turn controller, selection state and bot dispatch
//! - **Engine**: heuristic move selection for the computer opponent
//!
//! # Example
//!
//! ```
//! use strictly_lattice::{Coord, GameSession, GameSettings, TurnState};
//!
//! let mut session = GameSession::new(GameSettings::default());
//! session.select_point(Coord::new(0, 0)).unwrap();
//! session.select_point(Coord::new(0, 1)).unwrap();
//! let outcome = session.confirm_stroke().unwrap();
//! assert_eq!(outcome.marked().len(), 1);
//! assert_eq!(session.state(), TurnState::AwaitingPlayer2Human);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod contracts;
mod engine;
mod geometry;
pub mod invariants;
mod lattice;
mod phases;
mod preset;
mod resolver;
mod session;
mod types;

pub use board::{Board, EdgeState, TriangleState};
pub use contracts::{Contract, LegalStroke, MonotonicProgress, StrokeContract};
pub use engine::{Candidate, HeuristicEngine, NATIVE_STROKE_LENGTH, candidates, target_length};
pub use geometry::{
    ANGLE_TOLERANCE_DEG, COLLINEAR_EPSILON, H_SPACING, PADDING, Vec2, is_aligned, v_spacing,
};
pub use lattice::{Edge, EdgeKey, Lattice, Point, Triangle};
pub use phases::Outcome;
pub use preset::BoardPreset;
pub use resolver::{
    CompletedTriangle, EdgeChange, EdgeMark, Stroke, StrokeError, StrokeOutcome, resolve_stroke,
};
pub use session::{BotTurn, GameSession, GameSettings, Selection, SessionError, TurnState};
pub use types::{Coord, EdgeId, Player, Scores, TriangleId};
