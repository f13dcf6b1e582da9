//! Seats that produce strokes for the orchestrator.

mod heuristic;
mod human;

pub use heuristic::HeuristicPlayer;
pub use human::{HumanPlayer, parse_stroke};

use anyhow::Result;
use strictly_lattice::{GameSession, Stroke};

/// Anything that can choose a stroke for the player to move.
pub trait Participant {
    /// Chooses the next stroke.
    ///
    /// Returns `None` when the participant leaves the match.
    fn next_stroke(&mut self, session: &GameSession) -> Result<Option<Stroke>>;

    /// Returns the participant's display name.
    fn name(&self) -> &str;
}
