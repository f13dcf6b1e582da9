//! Computer participant driven by the heuristic engine.

use super::Participant;
use anyhow::Result;
use strictly_lattice::{GameSession, HeuristicEngine, Stroke};
use tracing::{debug, instrument};

/// Participant that picks strokes with [`HeuristicEngine`].
pub struct HeuristicPlayer {
    name: String,
    engine: HeuristicEngine,
}

impl HeuristicPlayer {
    /// Creates a participant with a deterministic seed, or OS entropy when `None`.
    pub fn new(name: impl Into<String>, seed: Option<u64>) -> Self {
        let engine = match seed {
            Some(seed) => HeuristicEngine::seeded(seed),
            None => HeuristicEngine::from_entropy(),
        };
        Self {
            name: name.into(),
            engine,
        }
    }
}

impl Participant for HeuristicPlayer {
    #[instrument(skip(self, session), fields(name = %self.name))]
    fn next_stroke(&mut self, session: &GameSession) -> Result<Option<Stroke>> {
        let Some(player) = session.current_player() else {
            return Ok(None);
        };
        let stroke = self
            .engine
            .select_move(session.board(), player, session.settings().max_segments);
        debug!(?stroke, "Heuristic choice");
        Ok(stroke)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
