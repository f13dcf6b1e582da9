//! Match orchestration between two seats.

use crate::config::GameConfig;
use crate::players::Participant;
use anyhow::Result;
use std::time::Duration;
use strictly_lattice::{
    BotTurn, GameSession, Outcome, Player, Scores, SessionError, Stroke, StrokeOutcome, TurnState,
};
use tracing::{debug, info, instrument, warn};

/// Notifications sent from the orchestrator to the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The computer is about to move.
    BotThinking {
        /// Display name of the computer seat.
        name: String,
    },
    /// A stroke was applied.
    StrokePlayed {
        /// Display name of the mover.
        name: String,
        /// What the stroke changed.
        outcome: StrokeOutcome,
    },
    /// A stroke was refused; the same player moves again.
    StrokeRejected {
        /// Display name of the mover.
        name: String,
        /// The refused stroke.
        stroke: Stroke,
        /// Why it was refused.
        error: SessionError,
    },
    /// A participant left before the end.
    Abandoned {
        /// Display name of the player who left.
        name: String,
    },
    /// Every triangle is filled.
    GameOver {
        /// Winner or draw.
        outcome: Outcome,
        /// Final tally.
        scores: Scores,
    },
}

/// Summary of a finished or abandoned match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchReport {
    /// Final tally.
    pub scores: Scores,
    /// Winner or draw; `None` when the match was abandoned.
    pub outcome: Option<Outcome>,
    /// Strokes applied.
    pub moves: usize,
    /// Strokes refused.
    pub rejections: usize,
}

/// Drives a [`GameSession`] to the end.
///
/// Player 1 always comes from a participant. Player 2 is the session's own
/// computer opponent when the bot is enabled, the second participant when one
/// is given, and otherwise the first participant again (one terminal for both
/// players).
///
/// Participant-driven seats are shown under the participant's name; the
/// computer seat and a shared-terminal player 2 use the configured names.
pub struct Orchestrator {
    session: GameSession,
    player_one: Box<dyn Participant>,
    player_two: Option<Box<dyn Participant>>,
    names: [String; 2],
    bot_delay: Duration,
}

impl Orchestrator {
    /// Creates a new orchestrator with a fresh session built from `config`.
    #[instrument(skip_all)]
    pub fn new(
        config: &GameConfig,
        player_one: Box<dyn Participant>,
        player_two: Option<Box<dyn Participant>>,
    ) -> Self {
        if config.game().bot_enabled && player_two.is_some() {
            warn!("Computer opponent enabled; second participant will not be asked to move");
        }
        let second = match player_two.as_ref() {
            Some(two) if !config.game().bot_enabled => two.name(),
            _ => config.player_name(Player::Two),
        };
        let names = [player_one.name().to_string(), second.to_string()];
        Self {
            session: GameSession::new(*config.game()),
            player_one,
            player_two,
            names,
            bot_delay: config.bot_delay(),
        }
    }

    /// The session being played.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Display name for a seat.
    pub fn name(&self, player: Player) -> &str {
        match player {
            Player::One => &self.names[0],
            Player::Two => &self.names[1],
        }
    }

    /// Runs the game loop, reporting each event to `observe`.
    #[instrument(skip_all)]
    pub fn run(
        &mut self,
        mut observe: impl FnMut(&GameSession, &GameEvent),
    ) -> Result<MatchReport> {
        info!(
            player_one = %self.names[0],
            player_two = %self.names[1],
            "Starting match"
        );
        let mut moves = 0;
        let mut rejections = 0;

        loop {
            let state = self.session.state();
            match state {
                TurnState::GameOver => break,
                TurnState::AwaitingPlayer2Bot => {
                    let name = self.names[1].clone();
                    observe(&self.session, &GameEvent::BotThinking { name: name.clone() });
                    if !self.bot_delay.is_zero() {
                        // Play is single-threaded; blocking here only paces the output.
                        std::thread::sleep(self.bot_delay);
                    }
                    match self.session.play_bot_turn()? {
                        BotTurn::Played(outcome) => {
                            moves += 1;
                            observe(&self.session, &GameEvent::StrokePlayed { name, outcome });
                        }
                        BotTurn::Stalled => warn!("Computer could not move"),
                    }
                }
                TurnState::AwaitingPlayer1 | TurnState::AwaitingPlayer2Human => {
                    let Some(player) = state.player() else {
                        break;
                    };
                    let name = self.name(player).to_string();
                    let seat = match (player, self.player_two.as_mut()) {
                        (Player::Two, Some(two)) => two,
                        _ => &mut self.player_one,
                    };

                    debug!(player = %name, "Waiting for stroke");
                    let Some(stroke) = seat.next_stroke(&self.session)? else {
                        info!(player = %name, "Participant left the match");
                        observe(&self.session, &GameEvent::Abandoned { name });
                        return Ok(MatchReport {
                            scores: self.session.scores(),
                            outcome: None,
                            moves,
                            rejections,
                        });
                    };

                    match submit_selection(&mut self.session, stroke) {
                        Ok(outcome) => {
                            moves += 1;
                            observe(&self.session, &GameEvent::StrokePlayed { name, outcome });
                        }
                        Err(error) => {
                            rejections += 1;
                            warn!(player = %name, %stroke, %error, "Stroke rejected");
                            observe(
                                &self.session,
                                &GameEvent::StrokeRejected {
                                    name,
                                    stroke,
                                    error,
                                },
                            );
                        }
                    }
                }
            }
        }

        let scores = self.session.scores();
        let outcome = self
            .session
            .outcome()
            .unwrap_or_else(|| Outcome::from_scores(scores));
        observe(&self.session, &GameEvent::GameOver { outcome, scores });
        info!(%outcome, %scores, moves, "Match finished");
        Ok(MatchReport {
            scores,
            outcome: Some(outcome),
            moves,
            rejections,
        })
    }
}

/// Feeds a stroke through the session's selection commands.
fn submit_selection(
    session: &mut GameSession,
    stroke: Stroke,
) -> Result<StrokeOutcome, SessionError> {
    session.cancel_selection();
    let result = select_and_confirm(session, stroke);
    if result.is_err() {
        session.cancel_selection();
    }
    result
}

fn select_and_confirm(
    session: &mut GameSession,
    stroke: Stroke,
) -> Result<StrokeOutcome, SessionError> {
    session.select_point(stroke.from)?;
    session.select_point(stroke.to)?;
    session.confirm_stroke()
}
