//! Turn controller: game session, endpoint selection and bot dispatch.

use super::board::Board;
use super::engine::HeuristicEngine;
use super::phases::Outcome;
use super::preset::BoardPreset;
use super::resolver::{Stroke, StrokeError, StrokeOutcome, resolve_stroke};
use super::types::{Coord, Player, Scores};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Settings a session is built from. Changing the preset or the bot flag
/// rebuilds the board from scratch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Board size.
    pub preset: BoardPreset,
    /// Maximum unit edges per stroke; 0 means unlimited.
    pub max_segments: u32,
    /// Whether player 2 is the computer.
    pub bot_enabled: bool,
    /// Seed for the computer's tie-breaking; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            preset: BoardPreset::Medium,
            max_segments: 3,
            bot_enabled: false,
            seed: None,
        }
    }
}

/// Whose input the session is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnState {
    /// Player 1 to move.
    AwaitingPlayer1,
    /// Human player 2 to move.
    AwaitingPlayer2Human,
    /// Computer player 2 to move.
    AwaitingPlayer2Bot,
    /// Every triangle is filled (or play cannot progress).
    GameOver,
}

impl TurnState {
    /// The player to move, if the game is not over.
    pub fn player(self) -> Option<Player> {
        match self {
            TurnState::AwaitingPlayer1 => Some(Player::One),
            TurnState::AwaitingPlayer2Human | TurnState::AwaitingPlayer2Bot => Some(Player::Two),
            TurnState::GameOver => None,
        }
    }
}

/// Endpoints chosen so far for the stroke being built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// Nothing selected.
    #[default]
    Empty,
    /// First endpoint chosen.
    First(Coord),
    /// Both endpoints chosen; waiting for confirm or cancel.
    Both(Coord, Coord),
}

/// Error returned by session commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SessionError {
    /// The game has ended.
    #[display("Game is already over")]
    GameOver,

    /// A human command arrived while the computer is to move.
    #[display("It's the computer's turn")]
    NotHumanTurn,

    /// A bot command arrived while a human is to move.
    #[display("It's not the computer's turn")]
    NotBotTurn,

    /// The coordinate is not a lattice point.
    #[display("No point at {}", _0)]
    UnknownPoint(Coord),

    /// Confirm was requested before two endpoints were selected.
    #[display("Select two points first")]
    IncompleteSelection,

    /// The stroke was rejected.
    #[display("Invalid stroke: {}", _0)]
    Stroke(StrokeError),
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Stroke(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StrokeError> for SessionError {
    fn from(err: StrokeError) -> Self {
        SessionError::Stroke(err)
    }
}

/// Result of asking the computer to move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotTurn {
    /// The computer's stroke was applied.
    Played(StrokeOutcome),
    /// The computer found no playable stroke; the game was ended.
    Stalled,
}

/// A single game between player 1 and player 2 (human or computer).
///
/// All mutation goes through the command methods; exactly one stroke is
/// resolved at a time.
#[derive(Debug, Clone)]
pub struct GameSession {
    settings: GameSettings,
    board: Board,
    state: TurnState,
    selection: Selection,
    engine: HeuristicEngine,
    outcome: Option<Outcome>,
}

impl GameSession {
    /// Starts a fresh game with player 1 to move.
    #[instrument]
    pub fn new(settings: GameSettings) -> Self {
        let engine = match settings.seed {
            Some(seed) => HeuristicEngine::seeded(seed),
            None => HeuristicEngine::from_entropy(),
        };
        let mut session = Self {
            settings,
            board: Board::from_preset(settings.preset),
            state: TurnState::AwaitingPlayer1,
            selection: Selection::Empty,
            engine,
            outcome: None,
        };
        if session.board.is_full() {
            session.finish();
        }
        info!(
            preset = %settings.preset,
            max_segments = settings.max_segments,
            bot = settings.bot_enabled,
            triangles = session.board.triangle_count(),
            "New game"
        );
        session
    }

    /// Current settings.
    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current turn state.
    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Player to move, if the game is not over.
    pub fn current_player(&self) -> Option<Player> {
        self.state.player()
    }

    /// Endpoints selected so far.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Score tally.
    pub fn scores(&self) -> Scores {
        self.board.scores()
    }

    /// Returns true once the game has ended.
    pub fn is_over(&self) -> bool {
        self.state == TurnState::GameOver
    }

    /// Final result, once the game has ended.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Starts over with the same settings.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        *self = Self::new(self.settings);
    }

    /// Switches board size. Rebuilds the board.
    #[instrument(skip(self))]
    pub fn set_preset(&mut self, preset: BoardPreset) {
        self.settings.preset = preset;
        self.reset();
    }

    /// Turns the computer opponent on or off. Rebuilds the board.
    #[instrument(skip(self))]
    pub fn set_bot_enabled(&mut self, enabled: bool) {
        self.settings.bot_enabled = enabled;
        self.reset();
    }

    /// Changes the segment cap. Drops any in-progress selection but keeps the board.
    #[instrument(skip(self))]
    pub fn set_max_segments(&mut self, max_segments: u32) {
        self.settings.max_segments = max_segments;
        self.cancel_selection();
    }

    fn ensure_human_turn(&self) -> Result<Player, SessionError> {
        match self.state {
            TurnState::GameOver => Err(SessionError::GameOver),
            TurnState::AwaitingPlayer2Bot => Err(SessionError::NotHumanTurn),
            TurnState::AwaitingPlayer1 => Ok(Player::One),
            TurnState::AwaitingPlayer2Human => Ok(Player::Two),
        }
    }

    /// Adds an endpoint to the selection.
    ///
    /// Selecting the first endpoint again clears it; further selections
    /// after two endpoints are ignored until confirm or cancel.
    #[instrument(skip(self))]
    pub fn select_point(&mut self, point: Coord) -> Result<Selection, SessionError> {
        self.ensure_human_turn()?;
        if !self.board.lattice().contains(point) {
            return Err(SessionError::UnknownPoint(point));
        }
        self.selection = match self.selection {
            Selection::Empty => Selection::First(point),
            Selection::First(first) if first == point => Selection::Empty,
            Selection::First(first) => Selection::Both(first, point),
            both @ Selection::Both(..) => both,
        };
        debug!(selection = ?self.selection, "Selection updated");
        Ok(self.selection)
    }

    /// Clears the selection.
    pub fn cancel_selection(&mut self) {
        self.selection = Selection::Empty;
    }

    /// Resolves the selected stroke for the human to move.
    ///
    /// The selection is cleared whether the stroke succeeds or is rejected.
    #[instrument(skip(self))]
    pub fn confirm_stroke(&mut self) -> Result<StrokeOutcome, SessionError> {
        self.ensure_human_turn()?;
        let Selection::Both(from, to) = self.selection else {
            return Err(SessionError::IncompleteSelection);
        };
        self.selection = Selection::Empty;
        self.submit_stroke(Stroke::new(from, to))
    }

    /// Resolves a stroke for the human to move, bypassing selection.
    #[instrument(skip(self))]
    pub fn submit_stroke(&mut self, stroke: Stroke) -> Result<StrokeOutcome, SessionError> {
        let player = self.ensure_human_turn()?;
        Ok(self.resolve(stroke, player)?)
    }

    /// Lets the computer move. Only valid in [`TurnState::AwaitingPlayer2Bot`].
    ///
    /// If the computer cannot produce a playable stroke the game ends.
    #[instrument(skip(self))]
    pub fn play_bot_turn(&mut self) -> Result<BotTurn, SessionError> {
        match self.state {
            TurnState::AwaitingPlayer2Bot => {}
            TurnState::GameOver => return Err(SessionError::GameOver),
            _ => return Err(SessionError::NotBotTurn),
        }

        let Some(stroke) =
            self.engine
                .select_move(&self.board, Player::Two, self.settings.max_segments)
        else {
            warn!("Computer found no undrawn edge; ending game");
            self.finish();
            return Ok(BotTurn::Stalled);
        };

        match self.resolve(stroke, Player::Two) {
            Ok(outcome) => Ok(BotTurn::Played(outcome)),
            Err(error) => {
                warn!(%stroke, %error, "Computer stroke rejected; ending game");
                self.finish();
                Ok(BotTurn::Stalled)
            }
        }
    }

    fn resolve(&mut self, stroke: Stroke, player: Player) -> Result<StrokeOutcome, StrokeError> {
        let outcome = resolve_stroke(&mut self.board, stroke, player, self.settings.max_segments)?;
        if outcome.terminal() {
            self.finish();
        } else {
            self.state = match player {
                Player::One if self.settings.bot_enabled => TurnState::AwaitingPlayer2Bot,
                Player::One => TurnState::AwaitingPlayer2Human,
                Player::Two => TurnState::AwaitingPlayer1,
            };
        }
        debug!(%stroke, state = ?self.state, scores = %outcome.scores(), "Stroke resolved");
        Ok(outcome)
    }

    fn finish(&mut self) {
        let outcome = Outcome::from_scores(self.board.scores());
        self.state = TurnState::GameOver;
        self.selection = Selection::Empty;
        self.outcome = Some(outcome);
        info!(%outcome, scores = %self.board.scores(), "Game over");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(bot: bool) -> GameSettings {
        GameSettings {
            preset: BoardPreset::Small,
            max_segments: 0,
            bot_enabled: bot,
            seed: Some(11),
        }
    }

    #[test]
    fn test_selecting_same_point_clears() {
        let mut session = GameSession::new(settings(false));
        session.select_point(Coord::new(0, 0)).unwrap();
        assert_eq!(session.select_point(Coord::new(0, 0)), Ok(Selection::Empty));
    }

    #[test]
    fn test_third_selection_ignored() {
        let mut session = GameSession::new(settings(false));
        session.select_point(Coord::new(0, 0)).unwrap();
        session.select_point(Coord::new(0, 1)).unwrap();
        let selection = session.select_point(Coord::new(1, 1)).unwrap();
        assert_eq!(selection, Selection::Both(Coord::new(0, 0), Coord::new(0, 1)));
    }

    #[test]
    fn test_unknown_point_rejected() {
        let mut session = GameSession::new(settings(false));
        assert_eq!(
            session.select_point(Coord::new(0, 7)),
            Err(SessionError::UnknownPoint(Coord::new(0, 7)))
        );
    }

    #[test]
    fn test_confirm_requires_two_points() {
        let mut session = GameSession::new(settings(false));
        session.select_point(Coord::new(0, 0)).unwrap();
        assert_eq!(session.confirm_stroke(), Err(SessionError::IncompleteSelection));
    }

    #[test]
    fn test_rejected_stroke_resets_selection_and_keeps_turn() {
        let mut session = GameSession::new(settings(false));
        session.select_point(Coord::new(0, 0)).unwrap();
        session.select_point(Coord::new(2, 1)).unwrap();
        assert!(matches!(session.confirm_stroke(), Err(SessionError::Stroke(_))));
        assert_eq!(session.selection(), Selection::Empty);
        assert_eq!(session.state(), TurnState::AwaitingPlayer1);
    }

    #[test]
    fn test_bot_turn_follows_human() {
        let mut session = GameSession::new(settings(true));
        session
            .submit_stroke(Stroke::new(Coord::new(0, 0), Coord::new(0, 1)))
            .unwrap();
        assert_eq!(session.state(), TurnState::AwaitingPlayer2Bot);
        assert_eq!(
            session.select_point(Coord::new(0, 0)),
            Err(SessionError::NotHumanTurn)
        );
        assert!(matches!(session.play_bot_turn(), Ok(BotTurn::Played(_))));
        assert_eq!(session.state(), TurnState::AwaitingPlayer1);
        assert_eq!(session.play_bot_turn(), Err(SessionError::NotBotTurn));
    }

    #[test]
    fn test_changing_cap_cancels_selection_only() {
        let mut session = GameSession::new(settings(false));
        session
            .submit_stroke(Stroke::new(Coord::new(0, 0), Coord::new(0, 1)))
            .unwrap();
        session.select_point(Coord::new(1, 0)).unwrap();
        session.set_max_segments(2);
        assert_eq!(session.selection(), Selection::Empty);
        assert_eq!(session.board().undrawn_edges().count(), 41);
    }

    #[test]
    fn test_toggling_bot_rebuilds() {
        let mut session = GameSession::new(settings(false));
        session
            .submit_stroke(Stroke::new(Coord::new(0, 0), Coord::new(0, 1)))
            .unwrap();
        session.set_bot_enabled(true);
        assert_eq!(session.board().undrawn_edges().count(), 42);
        assert_eq!(session.state(), TurnState::AwaitingPlayer1);
        assert!(session.settings().bot_enabled);
    }
}
