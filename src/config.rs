//! Game configuration loaded from a TOML file.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use strictly_lattice::{BoardPreset, GameSettings, Player};
use tracing::{debug, info, instrument};

/// Largest segment cap offered; 0 stands for unlimited.
pub const MAX_SEGMENT_CHOICE: u32 = 5;

/// Presentation settings for a match.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Pause before the computer moves, in milliseconds.
    bot_delay_ms: u64,
    /// Name shown for player 1.
    player1_name: String,
    /// Name shown for a human player 2.
    player2_name: String,
    /// Name shown for the computer opponent.
    bot_name: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            bot_delay_ms: 750,
            player1_name: "Player 1".to_string(),
            player2_name: "Player 2".to_string(),
            bot_name: "Computer".to_string(),
        }
    }
}

/// Configuration for a match: the session settings plus display options.
///
/// ```toml
/// [game]
/// preset = "small"
/// max_segments = 2
/// bot_enabled = true
///
/// [display]
/// bot_delay_ms = 0
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Settings the session is built from.
    game: GameSettings,
    /// Presentation settings.
    display: DisplayConfig,
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;

        info!(
            preset = %config.game.preset,
            max_segments = config.game.max_segments,
            bot = config.game.bot_enabled,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Loads the file if it exists, otherwise falls back to defaults.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.game.max_segments > MAX_SEGMENT_CHOICE {
            return Err(ConfigError::new(format!(
                "max_segments must be between 0 and {}, got {}",
                MAX_SEGMENT_CHOICE, self.game.max_segments
            )));
        }
        Ok(())
    }

    /// Applies command-line overrides on top of the file values.
    #[instrument(skip(self))]
    pub fn with_overrides(
        mut self,
        preset: Option<BoardPreset>,
        max_segments: Option<u32>,
    ) -> Self {
        if let Some(preset) = preset {
            self.game.preset = preset;
        }
        if let Some(max_segments) = max_segments {
            self.game.max_segments = max_segments;
        }
        self
    }

    /// Turns the computer opponent on or off.
    pub fn with_bot(mut self, enabled: bool) -> Self {
        self.game.bot_enabled = enabled;
        self
    }

    /// Replaces the seed used by the computer opponent.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.game.seed = seed;
        self
    }

    /// Replaces the pause before computer moves.
    pub fn with_bot_delay(mut self, delay: Duration) -> Self {
        self.display.bot_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Pause before the computer moves.
    pub fn bot_delay(&self) -> Duration {
        Duration::from_millis(self.display.bot_delay_ms)
    }

    /// Display name for a seat.
    pub fn player_name(&self, player: Player) -> &str {
        match player {
            Player::One => &self.display.player1_name,
            Player::Two if self.game.bot_enabled => &self.display.bot_name,
            Player::Two => &self.display.player2_name,
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
