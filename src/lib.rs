//! Strictly Triangles - terminal front end for the lattice game
//!
//! Wraps the pure game logic in [`strictly_lattice`] with configuration
//! loading, player seats and a match loop.
//!
//! # Architecture
//!
//! - **Config**: TOML game settings and display options
//! - **Players**: human (line input) and heuristic participants
//! - **Orchestrator**: drives a session between two seats and reports events
//! - **Render**: text drawing of the board
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use strictly_triangles::{GameConfig, HeuristicPlayer, Orchestrator};
//!
//! let config = GameConfig::default()
//!     .with_bot(true)
//!     .with_seed(Some(7))
//!     .with_bot_delay(Duration::ZERO);
//! let player = HeuristicPlayer::new("Engine", Some(8));
//! let mut orchestrator = Orchestrator::new(&config, Box::new(player), None);
//! let report = orchestrator.run(|_, _| {}).unwrap();
//! assert!(report.outcome.is_some());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod orchestrator;
mod players;
mod render;

// Crate-level exports - Command line
pub use cli::{Cli, Command};

// Crate-level exports - Configuration
pub use config::{ConfigError, DisplayConfig, GameConfig, MAX_SEGMENT_CHOICE};

// Crate-level exports - Match loop
pub use orchestrator::{GameEvent, MatchReport, Orchestrator};

// Crate-level exports - Seats
pub use players::{HeuristicPlayer, HumanPlayer, Participant, parse_stroke};

// Crate-level exports - Rendering
pub use render::render_board;
