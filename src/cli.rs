//! Command-line interface for strictly_triangles.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use strictly_lattice::BoardPreset;

/// Strictly Triangles - claim triangles on a triangular lattice
#[derive(Parser, Debug)]
#[command(name = "strictly_triangles")]
#[command(about = "Two-player triangle-claiming game on a triangular lattice", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Path to the game configuration file
    #[arg(short, long, global = true, default_value = "strictly_triangles.toml")]
    pub config: PathBuf,

    /// Board size (small, medium, large)
    #[arg(short, long, global = true)]
    pub preset: Option<BoardPreset>,

    /// Maximum unit edges per stroke (0 = unlimited)
    #[arg(short, long, global = true, value_parser = clap::value_parser!(u32).range(0..=5))]
    pub max_segments: Option<u32>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal, entering strokes as `row,col row,col`
    Play {
        /// Let the computer play as player 2
        #[arg(long)]
        bot: bool,

        /// Seed for the computer opponent
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Let the heuristic engine play against the computer opponent
    Selfplay {
        /// Number of games to play
        #[arg(short, long, default_value = "1")]
        games: u32,

        /// Base seed; game `n` uses seeds derived from `seed + n`
        #[arg(long)]
        seed: Option<u64>,
    },

    /// List board presets with their point, edge and triangle counts
    Presets,
}
