//! Strictly Triangles - Unified CLI
//!
//! Terminal play, engine self-play and preset listing.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use std::io::Write;
use std::time::Duration;
use strictly_lattice::{BoardPreset, GameSession, Lattice, Outcome, Player};
use strictly_triangles::{
    Cli, Command, GameConfig, GameEvent, HeuristicPlayer, HumanPlayer, Orchestrator, render_board,
};
use strum::IntoEnumIterator;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_tracing(cli.verbose);

    let config = GameConfig::load_or_default(&cli.config)?
        .with_overrides(cli.preset, cli.max_segments);

    match cli.command {
        Command::Play { bot, seed } => run_play(config, bot, seed),
        Command::Selfplay { games, seed } => run_selfplay(config, games, seed),
        Command::Presets => run_presets(),
    }
}

fn initialize_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Interactive game over stdin/stdout.
#[instrument(skip(config))]
fn run_play(config: GameConfig, bot: bool, seed: Option<u64>) -> Result<()> {
    let bot_enabled = bot || config.game().bot_enabled;
    let seed = seed.or(config.game().seed);
    let config = config.with_bot(bot_enabled).with_seed(seed);

    let mut out = std::io::stdout();
    writeln!(
        out,
        "{} board, {}. Enter strokes as `row,col row,col`, or `quit`.",
        config.game().preset.label(),
        cap_label(config.game().max_segments)
    )?;

    let human = HumanPlayer::new(
        config.player_name(Player::One),
        std::io::stdin().lock(),
        std::io::stdout(),
    );
    let mut orchestrator = Orchestrator::new(&config, Box::new(human), None);
    writeln!(out, "{}", render_board(orchestrator.session().board()))?;

    let report = orchestrator.run(|session, event| {
        // Terminal output is best effort; a closed stdout ends the game at the next prompt.
        let _ = print_event(&mut std::io::stdout(), &config, session, event);
    })?;
    info!(?report, "Play finished");
    Ok(())
}

fn print_event(
    out: &mut impl Write,
    config: &GameConfig,
    session: &GameSession,
    event: &GameEvent,
) -> std::io::Result<()> {
    match event {
        GameEvent::BotThinking { name } => writeln!(out, "{} is thinking...", name),
        GameEvent::StrokePlayed { name, outcome } => {
            writeln!(out, "{} drew {}", name, outcome.stroke())?;
            if outcome.scored() {
                writeln!(out, "{} completed {} triangle(s)!", name, outcome.completed().len())?;
            }
            writeln!(out, "{}", render_board(session.board()))?;
            writeln!(out, "Score {}", outcome.scores())
        }
        GameEvent::StrokeRejected { name, stroke, error } => {
            writeln!(out, "{} cannot draw {}: {}", name, stroke, error)
        }
        GameEvent::Abandoned { name } => writeln!(out, "{} left the game", name),
        GameEvent::GameOver { outcome, scores } => {
            writeln!(out, "Game over ({}): {}", scores, outcome_label(config, *outcome))
        }
    }
}

fn outcome_label(config: &GameConfig, outcome: Outcome) -> String {
    match outcome {
        Outcome::Winner(player) => format!("{} wins", config.player_name(player)),
        Outcome::Draw => "Draw".to_string(),
    }
}

fn cap_label(max_segments: u32) -> String {
    match max_segments {
        0 => "unlimited stroke length".to_string(),
        1 => "1 segment per stroke".to_string(),
        n => format!("up to {} segments per stroke", n),
    }
}

const ENGINE_NAME: &str = "Engine";

/// Heuristic participant against the session's computer opponent.
#[instrument(skip(config))]
fn run_selfplay(config: GameConfig, games: u32, seed: Option<u64>) -> Result<()> {
    let config = config.with_bot(true).with_bot_delay(Duration::ZERO);
    let mut names = [ENGINE_NAME.to_string(), config.player_name(Player::Two).to_string()];
    let mut wins = [0u32; 2];
    let mut draws = 0u32;

    for game in 0..games {
        let base = seed.map(|s| s.wrapping_add(u64::from(game)));
        let config = config.clone().with_seed(base);
        let engine_seed = base.map(|s| s.wrapping_mul(31).wrapping_add(1));
        let engine = HeuristicPlayer::new(ENGINE_NAME, engine_seed);

        let mut orchestrator = Orchestrator::new(&config, Box::new(engine), None);
        names = [Player::One, Player::Two].map(|player| orchestrator.name(player).to_string());
        let report = orchestrator.run(|_, _| {})?;
        match report.outcome.and_then(|outcome| outcome.winner()) {
            Some(Player::One) => wins[0] += 1,
            Some(Player::Two) => wins[1] += 1,
            None => draws += 1,
        }
        println!(
            "game {:>3}: {} in {} strokes",
            game + 1,
            report.scores,
            report.moves
        );
    }

    println!(
        "{} {} - {} {} - draws {}",
        names[0], wins[0], names[1], wins[1], draws
    );
    Ok(())
}

fn run_presets() -> Result<()> {
    for preset in BoardPreset::iter() {
        let lattice = Lattice::from_preset(preset);
        println!(
            "{:<7} rows {:?}: {} points, {} edges, {} triangles",
            preset.to_string(),
            preset.row_lengths(),
            lattice.points().len(),
            lattice.edges().len(),
            lattice.triangles().len()
        );
    }
    Ok(())
}
