//! Human participant reading strokes as text lines.

use super::Participant;
use anyhow::Result;
use std::io::{BufRead, Write};
use strictly_lattice::{Coord, GameSession, Stroke};
use tracing::{debug, instrument, warn};

/// Parses `r,c r,c` into a stroke.
pub fn parse_stroke(line: &str) -> Result<Stroke, String> {
    let mut parts = line.split_whitespace();
    let (Some(from), Some(to), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("expected two points like `0,0 0,2`, got `{}`", line.trim()));
    };
    Ok(Stroke::new(from.parse::<Coord>()?, to.parse::<Coord>()?))
}

/// Human player typing strokes on a line-oriented input.
///
/// A line holds the two endpoints (`0,0 0,2`); `quit` or end of input leaves
/// the match. Lines that do not parse are reported and the prompt repeats.
pub struct HumanPlayer<R, W> {
    name: String,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    /// Creates a new human player.
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self {
            name: name.into(),
            input,
            output,
        }
    }
}

impl<R: BufRead, W: Write> Participant for HumanPlayer<R, W> {
    #[instrument(skip(self, session), fields(name = %self.name))]
    fn next_stroke(&mut self, session: &GameSession) -> Result<Option<Stroke>> {
        let Some(player) = session.current_player() else {
            return Ok(None);
        };

        loop {
            write!(self.output, "{} > ", player)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                debug!("Input closed");
                return Ok(None);
            }

            let trimmed = line.trim();
            match trimmed {
                "" => continue,
                "quit" | "q" => return Ok(None),
                _ => {}
            }

            match parse_stroke(trimmed) {
                Ok(stroke) => return Ok(Some(stroke)),
                Err(message) => {
                    warn!(input = %trimmed, %message, "Unreadable stroke");
                    writeln!(self.output, "{}", message)?;
                }
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
