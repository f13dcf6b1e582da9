//! Core domain types shared across the lattice game.

use serde::{Deserialize, Serialize};

/// One of the two players.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
)]
pub enum Player {
    /// Player 1 (always moves first).
    One,
    /// Player 2 (human or the computer opponent).
    Two,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Returns the player's number (1 or 2).
    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Lattice coordinate of a point: row, then column within the row.
///
/// The derived ordering (row first, then column) is the total order used
/// to canonicalize edges.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_new::new,
)]
pub struct Coord {
    row: usize,
    col: usize,
}

impl Coord {
    /// Row index, top to bottom.
    pub fn row(self) -> usize {
        self.row
    }

    /// Column index within the row.
    pub fn col(self) -> usize {
        self.col
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

impl std::str::FromStr for Coord {
    type Err = String;

    /// Parses `r,c` (surrounding parentheses and whitespace are ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let (row, col) = trimmed
            .split_once(',')
            .ok_or_else(|| format!("expected `row,col`, got `{}`", s))?;
        let row = row
            .trim()
            .parse()
            .map_err(|e| format!("invalid row `{}`: {}", row.trim(), e))?;
        let col = col
            .trim()
            .parse()
            .map_err(|e| format!("invalid column `{}`: {}", col.trim(), e))?;
        Ok(Self { row, col })
    }
}

/// Index of a unit edge in the lattice's edge list.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("e{}", _0)]
pub struct EdgeId(pub usize);

/// Index of a triangular cell in the lattice's triangle list.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("t{}", _0)]
pub struct TriangleId(pub usize);

/// Per-player count of scored triangles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    one: u32,
    two: u32,
}

impl Scores {
    /// Score of the given player.
    pub fn get(&self, player: Player) -> u32 {
        match player {
            Player::One => self.one,
            Player::Two => self.two,
        }
    }

    /// Sum of both players' scores.
    pub fn total(&self) -> u32 {
        self.one + self.two
    }

    /// Player with the strictly higher score, if any.
    pub fn leader(&self) -> Option<Player> {
        match self.one.cmp(&self.two) {
            std::cmp::Ordering::Greater => Some(Player::One),
            std::cmp::Ordering::Less => Some(Player::Two),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub(crate) fn increment(&mut self, player: Player) {
        match player {
            Player::One => self.one += 1,
            Player::Two => self.two += 1,
        }
    }
}

impl std::fmt::Display for Scores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.one, self.two)
    }
}
