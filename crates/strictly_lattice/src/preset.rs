//! Board-size presets.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A diamond-shaped board size.
///
/// Each preset is an ordered sequence of row lengths that grows by one
/// per row down to the widest row and then shrinks symmetrically.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BoardPreset {
    /// Rows `[3,4,5,4,3]`.
    Small,
    /// Rows `[4,5,6,7,6,5,4]`.
    #[default]
    Medium,
    /// Rows `[5,6,7,8,9,8,7,6,5]`.
    Large,
}

impl BoardPreset {
    /// Returns the row lengths, top to bottom.
    #[instrument]
    pub fn row_lengths(self) -> &'static [usize] {
        match self {
            BoardPreset::Small => &[3, 4, 5, 4, 3],
            BoardPreset::Medium => &[4, 5, 6, 7, 6, 5, 4],
            BoardPreset::Large => &[5, 6, 7, 8, 9, 8, 7, 6, 5],
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            BoardPreset::Small => "Small",
            BoardPreset::Medium => "Medium",
            BoardPreset::Large => "Large",
        }
    }
}
