//! Difficulty presets and the fixed game constants.
//!
//! A `Difficulty` resolves to a `DifficultyConfig` describing the grid size,
//! how many distinct icon families are dealt, and the time budget. The
//! generator tuning knobs live in `GeneratorSettings`.

use clap::ValueEnum;
use std::fmt;

/// How many duplicate sets of each icon the generator accounts for when
/// validating the icon distribution.
pub const MULTIPLE_NUMBER: usize = 2;

/// Number of disruption passes applied to a freshly dealt board.
pub const DISRUPT_TIMES: usize = 3;

/// Hints available at the start of every game.
pub const INITIAL_HINTS: u32 = 3;

/// Manual reshuffles available at the start of every game.
pub const INITIAL_SHUFFLES: u32 = 3;

/// Points awarded for a single match before the combo multiplier.
pub const BASE_SCORE: u32 = 10;

/// Growth factor applied per consecutive match in a combo chain.
pub const COMBO_MULTIPLIER: f64 = 1.5;

/// Idle window after which the combo counter drops back to zero.
pub const COMBO_RESET_MS: u64 = 2000;

/// Delay before a mismatched selection is cleared.
pub const MISMATCH_CLEAR_MS: u64 = 300;

/// How long hinted tiles stay highlighted.
pub const HINT_HIGHLIGHT_MS: u64 = 2000;

/// Delay between detecting a stalemate and the automatic reshuffle.
pub const AUTO_SHUFFLE_DELAY_MS: u64 = 1000;

/// The three fixed difficulty presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum Difficulty {
    /// 6x8 grid, 12 icon families, 5 minutes.
    #[default]
    Easy,
    /// 8x10 grid, 20 icon families, 8 minutes.
    Medium,
    /// 10x12 grid, 30 icon families, 10 minutes.
    Hard,
}

impl Difficulty {
    /// Every preset, easiest first.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Returns the board and timing parameters for this preset.
    ///
    /// # Examples
    /// ```
    /// use tilelink::config::Difficulty;
    /// let cfg = Difficulty::Medium.config();
    /// assert_eq!((cfg.rows, cfg.cols, cfg.icon_types), (8, 10, 20));
    /// ```
    pub fn config(self) -> DifficultyConfig {
        match self {
            Difficulty::Easy => DifficultyConfig {
                rows: 6,
                cols: 8,
                icon_types: 12,
                time_limit_secs: 300,
            },
            Difficulty::Medium => DifficultyConfig {
                rows: 8,
                cols: 10,
                icon_types: 20,
                time_limit_secs: 480,
            },
            Difficulty::Hard => DifficultyConfig {
                rows: 10,
                cols: 12,
                icon_types: 30,
                time_limit_secs: 600,
            },
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

/// Grid dimensions, icon variety and time budget for one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DifficultyConfig {
    pub rows: usize,
    pub cols: usize,
    pub icon_types: usize,
    pub time_limit_secs: u32,
}

impl DifficultyConfig {
    /// Total number of grid cells.
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }
}

/// Tuning knobs for board generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorSettings {
    /// Duplicate-set multiplier used in the parity check.
    pub multiple: usize,
    /// Number of icon-only reshuffles applied after dealing.
    pub disrupt_times: usize,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        GeneratorSettings {
            multiple: MULTIPLE_NUMBER,
            disrupt_times: DISRUPT_TIMES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_match_documented_sizes() {
        let easy = Difficulty::Easy.config();
        assert_eq!((easy.rows, easy.cols, easy.icon_types, easy.time_limit_secs), (6, 8, 12, 300));
        let hard = Difficulty::Hard.config();
        assert_eq!((hard.rows, hard.cols, hard.icon_types, hard.time_limit_secs), (10, 12, 30, 600));
        assert_eq!(hard.cell_count(), 120);
    }

    #[test]
    fn test_presets_deal_even_icon_counts() {
        for difficulty in Difficulty::ALL {
            let cfg = difficulty.config();
            assert_eq!(cfg.cell_count() % cfg.icon_types, 0, "{difficulty} splits unevenly");
            assert_eq!((cfg.cell_count() / cfg.icon_types) % 2, 0, "{difficulty} has odd icon counts");
        }
    }

    #[test]
    fn test_difficulty_display_matches_cli_names() {
        for difficulty in Difficulty::ALL {
            let parsed = Difficulty::from_str(&difficulty.to_string(), true).unwrap();
            assert_eq!(parsed, difficulty);
        }
    }
}
