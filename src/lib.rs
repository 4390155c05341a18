//! # Tile Link Engine
//!
//! This library provides the board engine for a tile-linking puzzle: two
//! tiles with the same icon can be removed when an unobstructed orthogonal
//! path with at most two turns joins them.
//!
//! It is used by three binaries:
//! - `human_player`: Interactive play in the terminal.
//! - `auto_solver`: Plays a board (from a file or freshly dealt) by following
//!   hints and reshuffling on stalemate, then prints the moves.
//! - `board_stats`: Deals many seeded boards per difficulty and reports how
//!   often they start stalemated or can be cleared.
//!
//! ## Modules
//! - `config`: Difficulty presets and game constants.
//! - `error`: Error types.
//! - `shuffle`: Fisher-Yates shuffle shared by generation and reshuffles.
//! - `engine`: `Tile`, `Board`, and the match operations `can_match` and `remove_tiles`.
//! - `path`: The connectivity search, `find_path`.
//! - `generator`: Board generation and icon-only disruption passes.
//! - `scanner`: Hint lookup, stalemate detection and the win check.
//! - `scoring`: The combo-aware score formula.
//! - `session`: A full game: selection, counters, clock and scheduled tasks.
//! - `solver`: Hint-following auto play.
//! - `utils`: Parsing boards from text.
//! - `logging`: Verbose diagnostics and the `vlog!` macro.

pub mod logging;

pub mod config;
pub mod engine;
pub mod error;
pub mod generator;
pub mod path;
pub mod scanner;
pub mod scoring;
pub mod session;
pub mod shuffle;
pub mod solver;
pub mod utils;
