//! Error types shared by the engine modules.
//!
//! "No path" and "no hint" are ordinary `None` results and never appear here.
//! These errors describe malformed configurations and caller bugs.

/// Generation preconditions that a difficulty configuration violated.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("board must have at least one row and one column, got {rows}x{cols}")]
    EmptyBoard { rows: usize, cols: usize },
    #[error("board must have an even number of cells, got {rows}x{cols} = {cells}")]
    OddCellCount { rows: usize, cols: usize, cells: usize },
    #[error("at least one icon type is required")]
    NoIconTypes,
    #[error("{cells} cells cannot be split evenly across {icon_types} icon types")]
    UnevenIconSplit { cells: usize, icon_types: usize },
    #[error("each icon type would appear {per_icon} times, which is odd")]
    OddIconCount { per_icon: usize },
    #[error("{icon_types} icon types exceed the supported maximum of {max}")]
    TooManyIconTypes { icon_types: usize, max: usize },
}

/// Errors raised by engine operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("position ({row}, {col}) lies outside the {rows}x{cols} board")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("path endpoints must differ, both are ({row}, {col})")]
    SamePosition { row: usize, col: usize },
}

/// Errors raised while parsing a text board.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardParseError {
    #[error("board text contains no rows")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("unrecognized character '{ch}' in row {row} col {col}")]
    UnrecognizedChar { ch: char, row: usize, col: usize },
}
