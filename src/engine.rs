//! Core board model for the tile-linking puzzle.
//!
//! This module defines the game's fundamental components:
//! - `Point`: A grid coordinate.
//! - `Tile`: One grid cell with its icon and presentation flags.
//! - `Board`: The fixed-size grid of tiles, plus the match operations
//!   (`can_match`, `remove_tiles`) and the win predicate (`check_game_over`).
//!
//! Only the icon of a tile decides connectivity and matching. The `selected`
//! and `matched` flags ride along for whoever renders the board.
use crate::error::EngineError;
use crate::path::find_path;
use std::fmt;

/// Identifies an icon family. `EMPTY_ICON` marks a removed tile.
pub type IconType = u16;

/// Icon value of a removed (or never filled) cell. Always passable.
pub const EMPTY_ICON: IconType = 0;

/// Largest icon value that has a single-character text form.
pub const MAX_ICON_TYPE: IconType = 35;

/// A zero-based grid coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub const fn new(row: usize, col: usize) -> Self {
        Point { row, col }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Converts an icon value to the character used in text boards.
///
/// `0` is `.`, `1..=9` are digits and `10..=35` are `A..=Z`.
///
/// # Examples
///
/// ```
/// use tilelink::engine::icon_to_char;
/// assert_eq!(icon_to_char(0), '.');
/// assert_eq!(icon_to_char(7), '7');
/// assert_eq!(icon_to_char(10), 'A');
/// ```
pub fn icon_to_char(icon: IconType) -> char {
    match icon {
        EMPTY_ICON => '.',
        1..=9 => char::from(b'0' + icon as u8),
        10..=MAX_ICON_TYPE => char::from(b'A' + (icon - 10) as u8),
        _ => '?',
    }
}

/// Inverse of `icon_to_char`. Returns `None` for characters outside the alphabet.
pub fn icon_from_char(ch: char) -> Option<IconType> {
    match ch {
        '.' => Some(EMPTY_ICON),
        '1'..='9' => Some(ch as IconType - '0' as IconType),
        'A'..='Z' => Some(ch as IconType - 'A' as IconType + 10),
        _ => None,
    }
}

/// A single grid cell.
///
/// Position and id are fixed when the board is built. Only the icon and the
/// two flags change afterwards, and only through `Board`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    id: usize,
    row: usize,
    col: usize,
    icon: IconType,
    selected: bool,
    matched: bool,
}

impl Tile {
    fn new(row: usize, col: usize, cols: usize, icon: IconType) -> Self {
        Tile {
            id: row * cols + col,
            row,
            col,
            icon,
            selected: false,
            matched: false,
        }
    }

    /// Stable identity, the row-major index of the cell.
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn position(&self) -> Point {
        Point::new(self.row, self.col)
    }

    pub fn icon(&self) -> IconType {
        self.icon
    }

    /// True once the tile has been removed (or the cell was dealt empty).
    pub fn is_empty(&self) -> bool {
        self.icon == EMPTY_ICON
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_matched(&self) -> bool {
        self.matched
    }

    pub fn to_char(&self) -> char {
        icon_to_char(self.icon)
    }
}

/// A `rows x cols` grid of tiles stored row-major.
///
/// Every cell always holds exactly one tile. Removing a tile empties its
/// icon, it never deletes the cell.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    tiles: Vec<Tile>,
}

impl Board {
    /// Creates a board where every cell is empty.
    ///
    /// # Examples
    /// ```
    /// use tilelink::engine::{Board, Point};
    /// let board = Board::new_empty(2, 3);
    /// assert_eq!(board.tiles().len(), 6);
    /// assert!(board.tile(Point::new(1, 2)).unwrap().is_empty());
    /// ```
    pub fn new_empty(rows: usize, cols: usize) -> Self {
        Board::from_icons(rows, cols, vec![EMPTY_ICON; rows * cols])
    }

    /// Builds a board from row-major icon values.
    ///
    /// # Panics
    /// Panics if `icons.len() != rows * cols`.
    pub fn from_icons(rows: usize, cols: usize, icons: Vec<IconType>) -> Self {
        assert_eq!(
            icons.len(),
            rows * cols,
            "icon count must equal the {}x{} cell count",
            rows,
            cols
        );
        let tiles = icons
            .into_iter()
            .enumerate()
            .map(|(idx, icon)| Tile::new(idx / cols, idx % cols, cols, icon))
            .collect();
        Board { rows, cols, tiles }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// All tiles in row-major scan order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn contains(&self, p: Point) -> bool {
        p.row < self.rows && p.col < self.cols
    }

    /// Fails with `EngineError::OutOfBounds` unless `p` is on the grid.
    pub fn check_bounds(&self, p: Point) -> Result<(), EngineError> {
        if self.contains(p) {
            Ok(())
        } else {
            Err(EngineError::OutOfBounds {
                row: p.row,
                col: p.col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Returns the tile at `p`, or an error if `p` is off the grid.
    pub fn tile(&self, p: Point) -> Result<&Tile, EngineError> {
        self.check_bounds(p)?;
        Ok(&self.tiles[self.index(p.row, p.col)])
    }

    /// Returns the icon at (`r`, `c`).
    ///
    /// # Panics
    /// Panics if `r` or `c` are outside the board dimensions.
    pub fn icon_at(&self, r: usize, c: usize) -> IconType {
        assert!(r < self.rows && c < self.cols, "({}, {}) is off the board", r, c);
        self.tiles[self.index(r, c)].icon
    }

    /// True when the cell at (`r`, `c`) holds no icon and can be crossed.
    pub fn is_passable(&self, r: usize, c: usize) -> bool {
        self.icon_at(r, c) == EMPTY_ICON
    }

    /// Number of tiles that still carry an icon.
    pub fn occupied_count(&self) -> usize {
        self.tiles.iter().filter(|t| !t.is_empty()).count()
    }

    /// Icons of all occupied cells, in scan order.
    pub fn occupied_icons(&self) -> Vec<IconType> {
        self.tiles
            .iter()
            .filter(|t| !t.is_empty())
            .map(|t| t.icon)
            .collect()
    }

    /// Sets or clears the highlight flag of the tile at `p`.
    pub fn set_selected(&mut self, p: Point, selected: bool) -> Result<(), EngineError> {
        self.check_bounds(p)?;
        let idx = self.index(p.row, p.col);
        self.tiles[idx].selected = selected;
        Ok(())
    }

    /// Clears the highlight flag of every tile.
    pub fn clear_selection(&mut self) {
        for tile in &mut self.tiles {
            tile.selected = false;
        }
    }

    /// Rewrites the icons of the occupied cells, in scan order.
    ///
    /// Empty cells are skipped, so the set of occupied positions is unchanged.
    pub(crate) fn reassign_occupied_icons(&mut self, icons: &[IconType]) {
        let mut values = icons.iter().copied();
        for tile in self.tiles.iter_mut().filter(|t| t.icon != EMPTY_ICON) {
            if let Some(icon) = values.next() {
                tile.icon = icon;
            }
        }
    }

    fn index(&self, r: usize, c: usize) -> usize {
        r * self.cols + c
    }

    fn remove_at(&mut self, p: Point) {
        let idx = self.index(p.row, p.col);
        let tile = &mut self.tiles[idx];
        tile.icon = EMPTY_ICON;
        tile.matched = true;
        tile.selected = false;
    }

    /// Renders the board with row and column numbers.
    ///
    /// Selected tiles, and the tile at `pos` when given, are drawn in reverse
    /// video using ANSI escape codes.
    pub fn to_string_with_highlight(&self, pos: Option<Point>) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for c_idx in 0..self.cols {
            output.push_str(&format!("{:<3}", c_idx));
        }
        output.push('\n');

        for r_idx in 0..self.rows {
            output.push_str(&format!("{:<3}", r_idx));
            for c_idx in 0..self.cols {
                let tile = &self.tiles[self.index(r_idx, c_idx)];
                let is_highlight = pos == Some(tile.position()) || tile.selected;
                if is_highlight {
                    output.push_str(&format!("\x1b[7m{}\x1b[m  ", tile.to_char()));
                } else {
                    output.push_str(&format!("{:<3}", tile.to_char()));
                }
            }
            if r_idx + 1 < self.rows {
                output.push('\n');
            }
        }

        output
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_with_highlight(None))
    }
}

/// Decides whether the tiles at `a` and `b` form a removable pair.
///
/// The pair must be two distinct, occupied cells carrying the same icon and
/// joined by a path of at most two turns.
///
/// # Errors
/// Returns `EngineError::OutOfBounds` if either position is off the grid.
pub fn can_match(board: &Board, a: Point, b: Point) -> Result<bool, EngineError> {
    let first = board.tile(a)?;
    let second = board.tile(b)?;
    if a == b || first.is_empty() || first.icon() != second.icon() {
        return Ok(false);
    }
    Ok(find_path(board, a, b)?.is_some())
}

/// Removes both tiles: their icon becomes empty and they are flagged matched.
///
/// No matching rule is checked here; callers confirm `can_match` first.
/// Removing an already removed pair leaves the board unchanged.
///
/// # Errors
/// Returns `EngineError::OutOfBounds` if either position is off the grid.
/// The board is untouched in that case.
pub fn remove_tiles(board: &mut Board, a: Point, b: Point) -> Result<(), EngineError> {
    board.check_bounds(a)?;
    board.check_bounds(b)?;
    board.remove_at(a);
    board.remove_at(b);
    Ok(())
}

/// True when no tile on the board carries an icon.
pub fn check_game_over(board: &Board) -> bool {
    board.tiles().iter().all(Tile::is_empty)
}
