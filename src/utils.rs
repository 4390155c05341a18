use crate::engine::{icon_from_char, Board, IconType};
use crate::error::BoardParseError;

/// Parses an array of string slices into a `Board`.
///
/// Each string slice is one row, starting from row 0. All rows must have the
/// same number of cells; the board takes its dimensions from the input.
///
/// Valid characters for cells are:
/// - '.': an empty cell
/// - '1'..='9': icon types 1 to 9
/// - 'A'..='Z': icon types 10 to 35
///
/// # Errors
/// * `BoardParseError::Empty` if there are no rows, or the first row is empty.
/// * `BoardParseError::RaggedRow` if a row's length differs from the first row.
/// * `BoardParseError::UnrecognizedChar` for any character outside the alphabet.
///
/// # Examples
/// ```
/// use tilelink::engine::Point;
/// use tilelink::utils::board_from_str_array;
///
/// let board = board_from_str_array(&["12.", "A.1"]).unwrap();
/// assert_eq!((board.rows(), board.cols()), (2, 3));
/// assert_eq!(board.icon_at(1, 0), 10);
/// assert!(board.tile(Point::new(0, 2)).unwrap().is_empty());
///
/// assert!(board_from_str_array(&["1x"]).is_err());
/// assert!(board_from_str_array(&["11", "1"]).is_err());
/// ```
pub fn board_from_str_array(s: &[&str]) -> Result<Board, BoardParseError> {
    let cols = s.first().map(|row| row.chars().count()).unwrap_or(0);
    if cols == 0 {
        return Err(BoardParseError::Empty);
    }

    let mut icons: Vec<IconType> = Vec::with_capacity(s.len() * cols);
    for (r, row_str) in s.iter().enumerate() {
        let found = row_str.chars().count();
        if found != cols {
            return Err(BoardParseError::RaggedRow {
                row: r,
                found,
                expected: cols,
            });
        }

        for (c, ch) in row_str.chars().enumerate() {
            let icon = icon_from_char(ch)
                .ok_or(BoardParseError::UnrecognizedChar { ch, row: r, col: c })?;
            icons.push(icon);
        }
    }

    Ok(Board::from_icons(s.len(), cols, icons))
}
