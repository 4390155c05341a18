//! Whole-board scans: hint lookup, stalemate detection and the win check.
//!
//! The hint scan is an exhaustive pairwise search. Boards top out at 10x12,
//! so no index is kept. On larger boards, bucketing tiles by icon before
//! pairing is the first thing to change.
use crate::engine::{can_match, Board, Tile};

pub use crate::engine::check_game_over;

/// Returns the first removable pair in scan order, or `None`.
///
/// Tiles are visited row-major. For each occupied tile, every later occupied
/// tile with the same icon is tried in row-major order. `can_match` is
/// symmetric, so this finds the same pair as a scan over all ordered pairs.
///
/// # Examples
/// ```
/// use tilelink::engine::Point;
/// use tilelink::scanner::find_hint;
/// use tilelink::utils::board_from_str_array;
///
/// let board = board_from_str_array(&["12", ".1"]).unwrap();
/// let (a, b) = find_hint(&board).unwrap();
/// assert_eq!((a.position(), b.position()), (Point::new(0, 0), Point::new(1, 1)));
/// ```
pub fn find_hint(board: &Board) -> Option<(Tile, Tile)> {
    let tiles = board.tiles();
    for (i, first) in tiles.iter().enumerate() {
        if first.is_empty() {
            continue;
        }
        for second in &tiles[i + 1..] {
            if second.icon() != first.icon() {
                continue;
            }
            // Both positions come from the board itself, so bounds hold.
            if matches!(can_match(board, first.position(), second.position()), Ok(true)) {
                return Some((*first, *second));
            }
        }
    }
    None
}

/// True when at least one removable pair exists.
pub fn has_available_match(board: &Board) -> bool {
    find_hint(board).is_some()
}

/// True when tiles remain but none of them can be paired.
pub fn is_stalemate(board: &Board) -> bool {
    !check_game_over(board) && !has_available_match(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{remove_tiles, Point};
    use crate::utils::board_from_str_array;

    #[test]
    fn test_find_hint_returns_first_pair_in_scan_order() {
        let board = board_from_str_array(&["3113", "2..2"]).unwrap();
        let (a, b) = find_hint(&board).unwrap();
        // The outer 3s at (0,0) and (0,3) are blocked by the 1s; (0,0) has no
        // partner, so the scan moves on to the 1 at (0,1).
        assert_eq!(a.position(), Point::new(0, 1));
        assert_eq!(b.position(), Point::new(0, 2));
    }

    #[test]
    fn test_find_hint_result_is_a_legal_match() {
        let board = board_from_str_array(&["1234", "5..5", "4321"]).unwrap();
        let (a, b) = find_hint(&board).unwrap();
        assert_eq!(a.icon(), b.icon());
        assert!(can_match(&board, a.position(), b.position()).unwrap());
    }

    #[test]
    fn test_find_hint_agrees_with_pairwise_scan() {
        let board = board_from_str_array(&["1.23", "3.1.", "2..4", "4.55"]).unwrap();
        let positions: Vec<Point> = board.tiles().iter().map(|t| t.position()).collect();
        let mut expected = None;
        'scan: for (i, &a) in positions.iter().enumerate() {
            for &b in &positions[i + 1..] {
                if can_match(&board, a, b).unwrap() {
                    expected = Some((a, b));
                    break 'scan;
                }
            }
        }
        let found = find_hint(&board).map(|(a, b)| (a.position(), b.position()));
        assert!(expected.is_some());
        assert_eq!(found, expected);
    }

    #[test]
    fn test_find_hint_none_on_stalemate() {
        // Two diagonal pairs, each one blocking the other.
        let crossed = board_from_str_array(&["12", "21"]).unwrap();
        assert_eq!(find_hint(&crossed), None);
        assert!(is_stalemate(&crossed));

        let stuck = board_from_str_array(&["1212"]).unwrap();
        assert_eq!(find_hint(&stuck), None);
        assert!(!has_available_match(&stuck));
        assert!(is_stalemate(&stuck));
    }

    #[test]
    fn test_cleared_board_is_game_over_without_hint() {
        let mut board = board_from_str_array(&["11", "22"]).unwrap();
        remove_tiles(&mut board, Point::new(0, 0), Point::new(0, 1)).unwrap();
        remove_tiles(&mut board, Point::new(1, 0), Point::new(1, 1)).unwrap();
        assert!(check_game_over(&board));
        assert_eq!(find_hint(&board), None);
        assert!(!is_stalemate(&board));
    }

    #[test]
    fn test_following_hints_clears_solvable_board() {
        let mut board = board_from_str_array(&["1221", "3443", "5665"]).unwrap();
        let mut removed = 0;
        while let Some((a, b)) = find_hint(&board) {
            remove_tiles(&mut board, a.position(), b.position()).unwrap();
            removed += 1;
        }
        assert_eq!(removed, 6);
        assert!(check_game_over(&board));
    }
}
