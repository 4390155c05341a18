use crate::config::BASE_SCORE;
use crate::engine::{check_game_over, remove_tiles, Board, Point};
use crate::generator::shuffle_board;
use crate::scanner::find_hint;
use crate::scoring::calculate_score;
use crate::vlog;
use rand::Rng;

/// Result of playing a board out by always taking the hinted pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayOutcome {
    /// Removed pairs, in play order.
    pub moves: Vec<(Point, Point)>,
    /// Reshuffles needed to get past stalemates.
    pub reshuffles: u32,
    /// Whether the board ended empty.
    pub cleared: bool,
    /// Score earned, treating consecutive removals as one combo chain that
    /// breaks at every reshuffle.
    pub score: u64,
}

/// Plays `board` until it is cleared or stays stalemated after
/// `max_reshuffles` reshuffles.
///
/// Each step removes the first pair `find_hint` reports. The board is left
/// in its final state.
pub fn play_out(board: &mut Board, rng: &mut impl Rng, max_reshuffles: u32) -> PlayOutcome {
    let mut outcome = PlayOutcome {
        moves: Vec::new(),
        reshuffles: 0,
        cleared: false,
        score: 0,
    };
    let mut combo = 0;

    while !check_game_over(board) {
        match find_hint(board) {
            Some((a, b)) => {
                let (a, b) = (a.position(), b.position());
                // Positions come from the board, so removal cannot fail.
                if remove_tiles(board, a, b).is_err() {
                    break;
                }
                combo += 1;
                let points = calculate_score(BASE_SCORE, combo, 0);
                outcome.score = outcome.score.saturating_add(points);
                outcome.moves.push((a, b));
            }
            None if outcome.reshuffles < max_reshuffles => {
                shuffle_board(board, rng);
                outcome.reshuffles += 1;
                combo = 0;
            }
            None => {
                vlog!(
                    "giving up with {} tiles left after {} reshuffles",
                    board.occupied_count(),
                    outcome.reshuffles
                );
                break;
            }
        }
    }

    outcome.cleared = check_game_over(board);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Difficulty;
    use crate::generator::generate;
    use crate::utils::board_from_str_array;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_play_out_clears_simple_board() {
        let mut board = board_from_str_array(&["1221", "3443"]).unwrap();
        let mut rng = SmallRng::seed_from_u64(1);
        let outcome = play_out(&mut board, &mut rng, 0);
        assert!(outcome.cleared);
        assert_eq!(outcome.moves.len(), 4);
        assert_eq!(outcome.reshuffles, 0);
        // 10 + 15 + 22 + 33
        assert_eq!(outcome.score, 80);
        assert_eq!(outcome.moves[0], (Point::new(0, 1), Point::new(0, 2)));
    }

    #[test]
    fn test_play_out_gives_up_without_reshuffles() {
        let mut board = board_from_str_array(&["12", "21"]).unwrap();
        let mut rng = SmallRng::seed_from_u64(2);
        let outcome = play_out(&mut board, &mut rng, 0);
        assert!(!outcome.cleared);
        assert!(outcome.moves.is_empty());
        assert_eq!(board.occupied_count(), 4);
    }

    #[test]
    fn test_play_out_uses_reshuffles_on_stalemate() {
        let mut board = board_from_str_array(&["1212"]).unwrap();
        let mut rng = SmallRng::seed_from_u64(3);
        let outcome = play_out(&mut board, &mut rng, 50);
        // Any arrangement other than 1212/2121 has an adjacent pair, so a few
        // reshuffles always unlock the row.
        assert!(outcome.cleared);
        assert!(outcome.reshuffles >= 1);
        assert_eq!(outcome.moves.len(), 2);
    }

    #[test]
    fn test_play_out_on_generated_board() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut board = generate(&Difficulty::Easy.config(), &mut rng).unwrap();
        let outcome = play_out(&mut board, &mut rng, 100);
        assert_eq!(outcome.moves.len() * 2 + board.occupied_count(), 48);
        assert_eq!(outcome.cleared, board.occupied_count() == 0);
    }

    #[test]
    fn test_play_out_hard_boards_keep_long_chain_scores() {
        let config = Difficulty::Hard.config();
        let mut best = 0;
        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut board = generate(&config, &mut rng).unwrap();
            let outcome = play_out(&mut board, &mut rng, 10);
            assert_eq!(outcome.moves.len() * 2 + board.occupied_count(), 120);
            // Every move scores at least the base.
            assert!(outcome.score >= outcome.moves.len() as u64 * u64::from(BASE_SCORE));
            best = best.max(outcome.score);
        }
        // Some chain runs past 47 matches, which no longer fits in a u32.
        assert!(best > u64::from(u32::MAX), "best score {}", best);
    }
}
