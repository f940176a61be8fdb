//! Tie detection logic.

use crate::types::{Board, Cell};
use tracing::instrument;

/// Checks if the board is full (all cells occupied).
///
/// A full board with no winner is a tie.
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().flatten().all(|c| *c != Cell::Empty)
}

#[cfg(test)]
mod tests {
    use super::super::win::check_winner;
    use super::*;
    use crate::types::{Mark, Move};

    fn fill(board: &mut Board, layout: [&str; 3]) {
        for (x, row) in layout.iter().enumerate() {
            for (y, ch) in row.chars().enumerate() {
                let cell = match ch {
                    'X' => Cell::Occupied(Mark::X),
                    'O' => Cell::Occupied(Mark::O),
                    _ => Cell::Empty,
                };
                board.set(Move::at(x, y), cell);
            }
        }
    }

    #[test]
    fn test_empty_board_not_full() {
        assert!(!is_full(&Board::new()));
    }

    #[test]
    fn test_partial_board_not_full() {
        let mut board = Board::new();
        fill(&mut board, ["XO.", "...", "..."]);
        assert!(!is_full(&board));
    }

    #[test]
    fn test_tie_detection() {
        let mut board = Board::new();
        fill(&mut board, ["XOX", "OXX", "OXO"]);
        assert!(is_full(&board));
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_full_board_with_winner_is_not_tie() {
        let mut board = Board::new();
        fill(&mut board, ["XXX", "OOX", "XOO"]);
        assert!(is_full(&board));
        assert_eq!(check_winner(&board), Some(Mark::X));
    }
}
