//! Legal move enumeration.

use crate::types::{BOARD_SIZE, Board, Move};
use tracing::instrument;

/// Returns every empty cell as a [`Move`], scanning rows top to bottom
/// and each row left to right.
///
/// The order is stable so a seeded move selector replays identically.
#[instrument(skip(board))]
pub fn available_moves(board: &Board) -> Vec<Move> {
    (0..BOARD_SIZE)
        .flat_map(|x| (0..BOARD_SIZE).map(move |y| Move::at(x, y)))
        .filter(|mv| board.is_empty(*mv))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Cell, Mark};

    #[test]
    fn test_empty_board_offers_every_cell_row_major() {
        let moves = available_moves(&Board::new());
        let coords: Vec<_> = moves.iter().map(|m| (m.x(), m.y())).collect();
        assert_eq!(
            coords,
            vec![
                (0, 0),
                (0, 1),
                (0, 2),
                (1, 0),
                (1, 1),
                (1, 2),
                (2, 0),
                (2, 1),
                (2, 2)
            ]
        );
    }

    #[test]
    fn test_occupied_cells_filtered() {
        let mut board = Board::new();
        board.set(Move::at(0, 0), Cell::Occupied(Mark::X));
        board.set(Move::at(1, 1), Cell::Occupied(Mark::O));

        let moves = available_moves(&board);
        assert_eq!(moves.len(), 7);
        assert!(!moves.contains(&Move::at(0, 0)));
        assert!(!moves.contains(&Move::at(1, 1)));
        assert!(moves.contains(&Move::at(2, 2)));
    }
}
