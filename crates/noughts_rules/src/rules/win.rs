//! Win detection logic.

use crate::types::{Board, Cell, Mark, Move};
use tracing::instrument;

/// Every winning line as `(x, y)` triples, in evaluation order:
/// rows top to bottom, columns left to right, main diagonal, anti-diagonal.
pub const LINES: [[(usize, usize); 3]; 8] = [
    // Rows
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    // Columns
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    // Diagonals
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// Checks if there is a winner on the board.
///
/// Returns the mark of the first complete line in [`LINES`] order,
/// `None` if no line is complete.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Mark> {
    LINES.iter().find_map(|line| {
        let [a, b, c] = line.map(|(x, y)| board.get(Move::at(x, y)));
        match a {
            Cell::Occupied(mark) if a == b && b == c => Some(mark),
            _ => None,
        }
    })
}
