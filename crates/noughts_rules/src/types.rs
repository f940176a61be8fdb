//! Core domain types for noughts & crosses.

use crate::error::{IllegalMoveReason, RulesError};
use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

/// Side length of the board.
pub const BOARD_SIZE: usize = 3;

/// Number of cells on the board, and so the longest possible history.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Mark placed on the board by a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Mark {
    /// Crosses, always played by the human.
    X,
    /// Noughts, always played by the computer.
    O,
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// Nobody has played here yet.
    #[default]
    Empty,
    /// Cell holding a player's mark.
    Occupied(Mark),
}

impl Cell {
    /// Single character shown for this cell.
    pub fn symbol(self) -> &'static str {
        match self {
            Cell::Empty => ".",
            Cell::Occupied(Mark::X) => "X",
            Cell::Occupied(Mark::O) => "O",
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

/// Board coordinates of one cell, `x` being the row and `y` the column.
///
/// A `Move` can only be built through [`Move::new`] (or deserialization,
/// which goes through the same check), so every value in circulation is
/// on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawMove")]
pub struct Move {
    x: u8,
    y: u8,
}

/// Unchecked wire form of a [`Move`].
#[derive(Debug, Clone, Copy, Deserialize)]
struct RawMove {
    x: i64,
    y: i64,
}

impl TryFrom<RawMove> for Move {
    type Error = RulesError;

    fn try_from(raw: RawMove) -> Result<Self, Self::Error> {
        Move::new(raw.x, raw.y)
    }
}

impl Move {
    /// Creates a move, rejecting coordinates outside `0..=2`.
    #[track_caller]
    pub fn new(x: i64, y: i64) -> Result<Self, RulesError> {
        let range = 0..BOARD_SIZE as i64;
        if range.contains(&x) && range.contains(&y) {
            Ok(Self::at(x as usize, y as usize))
        } else {
            Err(RulesError::illegal(IllegalMoveReason::OutOfRange { x, y }))
        }
    }

    /// Builds a move from indices already known to be on the board.
    pub(crate) fn at(x: usize, y: usize) -> Self {
        debug_assert!(x < BOARD_SIZE && y < BOARD_SIZE);
        Self {
            x: x as u8,
            y: y as u8,
        }
    }

    /// Row index.
    pub fn x(self) -> usize {
        self.x as usize
    }

    /// Column index.
    pub fn y(self) -> usize {
        self.y as usize
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// 3x3 board, indexed `[x][y]`.
///
/// Serializes as a grid of single-character strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the cell a move points at.
    pub fn get(&self, mv: Move) -> Cell {
        self.cells[mv.x()][mv.y()]
    }

    /// Writes a cell. Callers are responsible for the occupancy check.
    pub(crate) fn set(&mut self, mv: Move, cell: Cell) {
        self.cells[mv.x()][mv.y()] = cell;
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, mv: Move) -> bool {
        self.get(mv) == Cell::Empty
    }

    /// Returns the rows of the grid.
    pub fn cells(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// Number of cells holding a mark.
    pub fn occupied_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| **c != Cell::Empty)
            .count()
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|c| c.symbol())
                    .collect::<Vec<_>>()
                    .join("|")
            })
            .collect::<Vec<_>>()
            .join("\n-+-+-\n")
    }
}

/// A move together with the mark that made it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecordedMove {
    #[serde(flatten)]
    position: Move,
    player: Mark,
}

impl RecordedMove {
    /// Records that `player` played `position`.
    pub fn new(position: Move, player: Mark) -> Self {
        Self { position, player }
    }

    /// Where the mark went.
    pub fn position(&self) -> Move {
        self.position
    }

    /// Who played it.
    pub fn player(&self) -> Mark {
        self.player
    }
}

/// Label of the move captured when the history holds `history_len` entries.
///
/// Labels are 1-based: the first capture is `"Move #1"`.
pub fn move_label(history_len: usize) -> String {
    format!("Move #{}", history_len + 1)
}

/// Lifecycle status of a game.
///
/// Serialized by variant name; `Display` gives the player-facing sentence.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    strum::EnumIter,
)]
pub enum GameStatus {
    /// Created, nobody has moved.
    #[default]
    #[display("Not Started")]
    NotStarted,
    /// At least one move has been captured.
    #[display("In Progress")]
    InProgress,
    /// The human completed a line.
    #[display("Completed - You Won!")]
    UserWon,
    /// The computer completed a line.
    #[display("Completed - Computer Won!")]
    ComputerWon,
    /// Board filled with no line completed.
    #[display("Completed - It's a Tie!")]
    Tie,
    /// The human gave up.
    #[display("Forfeited")]
    Forfeited,
}

impl GameStatus {
    /// Returns true if no further moves are accepted.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::NotStarted | GameStatus::InProgress)
    }
}

/// Globally unique game identifier.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    FromStr,
)]
#[serde(transparent)]
pub struct GameId(Uuid);

impl GameId {
    /// Generates a fresh random (v4) identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_move_accepts_board_coordinates() {
        for x in 0..3 {
            for y in 0..3 {
                let mv = Move::new(x, y).unwrap();
                assert_eq!((mv.x(), mv.y()), (x as usize, y as usize));
            }
        }
    }

    #[test]
    fn test_move_rejects_out_of_range() {
        for (x, y) in [(-1, 0), (0, -1), (3, 0), (0, 3), (100, 100)] {
            let err = Move::new(x, y).unwrap_err();
            assert!(err.is_illegal_move());
        }
    }

    #[test]
    fn test_move_deserialize_is_range_checked() {
        let mv: Move = serde_json::from_str(r#"{"x": 2, "y": 1}"#).unwrap();
        assert_eq!(mv, Move::new(2, 1).unwrap());
        assert!(serde_json::from_str::<Move>(r#"{"x": 3, "y": 1}"#).is_err());
        assert!(serde_json::from_str::<Move>(r#"{"x": -1, "y": 0}"#).is_err());
    }

    #[test]
    fn test_move_labels_are_one_based() {
        assert_eq!(move_label(0), "Move #1");
        assert_eq!(move_label(8), "Move #9");
    }

    #[test]
    fn test_terminal_statuses() {
        let terminal: Vec<_> = GameStatus::iter().filter(|s| s.is_terminal()).collect();
        assert_eq!(
            terminal,
            vec![
                GameStatus::UserWon,
                GameStatus::ComputerWon,
                GameStatus::Tie,
                GameStatus::Forfeited
            ]
        );
    }

    #[test]
    fn test_board_serializes_as_symbol_grid() {
        let mut board = Board::new();
        board.set(Move::at(0, 0), Cell::Occupied(Mark::X));
        board.set(Move::at(1, 2), Cell::Occupied(Mark::O));
        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(
            json,
            serde_json::json!([["X", ".", "."], [".", ".", "O"], [".", ".", "."]])
        );
    }

    #[test]
    fn test_recorded_move_serializes_flat() {
        let rec = RecordedMove::new(Move::new(1, 2).unwrap(), Mark::O);
        let json = serde_json::to_value(rec).unwrap();
        assert_eq!(json, serde_json::json!({"x": 1, "y": 2, "player": "O"}));
    }

    #[test]
    fn test_board_display() {
        let mut board = Board::new();
        board.set(Move::at(1, 1), Cell::Occupied(Mark::X));
        assert_eq!(board.display(), ".|.|.\n-+-+-\n.|X|.\n-+-+-\n.|.|.");
    }
}
