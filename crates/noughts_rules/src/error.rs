//! Rules error types.

use crate::types::GameStatus;
use derive_more::{Display, Error};
use tracing::instrument;

/// Why a move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum IllegalMoveReason {
    /// The target cell already holds a mark.
    #[display("cell ({x}, {y}) is already occupied")]
    Occupied {
        /// Row of the rejected move.
        x: usize,
        /// Column of the rejected move.
        y: usize,
    },
    /// A coordinate falls outside the 3x3 board.
    #[display("coordinate ({x}, {y}) is outside the board, both must be in 0..=2")]
    OutOfRange {
        /// Requested row.
        x: i64,
        /// Requested column.
        y: i64,
    },
}

/// Specific rules error conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RulesErrorKind {
    /// A mutation was attempted on a game in a terminal status.
    #[display("game has already finished ({_0})")]
    GameFinished(GameStatus),
    /// The move cannot be played.
    #[display("illegal move: {_0}")]
    IllegalMove(IllegalMoveReason),
}

/// Rules error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Rules error: {} at {}:{}", kind, file, line)]
pub struct RulesError {
    /// What went wrong.
    pub kind: RulesErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl RulesError {
    /// Creates a new rules error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: RulesErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Shorthand for a [`RulesErrorKind::GameFinished`] error.
    #[track_caller]
    pub fn finished(status: GameStatus) -> Self {
        Self::new(RulesErrorKind::GameFinished(status))
    }

    /// Shorthand for a [`RulesErrorKind::IllegalMove`] error.
    #[track_caller]
    pub fn illegal(reason: IllegalMoveReason) -> Self {
        Self::new(RulesErrorKind::IllegalMove(reason))
    }

    /// Returns true for [`RulesErrorKind::GameFinished`].
    pub fn is_game_finished(&self) -> bool {
        matches!(self.kind, RulesErrorKind::GameFinished(_))
    }

    /// Returns true for [`RulesErrorKind::IllegalMove`].
    pub fn is_illegal_move(&self) -> bool {
        matches!(self.kind, RulesErrorKind::IllegalMove(_))
    }
}
