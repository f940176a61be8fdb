//! Noughts & crosses rules engine.
//!
//! Pure game logic for a human (`X`) playing against a randomized computer
//! (`O`): board representation, move legality, win and tie detection,
//! status transitions and forfeiture.
//!
//! # Example
//!
//! ```
//! use noughts_rules::{Game, GameStatus, Move, RandomSelector};
//!
//! let mut game = Game::new();
//! let mut computer = RandomSelector::seeded(7);
//!
//! let outcome = game.play_turn(Move::new(1, 1)?, &mut computer)?;
//! assert_eq!(outcome.status, GameStatus::InProgress);
//! assert_eq!(game.moves().len(), 2);
//! # Ok::<(), noughts_rules::RulesError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod game;
pub mod rules;
mod selector;
mod types;

pub use error::{IllegalMoveReason, RulesError, RulesErrorKind};
pub use game::{COMPUTER_SYMBOL, Game, MoveHistory, TurnOutcome, USER_SYMBOL};
pub use selector::{MoveSelector, RandomSelector, ScriptedSelector};
pub use types::{
    BOARD_SIZE, Board, CELL_COUNT, Cell, GameId, GameStatus, Mark, Move, RecordedMove, move_label,
};
