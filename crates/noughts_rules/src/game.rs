//! Game aggregate and the turn-resolution protocol.

use crate::error::{IllegalMoveReason, RulesError};
use crate::rules;
use crate::selector::MoveSelector;
use crate::types::{
    Board, CELL_COUNT, Cell, GameId, GameStatus, Mark, Move, RecordedMove, move_label,
};
use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::{debug, info, instrument, warn};

/// Mark always played by the human.
pub const USER_SYMBOL: Mark = Mark::X;

/// Mark always played by the computer.
pub const COMPUTER_SYMBOL: Mark = Mark::O;

/// One game of noughts & crosses against the computer.
///
/// State only changes through [`Game::capture_move`], [`Game::play_turn`] and
/// [`Game::forfeit`], which check every precondition before touching the
/// board, the history or the status.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    id: GameId,
    created_at: DateTime<Utc>,
    status: GameStatus,
    user_symbol: Mark,
    computer_symbol: Mark,
    #[serde(rename = "gameBoard")]
    board: Board,
    #[serde(serialize_with = "serialize_history")]
    moves: Vec<RecordedMove>,
}

/// Result of one successful [`Game::play_turn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnOutcome {
    /// The computer's reply, absent when the human's move ended the game.
    pub computer_move: Option<Move>,
    /// Status after the turn.
    pub status: GameStatus,
}

impl Game {
    /// Creates a game with a fresh random id, stamped now.
    #[instrument]
    pub fn new() -> Self {
        Self::with_id(GameId::random(), Utc::now())
    }

    /// Creates a game with a known id and creation time.
    #[instrument]
    pub fn with_id(id: GameId, created_at: DateTime<Utc>) -> Self {
        debug!(game_id = %id, "Creating game");
        Self {
            id,
            created_at,
            status: GameStatus::NotStarted,
            user_symbol: USER_SYMBOL,
            computer_symbol: COMPUTER_SYMBOL,
            board: Board::new(),
            moves: Vec::with_capacity(CELL_COUNT),
        }
    }

    /// Returns the game id.
    pub fn id(&self) -> GameId {
        self.id
    }

    /// Returns the creation time.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the current status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the human's mark.
    pub fn user_symbol(&self) -> Mark {
        self.user_symbol
    }

    /// Returns the computer's mark.
    pub fn computer_symbol(&self) -> Mark {
        self.computer_symbol
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the moves in capture order.
    pub fn moves(&self) -> &[RecordedMove] {
        &self.moves
    }

    /// Returns the labelled move history.
    pub fn history(&self) -> MoveHistory<'_> {
        MoveHistory(&self.moves)
    }

    /// Fails with `GameFinished` if the game is in a terminal status.
    #[instrument(skip(self), fields(game_id = %self.id, status = ?self.status))]
    pub fn check_in_progress(&self) -> Result<(), RulesError> {
        if self.status.is_terminal() {
            debug!("Game already finished");
            return Err(RulesError::finished(self.status));
        }
        Ok(())
    }

    /// Places `player`'s mark and records the move.
    ///
    /// Fails with `GameFinished` on a terminal game (checked first) and with
    /// `IllegalMove` if the cell is taken. Nothing changes on failure.
    #[instrument(skip(self), fields(game_id = %self.id))]
    pub fn capture_move(&mut self, mv: Move, player: Mark) -> Result<(), RulesError> {
        self.check_in_progress()?;

        if !self.board.is_empty(mv) {
            warn!(x = mv.x(), y = mv.y(), "Cell already occupied");
            return Err(RulesError::illegal(IllegalMoveReason::Occupied {
                x: mv.x(),
                y: mv.y(),
            }));
        }

        if self.status == GameStatus::NotStarted {
            self.set_status(GameStatus::InProgress);
        }
        self.board.set(mv, Cell::Occupied(player));
        self.moves.push(RecordedMove::new(mv, player));

        debug!(
            label = %move_label(self.moves.len() - 1),
            x = mv.x(),
            y = mv.y(),
            "Move captured"
        );
        Ok(())
    }

    /// Every empty cell, row-major.
    pub fn available_moves(&self) -> Vec<Move> {
        rules::available_moves(&self.board)
    }

    /// Mark of the first complete line, if any.
    pub fn check_winner(&self) -> Option<Mark> {
        rules::check_winner(&self.board)
    }

    /// Gives the game up. Board and history are left as they are.
    #[instrument(skip(self), fields(game_id = %self.id))]
    pub fn forfeit(&mut self) -> Result<(), RulesError> {
        self.check_in_progress()?;
        self.set_status(GameStatus::Forfeited);
        info!("Game forfeited");
        Ok(())
    }

    /// Plays the human's move, then the computer's reply.
    ///
    /// 1. Reject if the game is over.
    /// 2. Capture the human's move.
    /// 3. Stop with `UserWon` if it completes a line.
    /// 4. Stop with `Tie` if the board is full.
    /// 5. Capture the move `selector` picks for the computer.
    /// 6. Set `ComputerWon` if that completes a line.
    #[instrument(skip(self, selector), fields(game_id = %self.id))]
    pub fn play_turn(
        &mut self,
        mv: Move,
        selector: &mut impl MoveSelector,
    ) -> Result<TurnOutcome, RulesError> {
        self.check_in_progress()?;
        self.capture_move(mv, self.user_symbol)?;

        if self.check_winner() == Some(self.user_symbol) {
            self.set_status(GameStatus::UserWon);
            info!("User won");
            return Ok(self.outcome(None));
        }

        if rules::is_full(&self.board) {
            self.set_status(GameStatus::Tie);
            info!("Game tied");
            return Ok(self.outcome(None));
        }

        // Non-empty: the board has at least one free cell.
        let available = self.available_moves();
        let reply = match selector.select(&available) {
            Some(choice) if available.contains(&choice) => choice,
            other => {
                warn!(?other, "Selector gave no legal move, playing first available");
                available[0]
            }
        };
        self.capture_move(reply, self.computer_symbol)?;

        if self.check_winner() == Some(self.computer_symbol) {
            self.set_status(GameStatus::ComputerWon);
            info!("Computer won");
        }

        Ok(self.outcome(Some(reply)))
    }

    fn outcome(&self, computer_move: Option<Move>) -> TurnOutcome {
        debug!(board = %self.board.display(), "Board after turn");
        TurnOutcome {
            computer_move,
            status: self.status,
        }
    }

    fn set_status(&mut self, status: GameStatus) {
        debug_assert!(!self.status.is_terminal(), "status never leaves a terminal state");
        debug!(from = ?self.status, to = ?status, "Status transition");
        self.status = status;
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

/// Move history keyed by sequence label (`"Move #1"`, `"Move #2"`, ...).
///
/// Labels are derived from position in capture order and serialize as a map
/// in that order.
#[derive(Debug, Clone, Copy)]
pub struct MoveHistory<'a>(&'a [RecordedMove]);

impl<'a> MoveHistory<'a> {
    /// Number of recorded moves.
    pub fn len(self) -> usize {
        self.0.len()
    }

    /// True before the first capture.
    pub fn is_empty(self) -> bool {
        self.0.is_empty()
    }

    /// Labelled moves in capture order.
    pub fn iter(self) -> impl Iterator<Item = (String, &'a RecordedMove)> + 'a {
        self.0.iter().enumerate().map(|(i, m)| (move_label(i), m))
    }
}

impl Serialize for MoveHistory<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (label, recorded) in self.iter() {
            map.serialize_entry(&label, recorded)?;
        }
        map.end()
    }
}

fn serialize_history<S: Serializer>(
    moves: &[RecordedMove],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    MoveHistory(moves).serialize(serializer)
}
