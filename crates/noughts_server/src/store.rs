//! In-memory registry of live games.

use crate::error::StoreError;
use noughts_rules::{Game, GameId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument};

/// Shared handle to one stored game.
///
/// Every handle for the same id points at the same instance; changes made
/// through one are seen by all. Hold the guard from [`GameHandle::lock`] for
/// a whole turn to keep concurrent requests on the same game serialized.
#[derive(Debug, Clone)]
pub struct GameHandle {
    id: GameId,
    game: Arc<Mutex<Game>>,
}

impl GameHandle {
    fn new(game: Game) -> Self {
        Self {
            id: game.id(),
            game: Arc::new(Mutex::new(game)),
        }
    }

    /// Id of the game behind this handle.
    pub fn id(&self) -> GameId {
        self.id
    }

    /// Locks the game for reading or mutation.
    ///
    /// Game operations validate before they mutate, so a guard recovered
    /// from a poisoned lock still sees a consistent game.
    pub fn lock(&self) -> MutexGuard<'_, Game> {
        self.game.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copies the current state of the game.
    pub fn snapshot(&self) -> Game {
        self.lock().clone()
    }

    /// True if both handles refer to the same stored instance.
    pub fn same_game(&self, other: &GameHandle) -> bool {
        Arc::ptr_eq(&self.game, &other.game)
    }
}

/// Concurrent game registry keyed by [`GameId`].
///
/// Cloning the store shares the registry.
#[derive(Debug, Clone, Default)]
pub struct GameStore {
    games: Arc<Mutex<HashMap<GameId, GameHandle>>>,
}

impl GameStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating game store");
        Self::default()
    }

    fn registry(&self) -> MutexGuard<'_, HashMap<GameId, GameHandle>> {
        self.games.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates and registers a new game.
    #[instrument(skip(self))]
    pub fn create(&self) -> GameHandle {
        let mut games = self.registry();

        // v4 ids make a collision practically impossible; regenerate anyway.
        let mut game = Game::new();
        while games.contains_key(&game.id()) {
            game = Game::new();
        }

        let handle = GameHandle::new(game);
        games.insert(handle.id(), handle.clone());
        info!(game_id = %handle.id(), total = games.len(), "Created new game");
        handle
    }

    /// Looks up a game by id.
    #[instrument(skip(self))]
    pub fn get(&self, id: &GameId) -> Result<GameHandle, StoreError> {
        self.registry().get(id).cloned().ok_or_else(|| {
            debug!(game_id = %id, "Game not found");
            StoreError::not_found(id.to_string())
        })
    }

    /// Looks up a game by the textual form of its id.
    ///
    /// Text that is not a valid id cannot name a stored game and is reported
    /// as not found.
    #[instrument(skip(self))]
    pub fn get_by_str(&self, id: &str) -> Result<GameHandle, StoreError> {
        let parsed: GameId = id.trim().parse().map_err(|_| {
            debug!(game_id = id, "Malformed game id");
            StoreError::not_found(id)
        })?;
        self.get(&parsed)
    }

    /// Returns every stored game, in no particular order.
    #[instrument(skip(self))]
    pub fn list(&self) -> Vec<GameHandle> {
        let handles: Vec<_> = self.registry().values().cloned().collect();
        debug!(count = handles.len(), "Listed games");
        handles
    }

    /// Number of stored games.
    pub fn len(&self) -> usize {
        self.registry().len()
    }

    /// True if no game has been created yet.
    pub fn is_empty(&self) -> bool {
        self.registry().is_empty()
    }
}
