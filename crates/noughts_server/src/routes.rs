//! HTTP routes over the game store and rules engine.

use crate::error::ApiError;
use crate::store::GameStore;
use axum::extract::{Path, Query, Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use noughts_rules::{Game, Move, MoveSelector};
use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use tower::ServiceBuilder;
use tracing::{info, instrument};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    store: GameStore,
    computer: Arc<Mutex<Box<dyn MoveSelector + Send>>>,
}

impl AppState {
    /// Bundles a store with the computer opponent's move selector.
    pub fn new(store: GameStore, computer: impl MoveSelector + Send + 'static) -> Self {
        Self {
            store,
            computer: Arc::new(Mutex::new(Box::new(computer))),
        }
    }

    /// The game store behind the routes.
    pub fn store(&self) -> &GameStore {
        &self.store
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

/// Builds the service router.
///
/// | Method | Path | Action |
/// |---|---|---|
/// | `GET` | `/` | service description |
/// | `POST` | `/games` | create a game |
/// | `GET` | `/games?order=asc\|desc` | list games by creation time |
/// | `GET` | `/games/{id}` | fetch a game |
/// | `PATCH` | `/games/{id}` | play a move, body `{"x": 0, "y": 0}` |
/// | `GET` | `/games/{id}/moves` | labelled move history |
/// | `POST` | `/games/{id}/forfeit` | give up |
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/games", post(create_game).get(list_games))
        .route("/games/{id}", get(get_game).patch(apply_move))
        .route("/games/{id}/moves", get(get_moves))
        .route("/games/{id}/forfeit", post(forfeit_game))
        .layer(ServiceBuilder::new().map_request(|req: Request| {
            info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
            req
        }))
        .with_state(state)
}

/// Title and instructions returned from `/`.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    /// Service name.
    pub title: &'static str,
    /// How to start playing.
    pub description: &'static str,
}

/// Sort direction for game listings, by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest first.
    #[default]
    Asc,
    /// Newest first.
    Desc,
}

/// Query string accepted by the listing route.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ListParams {
    /// Requested order, ascending when absent.
    #[serde(default)]
    pub order: SortOrder,
}

/// Body of a move request.
///
/// Coordinates are range-checked by [`Move::new`], not by deserialization,
/// so an out-of-range cell is reported as an illegal move. Integers that do
/// not fit in `i64` saturate rather than failing to parse.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Row, 0 to 2.
    #[serde(deserialize_with = "saturating_coordinate")]
    pub x: i64,
    /// Column, 0 to 2.
    #[serde(deserialize_with = "saturating_coordinate")]
    pub y: i64,
}

fn saturating_coordinate<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    struct CoordinateVisitor;

    impl Visitor<'_> for CoordinateVisitor {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an integer coordinate")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            Ok(i64::try_from(v).unwrap_or(i64::MAX))
        }

        // Integer literals beyond u64 arrive as floats.
        fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
            if v.fract() == 0.0 {
                Ok(v as i64)
            } else {
                Err(E::invalid_value(Unexpected::Float(v), &self))
            }
        }
    }

    deserializer.deserialize_any(CoordinateVisitor)
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (status, Json(body)).into_response()
}

async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        title: "Noughts & Crosses",
        description: "Welcome to the thrilling game of Noughts & Crosses (otherwise known as \
                      tic-tac-toe)! To start playing, make a POST request to `/games`",
    })
}

#[instrument(skip(state))]
async fn create_game(State(state): State<AppState>) -> Response {
    let handle = state.store.create();
    let game = handle.lock();
    json_response(StatusCode::CREATED, &*game)
}

#[instrument(skip(state))]
async fn list_games(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Json<Vec<Game>> {
    let mut games: Vec<Game> = state.store.list().iter().map(|h| h.snapshot()).collect();
    match params.order {
        SortOrder::Asc => games.sort_by_key(|g| g.created_at()),
        SortOrder::Desc => games.sort_by_key(|g| std::cmp::Reverse(g.created_at())),
    }
    Json(games)
}

#[instrument(skip(state))]
async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let handle = state.store.get_by_str(&id)?;
    let game = handle.lock();
    Ok(json_response(StatusCode::OK, &*game))
}

#[instrument(skip(state))]
async fn get_moves(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let handle = state.store.get_by_str(&id)?;
    let game = handle.lock();
    Ok(json_response(StatusCode::OK, &game.history()))
}

/// Runs a full turn while holding the game's lock, so two requests racing on
/// the same game cannot both be accepted against the same board.
#[instrument(skip(state))]
async fn apply_move(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<MoveRequest>,
) -> Result<Response, ApiError> {
    let handle = state.store.get_by_str(&id)?;
    let mut game = handle.lock();
    game.check_in_progress()?;
    let mv = Move::new(req.x, req.y)?;

    let mut computer = state.computer.lock().unwrap_or_else(PoisonError::into_inner);
    let outcome = game.play_turn(mv, &mut *computer)?;
    drop(computer);

    info!(
        game_id = %game.id(),
        user_move = %mv,
        computer_move = ?outcome.computer_move,
        status = ?outcome.status,
        "Turn resolved"
    );
    Ok(json_response(StatusCode::OK, &*game))
}

#[instrument(skip(state))]
async fn forfeit_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let handle = state.store.get_by_str(&id)?;
    let mut game = handle.lock();
    game.forfeit()?;
    Ok(json_response(StatusCode::OK, &*game))
}
