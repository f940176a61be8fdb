//! Store and API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use derive_more::{Display, Error, From};
use derive_new::new;
use noughts_rules::{RulesError, RulesErrorKind};
use serde::Serialize;
use tracing::{instrument, warn};

/// Specific store error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum StoreErrorKind {
    /// No game is registered under the requested id.
    #[display("no game found for id {_0}")]
    NotFound(String),
}

/// Store error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", kind, file, line)]
pub struct StoreError {
    /// What went wrong.
    pub kind: StoreErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: StoreErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Shorthand for a [`StoreErrorKind::NotFound`] error.
    #[track_caller]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::NotFound(id.into()))
    }
}

/// Any failure a request handler can report.
#[derive(Debug, Display, From, Error)]
pub enum ApiError {
    /// Lookup failed.
    #[display("{_0}")]
    Store(StoreError),
    /// The rules engine refused the operation.
    #[display("{_0}")]
    Rules(RulesError),
}

/// JSON body sent with every error response.
#[derive(Debug, Clone, Serialize, new)]
pub struct ErrorBody {
    /// Error kind: `NotFound`, `GameFinished` or `IllegalMove`.
    error: &'static str,
    /// Human-readable explanation.
    detail: String,
}

impl ApiError {
    /// HTTP status, kind name and message for this error.
    pub fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::Store(err) => match &err.kind {
                StoreErrorKind::NotFound(id) => (
                    StatusCode::NOT_FOUND,
                    "NotFound",
                    format!("No game found for the provided ID ({id})"),
                ),
            },
            ApiError::Rules(err) => match err.kind {
                RulesErrorKind::GameFinished(status) => (
                    StatusCode::BAD_REQUEST,
                    "GameFinished",
                    format!(
                        "The game found for the provided ID has already been completed ({status})"
                    ),
                ),
                RulesErrorKind::IllegalMove(reason) => (
                    StatusCode::BAD_REQUEST,
                    "IllegalMove",
                    format!("Unable to make a move at the requested location: {reason}"),
                ),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, detail) = self.parts();
        warn!(status = %status, kind, error = %self, "Request rejected");
        (status, Json(ErrorBody::new(kind, detail))).into_response()
    }
}
