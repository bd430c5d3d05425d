//! Engine fault taxonomy and its HTTP mapping.
//!
//! Every failure a request can hit is one of these variants, so the handler
//! layer is a single `Result<_, EngineError>` and the client always sees a
//! stable, generic body. Internal detail (raw store/sandbox errors) is logged
//! server-side only.
//!
//! Note the deliberate absences: a wrong answer is not an error (it is an
//! `is_correct: false` verdict), and learner code that crashes or times out
//! in the sandbox is a diagnostic verdict, not a `Sandbox` fault.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::sandbox::SandboxError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum EngineError {
    /// No credential, or one we don't recognize. Abort before any other work.
    #[error("authentication required")]
    Unauthenticated,

    /// The submission's shape doesn't match what the task's strategy expects.
    #[error("invalid submission: {0}")]
    BadRequest(String),

    #[error("task {0} not found")]
    TaskNotFound(i64),

    /// The task's solution document is missing fields, carries an unknown
    /// validation kind, or otherwise fails to decode. A content bug, kept
    /// distinguishable from a learner mistake.
    #[error("task definition error: {0}")]
    Definition(String),

    /// The sandbox could not spawn or drive the child process at all.
    #[error("sandbox failure: {0}")]
    Sandbox(#[from] SandboxError),

    /// A storage operation failed for a reason other than uniqueness.
    #[error("storage failure: {0}")]
    Store(#[from] StoreError),
}

#[derive(Serialize)]
struct ErrorOut {
    error: &'static str,
}

impl IntoResponse for EngineError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            EngineError::Unauthenticated => (StatusCode::UNAUTHORIZED, "authentication required"),
            EngineError::BadRequest(_) => (StatusCode::BAD_REQUEST, "invalid request"),
            EngineError::TaskNotFound(_) => (StatusCode::NOT_FOUND, "task not found"),
            EngineError::Definition(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "task definition error")
            }
            EngineError::Sandbox(_) | EngineError::Store(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error")
            }
        };

        if status.is_server_error() {
            error!(target: "praxis_backend", error = %self, "Request failed with server error");
        }

        (status, Json(ErrorOut { error: body })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_per_taxonomy() {
        let cases = [
            (EngineError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (EngineError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (EngineError::TaskNotFound(7), StatusCode::NOT_FOUND),
            (
                EngineError::Definition("bad".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, want) in cases {
            assert_eq!(err.into_response().status(), want);
        }
    }
}
