//! HTTP endpoint handlers. These are thin wrappers that authenticate, then
//! forward to core logic. All engine faults bubble up as `EngineError` and
//! are mapped to stable client responses by its `IntoResponse` impl.

use axum::{extract::{State, Query}, http::HeaderMap, Json, response::IntoResponse};
use tracing::{info, instrument};

use crate::error::EngineError;
use crate::logic::evaluate_submission;
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state, headers), fields(task_id = q.task_id))]
pub async fn http_get_task(
  State(state): State<AppState>,
  headers: HeaderMap,
  Query(q): Query<TaskQuery>,
) -> Result<Json<TaskOut>, EngineError> {
  let principal = state.auth.authenticate(&headers)?;
  let task = state
    .store
    .fetch_task(q.task_id)
    .await?
    .ok_or(EngineError::TaskNotFound(q.task_id))?;
  info!(target: "grading", task_id = task.id, user_id = %principal.user_id, "HTTP task served");
  Ok(Json(to_out(&task)))
}

#[instrument(level = "info", skip(state, headers, body), fields(task_id = body.task_id))]
pub async fn http_post_answer(
  State(state): State<AppState>,
  headers: HeaderMap,
  Json(body): Json<AnswerIn>,
) -> Result<Json<AnswerOut>, EngineError> {
  let principal = state.auth.authenticate(&headers)?;
  let verdict = evaluate_submission(&state, &principal, body.task_id, &body.answer).await?;
  info!(target: "grading", task_id = body.task_id, correct = verdict.is_correct, "HTTP submit_answer evaluated");
  Ok(Json(AnswerOut { is_correct: verdict.is_correct, message: verdict.message }))
}
