//! Core grading flow shared by the HTTP handlers.
//!
//! One request-scoped pass: load the task, decode its solution, dispatch to
//! the matching strategy, and record the completion on a correct verdict.
//! Everything the engine can get wrong is an [`EngineError`]; a wrong answer
//! is not an error, just an `is_correct: false` verdict.

use tracing::{info, instrument};

use crate::auth::Principal;
use crate::domain::Verdict;
use crate::error::EngineError;
use crate::progress::record_completion;
use crate::state::AppState;
use crate::validate::{decode_solution, validate};

#[instrument(level = "info", skip_all, fields(user_id = %principal.user_id, task_id))]
pub async fn evaluate_submission(
  state: &AppState,
  principal: &Principal,
  task_id: i64,
  answer: &serde_json::Value,
) -> Result<Verdict, EngineError> {
  let task = state
    .store
    .fetch_task(task_id)
    .await?
    .ok_or(EngineError::TaskNotFound(task_id))?;

  let solution = decode_solution(&task.solution)?;
  let verdict = validate(answer, &solution, state.sandbox.as_ref()).await?;

  if verdict.is_correct {
    record_completion(state.store.as_ref(), &principal.user_id, task_id).await;
  }

  info!(target: "grading", task_id, correct = verdict.is_correct, "Submission evaluated");
  Ok(verdict)
}
