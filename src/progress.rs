//! Idempotent completion recording.
//!
//! First completion wins: the store's conflict-as-success insert makes
//! retries and duplicate correct submissions harmless. A store fault here is
//! logged and escalated but never blocks the verdict; losing a completion
//! record is worse than a duplicate response, and the learner already earned
//! their result.

use tracing::{debug, error, info, instrument};

use crate::store::{ProgressOutcome, Store};

#[instrument(level = "debug", skip(store))]
pub async fn record_completion(store: &dyn Store, user_id: &str, task_id: i64) {
    match store.insert_progress(user_id, task_id).await {
        Ok(ProgressOutcome::Inserted) => {
            info!(target: "grading", %user_id, task_id, "Task completion recorded");
        }
        Ok(ProgressOutcome::AlreadyRecorded) => {
            debug!(target: "grading", %user_id, task_id, "Task already completed; nothing to record");
        }
        Err(e) => {
            error!(target: "grading", %user_id, task_id, error = %e, "Failed to record completion; verdict still returned");
        }
    }
}
