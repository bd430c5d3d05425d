//! Storage collaborator boundary.
//!
//! The engine needs exactly two atomic operations from durable storage:
//!   - fetch a task by id
//!   - insert a progress record, reporting an existing pair as
//!     `AlreadyRecorded` rather than an error (conflict-as-success)
//!
//! Both live behind the [`Store`] trait so the backing engine is swappable.
//! [`MemStore`] is the in-process implementation: the uniqueness invariant is
//! held under a single write lock, which gives the atomic
//! insert-with-conflict-detection the recorder relies on.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, instrument};

use crate::domain::{Task, TaskSource};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Outcome of a progress insert. Both variants are success for the caller;
/// the distinction only matters for logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressOutcome {
    Inserted,
    AlreadyRecorded,
}

#[async_trait]
pub trait Store: Send + Sync {
    async fn fetch_task(&self, id: i64) -> Result<Option<Task>, StoreError>;

    /// Insert `(user_id, task_id)` at most once. An existing pair is
    /// `AlreadyRecorded`, never an error.
    async fn insert_progress(&self, user_id: &str, task_id: i64)
        -> Result<ProgressOutcome, StoreError>;
}

pub struct MemStore {
    tasks: Arc<RwLock<HashMap<i64, Task>>>,
    progress: Arc<RwLock<HashSet<(String, i64)>>>,
}

impl MemStore {
    /// Build the store from the given tasks and log an inventory summary
    /// by task type and source.
    #[instrument(level = "info", skip_all, fields(task_count = tasks.len()))]
    pub fn new(tasks: Vec<Task>) -> Self {
        let mut by_id = HashMap::<i64, Task>::new();
        for t in tasks {
            by_id.insert(t.id, t);
        }

        let mut count_by_type: HashMap<String, (usize, usize)> = HashMap::new();
        for t in by_id.values() {
            let entry = count_by_type.entry(t.task_type.clone()).or_insert((0, 0));
            match t.source {
                TaskSource::LocalBank => entry.0 += 1,
                TaskSource::Seed => entry.1 += 1,
            }
        }
        for (task_type, (bank, seed)) in count_by_type {
            info!(target: "grading", %task_type, local_bank = bank, seed = seed, "Startup task inventory");
        }

        Self {
            tasks: Arc::new(RwLock::new(by_id)),
            progress: Arc::new(RwLock::new(HashSet::new())),
        }
    }
}

#[async_trait]
impl Store for MemStore {
    async fn fetch_task(&self, id: i64) -> Result<Option<Task>, StoreError> {
        let tasks = self.tasks.read().await;
        Ok(tasks.get(&id).cloned())
    }

    async fn insert_progress(
        &self,
        user_id: &str,
        task_id: i64,
    ) -> Result<ProgressOutcome, StoreError> {
        // Single write lock: check-and-insert is atomic, so two concurrent
        // correct submissions cannot both observe "absent".
        let mut progress = self.progress.write().await;
        if progress.insert((user_id.to_string(), task_id)) {
            Ok(ProgressOutcome::Inserted)
        } else {
            Ok(ProgressOutcome::AlreadyRecorded)
        }
    }
}
