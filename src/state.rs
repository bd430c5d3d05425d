//! Application state: the store, the sandbox, and the auth table.
//!
//! Built once at startup from env + optional TOML config. Tasks come from the
//! config bank first, then built-in seeds fill in (without overwriting bank
//! ids), so the service is useful with zero configuration.

use std::sync::Arc;

use tracing::{error, instrument};

use crate::auth::AuthTokens;
use crate::config::{load_grader_config_from_env, GraderConfig};
use crate::domain::{Task, TaskSource};
use crate::sandbox::{ProcessSandbox, Sandbox};
use crate::seeds::seed_tasks;
use crate::store::{MemStore, Store};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub sandbox: Arc<dyn Sandbox>,
    pub auth: AuthTokens,
}

impl AppState {
    /// Build state from env: load config, assemble the task inventory,
    /// construct the sandbox runner and the auth table.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = load_grader_config_from_env().unwrap_or_default();
        Self::from_config(cfg)
    }

    pub fn from_config(cfg: GraderConfig) -> Self {
        let mut tasks = Vec::<Task>::new();
        let mut bank_ids = std::collections::HashSet::new();

        for tc in &cfg.tasks {
            // The TOML solution table is carried verbatim into JSON; decoding
            // against the kind schema happens per request.
            let solution = match serde_json::to_value(&tc.solution) {
                Ok(v) => v,
                Err(e) => {
                    error!(target: "grading", id = tc.id, error = %e, "Skipping bank task: unrepresentable solution");
                    continue;
                }
            };
            bank_ids.insert(tc.id);
            tasks.push(Task {
                id: tc.id,
                task_type: tc.task_type.clone(),
                source: TaskSource::LocalBank,
                title: tc.title.clone(),
                prompt: tc.prompt.clone(),
                solution,
            });
        }

        // Always include built-in seeds, but don't shadow bank ids.
        for t in seed_tasks() {
            if !bank_ids.contains(&t.id) {
                tasks.push(t);
            }
        }

        Self {
            store: Arc::new(MemStore::new(tasks)),
            sandbox: Arc::new(ProcessSandbox::from_config(&cfg.sandbox)),
            auth: AuthTokens::new(cfg.auth.tokens),
        }
    }
}
