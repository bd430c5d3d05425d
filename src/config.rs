//! Loading grader configuration (auth tokens, sandbox runtime, task bank) from TOML.
//!
//! See `GraderConfig` for the expected schema. Everything is optional: with no
//! config file at all the engine runs with seed tasks, the default sandbox
//! runtime, and an empty (fail-closed) auth table.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::{info, error};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct GraderConfig {
  #[serde(default)]
  pub auth: AuthConfig,
  #[serde(default)]
  pub sandbox: SandboxConfig,
  #[serde(default)]
  pub tasks: Vec<TaskCfg>,
}

/// Bearer credential -> user identity. Session issuance lives elsewhere;
/// the engine only verifies.
#[derive(Clone, Debug, Deserialize, Default)]
pub struct AuthConfig {
  #[serde(default)]
  pub tokens: HashMap<String, String>,
}

/// How to run untrusted submissions. `args` entries may contain `{file}`,
/// replaced with the scratch file holding the submission source.
#[derive(Clone, Debug, Deserialize)]
pub struct SandboxConfig {
  #[serde(default = "default_program")] pub program: String,
  #[serde(default = "default_args")] pub args: Vec<String>,
  #[serde(default = "default_extension")] pub extension: String,
  #[serde(default = "default_timeout_ms")] pub timeout_ms: u64,
}

fn default_program() -> String { "node".into() }
fn default_args() -> Vec<String> { vec!["{file}".into()] }
fn default_extension() -> String { "js".into() }
fn default_timeout_ms() -> u64 { 5_000 }

impl Default for SandboxConfig {
  fn default() -> Self {
    Self {
      program: default_program(),
      args: default_args(),
      extension: default_extension(),
      timeout_ms: default_timeout_ms(),
    }
  }
}

/// Task entry accepted in TOML configuration. The solution table is carried
/// verbatim; it is decoded against the validation-kind schema per request.
#[derive(Clone, Debug, Deserialize)]
pub struct TaskCfg {
  pub id: i64,
  pub task_type: String,
  #[serde(default)] pub title: String,
  #[serde(default)] pub prompt: String,
  pub solution: toml::Value,
}

/// Attempt to load `GraderConfig` from GRADER_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_grader_config_from_env() -> Option<GraderConfig> {
  let path = std::env::var("GRADER_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<GraderConfig>(&s) {
      Ok(cfg) => {
        info!(target: "praxis_backend", %path, "Loaded grader config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "praxis_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "praxis_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sandbox_defaults_apply_to_empty_tables() {
    let cfg: GraderConfig = toml::from_str("").unwrap();
    assert_eq!(cfg.sandbox.program, "node");
    assert_eq!(cfg.sandbox.args, vec!["{file}".to_string()]);
    assert_eq!(cfg.sandbox.timeout_ms, 5_000);
    assert!(cfg.auth.tokens.is_empty());
    assert!(cfg.tasks.is_empty());
  }

  #[test]
  fn task_bank_entries_parse_with_raw_solution() {
    let cfg: GraderConfig = toml::from_str(
      r#"
      [auth.tokens]
      "tok-1" = "user-1"

      [[tasks]]
      id = 9
      task_type = "multiple_choice"
      title = "Pick one"
      [tasks.solution]
      validation_type = "exact_match"
      value = "b"
      "#,
    )
    .unwrap();
    assert_eq!(cfg.auth.tokens.get("tok-1").map(String::as_str), Some("user-1"));
    assert_eq!(cfg.tasks.len(), 1);
    assert_eq!(cfg.tasks[0].id, 9);
  }
}
