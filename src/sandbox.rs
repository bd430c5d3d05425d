//! Isolated execution of untrusted submission source.
//!
//! The [`Sandbox`] trait is deliberately narrow: source text in, captured
//! stdout/stderr (or a timeout flag) out. Strategy code never sees how the
//! program was run, so the process-based runner below can be swapped for a
//! stronger isolation mechanism (container, WASM) without touching grading
//! logic.
//!
//! [`ProcessSandbox`] writes the source to a scratch file and spawns the
//! configured runtime with a cleared environment, piped output, and a hard
//! wall-clock timeout. `kill_on_drop` guarantees the child is reaped on every
//! exit path, including timeout and handler cancellation.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::config::SandboxConfig;
use crate::util::fill_template;

#[derive(Clone, Debug, Default)]
pub struct RunOutput {
    pub stdout: String,
    pub stderr: String,
    pub timed_out: bool,
}

#[derive(Debug, Error)]
pub enum SandboxError {
    #[error("failed to launch runtime '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("sandbox i/o error: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait Sandbox: Send + Sync {
    /// Execute `source` once and capture its output streams.
    /// A timeout is reported in-band via `timed_out`; only failure to run the
    /// program at all is an `Err`.
    async fn run(&self, source: &str) -> Result<RunOutput, SandboxError>;
}

pub struct ProcessSandbox {
    program: String,
    args: Vec<String>,
    extension: String,
    timeout: Duration,
}

impl ProcessSandbox {
    pub fn from_config(cfg: &SandboxConfig) -> Self {
        Self {
            program: cfg.program.clone(),
            args: cfg.args.clone(),
            extension: cfg.extension.clone(),
            timeout: Duration::from_millis(cfg.timeout_ms),
        }
    }
}

#[async_trait]
impl Sandbox for ProcessSandbox {
    #[instrument(level = "debug", skip(self, source), fields(program = %self.program, source_len = source.len()))]
    async fn run(&self, source: &str) -> Result<RunOutput, SandboxError> {
        let dir = tempfile::tempdir()?;
        let path = dir
            .path()
            .join(format!("submission-{}.{}", Uuid::new_v4(), self.extension));
        tokio::fs::write(&path, source).await?;
        let file = path.to_string_lossy();

        let mut cmd = Command::new(&self.program);
        for arg in &self.args {
            cmd.arg(fill_template(arg, &[("file", &file)]));
        }
        // Minimal environment: the child gets PATH and nothing else.
        cmd.env_clear();
        if let Ok(p) = std::env::var("PATH") {
            cmd.env("PATH", p);
        }
        cmd.current_dir(dir.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = cmd.spawn().map_err(|source| SandboxError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            // Elapsed: the output future is dropped and kill_on_drop reaps
            // the child; pipes close with it.
            Err(_) => {
                debug!(target: "grading", timeout_ms = self.timeout.as_millis() as u64, "Sandbox run timed out");
                Ok(RunOutput { timed_out: true, ..RunOutput::default() })
            }
            Ok(output) => {
                let output = output?;
                Ok(RunOutput {
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                    timed_out: false,
                })
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SandboxConfig;

    fn sandbox(program: &str, args: &[&str], timeout_ms: u64) -> ProcessSandbox {
        ProcessSandbox::from_config(&SandboxConfig {
            program: program.into(),
            args: args.iter().map(|s| s.to_string()).collect(),
            extension: "txt".into(),
            timeout_ms,
        })
    }

    #[tokio::test]
    async fn captures_stdout_from_the_scratch_file() {
        let out = sandbox("cat", &["{file}"], 2_000).run("hello world").await.unwrap();
        assert_eq!(out.stdout, "hello world");
        assert!(out.stderr.is_empty());
        assert!(!out.timed_out);
    }

    #[tokio::test]
    async fn captures_stderr_separately() {
        let out = sandbox("sh", &["-c", "echo boom >&2"], 2_000).run("").await.unwrap();
        assert!(out.stdout.is_empty());
        assert_eq!(out.stderr.trim(), "boom");
    }

    #[tokio::test]
    async fn enforces_the_wall_clock_timeout() {
        let out = sandbox("sh", &["-c", "sleep 5"], 100).run("").await.unwrap();
        assert!(out.timed_out);
    }

    #[tokio::test]
    async fn missing_runtime_is_a_spawn_error() {
        let err = sandbox("definitely-not-a-runtime", &["{file}"], 1_000)
            .run("")
            .await
            .unwrap_err();
        assert!(matches!(err, SandboxError::Spawn { .. }));
    }
}
