//! Code-submission grading: run the learner's program against hidden test
//! cases through the sandbox and compare outputs.
//!
//! Cases run sequentially and short-circuit on the first failure; the sandbox
//! invocation is the only expensive step and is already time-bounded. A
//! timeout or anything on stderr is an execution fault with a diagnostic
//! message, kept distinct from a plain wrong output.

use serde_json::Value;
use tracing::debug;

use crate::domain::{TestCase, Verdict};
use crate::error::EngineError;
use crate::sandbox::Sandbox;
use crate::util::trunc_for_log;

/// The single entry point every submission must define. The harness calls it
/// once per test case and prints the JSON-serialized result.
const ENTRY_POINT: &str = "solution";

pub async fn execute_and_match_output(
  answer: &Value,
  cases: &[TestCase],
  sandbox: &dyn Sandbox,
) -> Result<Verdict, EngineError> {
  let source = answer
    .as_str()
    .ok_or_else(|| EngineError::BadRequest("expected program source as a string".into()))?;

  for (idx, case) in cases.iter().enumerate() {
    let case_no = idx + 1;
    let out = sandbox.run(&build_harness(source, &case.input)).await?;

    if out.timed_out {
      return Ok(Verdict::incorrect(format!(
        "Your code timed out on hidden test case {case_no}.",
      )));
    }
    if !out.stderr.trim().is_empty() {
      return Ok(Verdict::incorrect(format!(
        "Your code raised an error on hidden test case {case_no}: {}",
        first_line(&out.stderr),
      )));
    }
    if !output_matches(&out.stdout, &case.expected) {
      debug!(target: "grading", case = case_no, stdout = %trunc_for_log(&out.stdout, 200), "Output mismatch");
      return Ok(Verdict::incorrect(format!(
        "Wrong output on hidden test case {case_no}.",
      )));
    }
  }

  Ok(Verdict::correct("All hidden test cases passed."))
}

/// Append the per-case invocation to the submission source. The contract is
/// narrow on purpose: one fixed entry point, one argument, one printed result.
fn build_harness(source: &str, input: &Value) -> String {
  format!("{source}\n\nconsole.log(JSON.stringify({ENTRY_POINT}({input})));\n")
}

/// Parse the captured stdout and compare against the expected value. The
/// harness prints JSON, so a JSON parse is tried first; a bare-string
/// comparison covers programs that print unquoted text.
fn output_matches(stdout: &str, expected: &Value) -> bool {
  let printed = stdout.trim();
  if let Ok(parsed) = serde_json::from_str::<Value>(printed) {
    if parsed == *expected {
      return true;
    }
  }
  match expected {
    Value::String(want) => printed == want.trim(),
    _ => false,
  }
}

fn first_line(stderr: &str) -> String {
  trunc_for_log(stderr.trim().lines().next().unwrap_or(""), 200)
}
