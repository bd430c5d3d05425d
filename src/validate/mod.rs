//! The validation engine: solution decoding and strategy dispatch.
//!
//! `decode_solution` is the definition boundary: the raw solution document is
//! turned into a strongly-typed [`Solution`] here, so a missing field or an
//! unknown `validation_type` surfaces as a definition error before any
//! grading runs. `validate` is then an exhaustive match over the variants;
//! adding a task kind means adding a variant and a match arm, and the
//! compiler points at every spot that needs updating.

pub mod basic;
pub mod chatbot;
pub mod code;

use tracing::instrument;

use crate::domain::{Solution, Verdict};
use crate::error::EngineError;
use crate::sandbox::Sandbox;

/// Decode a raw solution document into its typed variant.
pub fn decode_solution(raw: &serde_json::Value) -> Result<Solution, EngineError> {
  serde_json::from_value(raw.clone())
    .map_err(|e| EngineError::Definition(format!("bad solution document: {e}")))
}

/// Grade one submission against one solution. Pure per strategy: for a fixed
/// `(answer, solution)` the verdict is always the same (code execution runs
/// through the sandbox, the one deliberately impure collaborator).
#[instrument(level = "debug", skip_all, fields(kind = solution_kind(solution)))]
pub async fn validate(
  answer: &serde_json::Value,
  solution: &Solution,
  sandbox: &dyn Sandbox,
) -> Result<Verdict, EngineError> {
  match solution {
    Solution::ExactMatch { value, language, explanation } => {
      basic::exact_match(answer, value, *language, explanation.as_deref())
    }
    Solution::KeywordMatch { keywords } => basic::keyword_match(answer, keywords),
    Solution::ExecuteAndMatchOutput { test_cases } => {
      code::execute_and_match_output(answer, test_cases, sandbox).await
    }
    Solution::ChatbotResponses { test_cases } => chatbot::chatbot_responses(answer, test_cases),
    Solution::ChecklistAndKeywordMatch { checklist, keywords } => {
      basic::checklist_and_keyword_match(answer, checklist, keywords)
    }
    Solution::RangeMatch { metric, min, max } => basic::range_match(answer, metric, *min, *max),
    Solution::Completion => Ok(basic::completion()),
  }
}

fn solution_kind(solution: &Solution) -> &'static str {
  match solution {
    Solution::ExactMatch { .. } => "exact_match",
    Solution::KeywordMatch { .. } => "keyword_match",
    Solution::ExecuteAndMatchOutput { .. } => "execute_and_match_output",
    Solution::ChatbotResponses { .. } => "chatbot_responses",
    Solution::ChecklistAndKeywordMatch { .. } => "checklist_and_keyword_match",
    Solution::RangeMatch { .. } => "range_match",
    Solution::Completion => "completion",
  }
}
