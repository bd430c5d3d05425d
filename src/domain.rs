//! Domain models used by the backend: tasks, solution documents, and verdicts.

use serde::{Deserialize, Serialize};

/// Where did we get the task from?
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskSource {
  LocalBank,   // from user-provided TOML bank
  Seed,  // built-in seeds (last resort)
}

/// A gradable exercise. The solution document is kept as raw JSON here and
/// decoded into a [`Solution`] at the validation boundary, so a malformed
/// document surfaces as a definition error rather than a deserialization
/// failure at startup.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Task {
  pub id: i64,
  pub task_type: String,   // free-form (e.g., "multiple_choice", "code_submission")
  pub source: TaskSource,

  #[serde(default)] pub title: String,
  #[serde(default)] pub prompt: String,

  pub solution: serde_json::Value,
}

/// Sub-language of a code submission; determines line-comment syntax when
/// normalizing code for comparison.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CodeLanguage {
  #[serde(alias = "js")]
  Javascript,
  #[serde(alias = "py")]
  Python,
  Sql,
}

impl CodeLanguage {
  pub fn line_comment(&self) -> &'static str {
    match self {
      CodeLanguage::Javascript => "//",
      CodeLanguage::Python => "#",
      CodeLanguage::Sql => "--",
    }
  }
}

/// One hidden test case for code-execution tasks.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestCase {
  pub input: serde_json::Value,
  pub expected: serde_json::Value,
}

/// One hidden conversation turn for chatbot tasks.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatCase {
  pub input: String,
  pub expected: String,
}

/// The authoritative grading rule for a task, tagged by validation kind.
/// The tag uniquely determines which fields are present; a document carrying
/// an unknown tag or missing a required field fails to decode, which the
/// loader reports as a definition error (a content bug, never a wrong answer).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "validation_type", rename_all = "snake_case")]
pub enum Solution {
  ExactMatch {
    value: serde_json::Value,
    #[serde(default)] language: Option<CodeLanguage>,
    #[serde(default)] explanation: Option<String>,
  },
  KeywordMatch {
    keywords: Vec<String>,
  },
  ExecuteAndMatchOutput {
    test_cases: Vec<TestCase>,
  },
  ChatbotResponses {
    test_cases: Vec<ChatCase>,
  },
  ChecklistAndKeywordMatch {
    checklist: Vec<String>,
    keywords: Vec<String>,
  },
  RangeMatch {
    metric: String,
    min: f64,
    max: f64,
  },
  Completion,
}

/// Correctness result and explanatory message for one submission.
/// Produced fresh per request; never persisted.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Verdict {
  pub is_correct: bool,
  pub message: String,
}

impl Verdict {
  pub fn correct(message: impl Into<String>) -> Self {
    Self { is_correct: true, message: message.into() }
  }
  pub fn incorrect(message: impl Into<String>) -> Self {
    Self { is_correct: false, message: message.into() }
  }
}
