//! Rule-based chatbot grading: simulate the learner's bot against hidden
//! conversations. Pure data matching; no sandbox involved.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{ChatCase, Verdict};
use crate::error::EngineError;

/// What the bot says when a rule doesn't match and the learner left the
/// default reply empty.
const SYSTEM_FALLBACK_REPLY: &str = "Sorry, I don't understand that yet.";

#[derive(Deserialize)]
struct ChatbotAnswer {
  #[serde(default)]
  rules: Vec<ChatRule>,
  #[serde(rename = "defaultReply", default)]
  default_reply: String,
}

#[derive(Deserialize)]
struct ChatRule {
  input: String,
  output: String,
}

pub fn chatbot_responses(answer: &Value, cases: &[ChatCase]) -> Result<Verdict, EngineError> {
  let answer: ChatbotAnswer = serde_json::from_value(answer.clone())
    .map_err(|_| EngineError::BadRequest("expected {rules, defaultReply}".into()))?;

  for case in cases {
    let reply = reply_for(&answer, &case.input);
    if reply.trim() != case.expected.trim() {
      return Ok(Verdict::incorrect(format!(
        "For input '{}' your bot replied '{}' but '{}' was expected.",
        case.input,
        reply.trim(),
        case.expected.trim(),
      )));
    }
  }

  Ok(Verdict::correct("Your bot handled every conversation correctly."))
}

/// Rule lookup is case-insensitive and trimmed; the first matching rule wins.
fn reply_for<'a>(answer: &'a ChatbotAnswer, input: &str) -> &'a str {
  let wanted = input.trim().to_lowercase();
  let matched = answer
    .rules
    .iter()
    .find(|r| r.input.trim().to_lowercase() == wanted)
    .map(|r| r.output.as_str());
  match matched {
    Some(output) => output,
    None if answer.default_reply.trim().is_empty() => SYSTEM_FALLBACK_REPLY,
    None => answer.default_reply.as_str(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn cases() -> Vec<ChatCase> {
    vec![
      ChatCase { input: "hello".into(), expected: "Hi there!".into() },
      ChatCase { input: "bye".into(), expected: "See you!".into() },
    ]
  }

  #[test]
  fn matching_rules_pass_case_insensitively() {
    let answer = json!({
      "rules": [
        {"input": "  HELLO ", "output": "Hi there!"},
        {"input": "Bye", "output": " See you! "}
      ],
      "defaultReply": ""
    });
    assert!(chatbot_responses(&answer, &cases()).unwrap().is_correct);
  }

  #[test]
  fn default_reply_covers_unmatched_inputs() {
    let answer = json!({
      "rules": [{"input": "hello", "output": "Hi there!"}],
      "defaultReply": "See you!"
    });
    assert!(chatbot_responses(&answer, &cases()).unwrap().is_correct);
  }

  #[test]
  fn empty_default_falls_back_to_the_system_phrase() {
    let answer = json!({ "rules": [], "defaultReply": "" });
    let expected = vec![ChatCase {
      input: "anything".into(),
      expected: SYSTEM_FALLBACK_REPLY.into(),
    }];
    assert!(chatbot_responses(&answer, &expected).unwrap().is_correct);
  }

  #[test]
  fn first_mismatch_names_the_offending_triple() {
    let answer = json!({
      "rules": [{"input": "hello", "output": "Howdy"}],
      "defaultReply": "See you!"
    });
    let v = chatbot_responses(&answer, &cases()).unwrap();
    assert!(!v.is_correct);
    assert!(v.message.contains("hello"));
    assert!(v.message.contains("Howdy"));
    assert!(v.message.contains("Hi there!"));
  }

  #[test]
  fn malformed_submission_is_a_bad_request() {
    let err = chatbot_responses(&json!("just text"), &cases()).unwrap_err();
    assert!(matches!(err, EngineError::BadRequest(_)));
  }
}
