//! Pure comparison strategies: exact, keyword, checklist, range, completion.
//!
//! Each function consumes the learner's raw answer plus the solution fields
//! its kind carries, and produces a verdict with a learner-facing message.
//! Shape mismatches (a number where text was expected, a missing field) are
//! bad requests, kept apart from ordinary wrong answers.

use std::collections::BTreeSet;

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{CodeLanguage, Verdict};
use crate::error::EngineError;
use crate::util::collapse_whitespace;

/// Minimum number of solution keywords a summary must mention.
const SUMMARY_KEYWORD_TARGET: usize = 3;

const WRONG_ANSWER: &str = "That's not the expected answer. Review the material and try again.";

pub fn exact_match(
  answer: &Value,
  expected: &Value,
  language: Option<CodeLanguage>,
  explanation: Option<&str>,
) -> Result<Verdict, EngineError> {
  let matched = match expected {
    Value::String(want) => {
      let (text, declared) = submission_text(answer)?;
      // The submission's declared sub-language wins over the solution's.
      match declared.or(language) {
        Some(lang) => normalize_code(&text, lang) == normalize_code(want, lang),
        None => text.trim() == want.trim(),
      }
    }
    other => answer == other,
  };

  if matched {
    Ok(Verdict::correct(explanation.unwrap_or("Correct!")))
  } else {
    Ok(Verdict::incorrect(WRONG_ANSWER))
  }
}

pub fn keyword_match(answer: &Value, keywords: &[String]) -> Result<Verdict, EngineError> {
  let text = answer
    .as_str()
    .ok_or_else(|| EngineError::BadRequest("expected a text answer".into()))?;
  let hay = text.to_lowercase();
  // OR semantics: any one keyword is enough.
  let hit = keywords
    .iter()
    .map(|k| k.trim().to_lowercase())
    .any(|k| !k.is_empty() && hay.contains(&k));

  if hit {
    Ok(Verdict::correct("Correct!"))
  } else {
    Ok(Verdict::incorrect(
      "Your answer doesn't mention any of the concepts we were looking for.",
    ))
  }
}

#[derive(Deserialize)]
struct ChecklistAnswer {
  checklist: Vec<String>,
  summary: String,
}

pub fn checklist_and_keyword_match(
  answer: &Value,
  checklist: &[String],
  keywords: &[String],
) -> Result<Verdict, EngineError> {
  let answer: ChecklistAnswer = serde_json::from_value(answer.clone())
    .map_err(|_| EngineError::BadRequest("expected {checklist, summary}".into()))?;

  // Exact set match: same size, same members, order-independent.
  let want: BTreeSet<&str> = checklist.iter().map(|s| s.trim()).collect();
  let got: BTreeSet<&str> = answer.checklist.iter().map(|s| s.trim()).collect();
  let checklist_ok = answer.checklist.len() == checklist.len() && got == want;
  if !checklist_ok {
    return Ok(Verdict::incorrect(
      "Your checklist doesn't match the required steps exactly.",
    ));
  }

  let summary = answer.summary.to_lowercase();
  let mentioned = keywords
    .iter()
    .map(|k| k.trim().to_lowercase())
    .filter(|k| !k.is_empty() && summary.contains(k))
    .count();
  if mentioned < SUMMARY_KEYWORD_TARGET {
    return Ok(Verdict::incorrect(
      "Checklist looks right, but your summary needs to cover more of the key points.",
    ));
  }

  Ok(Verdict::correct("Checklist complete and your summary covers the key points."))
}

pub fn range_match(
  answer: &Value,
  metric: &str,
  min: f64,
  max: f64,
) -> Result<Verdict, EngineError> {
  let value = answer
    .get(metric)
    .and_then(Value::as_f64)
    .ok_or_else(|| EngineError::BadRequest(format!("expected a numeric '{metric}' field")))?;

  // Inclusive on both bounds.
  if value < min {
    Ok(Verdict::incorrect("That's below the target range. Try a higher value."))
  } else if value > max {
    Ok(Verdict::incorrect("That's above the target range. Try a lower value."))
  } else {
    Ok(Verdict::correct("Nice, that's within the target range."))
  }
}

/// Free-form creative tasks have no automatic right/wrong; the existence of a
/// submission is the signal.
pub fn completion() -> Verdict {
  Verdict::correct("Submission received. Nice work!")
}

fn submission_text(answer: &Value) -> Result<(String, Option<CodeLanguage>), EngineError> {
  match answer {
    Value::String(s) => Ok((s.clone(), None)),
    Value::Object(map) => {
      let code = map
        .get("code")
        .and_then(Value::as_str)
        .ok_or_else(|| EngineError::BadRequest("expected a string answer or {code, language}".into()))?;
      let language = match map.get("language") {
        Some(v) => Some(
          serde_json::from_value(v.clone())
            .map_err(|_| EngineError::BadRequest("unknown submission language".into()))?,
        ),
        None => None,
      };
      Ok((code.to_string(), language))
    }
    _ => Err(EngineError::BadRequest("expected a text answer".into())),
  }
}

/// Strip line comments for the given sub-language, then collapse all
/// whitespace. The scan is naive (a comment marker inside a string literal is
/// stripped too), which is tolerable for the short snippets we grade.
fn normalize_code(s: &str, lang: CodeLanguage) -> String {
  let marker = lang.line_comment();
  let stripped = s
    .lines()
    .map(|line| match line.find(marker) {
      Some(i) => &line[..i],
      None => line,
    })
    .collect::<Vec<_>>()
    .join("\n");
  collapse_whitespace(&stripped)
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn exact_match_trims_plain_strings() {
    let v = exact_match(&json!("  income statement "), &json!("income statement"), None, None)
      .unwrap();
    assert!(v.is_correct);
  }

  #[test]
  fn exact_match_deep_equality_for_non_strings() {
    assert!(exact_match(&json!([1, 2]), &json!([1, 2]), None, None).unwrap().is_correct);
    assert!(!exact_match(&json!([1, 2]), &json!([2, 1]), None, None).unwrap().is_correct);
  }

  #[test]
  fn exact_match_code_tolerates_comments_and_formatting() {
    let expected = json!("function f(x){ return x+1; } // add one");
    let submitted = json!("function f(x){\n  return x+1;\n}");
    let v = exact_match(&submitted, &expected, Some(CodeLanguage::Javascript), None).unwrap();
    assert!(v.is_correct);
  }

  #[test]
  fn exact_match_code_still_requires_structural_equivalence() {
    let expected = json!("function f(x){ return x+1; }");
    let submitted = json!("function f(x){ return x+2; }");
    let v = exact_match(&submitted, &expected, Some(CodeLanguage::Javascript), None).unwrap();
    assert!(!v.is_correct);
  }

  #[test]
  fn exact_match_honors_submission_declared_language() {
    let expected = json!("SELECT 1 -- pick one");
    let submitted = json!({"code": "SELECT 1", "language": "sql"});
    let v = exact_match(&submitted, &expected, None, None).unwrap();
    assert!(v.is_correct);
  }

  #[test]
  fn exact_match_surfaces_the_explanation_on_success() {
    let v = exact_match(&json!("a"), &json!("a"), None, Some("Because reasons.")).unwrap();
    assert_eq!(v.message, "Because reasons.");
  }

  #[test]
  fn keyword_match_is_or_not_and() {
    let keywords = vec!["budget".to_string(), "forecast".to_string()];
    assert!(keyword_match(&json!("I reviewed the forecast"), &keywords).unwrap().is_correct);
    assert!(!keyword_match(&json!("I reviewed the plan"), &keywords).unwrap().is_correct);
  }

  #[test]
  fn keyword_match_is_case_insensitive() {
    let keywords = vec!["Budget".to_string()];
    assert!(keyword_match(&json!("we rebuilt the BUDGET"), &keywords).unwrap().is_correct);
  }

  #[test]
  fn keyword_match_rejects_non_text_answers() {
    let err = keyword_match(&json!(42), &["a".to_string()]).unwrap_err();
    assert!(matches!(err, EngineError::BadRequest(_)));
  }

  #[test]
  fn checklist_requires_the_exact_set() {
    let checklist = vec!["a".to_string(), "b".to_string()];
    let keywords = vec!["x".into(), "y".into(), "z".into()];

    let superset = json!({"checklist": ["a", "b", "c"], "summary": "x y z"});
    assert!(!checklist_and_keyword_match(&superset, &checklist, &keywords).unwrap().is_correct);

    let reordered = json!({"checklist": ["b", "a"], "summary": "covers x and y and z"});
    assert!(checklist_and_keyword_match(&reordered, &checklist, &keywords).unwrap().is_correct);
  }

  #[test]
  fn summary_needs_three_keywords_any_three() {
    let checklist = vec!["a".to_string()];
    let keywords = vec!["one".into(), "two".into(), "three".into(), "four".into()];

    let two_only = json!({"checklist": ["a"], "summary": "one two"});
    let v = checklist_and_keyword_match(&two_only, &checklist, &keywords).unwrap();
    assert!(!v.is_correct);
    assert!(v.message.contains("summary"));

    let last_three = json!({"checklist": ["a"], "summary": "two three four"});
    assert!(checklist_and_keyword_match(&last_three, &checklist, &keywords).unwrap().is_correct);
  }

  #[test]
  fn range_bounds_are_inclusive_with_directional_messages() {
    for v in [40.0, 60.0] {
      let verdict = range_match(&json!({"equity_pct": v}), "equity_pct", 40.0, 60.0).unwrap();
      assert!(verdict.is_correct, "{v} should be inside [40,60]");
    }
    let low = range_match(&json!({"equity_pct": 39}), "equity_pct", 40.0, 60.0).unwrap();
    assert!(!low.is_correct);
    assert!(low.message.contains("below"));
    let high = range_match(&json!({"equity_pct": 61}), "equity_pct", 40.0, 60.0).unwrap();
    assert!(!high.is_correct);
    assert!(high.message.contains("above"));
  }

  #[test]
  fn range_match_missing_metric_is_a_bad_request() {
    let err = range_match(&json!({"bond_pct": 50}), "equity_pct", 40.0, 60.0).unwrap_err();
    assert!(matches!(err, EngineError::BadRequest(_)));
  }

  #[test]
  fn completion_is_always_correct() {
    assert!(completion().is_correct);
  }

  #[test]
  fn strategies_are_pure() {
    let answer = json!("I reviewed the forecast");
    let keywords = vec!["forecast".to_string()];
    let first = keyword_match(&answer, &keywords).unwrap();
    let second = keyword_match(&answer, &keywords).unwrap();
    assert_eq!(first, second);
  }
}
