//! Seed data and small utilities related to default content.

use serde_json::json;

use crate::domain::{Task, TaskSource};

/// Minimal set of built-in tasks, one per validation kind, that guarantee
/// the app is useful even without an external config bank.
pub fn seed_tasks() -> Vec<Task> {
    vec![
        Task {
            id: 101,
            task_type: "multiple_choice".into(),
            source: TaskSource::Seed,
            title: "Reading the statements".into(),
            prompt: "Which financial statement reports revenues and expenses for a period?".into(),
            solution: json!({
                "validation_type": "exact_match",
                "value": "income statement",
                "explanation": "Right: the income statement covers a period, the balance sheet a point in time."
            }),
        },
        Task {
            id: 102,
            task_type: "short_answer".into(),
            source: TaskSource::Seed,
            title: "Planning ahead".into(),
            prompt: "Name one artifact you would update before next quarter's review.".into(),
            solution: json!({
                "validation_type": "keyword_match",
                "keywords": ["budget", "forecast", "projection"]
            }),
        },
        Task {
            id: 103,
            task_type: "portfolio_slider".into(),
            source: TaskSource::Seed,
            title: "Balanced allocation".into(),
            prompt: "Set an equity allocation suitable for a balanced portfolio.".into(),
            solution: json!({
                "validation_type": "range_match",
                "metric": "equity_pct",
                "min": 40.0,
                "max": 60.0
            }),
        },
        Task {
            id: 104,
            task_type: "financial_statement".into(),
            source: TaskSource::Seed,
            title: "Month-end close".into(),
            prompt: "Select the close steps in scope, then summarize what the close verifies.".into(),
            solution: json!({
                "validation_type": "checklist_and_keyword_match",
                "checklist": ["reconcile cash", "accrue payroll", "post depreciation"],
                "keywords": ["reconcile", "accrual", "depreciation", "variance", "ledger"]
            }),
        },
        Task {
            id: 105,
            task_type: "chatbot".into(),
            source: TaskSource::Seed,
            title: "Support bot rules".into(),
            prompt: "Write rules so your bot greets users and answers the balance question.".into(),
            solution: json!({
                "validation_type": "chatbot_responses",
                "test_cases": [
                    { "input": "hello", "expected": "Hi! How can I help you today?" },
                    { "input": "what is my balance", "expected": "You can find your balance under Accounts." }
                ]
            }),
        },
        Task {
            id: 106,
            task_type: "code_submission".into(),
            source: TaskSource::Seed,
            title: "Compound once".into(),
            prompt: "Write solution(amount) returning the amount grown by 10%, rounded to the nearest integer.".into(),
            solution: json!({
                "validation_type": "execute_and_match_output",
                "test_cases": [
                    { "input": 100, "expected": 110 },
                    { "input": 250, "expected": 275 },
                    { "input": 0, "expected": 0 }
                ]
            }),
        },
        Task {
            id: 107,
            task_type: "free_form".into(),
            source: TaskSource::Seed,
            title: "Your own budget".into(),
            prompt: "Sketch a personal monthly budget in any format you like.".into(),
            solution: json!({
                "validation_type": "completion"
            }),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::decode_solution;

    #[test]
    fn every_seed_solution_decodes() {
        for task in seed_tasks() {
            decode_solution(&task.solution)
                .unwrap_or_else(|e| panic!("seed task {} has a bad solution: {e}", task.id));
        }
    }
}
