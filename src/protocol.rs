//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{Task, TaskSource};

#[derive(Debug, Deserialize)]
pub struct TaskQuery {
    #[serde(rename = "taskId")]
    pub task_id: i64,
}

/// DTO for task delivery. The solution document is deliberately withheld.
#[derive(Debug, Serialize)]
pub struct TaskOut {
    pub id: i64,
    #[serde(rename = "taskType")]
    pub task_type: String,
    pub source: TaskSource,
    pub title: String,
    pub prompt: String,
}

/// Convert the internal `Task` to the public DTO.
pub fn to_out(t: &Task) -> TaskOut {
    TaskOut {
        id: t.id,
        task_type: t.task_type.clone(),
        source: t.source.clone(),
        title: t.title.clone(),
        prompt: t.prompt.clone(),
    }
}

#[derive(Deserialize)]
pub struct AnswerIn {
    #[serde(rename = "taskId")]
    pub task_id: i64,
    pub answer: serde_json::Value,
}

#[derive(Serialize)]
pub struct AnswerOut {
    pub is_correct: bool,
    pub message: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn task_out_never_carries_the_solution() {
        let task = Task {
            id: 1,
            task_type: "multiple_choice".into(),
            source: TaskSource::Seed,
            title: "t".into(),
            prompt: "p".into(),
            solution: json!({"validation_type": "exact_match", "value": "secret"}),
        };
        let out = serde_json::to_value(to_out(&task)).unwrap();
        assert!(out.get("solution").is_none());
        assert_eq!(out["taskType"], "multiple_choice");
    }
}
