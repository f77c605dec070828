use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Recorded answer to a single question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(f64),
    Text(String),
    Choices(Vec<String>),
}

impl AnswerValue {
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Number(_) => false,
            AnswerValue::Text(s) => s.trim().is_empty(),
            AnswerValue::Choices(items) => items.is_empty(),
        }
    }

    /// Flat human-readable rendering, arrays joined with `", "`.
    pub fn display(&self) -> String {
        match self {
            AnswerValue::Number(n) => n.to_string(),
            AnswerValue::Text(s) => s.clone(),
            AnswerValue::Choices(items) => items.join(", "),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    InProgress,
    #[default]
    Completed,
    Abandoned,
}

pub type Answers = BTreeMap<String, AnswerValue>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResponse {
    pub id: i64,
    pub candidate_id: i64,
    pub assessment_id: i64,
    pub job_id: i64,
    #[serde(default)]
    pub answers: Answers,
    pub submitted_at: DateTime<Utc>,
    pub status: ResponseStatus,
}
