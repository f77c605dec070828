use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::assessment::Section;
use crate::models::response::Answers;

/// Body of `PUT /assessments/{jobId}`: creates when `id` is absent,
/// replaces the stored assessment otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertAssessmentPayload {
    pub id: Option<i64>,
    #[serde(default)]
    #[validate(length(min = 1, max = 300, message = "title is required"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(required(message = "sections must be a list"))]
    pub sections: Option<Vec<Section>>,
    pub due_date: Option<String>,
    #[validate(range(min = 1, max = 1440))]
    pub time_limit: Option<u32>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub passing_score: Option<f64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponsePayload {
    #[validate(required(message = "candidateId is required"))]
    pub candidate_id: Option<i64>,
    #[serde(default)]
    pub answers: Answers,
}
