use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::candidate::{Candidate, CandidatePatch, Stage};
use crate::utils::validation::{trimmed, trimmed_opt};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCandidatePayload {
    #[validate(required(message = "jobId is required"))]
    pub job_id: Option<i64>,
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "name is required"))]
    pub name: String,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub resume_url: Option<String>,
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
    pub stage: Option<Stage>,
    pub date_applied: Option<DateTime<Utc>>,
    pub experience_years: Option<u32>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub notes: Vec<String>,
}

/// `timeline`, `jobId` and `id` are not client-writable and are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCandidatePayload {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub resume_url: Option<String>,
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
    pub stage: Option<Stage>,
    pub experience_years: Option<u32>,
    pub skills: Option<Vec<String>>,
    pub notes: Option<Vec<String>>,
}

impl From<UpdateCandidatePayload> for CandidatePatch {
    fn from(value: UpdateCandidatePayload) -> Self {
        Self {
            name: value.name,
            email: value.email,
            phone: value.phone,
            location: value.location,
            resume_url: value.resume_url,
            linkedin: value.linkedin,
            portfolio: value.portfolio,
            stage: value.stage,
            experience_years: value.experience_years,
            skills: value.skills,
            notes: value.notes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct CandidateListQuery {
    pub search: Option<String>,
    pub stage: Option<String>,
    pub job_id: Option<i64>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDetailResponse {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub job_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnsweredQuestion {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateResponseSummary {
    pub assessment_id: i64,
    pub assessment_title: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub responses: Vec<AnsweredQuestion>,
}
