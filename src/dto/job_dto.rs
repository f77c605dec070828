use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::candidate::Candidate;
use crate::models::job::{normalize_tags, Job, JobPatch, JobStatus, OrderUpdate};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobPayload {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Title required"))]
    pub title: String,
    pub status: Option<JobStatus>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Unknown fields (including `slug`, `order` and `id`) are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobPayload {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub status: Option<JobStatus>,
    pub tags: Option<Vec<String>>,
}

impl From<UpdateJobPayload> for JobPatch {
    fn from(value: UpdateJobPayload) -> Self {
        Self {
            title: value.title.map(|t| t.trim().to_string()),
            status: value.status,
            tags: value.tags.map(normalize_tags),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderPayload {
    pub from_order: i64,
    pub to_order: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkReorderPayload {
    pub updates: Vec<OrderUpdate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct JobListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    /// Comma-separated; a job must carry every listed tag.
    pub tags: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub sort: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobSort {
    Title,
    Status,
    #[default]
    Order,
    Id,
}

impl JobSort {
    /// Unknown sort keys fall back to display order.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("title") => JobSort::Title,
            Some("status") => JobSort::Status,
            Some("id") => JobSort::Id,
            _ => JobSort::Order,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDetailResponse {
    #[serde(flatten)]
    pub job: Job,
    pub candidates: Vec<Candidate>,
}
