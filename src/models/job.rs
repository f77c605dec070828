use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Active,
    Archived,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Active => "active",
            JobStatus::Archived => "archived",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub status: JobStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    pub order: i64,
}

/// A job that has not been stored yet. The repository assigns `id` and `order`.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub title: String,
    pub slug: String,
    pub status: JobStatus,
    pub tags: Vec<String>,
}

/// Position assignment sent by drag-and-drop clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub id: i64,
    pub order: i64,
}

/// Partial edit of a job. `slug`, `order` and `id` are not editable here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobPatch {
    pub title: Option<String>,
    pub status: Option<JobStatus>,
    pub tags: Option<Vec<String>>,
}

impl JobPatch {
    pub fn apply(&self, job: &mut Job) {
        if let Some(title) = &self.title {
            job.title = title.clone();
        }
        if let Some(status) = self.status {
            job.status = status;
        }
        if let Some(tags) = &self.tags {
            job.tags = tags.clone();
        }
    }
}

/// Trims, drops blanks and de-duplicates tags case-insensitively, keeping the
/// first spelling seen.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty() && seen.insert(t.to_lowercase()))
        .collect()
}
