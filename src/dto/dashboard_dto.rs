use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::candidate::Stage;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_jobs: usize,
    pub active_jobs: usize,
    pub archived_jobs: usize,
    pub total_candidates: usize,
    pub candidates_by_stage: BTreeMap<Stage, usize>,
    pub total_assessments: usize,
    pub total_responses: usize,
}
