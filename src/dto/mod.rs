pub mod assessment_dto;
pub mod candidate_dto;
pub mod dashboard_dto;
pub mod job_dto;

use serde::{Deserialize, Serialize};

/// `{total, data}` envelope for paged listings; `total` counts every match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub total: usize,
    pub data: Vec<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
