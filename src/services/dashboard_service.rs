use std::collections::BTreeMap;

use crate::dto::dashboard_dto::DashboardStats;
use crate::error::Result;
use crate::services::assessment_service::AssessmentService;
use crate::services::candidate_service::CandidateService;
use crate::services::job_service::JobService;

/// Aggregate counters for the dashboard page.
#[derive(Clone)]
pub struct DashboardService {
    jobs: JobService,
    candidates: CandidateService,
    assessments: AssessmentService,
}

impl DashboardService {
    pub fn new(
        jobs: JobService,
        candidates: CandidateService,
        assessments: AssessmentService,
    ) -> Self {
        Self {
            jobs,
            candidates,
            assessments,
        }
    }

    pub fn stats(&self) -> Result<DashboardStats> {
        let (active_jobs, archived_jobs) = self.jobs.count_by_status()?;
        let candidates_by_stage: BTreeMap<_, _> =
            self.candidates.count_by_stage()?.into_iter().collect();
        let (total_assessments, total_responses) = self.assessments.counts()?;

        Ok(DashboardStats {
            total_jobs: active_jobs + archived_jobs,
            active_jobs,
            archived_jobs,
            total_candidates: candidates_by_stage.values().sum(),
            candidates_by_stage,
            total_assessments,
            total_responses,
        })
    }
}
