use std::sync::Arc;

use crate::database::repository::{AssessmentRepository, CandidateRepository, ResponseRepository};
use crate::dto::assessment_dto::{SubmitResponsePayload, UpsertAssessmentPayload};
use crate::error::{Error, Result};
use crate::models::assessment::Assessment;
use crate::models::response::{AssessmentResponse, ResponseStatus};
use crate::services::answer_service::AnswerService;
use crate::services::builder_service::AssessmentBuilder;
use crate::utils::time::now;

#[derive(Clone)]
pub struct AssessmentService {
    assessments: Arc<dyn AssessmentRepository>,
    responses: Arc<dyn ResponseRepository>,
    candidates: Arc<dyn CandidateRepository>,
}

impl AssessmentService {
    pub fn new(
        assessments: Arc<dyn AssessmentRepository>,
        responses: Arc<dyn ResponseRepository>,
        candidates: Arc<dyn CandidateRepository>,
    ) -> Self {
        Self {
            assessments,
            responses,
            candidates,
        }
    }

    pub fn list_for_job(&self, job_id: i64) -> Result<Vec<Assessment>> {
        self.assessments.list_by_job(job_id)
    }

    /// Fails with `NotFound` unless the assessment exists and belongs to `job_id`.
    pub fn get_for_job(&self, job_id: i64, assessment_id: i64) -> Result<Assessment> {
        self.assessments
            .get(assessment_id)?
            .filter(|a| a.job_id == job_id)
            .ok_or_else(|| {
                Error::NotFound(format!(
                    "Assessment {} not found for job {}",
                    assessment_id, job_id
                ))
            })
    }

    /// Creates the assessment when the payload has no `id`, replaces it
    /// otherwise. The flag is `true` for a creation.
    pub fn upsert(&self, job_id: i64, payload: UpsertAssessmentPayload) -> Result<(Assessment, bool)> {
        let timestamp = now();
        let existing = match payload.id {
            Some(id) => Some(self.get_for_job(job_id, id)?),
            None => None,
        };

        let draft = Assessment {
            id: payload.id.unwrap_or(0),
            job_id,
            title: payload.title.trim().to_string(),
            description: payload.description,
            sections: payload.sections.unwrap_or_default(),
            due_date: payload.due_date,
            time_limit: payload.time_limit,
            passing_score: payload.passing_score,
            is_active: payload
                .is_active
                .or(existing.as_ref().map(|a| a.is_active))
                .unwrap_or(true),
            created_at: existing.as_ref().map_or(timestamp, |a| a.created_at),
            updated_at: timestamp,
        };
        let assessment = AssessmentBuilder::new(draft).finish()?;

        if existing.is_some() {
            let updated = self.assessments.update(assessment)?;
            tracing::info!(assessment_id = updated.id, job_id, "Assessment updated");
            Ok((updated, false))
        } else {
            let created = self.assessments.insert(assessment)?;
            tracing::info!(assessment_id = created.id, job_id, "Assessment created");
            Ok((created, true))
        }
    }

    pub fn delete(&self, job_id: i64, assessment_id: i64) -> Result<()> {
        self.get_for_job(job_id, assessment_id)?;
        if !self.assessments.delete(assessment_id)? {
            return Err(Error::NotFound(format!("Assessment {} not found", assessment_id)));
        }
        tracing::info!(assessment_id, job_id, "Assessment deleted");
        Ok(())
    }

    pub fn submit(
        &self,
        job_id: i64,
        assessment_id: i64,
        payload: SubmitResponsePayload,
    ) -> Result<AssessmentResponse> {
        let candidate_id = payload
            .candidate_id
            .ok_or_else(|| Error::BadRequest("candidateId is required".into()))?;
        let assessment = self.get_for_job(job_id, assessment_id)?;
        if self.candidates.get(candidate_id)?.is_none() {
            return Err(Error::NotFound(format!("Candidate {} not found", candidate_id)));
        }
        if !assessment.is_active {
            return Err(Error::BadRequest(format!(
                "Assessment {} is not accepting responses",
                assessment_id
            )));
        }

        AnswerService::validate_submission(&assessment, &payload.answers).map_err(|e| {
            tracing::warn!(assessment_id, candidate_id, "Submission rejected: {}", e);
            e
        })?;

        let response = self.responses.insert(AssessmentResponse {
            id: 0,
            candidate_id,
            assessment_id,
            job_id,
            answers: payload.answers,
            submitted_at: now(),
            status: ResponseStatus::Completed,
        })?;
        tracing::info!(
            response_id = response.id,
            assessment_id,
            candidate_id,
            "Assessment response recorded"
        );
        Ok(response)
    }

    pub fn list_responses(&self, job_id: i64, assessment_id: i64) -> Result<Vec<AssessmentResponse>> {
        self.responses.list_for(job_id, assessment_id)
    }

    pub fn delete_responses(&self, job_id: i64, assessment_id: i64) -> Result<usize> {
        let removed = self.responses.delete_for(job_id, assessment_id)?;
        if removed == 0 {
            return Err(Error::NotFound("Responses not found".into()));
        }
        tracing::info!(assessment_id, job_id, removed, "Assessment responses deleted");
        Ok(removed)
    }

    pub fn counts(&self) -> Result<(usize, usize)> {
        Ok((self.assessments.count()?, self.responses.count()?))
    }
}
