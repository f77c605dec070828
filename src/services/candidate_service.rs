use std::sync::Arc;

use crate::database::repository::{
    AssessmentRepository, CandidateRepository, JobRepository, ResponseRepository,
};
use crate::dto::candidate_dto::{
    AnsweredQuestion, CandidateDetailResponse, CandidateListQuery, CandidateResponseSummary,
    CreateCandidatePayload, UpdateCandidatePayload,
};
use crate::dto::ListResponse;
use crate::error::{Error, Result};
use crate::models::candidate::{
    normalize_email, Candidate, CandidatePatch, Stage, TimelineEntry,
};
use crate::utils::pagination::paginate;
use crate::utils::time::now;
use crate::utils::validation::require_non_blank;

const UNKNOWN_JOB: &str = "Unknown";

#[derive(Clone)]
pub struct CandidateService {
    candidates: Arc<dyn CandidateRepository>,
    jobs: Arc<dyn JobRepository>,
    assessments: Arc<dyn AssessmentRepository>,
    responses: Arc<dyn ResponseRepository>,
    default_page_size: usize,
}

impl CandidateService {
    pub fn new(
        candidates: Arc<dyn CandidateRepository>,
        jobs: Arc<dyn JobRepository>,
        assessments: Arc<dyn AssessmentRepository>,
        responses: Arc<dyn ResponseRepository>,
        default_page_size: usize,
    ) -> Self {
        Self {
            candidates,
            jobs,
            assessments,
            responses,
            default_page_size,
        }
    }

    pub fn list(&self, query: CandidateListQuery) -> Result<ListResponse<Candidate>> {
        let search = query
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());
        let stage = query
            .stage
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let source = match query.job_id {
            Some(job_id) if job_id != 0 => self.candidates.list_by_job(job_id)?,
            _ => self.candidates.list()?,
        };

        let candidates: Vec<Candidate> = source
            .into_iter()
            .filter(|c| match &search {
                Some(needle) => {
                    c.name.to_lowercase().contains(needle)
                        || c.email.to_lowercase().contains(needle)
                }
                None => true,
            })
            .filter(|c| match &stage {
                Some(stage) => c.stage.as_str() == stage,
                None => true,
            })
            .collect();

        let total = candidates.len();
        let page_size = query.page_size.unwrap_or(self.default_page_size);
        Ok(ListResponse {
            total,
            data: paginate(candidates, query.page, page_size),
        })
    }

    pub fn get(&self, id: i64) -> Result<Candidate> {
        self.candidates
            .get(id)?
            .ok_or_else(|| Error::NotFound(format!("Candidate {} not found", id)))
    }

    pub fn get_with_job_name(&self, id: i64) -> Result<CandidateDetailResponse> {
        let candidate = self.get(id)?;
        let job_name = self
            .jobs
            .get(candidate.job_id)?
            .map(|job| job.title)
            .unwrap_or_else(|| UNKNOWN_JOB.to_string());
        Ok(CandidateDetailResponse {
            candidate,
            job_name,
        })
    }

    pub fn create(&self, payload: CreateCandidatePayload) -> Result<Candidate> {
        let job_id = payload
            .job_id
            .ok_or_else(|| Error::BadRequest("jobId is required".into()))?;
        let name = require_non_blank("name", &payload.name)?;
        let email = normalize_email(&require_non_blank("email", &payload.email)?);

        if self.jobs.get(job_id)?.is_none() {
            return Err(Error::NotFound(format!("Job {} not found", job_id)));
        }

        let created_at = now();
        let stage = payload.stage.unwrap_or_default();
        let candidate = Candidate {
            id: 0,
            job_id,
            name,
            email,
            phone: payload.phone.unwrap_or_default(),
            location: payload.location.unwrap_or_default(),
            resume_url: payload.resume_url,
            linkedin: payload.linkedin,
            portfolio: payload.portfolio,
            stage,
            date_applied: payload.date_applied.unwrap_or(created_at),
            experience_years: payload.experience_years.unwrap_or(0),
            skills: payload.skills,
            notes: payload.notes,
            timeline: vec![TimelineEntry {
                stage,
                date: created_at,
            }],
        };

        let candidate = self.candidates.insert(candidate)?;
        tracing::info!(candidate_id = candidate.id, job_id, "Candidate created");
        Ok(candidate)
    }

    pub fn update(&self, id: i64, payload: UpdateCandidatePayload) -> Result<Candidate> {
        if let Some(name) = &payload.name {
            require_non_blank("name", name)?;
        }
        let patch = CandidatePatch::from(payload);
        let before = self.get(id)?.stage;
        let candidate = self.candidates.update(id, &patch, now())?;
        if candidate.stage != before {
            tracing::info!(
                candidate_id = id,
                from = before.as_str(),
                to = candidate.stage.as_str(),
                "Candidate stage changed"
            );
        }
        Ok(candidate)
    }

    pub fn timeline(&self, id: i64) -> Result<Vec<TimelineEntry>> {
        Ok(self.get(id)?.timeline)
    }

    /// Every submission by the candidate, flattened to question/answer text.
    /// Questions are labelled by their text while the assessment still
    /// defines them, by id otherwise.
    pub fn responses(&self, id: i64) -> Result<Vec<CandidateResponseSummary>> {
        self.get(id)?;
        let mut summaries = Vec::new();
        for response in self.responses.list_by_candidate(id)? {
            let assessment = self.assessments.get(response.assessment_id)?;
            let responses = response
                .answers
                .iter()
                .map(|(question_id, answer)| {
                    let question = assessment
                        .as_ref()
                        .and_then(|a| a.question(question_id))
                        .map(|q| q.text.clone())
                        .filter(|text| !text.trim().is_empty())
                        .unwrap_or_else(|| question_id.clone());
                    AnsweredQuestion {
                        question,
                        answer: answer.display(),
                    }
                })
                .collect();
            summaries.push(CandidateResponseSummary {
                assessment_id: response.assessment_id,
                assessment_title: assessment.map(|a| a.title),
                submitted_at: response.submitted_at,
                responses,
            });
        }
        Ok(summaries)
    }

    pub fn count_by_stage(&self) -> Result<Vec<(Stage, usize)>> {
        let candidates = self.candidates.list()?;
        Ok(Stage::ALL
            .iter()
            .map(|stage| {
                let count = candidates.iter().filter(|c| c.stage == *stage).count();
                (*stage, count)
            })
            .collect())
    }
}
