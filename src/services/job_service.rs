use std::sync::Arc;

use crate::database::repository::{CandidateRepository, JobRepository};
use crate::dto::job_dto::{
    CreateJobPayload, JobDetailResponse, JobListQuery, JobSort, UpdateJobPayload,
};
use crate::dto::ListResponse;
use crate::error::{Error, Result};
use crate::models::job::{normalize_tags, Job, JobPatch, JobStatus, NewJob, OrderUpdate};
use crate::utils::pagination::paginate;
use crate::utils::slug::generate_slug;
use crate::utils::validation::require_non_blank;

const SLUG_ATTEMPTS: usize = 5;

#[derive(Clone)]
pub struct JobService {
    jobs: Arc<dyn JobRepository>,
    candidates: Arc<dyn CandidateRepository>,
    default_page_size: usize,
}

impl JobService {
    pub fn new(
        jobs: Arc<dyn JobRepository>,
        candidates: Arc<dyn CandidateRepository>,
        default_page_size: usize,
    ) -> Self {
        Self {
            jobs,
            candidates,
            default_page_size,
        }
    }

    pub fn list(&self, query: JobListQuery) -> Result<ListResponse<Job>> {
        let search = query
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());
        let status = query
            .status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        let wanted_tags: Vec<String> = query
            .tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        let mut jobs: Vec<Job> = self
            .jobs
            .list()?
            .into_iter()
            .filter(|job| match &search {
                Some(needle) => job.title.to_lowercase().contains(needle),
                None => true,
            })
            .filter(|job| match &status {
                Some(status) => job.status.as_str() == status,
                None => true,
            })
            .filter(|job| {
                wanted_tags.iter().all(|wanted| {
                    job.tags.iter().any(|tag| tag.to_lowercase() == *wanted)
                })
            })
            .collect();

        match JobSort::parse(query.sort.as_deref()) {
            JobSort::Title => jobs.sort_by_key(|j| j.title.to_lowercase()),
            JobSort::Status => jobs.sort_by(|a, b| {
                a.status.as_str().cmp(b.status.as_str()).then(a.order.cmp(&b.order))
            }),
            JobSort::Id => jobs.sort_by_key(|j| j.id),
            JobSort::Order => jobs.sort_by_key(|j| j.order),
        }

        let total = jobs.len();
        let page_size = query.page_size.unwrap_or(self.default_page_size);
        Ok(ListResponse {
            total,
            data: paginate(jobs, query.page, page_size),
        })
    }

    pub fn get(&self, id: i64) -> Result<Job> {
        self.jobs
            .get(id)?
            .ok_or_else(|| Error::NotFound(format!("Job {} not found", id)))
    }

    pub fn get_with_candidates(&self, id: i64) -> Result<JobDetailResponse> {
        let job = self.get(id)?;
        let candidates = self.candidates.list_by_job(id)?;
        Ok(JobDetailResponse { job, candidates })
    }

    pub fn create(&self, payload: CreateJobPayload) -> Result<Job> {
        let title = require_non_blank("title", &payload.title)?;
        let status = payload.status.unwrap_or_default();
        let tags = normalize_tags(payload.tags);

        let mut attempt = 0;
        loop {
            attempt += 1;
            let new_job = NewJob {
                title: title.clone(),
                slug: generate_slug(&title),
                status,
                tags: tags.clone(),
            };
            match self.jobs.insert(new_job) {
                Ok(job) => {
                    tracing::info!(job_id = job.id, slug = %job.slug, "Job created");
                    return Ok(job);
                }
                Err(Error::Conflict(msg)) if attempt < SLUG_ATTEMPTS => {
                    tracing::warn!(attempt, "Slug collision, regenerating: {}", msg);
                }
                Err(e) => return Err(e),
            }
        }
    }

    pub fn update(&self, id: i64, payload: UpdateJobPayload) -> Result<Job> {
        if let Some(title) = &payload.title {
            require_non_blank("title", title)?;
        }
        let patch = JobPatch::from(payload);
        let job = self.jobs.update(id, &patch)?;
        tracing::info!(job_id = id, "Job updated");
        Ok(job)
    }

    /// Moves the job at `from_order` to `to_order`. `id` must name an existing
    /// job; the move itself is positional.
    pub fn reorder(&self, id: i64, from_order: i64, to_order: i64) -> Result<Vec<Job>> {
        self.get(id)?;
        let jobs = self.jobs.reorder(from_order, to_order).map_err(|e| {
            tracing::warn!(job_id = id, from_order, to_order, "Reorder rejected: {}", e);
            e
        })?;
        tracing::info!(job_id = id, from_order, to_order, "Job reordered");
        Ok(jobs)
    }

    pub fn bulk_reorder(&self, updates: &[OrderUpdate]) -> Result<Vec<Job>> {
        if updates.is_empty() {
            return Err(Error::BadRequest("No order updates supplied".into()));
        }
        let jobs = self.jobs.apply_orders(updates).map_err(|e| {
            tracing::warn!(count = updates.len(), "Bulk reorder rejected: {}", e);
            e
        })?;
        tracing::info!(count = updates.len(), "Jobs reordered");
        Ok(jobs)
    }

    pub fn count_by_status(&self) -> Result<(usize, usize)> {
        let jobs = self.jobs.list()?;
        let active = jobs.iter().filter(|j| j.status == JobStatus::Active).count();
        Ok((active, jobs.len() - active))
    }
}
