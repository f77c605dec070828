//! Storage contracts per entity. Services only talk to these traits, so the
//! in-process [`MemoryStore`](super::memory::MemoryStore) can be replaced by a
//! database-backed implementation without touching call sites.
//!
//! Every method is atomic: it either applies completely or not at all, and no
//! reader observes an intermediate state.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::assessment::Assessment;
use crate::models::candidate::{Candidate, CandidatePatch};
use crate::models::job::{Job, JobPatch, NewJob, OrderUpdate};
use crate::models::response::AssessmentResponse;

#[cfg_attr(test, mockall::automock)]
pub trait JobRepository: Send + Sync {
    /// All jobs sorted by `order`.
    fn list(&self) -> Result<Vec<Job>>;
    fn get(&self, id: i64) -> Result<Option<Job>>;
    /// Stores a job with a fresh id and `order = count + 1`.
    /// Fails with `Conflict` when the slug is taken.
    fn insert(&self, job: NewJob) -> Result<Job>;
    fn update(&self, id: i64, patch: &JobPatch) -> Result<Job>;
    /// Repairs the ordering and moves the job at `from_order` to `to_order`.
    fn reorder(&self, from_order: i64, to_order: i64) -> Result<Vec<Job>>;
    /// Applies explicit positions; rejected unless the result is dense.
    fn apply_orders(&self, updates: &[OrderUpdate]) -> Result<Vec<Job>>;
}

#[cfg_attr(test, mockall::automock)]
pub trait CandidateRepository: Send + Sync {
    fn list(&self) -> Result<Vec<Candidate>>;
    fn list_by_job(&self, job_id: i64) -> Result<Vec<Candidate>>;
    fn get(&self, id: i64) -> Result<Option<Candidate>>;
    /// Stores a candidate under a fresh id. Fails with `Conflict` when the
    /// `(job_id, email)` pair already exists.
    fn insert(&self, candidate: Candidate) -> Result<Candidate>;
    fn update(&self, id: i64, patch: &CandidatePatch, at: DateTime<Utc>) -> Result<Candidate>;
}

#[cfg_attr(test, mockall::automock)]
pub trait AssessmentRepository: Send + Sync {
    fn list_by_job(&self, job_id: i64) -> Result<Vec<Assessment>>;
    fn get(&self, id: i64) -> Result<Option<Assessment>>;
    fn count(&self) -> Result<usize>;
    fn insert(&self, assessment: Assessment) -> Result<Assessment>;
    /// Replaces the stored document, keeping its `job_id` and `created_at`.
    fn update(&self, assessment: Assessment) -> Result<Assessment>;
    /// Deletes the assessment together with its responses.
    fn delete(&self, id: i64) -> Result<bool>;
}

#[cfg_attr(test, mockall::automock)]
pub trait ResponseRepository: Send + Sync {
    fn insert(&self, response: AssessmentResponse) -> Result<AssessmentResponse>;
    fn list_for(&self, job_id: i64, assessment_id: i64) -> Result<Vec<AssessmentResponse>>;
    fn list_by_candidate(&self, candidate_id: i64) -> Result<Vec<AssessmentResponse>>;
    fn count(&self) -> Result<usize>;
    /// Returns how many responses were removed.
    fn delete_for(&self, job_id: i64, assessment_id: i64) -> Result<usize>;
}
