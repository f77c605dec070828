use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::repository::{
    AssessmentRepository, CandidateRepository, JobRepository, ResponseRepository,
};
use crate::error::{Error, Result};
use crate::models::assessment::Assessment;
use crate::models::candidate::{Candidate, CandidatePatch};
use crate::models::job::{Job, JobPatch, NewJob, OrderUpdate};
use crate::models::response::AssessmentResponse;
use crate::services::order_engine;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Snapshot {
    jobs: BTreeMap<i64, Job>,
    candidates: BTreeMap<i64, Candidate>,
    assessments: BTreeMap<i64, Assessment>,
    responses: BTreeMap<i64, AssessmentResponse>,
    last_ids: LastIds,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
struct LastIds {
    job: i64,
    candidate: i64,
    assessment: i64,
    response: i64,
}

fn next(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

/// Document store kept in memory and, when opened with a path, mirrored to a
/// JSON snapshot after every successful write.
///
/// Writes run against a scratch copy of the whole snapshot under the write
/// lock; the copy replaces the live state only after the snapshot file has
/// been written.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<Snapshot>,
    path: Option<PathBuf>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the snapshot at `path`, starting empty when the file is absent.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let snapshot = if path.exists() {
            let raw = fs::read(&path)?;
            serde_json::from_slice(&raw)?
        } else {
            Snapshot::default()
        };
        tracing::info!(
            path = %path.display(),
            jobs = snapshot.jobs.len(),
            candidates = snapshot.candidates.len(),
            assessments = snapshot.assessments.len(),
            "document store opened"
        );
        Ok(Self {
            state: RwLock::new(snapshot),
            path: Some(path),
        })
    }

    fn read<T>(&self, f: impl FnOnce(&Snapshot) -> T) -> Result<T> {
        let guard = self.state.read()?;
        Ok(f(&guard))
    }

    fn write<T>(&self, f: impl FnOnce(&mut Snapshot) -> Result<T>) -> Result<T> {
        let mut guard = self.state.write()?;
        let mut scratch = guard.clone();
        let out = f(&mut scratch)?;
        if let Some(path) = &self.path {
            persist(path, &scratch)?;
        }
        *guard = scratch;
        Ok(out)
    }
}

fn persist(path: &Path, snapshot: &Snapshot) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, serde_json::to_vec_pretty(snapshot)?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn sorted_jobs(snapshot: &Snapshot) -> Vec<Job> {
    let mut jobs: Vec<Job> = snapshot.jobs.values().cloned().collect();
    jobs.sort_by(|a, b| a.order.cmp(&b.order).then(a.id.cmp(&b.id)));
    jobs
}

fn replace_jobs(snapshot: &mut Snapshot, jobs: &[Job]) {
    for job in jobs {
        snapshot.jobs.insert(job.id, job.clone());
    }
}

impl JobRepository for MemoryStore {
    fn list(&self) -> Result<Vec<Job>> {
        self.read(sorted_jobs)
    }

    fn get(&self, id: i64) -> Result<Option<Job>> {
        self.read(|s| s.jobs.get(&id).cloned())
    }

    fn insert(&self, job: NewJob) -> Result<Job> {
        self.write(|s| {
            if s.jobs.values().any(|j| j.slug == job.slug) {
                return Err(Error::Conflict(format!("Slug {} is already taken", job.slug)));
            }
            let stored = Job {
                id: next(&mut s.last_ids.job),
                title: job.title,
                slug: job.slug,
                status: job.status,
                tags: job.tags,
                order: s.jobs.len() as i64 + 1,
            };
            s.jobs.insert(stored.id, stored.clone());
            Ok(stored)
        })
    }

    fn update(&self, id: i64, patch: &JobPatch) -> Result<Job> {
        self.write(|s| {
            let job = s
                .jobs
                .get_mut(&id)
                .ok_or_else(|| Error::NotFound(format!("Job {} not found", id)))?;
            patch.apply(job);
            Ok(job.clone())
        })
    }

    fn reorder(&self, from_order: i64, to_order: i64) -> Result<Vec<Job>> {
        self.write(|s| {
            let mut jobs = sorted_jobs(s);
            order_engine::move_order(&mut jobs, from_order, to_order)?;
            replace_jobs(s, &jobs);
            Ok(jobs)
        })
    }

    fn apply_orders(&self, updates: &[OrderUpdate]) -> Result<Vec<Job>> {
        self.write(|s| {
            let mut jobs = sorted_jobs(s);
            order_engine::apply_bulk(&mut jobs, updates)?;
            replace_jobs(s, &jobs);
            Ok(jobs)
        })
    }
}

impl CandidateRepository for MemoryStore {
    fn list(&self) -> Result<Vec<Candidate>> {
        self.read(|s| s.candidates.values().cloned().collect())
    }

    fn list_by_job(&self, job_id: i64) -> Result<Vec<Candidate>> {
        self.read(|s| {
            s.candidates
                .values()
                .filter(|c| c.job_id == job_id)
                .cloned()
                .collect()
        })
    }

    fn get(&self, id: i64) -> Result<Option<Candidate>> {
        self.read(|s| s.candidates.get(&id).cloned())
    }

    fn insert(&self, mut candidate: Candidate) -> Result<Candidate> {
        self.write(|s| {
            if email_taken(s, candidate.job_id, &candidate.email, None) {
                return Err(Error::Conflict(format!(
                    "Candidate with email {} already applied to this job",
                    candidate.email
                )));
            }
            candidate.id = next(&mut s.last_ids.candidate);
            s.candidates.insert(candidate.id, candidate.clone());
            Ok(candidate)
        })
    }

    fn update(&self, id: i64, patch: &CandidatePatch, at: DateTime<Utc>) -> Result<Candidate> {
        self.write(|s| {
            let mut candidate = s
                .candidates
                .get(&id)
                .cloned()
                .ok_or_else(|| Error::NotFound(format!("Candidate {} not found", id)))?;
            patch.apply(&mut candidate, at);
            if email_taken(s, candidate.job_id, &candidate.email, Some(id)) {
                return Err(Error::Conflict(format!(
                    "Candidate with email {} already applied to this job",
                    candidate.email
                )));
            }
            s.candidates.insert(id, candidate.clone());
            Ok(candidate)
        })
    }
}

fn email_taken(snapshot: &Snapshot, job_id: i64, email: &str, except: Option<i64>) -> bool {
    snapshot
        .candidates
        .values()
        .any(|c| c.job_id == job_id && c.email == email && Some(c.id) != except)
}

impl AssessmentRepository for MemoryStore {
    fn list_by_job(&self, job_id: i64) -> Result<Vec<Assessment>> {
        self.read(|s| {
            s.assessments
                .values()
                .filter(|a| a.job_id == job_id)
                .cloned()
                .collect()
        })
    }

    fn get(&self, id: i64) -> Result<Option<Assessment>> {
        self.read(|s| s.assessments.get(&id).cloned())
    }

    fn count(&self) -> Result<usize> {
        self.read(|s| s.assessments.len())
    }

    fn insert(&self, mut assessment: Assessment) -> Result<Assessment> {
        self.write(|s| {
            assessment.id = next(&mut s.last_ids.assessment);
            s.assessments.insert(assessment.id, assessment.clone());
            Ok(assessment)
        })
    }

    fn update(&self, mut assessment: Assessment) -> Result<Assessment> {
        self.write(|s| {
            let existing = s.assessments.get(&assessment.id).ok_or_else(|| {
                Error::NotFound(format!("Assessment {} not found", assessment.id))
            })?;
            assessment.job_id = existing.job_id;
            assessment.created_at = existing.created_at;
            s.assessments.insert(assessment.id, assessment.clone());
            Ok(assessment)
        })
    }

    fn delete(&self, id: i64) -> Result<bool> {
        self.write(|s| {
            if s.assessments.remove(&id).is_none() {
                return Ok(false);
            }
            s.responses.retain(|_, r| r.assessment_id != id);
            Ok(true)
        })
    }
}

impl ResponseRepository for MemoryStore {
    fn insert(&self, mut response: AssessmentResponse) -> Result<AssessmentResponse> {
        self.write(|s| {
            response.id = next(&mut s.last_ids.response);
            s.responses.insert(response.id, response.clone());
            Ok(response)
        })
    }

    fn list_for(&self, job_id: i64, assessment_id: i64) -> Result<Vec<AssessmentResponse>> {
        self.read(|s| {
            s.responses
                .values()
                .filter(|r| r.job_id == job_id && r.assessment_id == assessment_id)
                .cloned()
                .collect()
        })
    }

    fn list_by_candidate(&self, candidate_id: i64) -> Result<Vec<AssessmentResponse>> {
        self.read(|s| {
            s.responses
                .values()
                .filter(|r| r.candidate_id == candidate_id)
                .cloned()
                .collect()
        })
    }

    fn count(&self) -> Result<usize> {
        self.read(|s| s.responses.len())
    }

    fn delete_for(&self, job_id: i64, assessment_id: i64) -> Result<usize> {
        self.write(|s| {
            let before = s.responses.len();
            s.responses
                .retain(|_, r| !(r.job_id == job_id && r.assessment_id == assessment_id));
            Ok(before - s.responses.len())
        })
    }
}
