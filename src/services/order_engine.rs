//! Display-order maintenance for jobs.
//!
//! All functions here mutate a slice of jobs in place and leave it sorted by
//! `order`. Callers are expected to run them on a scratch copy inside a store
//! transaction and only commit when they return `Ok`.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::models::job::{Job, OrderUpdate};

/// Renumbers jobs `1..N` by their current relative order (ties broken by id).
pub fn normalize(jobs: &mut [Job]) {
    jobs.sort_by(|a, b| a.order.cmp(&b.order).then(a.id.cmp(&b.id)));
    for (idx, job) in jobs.iter_mut().enumerate() {
        job.order = idx as i64 + 1;
    }
}

/// Moves the job at `from_order` to `to_order`, shifting the jobs in between.
pub fn move_order(jobs: &mut [Job], from_order: i64, to_order: i64) -> Result<()> {
    if jobs.is_empty() {
        return Err(Error::NotFound("No jobs found".into()));
    }

    normalize(jobs);

    let total = jobs.len() as i64;
    let moving = jobs
        .iter()
        .position(|job| job.order == from_order)
        .ok_or_else(|| Error::NotFound("Source job not found".into()))?;

    if to_order < 1 || to_order > total {
        return Err(Error::NotFound(format!(
            "Invalid target order {} (expected 1..={})",
            to_order, total
        )));
    }

    for job in jobs.iter_mut() {
        if from_order < to_order && job.order > from_order && job.order <= to_order {
            job.order -= 1;
        } else if from_order > to_order && job.order >= to_order && job.order < from_order {
            job.order += 1;
        }
    }
    jobs[moving].order = to_order;
    jobs.sort_by_key(|job| job.order);

    Ok(())
}

/// Applies explicit `(id, order)` assignments and accepts the result only if
/// every job ends up on a distinct position in `1..N`.
pub fn apply_bulk(jobs: &mut [Job], updates: &[OrderUpdate]) -> Result<()> {
    let mut seen = HashSet::with_capacity(updates.len());
    for update in updates {
        if !seen.insert(update.id) {
            return Err(Error::BadRequest(format!(
                "Job {} appears more than once in updates",
                update.id
            )));
        }
        let job = jobs
            .iter_mut()
            .find(|job| job.id == update.id)
            .ok_or_else(|| Error::NotFound(format!("Job {} not found", update.id)))?;
        job.order = update.order;
    }

    if !is_dense(jobs) {
        return Err(Error::BadRequest(
            "Resulting job order must be a permutation of 1..N".into(),
        ));
    }

    jobs.sort_by_key(|job| job.order);
    Ok(())
}

pub fn is_dense(jobs: &[Job]) -> bool {
    let mut orders: Vec<i64> = jobs.iter().map(|job| job.order).collect();
    orders.sort_unstable();
    orders
        .iter()
        .enumerate()
        .all(|(idx, order)| *order == idx as i64 + 1)
}
