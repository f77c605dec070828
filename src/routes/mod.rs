pub mod assessments;
pub mod candidates;
pub mod dashboard;
pub mod docs;
pub mod health;
pub mod jobs;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::error::{Error, Result};
use crate::middleware::{cors::api_cors, rate_limit};
use crate::AppState;

const BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Runs a service call on the blocking pool. Store operations take a
/// `std::sync` lock and may write the snapshot file while holding it.
pub(crate) async fn blocking<F, T>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| Error::Internal(format!("blocking task failed: {}", e)))?
}

/// Full application router: `/health`, the OpenAPI document and the
/// rate-limited `/api` surface.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route("/api/jobs/reorder/smooth", patch(jobs::bulk_reorder_jobs))
        .route("/api/jobs/:id", get(jobs::get_job).patch(jobs::update_job))
        .route("/api/jobs/:id/reorder", patch(jobs::reorder_job))
        .route(
            "/api/candidates",
            get(candidates::list_candidates).post(candidates::create_candidate),
        )
        .route(
            "/api/candidates/:id",
            get(candidates::get_candidate).patch(candidates::update_candidate),
        )
        .route(
            "/api/candidates/:id/timeline",
            get(candidates::get_candidate_timeline),
        )
        .route(
            "/api/candidates/:id/responses",
            get(candidates::get_candidate_responses),
        )
        .route(
            "/api/assessments/:job_id",
            get(assessments::list_assessments).put(assessments::upsert_assessment),
        )
        .route(
            "/api/assessments/:job_id/:assessment_id",
            get(assessments::get_assessment).delete(assessments::delete_assessment),
        )
        .route(
            "/api/assessments/:job_id/:assessment_id/submit",
            axum::routing::post(assessments::submit_response),
        )
        .route(
            "/api/assessments/:job_id/:assessment_id/responses",
            get(assessments::list_responses).delete(assessments::delete_responses),
        )
        .route("/api/dashboard/stats", get(dashboard::get_dashboard_stats))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::new_rps_state(state.config.api_rps),
            rate_limit::rps_middleware,
        ));

    Router::new()
        .route("/health", get(health::health))
        .route("/api/openapi.json", get(docs::openapi_json))
        .merge(api)
        .with_state(state)
        .layer(api_cors())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn blocking_runs_off_the_runtime_thread() {
        let caller = std::thread::current().id();
        let worker = blocking(|| Ok(std::thread::current().id())).await.unwrap();
        assert_ne!(caller, worker);
    }

    #[tokio::test]
    async fn blocking_propagates_errors_and_panics() {
        let err = blocking::<_, ()>(|| Err(Error::NotFound("job".into()))).await;
        assert!(matches!(err, Err(Error::NotFound(_))));

        let panicked = blocking::<_, ()>(|| panic!("store exploded")).await;
        assert!(matches!(panicked, Err(Error::Internal(_))));
    }
}
