use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use utoipa::OpenApi;

use crate::error::{Error, Result};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health,
        crate::routes::jobs::list_jobs,
        crate::routes::jobs::create_job,
        crate::routes::jobs::get_job,
        crate::routes::jobs::update_job,
        crate::routes::jobs::reorder_job,
        crate::routes::jobs::bulk_reorder_jobs,
        crate::routes::candidates::list_candidates,
        crate::routes::candidates::create_candidate,
        crate::routes::candidates::get_candidate,
        crate::routes::candidates::update_candidate,
        crate::routes::candidates::get_candidate_timeline,
        crate::routes::candidates::get_candidate_responses,
        crate::routes::assessments::list_assessments,
        crate::routes::assessments::upsert_assessment,
        crate::routes::assessments::get_assessment,
        crate::routes::assessments::delete_assessment,
        crate::routes::assessments::submit_response,
        crate::routes::assessments::list_responses,
        crate::routes::assessments::delete_responses,
        crate::routes::dashboard::get_dashboard_stats,
    ),
    info(title = "TalentFlow API", description = "Jobs, candidates and assessments")
)]
pub struct ApiDoc;

#[axum::debug_handler]
pub async fn openapi_json() -> Result<Response> {
    let body = ApiDoc::openapi()
        .to_pretty_json()
        .map_err(|e| Error::Internal(format!("failed to render OpenAPI document: {}", e)))?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
