use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::{
        assessment_dto::{SubmitResponsePayload, UpsertAssessmentPayload},
        SuccessResponse,
    },
    error::Result,
    routes::blocking,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/assessments/{jobId}",
    params(
        ("jobId" = i64, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Assessments attached to the job")
    )
)]
#[axum::debug_handler]
pub async fn list_assessments(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let service = state.assessment_service.clone();
    let assessments = blocking(move || service.list_for_job(job_id)).await?;
    Ok(Json(assessments))
}

#[utoipa::path(
    put,
    path = "/api/assessments/{jobId}",
    params(
        ("jobId" = i64, Path, description = "Job ID")
    ),
    request_body = UpsertAssessmentPayload,
    responses(
        (status = 200, description = "Assessment replaced", body = crate::models::assessment::Assessment),
        (status = 201, description = "Assessment created", body = crate::models::assessment::Assessment),
        (status = 400, description = "Invalid assessment structure"),
        (status = 404, description = "Assessment not found for this job")
    )
)]
#[axum::debug_handler]
pub async fn upsert_assessment(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
    Json(payload): Json<UpsertAssessmentPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let service = state.assessment_service.clone();
    let (assessment, created) = blocking(move || service.upsert(job_id, payload)).await?;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(assessment)))
}

#[utoipa::path(
    get,
    path = "/api/assessments/{jobId}/{assessmentId}",
    params(
        ("jobId" = i64, Path, description = "Job ID"),
        ("assessmentId" = i64, Path, description = "Assessment ID")
    ),
    responses(
        (status = 200, description = "Assessment found", body = crate::models::assessment::Assessment),
        (status = 404, description = "Assessment not found for this job")
    )
)]
#[axum::debug_handler]
pub async fn get_assessment(
    State(state): State<AppState>,
    Path((job_id, assessment_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse> {
    let service = state.assessment_service.clone();
    let assessment = blocking(move || service.get_for_job(job_id, assessment_id)).await?;
    Ok(Json(assessment))
}

#[utoipa::path(
    delete,
    path = "/api/assessments/{jobId}/{assessmentId}",
    params(
        ("jobId" = i64, Path, description = "Job ID"),
        ("assessmentId" = i64, Path, description = "Assessment ID")
    ),
    responses(
        (status = 200, description = "Assessment and its responses deleted"),
        (status = 404, description = "Assessment not found for this job")
    )
)]
#[axum::debug_handler]
pub async fn delete_assessment(
    State(state): State<AppState>,
    Path((job_id, assessment_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse> {
    let service = state.assessment_service.clone();
    blocking(move || service.delete(job_id, assessment_id)).await?;
    Ok(Json(SuccessResponse::ok()))
}

#[utoipa::path(
    post,
    path = "/api/assessments/{jobId}/{assessmentId}/submit",
    params(
        ("jobId" = i64, Path, description = "Job ID"),
        ("assessmentId" = i64, Path, description = "Assessment ID")
    ),
    request_body = SubmitResponsePayload,
    responses(
        (status = 201, description = "Response recorded", body = crate::models::response::AssessmentResponse),
        (status = 400, description = "Missing candidateId or invalid answers"),
        (status = 404, description = "Assessment or candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn submit_response(
    State(state): State<AppState>,
    Path((job_id, assessment_id)): Path<(i64, i64)>,
    Json(payload): Json<SubmitResponsePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let service = state.assessment_service.clone();
    let response = blocking(move || service.submit(job_id, assessment_id, payload)).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/assessments/{jobId}/{assessmentId}/responses",
    params(
        ("jobId" = i64, Path, description = "Job ID"),
        ("assessmentId" = i64, Path, description = "Assessment ID")
    ),
    responses(
        (status = 200, description = "Responses submitted for the assessment")
    )
)]
#[axum::debug_handler]
pub async fn list_responses(
    State(state): State<AppState>,
    Path((job_id, assessment_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse> {
    let service = state.assessment_service.clone();
    let responses = blocking(move || service.list_responses(job_id, assessment_id)).await?;
    Ok(Json(responses))
}

#[utoipa::path(
    delete,
    path = "/api/assessments/{jobId}/{assessmentId}/responses",
    params(
        ("jobId" = i64, Path, description = "Job ID"),
        ("assessmentId" = i64, Path, description = "Assessment ID")
    ),
    responses(
        (status = 200, description = "Responses deleted"),
        (status = 404, description = "No responses recorded")
    )
)]
#[axum::debug_handler]
pub async fn delete_responses(
    State(state): State<AppState>,
    Path((job_id, assessment_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse> {
    let service = state.assessment_service.clone();
    blocking(move || service.delete_responses(job_id, assessment_id)).await?;
    Ok(Json(SuccessResponse::ok()))
}
