use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::candidate_dto::{
        CandidateListQuery, CreateCandidatePayload, UpdateCandidatePayload,
    },
    error::Result,
    routes::blocking,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/candidates",
    params(
        ("search" = Option<String>, Query, description = "Name or email substring"),
        ("stage" = Option<String>, Query, description = "Pipeline stage"),
        ("jobId" = Option<i64>, Query, description = "Only candidates of this job"),
        ("page" = Option<usize>, Query, description = "1-based page number"),
        ("pageSize" = Option<usize>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Page of candidates with the total match count")
    )
)]
#[axum::debug_handler]
pub async fn list_candidates(
    State(state): State<AppState>,
    Query(query): Query<CandidateListQuery>,
) -> Result<impl IntoResponse> {
    let service = state.candidate_service.clone();
    let page = blocking(move || service.list(query)).await?;
    Ok(Json(page))
}

#[utoipa::path(
    post,
    path = "/api/candidates",
    request_body = CreateCandidatePayload,
    responses(
        (status = 201, description = "Candidate created", body = crate::models::candidate::Candidate),
        (status = 400, description = "Missing name, email or jobId"),
        (status = 404, description = "Job not found"),
        (status = 409, description = "Email already applied to this job")
    )
)]
#[axum::debug_handler]
pub async fn create_candidate(
    State(state): State<AppState>,
    Json(payload): Json<CreateCandidatePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let service = state.candidate_service.clone();
    let candidate = blocking(move || service.create(payload)).await?;
    Ok((StatusCode::CREATED, Json(candidate)))
}

#[utoipa::path(
    get,
    path = "/api/candidates/{id}",
    params(
        ("id" = i64, Path, description = "Candidate ID")
    ),
    responses(
        (status = 200, description = "Candidate with job name", body = crate::dto::candidate_dto::CandidateDetailResponse),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn get_candidate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let service = state.candidate_service.clone();
    let detail = blocking(move || service.get_with_job_name(id)).await?;
    Ok(Json(detail))
}

#[utoipa::path(
    patch,
    path = "/api/candidates/{id}",
    params(
        ("id" = i64, Path, description = "Candidate ID")
    ),
    request_body = UpdateCandidatePayload,
    responses(
        (status = 200, description = "Candidate updated", body = crate::models::candidate::Candidate),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Candidate not found"),
        (status = 409, description = "Email already applied to this job")
    )
)]
#[axum::debug_handler]
pub async fn update_candidate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCandidatePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let service = state.candidate_service.clone();
    let candidate = blocking(move || service.update(id, payload)).await?;
    Ok(Json(candidate))
}

#[utoipa::path(
    get,
    path = "/api/candidates/{id}/timeline",
    params(
        ("id" = i64, Path, description = "Candidate ID")
    ),
    responses(
        (status = 200, description = "Stage transitions, oldest first"),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn get_candidate_timeline(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let service = state.candidate_service.clone();
    let timeline = blocking(move || service.timeline(id)).await?;
    Ok(Json(timeline))
}

#[utoipa::path(
    get,
    path = "/api/candidates/{id}/responses",
    params(
        ("id" = i64, Path, description = "Candidate ID")
    ),
    responses(
        (status = 200, description = "Assessment answers submitted by the candidate"),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn get_candidate_responses(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let service = state.candidate_service.clone();
    let summaries = blocking(move || service.responses(id)).await?;
    Ok(Json(summaries))
}
