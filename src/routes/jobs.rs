use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::{
        job_dto::{
            BulkReorderPayload, CreateJobPayload, JobListQuery, ReorderPayload, UpdateJobPayload,
        },
        SuccessResponse,
    },
    error::Result,
    routes::blocking,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/jobs",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive title substring"),
        ("status" = Option<String>, Query, description = "active or archived"),
        ("tags" = Option<String>, Query, description = "Comma-separated tags, all must match"),
        ("page" = Option<usize>, Query, description = "1-based page number"),
        ("pageSize" = Option<usize>, Query, description = "Items per page"),
        ("sort" = Option<String>, Query, description = "title, status, order or id")
    ),
    responses(
        (status = 200, description = "Page of jobs with the total match count")
    )
)]
#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> Result<impl IntoResponse> {
    let service = state.job_service.clone();
    let page = blocking(move || service.list(query)).await?;
    Ok(Json(page))
}

#[utoipa::path(
    post,
    path = "/api/jobs",
    request_body = CreateJobPayload,
    responses(
        (status = 201, description = "Job created", body = crate::models::job::Job),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    Json(payload): Json<CreateJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let service = state.job_service.clone();
    let job = blocking(move || service.create(payload)).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    params(
        ("id" = i64, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job with its candidates", body = crate::dto::job_dto::JobDetailResponse),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let service = state.job_service.clone();
    let detail = blocking(move || service.get_with_candidates(id)).await?;
    Ok(Json(detail))
}

#[utoipa::path(
    patch,
    path = "/api/jobs/{id}",
    params(
        ("id" = i64, Path, description = "Job ID")
    ),
    request_body = UpdateJobPayload,
    responses(
        (status = 200, description = "Job updated", body = crate::models::job::Job),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let service = state.job_service.clone();
    let job = blocking(move || service.update(id, payload)).await?;
    Ok(Json(job))
}

#[utoipa::path(
    patch,
    path = "/api/jobs/{id}/reorder",
    params(
        ("id" = i64, Path, description = "Job being dragged")
    ),
    request_body = ReorderPayload,
    responses(
        (status = 200, description = "Order updated"),
        (status = 404, description = "Job, source position or target position not found")
    )
)]
#[axum::debug_handler]
pub async fn reorder_job(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ReorderPayload>,
) -> Result<impl IntoResponse> {
    let service = state.job_service.clone();
    blocking(move || service.reorder(id, payload.from_order, payload.to_order)).await?;
    Ok(Json(SuccessResponse::ok()))
}

#[utoipa::path(
    patch,
    path = "/api/jobs/reorder/smooth",
    request_body = BulkReorderPayload,
    responses(
        (status = 200, description = "Orders applied"),
        (status = 400, description = "Updates would not leave a dense 1..N ordering"),
        (status = 404, description = "Unknown job id")
    )
)]
#[axum::debug_handler]
pub async fn bulk_reorder_jobs(
    State(state): State<AppState>,
    Json(payload): Json<BulkReorderPayload>,
) -> Result<impl IntoResponse> {
    let service = state.job_service.clone();
    blocking(move || service.bulk_reorder(&payload.updates)).await?;
    Ok(Json(SuccessResponse::ok()))
}
