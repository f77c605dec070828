use axum::{
    extract::State,
    response::{IntoResponse, Json},
};

use crate::{error::Result, routes::blocking, AppState};

#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    responses(
        (status = 200, description = "Job, candidate and assessment counters", body = crate::dto::dashboard_dto::DashboardStats)
    )
)]
#[axum::debug_handler]
pub async fn get_dashboard_stats(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let service = state.dashboard_service.clone();
    let stats = blocking(move || service.stats()).await?;
    Ok(Json(stats))
}
