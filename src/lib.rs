pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::config::Config;
use crate::database::memory::MemoryStore;
use crate::services::{
    assessment_service::AssessmentService, candidate_service::CandidateService,
    dashboard_service::DashboardService, job_service::JobService,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub job_service: JobService,
    pub candidate_service: CandidateService,
    pub assessment_service: AssessmentService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub fn new(config: Arc<Config>, store: Arc<MemoryStore>) -> Self {
        let job_service = JobService::new(
            store.clone(),
            store.clone(),
            config.default_job_page_size,
        );
        let candidate_service = CandidateService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            config.default_candidate_page_size,
        );
        let assessment_service = AssessmentService::new(store.clone(), store.clone(), store);
        let dashboard_service = DashboardService::new(
            job_service.clone(),
            candidate_service.clone(),
            assessment_service.clone(),
        );

        Self {
            config,
            job_service,
            candidate_service,
            assessment_service,
            dashboard_service,
        }
    }
}
